//! Configuration document operations: fragment merging and field assignment.
//!
//! Merge rules:
//! 1. Fragments merge strictly in `load` order; each merge completes before
//!    the next begins.
//! 2. On name collision, later values override earlier ones. Parameter sets
//!    merge recursively; everything else is replaced wholesale.
//! 3. `declare` (unlike `load`) treats a name collision as an error — it is
//!    the one-shot declaration API, not the override API.

use std::path::Path;

use tracing::{info, warn};

use modules::{ParamValue, ParameterSet};

use crate::{
    AssemblyError,
    models::{Fragment, ModuleInstance, PathDef, Process},
};

/// Replace the members of `name` if present (keeping its position), else
/// append a new definition.
pub(crate) fn upsert_path(list: &mut Vec<PathDef>, incoming: PathDef) {
    match list.iter_mut().find(|p| p.name == incoming.name) {
        Some(existing) => {
            warn!("path '{}' redefined; later fragment wins", incoming.name);
            existing.members = incoming.members;
        }
        None => list.push(incoming),
    }
}

impl Process {
    /// Merge a fragment's declarations into this document.
    pub fn load(&mut self, fragment: Fragment) {
        info!(
            "merging fragment: {} instance(s), {} path(s), {} end-path(s)",
            fragment.instances.len(),
            fragment.paths.len(),
            fragment.end_paths.len()
        );

        for incoming in fragment.instances {
            match self.instances.iter_mut().find(|i| i.name == incoming.name) {
                Some(existing) => {
                    warn!("instance '{}' redeclared; later fragment wins", incoming.name);
                    if existing.module_type != incoming.module_type {
                        existing.module_type = incoming.module_type;
                    }
                    existing.params.merge_from(incoming.params);
                }
                None => self.instances.push(incoming),
            }
        }

        for path in fragment.paths {
            upsert_path(&mut self.paths, path);
        }
        for end_path in fragment.end_paths {
            upsert_path(&mut self.end_paths, end_path);
        }

        if let Some(schedule) = fragment.schedule {
            self.schedule = Some(schedule);
        }

        self.options.merge_from(fragment.options);
    }

    /// Read a fragment file (JSON) and merge it into this document.
    ///
    /// # Errors
    /// - [`AssemblyError::Io`] if the file cannot be read.
    /// - [`AssemblyError::Json`] if it does not parse as a fragment.
    pub fn load_file(&mut self, path: &Path) -> Result<(), AssemblyError> {
        let text = std::fs::read_to_string(path).map_err(|source| AssemblyError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let fragment: Fragment =
            serde_json::from_str(&text).map_err(|source| AssemblyError::Json {
                path: path.display().to_string(),
                source,
            })?;

        info!("loaded fragment '{}'", path.display());
        self.load(fragment);
        Ok(())
    }

    /// Declare a new instance.
    ///
    /// # Errors
    /// [`AssemblyError::DuplicateInstanceName`] if the name is already taken.
    pub fn declare(&mut self, instance: ModuleInstance) -> Result<(), AssemblyError> {
        if self.instance(&instance.name).is_some() {
            return Err(AssemblyError::DuplicateInstanceName(instance.name));
        }
        self.instances.push(instance);
        Ok(())
    }

    /// Assign one parameter on a declared instance.
    ///
    /// # Errors
    /// [`AssemblyError::UnknownInstance`] if `instance_name` was never
    /// declared.
    pub fn set(
        &mut self,
        instance_name: &str,
        param: impl Into<String>,
        value: ParamValue,
    ) -> Result<(), AssemblyError> {
        let instance = self
            .instances
            .iter_mut()
            .find(|i| i.name == instance_name)
            .ok_or_else(|| AssemblyError::UnknownInstance(instance_name.to_owned()))?;

        let param = param.into();
        if instance.params.insert(param.clone(), value).is_some() {
            warn!("overrode parameter '{}' on instance '{}'", param, instance_name);
        }
        Ok(())
    }

    /// Assign one job-level option.
    pub fn set_option(&mut self, name: impl Into<String>, value: ParamValue) {
        self.options.insert(name, value);
    }
}
