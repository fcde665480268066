//! Path and schedule building, validation, and finalization.
//!
//! Rules enforced:
//! 1. Path and end-path members must reference already-declared instances;
//!    the first unresolved reference is reported.
//! 2. Schedule entries must reference defined paths or end-paths.
//! 3. Instance names and path names must be unique document-wide.
//! 4. `Ref` parameters must resolve, acyclically, to a literal value of a
//!    declared instance.
//!
//! Everything is checked at build time; the runner never sees an unvalidated
//! document.

use std::collections::HashSet;

use tracing::info;

use modules::{ParamValue, ParameterSet};

use crate::{
    AssemblyError,
    document::upsert_path,
    models::{FinalizedProcess, ModuleInstance, PathDef, Process},
};

impl Process {
    /// Define (or redefine) a path over already-declared instances.
    ///
    /// # Errors
    /// - [`AssemblyError::ScheduleValidation`] naming the first member that
    ///   does not resolve to a declared instance.
    /// - [`AssemblyError::DuplicatePathName`] if the name is taken by an
    ///   end-path.
    pub fn define_path(
        &mut self,
        name: impl Into<String>,
        members: Vec<String>,
    ) -> Result<(), AssemblyError> {
        let name = name.into();
        if self.end_paths.iter().any(|p| p.name == name) {
            return Err(AssemblyError::DuplicatePathName(name));
        }
        self.check_members(&name, &members)?;

        info!("path '{}' defined with {} member(s)", name, members.len());
        upsert_path(&mut self.paths, PathDef { name, members });
        Ok(())
    }

    /// Define (or redefine) an end-path. End-paths run after all ordinary
    /// paths in the same event; output modules belong here.
    ///
    /// # Errors
    /// Same as [`Process::define_path`], with the roles swapped.
    pub fn define_end_path(
        &mut self,
        name: impl Into<String>,
        members: Vec<String>,
    ) -> Result<(), AssemblyError> {
        let name = name.into();
        if self.paths.iter().any(|p| p.name == name) {
            return Err(AssemblyError::DuplicatePathName(name));
        }
        self.check_members(&name, &members)?;

        info!("end-path '{}' defined with {} member(s)", name, members.len());
        upsert_path(&mut self.end_paths, PathDef { name, members });
        Ok(())
    }

    /// Select which paths actually run, in order. Paths not listed are inert.
    ///
    /// # Errors
    /// [`AssemblyError::ScheduleValidation`] naming the first entry that is
    /// neither a defined path nor a defined end-path.
    pub fn set_schedule(&mut self, entries: Vec<String>) -> Result<(), AssemblyError> {
        for entry in &entries {
            if self.path(entry).is_none() {
                return Err(AssemblyError::ScheduleValidation {
                    context: "schedule".into(),
                    expected: "path",
                    reference: entry.clone(),
                });
            }
        }

        info!("schedule set: {:?}", entries);
        self.schedule = Some(entries);
        Ok(())
    }

    fn check_members(&self, path_name: &str, members: &[String]) -> Result<(), AssemblyError> {
        for member in members {
            if self.instance(member).is_none() {
                return Err(AssemblyError::ScheduleValidation {
                    context: path_name.to_owned(),
                    expected: "instance",
                    reference: member.clone(),
                });
            }
        }
        Ok(())
    }

    /// Validate the whole document, resolve every `Ref` parameter, and
    /// produce the immutable hand-off artifact.
    ///
    /// Documents built through the `define_*`/`set_schedule` methods were
    /// validated incrementally; documents deserialized from files were not,
    /// so everything is re-checked here.
    ///
    /// # Errors
    /// Any [`AssemblyError`] validation variant; the first violation in
    /// declaration order wins.
    pub fn finalize(&self) -> Result<FinalizedProcess, AssemblyError> {
        // ------------------------------------------------------------------
        // 1. Instance names are unique.
        // ------------------------------------------------------------------
        let mut seen = HashSet::new();
        for instance in &self.instances {
            if !seen.insert(instance.name.as_str()) {
                return Err(AssemblyError::DuplicateInstanceName(instance.name.clone()));
            }
        }

        // ------------------------------------------------------------------
        // 2. Path names are unique across paths and end-paths.
        // ------------------------------------------------------------------
        let mut seen = HashSet::new();
        for path in self.paths.iter().chain(self.end_paths.iter()) {
            if !seen.insert(path.name.as_str()) {
                return Err(AssemblyError::DuplicatePathName(path.name.clone()));
            }
        }

        // ------------------------------------------------------------------
        // 3. Path members and schedule entries resolve.
        // ------------------------------------------------------------------
        for path in self.paths.iter().chain(self.end_paths.iter()) {
            self.check_members(&path.name, &path.members)?;
        }
        if let Some(entries) = &self.schedule {
            for entry in entries {
                if self.path(entry).is_none() {
                    return Err(AssemblyError::ScheduleValidation {
                        context: "schedule".into(),
                        expected: "path",
                        reference: entry.clone(),
                    });
                }
            }
        }

        // ------------------------------------------------------------------
        // 4. Resolve Ref parameters into literals.
        // ------------------------------------------------------------------
        let instances = self
            .instances
            .iter()
            .map(|instance| {
                let mut stack = Vec::new();
                let params = resolve_set(
                    &instance.name,
                    &instance.params,
                    &self.instances,
                    &mut stack,
                )?;
                Ok(ModuleInstance {
                    name: instance.name.clone(),
                    module_type: instance.module_type.clone(),
                    params,
                })
            })
            .collect::<Result<Vec<_>, AssemblyError>>()?;

        // ------------------------------------------------------------------
        // 5. Make the schedule explicit: declared order, or every path in
        //    definition order followed by every end-path.
        // ------------------------------------------------------------------
        let schedule = match &self.schedule {
            Some(entries) => entries.clone(),
            None => self
                .paths
                .iter()
                .chain(self.end_paths.iter())
                .map(|p| p.name.clone())
                .collect(),
        };

        info!(
            "process '{}' finalized: {} instance(s), schedule {:?}",
            self.label,
            instances.len(),
            schedule
        );

        Ok(FinalizedProcess {
            id: self.id,
            label: self.label.clone(),
            created_at: self.created_at,
            options: self.options.clone(),
            instances,
            paths: self.paths.clone(),
            end_paths: self.end_paths.clone(),
            schedule,
        })
    }
}

// ---------------------------------------------------------------------------
// Ref resolution
// ---------------------------------------------------------------------------

fn resolve_set(
    owner: &str,
    params: &ParameterSet,
    instances: &[ModuleInstance],
    stack: &mut Vec<(String, String)>,
) -> Result<ParameterSet, AssemblyError> {
    let mut out = ParameterSet::new();
    for (name, value) in params.iter() {
        out.insert(name, resolve_value(owner, name, value, instances, stack)?);
    }
    Ok(out)
}

/// Substitute a `Ref` by the literal it (transitively) points at.
/// `stack` holds the chain of (instance, param) pairs already being followed;
/// revisiting one means the references loop.
fn resolve_value(
    owner: &str,
    param: &str,
    value: &ParamValue,
    instances: &[ModuleInstance],
    stack: &mut Vec<(String, String)>,
) -> Result<ParamValue, AssemblyError> {
    match value {
        ParamValue::Ref {
            instance: target,
            param: target_param,
        } => {
            let key = (target.clone(), target_param.clone());
            if stack.contains(&key) {
                return Err(AssemblyError::ReferenceCycle {
                    instance: owner.to_owned(),
                    param: param.to_owned(),
                });
            }

            let target_instance = instances
                .iter()
                .find(|i| i.name == *target)
                .ok_or_else(|| AssemblyError::UnresolvedReference {
                    instance: owner.to_owned(),
                    param: param.to_owned(),
                    target: target.clone(),
                    target_param: target_param.clone(),
                })?;

            let target_value = target_instance.params.get(target_param).ok_or_else(|| {
                AssemblyError::UnresolvedReference {
                    instance: owner.to_owned(),
                    param: param.to_owned(),
                    target: target.clone(),
                    target_param: target_param.clone(),
                }
            })?;

            stack.push(key);
            let resolved = resolve_value(target, target_param, target_value, instances, stack)?;
            stack.pop();
            Ok(resolved)
        }

        ParamValue::Pset(nested) => Ok(ParamValue::Pset(resolve_set(
            owner, nested, instances, stack,
        )?)),

        literal => Ok(literal.clone()),
    }
}
