//! Module registry — maps type names to `ModuleFactory` implementations.

use std::collections::HashMap;
use std::sync::Arc;

use modules::builtin::{OutputModuleFactory, SourceFactory};
use modules::{ModuleFactory, ParameterSet};
use tracing::debug;

use crate::{AssemblyError, models::ModuleInstance};

/// Registry of the module types a job may declare.
///
/// Collaborator packages register their factories at startup; `instantiate`
/// dispatches parameter checking through the registered factory and returns
/// the validated [`ModuleInstance`].
#[derive(Default)]
pub struct ModuleRegistry {
    factories: HashMap<String, Arc<dyn ModuleFactory>>,
}

impl ModuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the built-in `Source` and `OutputModule`
    /// factories.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SourceFactory));
        registry.register(Arc::new(OutputModuleFactory));
        registry
    }

    /// Register `factory` under its own type name. Re-registering a type
    /// name replaces the previous factory.
    pub fn register(&mut self, factory: Arc<dyn ModuleFactory>) {
        debug!("registering module type '{}'", factory.type_name());
        self.factories.insert(factory.type_name().to_owned(), factory);
    }

    /// True if a factory is registered under `type_name`.
    pub fn knows(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Instantiate `type_name` as `instance_name` with `params`.
    ///
    /// # Errors
    /// - [`AssemblyError::UnknownModuleType`] if no factory is registered.
    /// - [`AssemblyError::Module`] if the factory rejects the parameters.
    pub fn instantiate(
        &self,
        type_name: &str,
        instance_name: impl Into<String>,
        params: ParameterSet,
    ) -> Result<ModuleInstance, AssemblyError> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| AssemblyError::UnknownModuleType(type_name.to_owned()))?;

        let params = factory.instantiate(params)?;

        Ok(ModuleInstance {
            name: instance_name.into(),
            module_type: type_name.to_owned(),
            params,
        })
    }
}
