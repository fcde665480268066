//! Assembly-level error types.

use thiserror::Error;

/// Errors produced while assembling a process configuration.
///
/// Every variant is a build-time configuration error: all of them are fatal,
/// none are retried, and each carries the offending name.
#[derive(Debug, Error)]
pub enum AssemblyError {
    // ------ Registry errors ------

    /// No factory is registered under the requested type name.
    #[error("unknown module type '{0}'")]
    UnknownModuleType(String),

    // ------ Document errors ------

    /// Two instances were declared under the same name.
    #[error("duplicate instance name '{0}'")]
    DuplicateInstanceName(String),

    /// Two paths (or a path and an end-path) share a name.
    #[error("duplicate path name '{0}'")]
    DuplicatePathName(String),

    /// `set` targeted an instance that was never declared.
    #[error("no instance named '{0}' has been declared")]
    UnknownInstance(String),

    // ------ Schedule errors ------

    /// A path member or schedule entry does not resolve to a declared entity.
    #[error("'{context}' references unknown {expected} '{reference}'")]
    ScheduleValidation {
        context: String,
        expected: &'static str,
        reference: String,
    },

    // ------ Reference resolution errors ------

    /// A `Ref` parameter points at a missing instance or parameter.
    #[error("parameter '{param}' of '{instance}' references missing '{target}.{target_param}'")]
    UnresolvedReference {
        instance: String,
        param: String,
        target: String,
        target_param: String,
    },

    /// Following `Ref` parameters revisited an instance parameter.
    #[error("parameter references form a cycle at '{instance}.{param}'")]
    ReferenceCycle { instance: String, param: String },

    // ------ Bridged errors ------

    /// A factory rejected the parameters handed to `instantiate`.
    #[error("module error: {0}")]
    Module(#[from] modules::ModuleError),

    /// A fragment file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A fragment file is not valid JSON for the fragment schema.
    #[error("malformed fragment '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
