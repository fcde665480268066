//! The `ModuleFactory` trait — the contract every module type must fulfil.

use serde::{Deserialize, Serialize};

use crate::{ModuleError, params::ParameterSet};

/// Broad role a module plays in the pipeline.
///
/// The assembler only uses this for reporting; the semantics of each role
/// belong to the external runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// Produces the event stream (one per process).
    Source,
    /// Derives new event content.
    Producer,
    /// Decides whether the event continues down its path.
    Filter,
    /// Writes selected events plus metadata to a file.
    Output,
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Producer => write!(f, "producer"),
            Self::Filter => write!(f, "filter"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// The core factory trait.
///
/// A factory is a build-time validator for one module type: it checks the
/// supplied parameters against the type's schema, fills in defaults, and
/// returns the parameter set an instance of that type should carry. It never
/// touches event data.
pub trait ModuleFactory: Send + Sync {
    /// Type name instances are declared with (e.g. `"Source"`).
    fn type_name(&self) -> &str;

    /// Role instances of this type play in a path.
    fn kind(&self) -> ModuleKind;

    /// Validate `params` and fill defaults.
    ///
    /// # Errors
    /// [`ModuleError`] when a required parameter is missing, a parameter has
    /// the wrong kind, or the set is rejected for a type-specific reason.
    fn instantiate(&self, params: ParameterSet) -> Result<ParameterSet, ModuleError>;
}
