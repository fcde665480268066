//! Module-level error type.

use thiserror::Error;

/// Errors returned by a factory's `instantiate` method.
///
/// All of these are assembly-time configuration errors: the parameter set
/// handed to the factory does not satisfy the module type's schema. None are
/// retried; the assembler surfaces them immediately with the offending name.
#[derive(Debug, Error, Clone)]
pub enum ModuleError {
    /// A parameter the module type requires was not supplied.
    #[error("module type '{module_type}' requires parameter '{param}'")]
    MissingParameter {
        module_type: &'static str,
        param: &'static str,
    },

    /// A parameter was supplied with the wrong value kind.
    #[error("parameter '{param}' has kind {found}, expected {expected}")]
    WrongKind {
        param: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The factory rejected the parameter set for a type-specific reason.
    #[error("parameter set rejected: {0}")]
    Rejected(String),
}
