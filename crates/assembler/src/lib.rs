//! `assembler` crate — the configuration document, module registry, and
//! path/schedule builder.
//!
//! Assembly is synchronous and strictly ordered: fragments merge in call
//! order, instances are declared and parametrized, paths and a schedule are
//! built from them, and `finalize` hands the validated, reference-resolved
//! document off as an immutable [`FinalizedProcess`].

pub mod models;
pub mod error;
pub mod registry;
pub mod document;
pub mod schedule;

pub use models::{Fragment, FinalizedProcess, ModuleInstance, PathDef, Process};
pub use error::AssemblyError;
pub use registry::ModuleRegistry;

#[cfg(test)]
mod assembler_tests;
