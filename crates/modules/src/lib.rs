//! `modules` crate — the parameter model, the `ModuleFactory` trait, and the
//! built-in module factories.
//!
//! Every module type a job can reference — built-in and external collaborator
//! alike — is represented by a [`ModuleFactory`]. The assembler crate
//! dispatches instantiation through this trait object; the actual per-event
//! behaviour of a module lives in the external runner and never appears here.

pub mod error;
pub mod params;
pub mod traits;
pub mod builtin;
pub mod mock;

pub use error::ModuleError;
pub use params::{ParamValue, ParameterSet};
pub use traits::{ModuleFactory, ModuleKind};
