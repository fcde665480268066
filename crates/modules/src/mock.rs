//! `MockFactory` — a test double for `ModuleFactory`.
//!
//! Useful in unit and integration tests where a real module type is either
//! unavailable or irrelevant.

use std::sync::{Arc, Mutex};

use crate::{ModuleError, params::ParameterSet, traits::{ModuleFactory, ModuleKind}};

/// Behaviour injected into `MockFactory` at construction time.
pub enum MockBehaviour {
    /// Accept any parameter set unchanged.
    Accept,
    /// Reject every parameter set with the given message.
    Reject(String),
}

/// A mock factory that records every parameter set it receives and returns a
/// programmer-specified result.
pub struct MockFactory {
    /// Type name used to register the mock and in test assertions.
    pub type_name: String,
    /// Role reported by `kind()`.
    pub kind: ModuleKind,
    /// What the factory will do when `instantiate` is called.
    pub behaviour: MockBehaviour,
    /// All parameter sets seen by this factory (in call order).
    pub calls: Arc<Mutex<Vec<ParameterSet>>>,
}

impl MockFactory {
    /// Create a mock that accepts every parameter set.
    pub fn accepting(type_name: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            behaviour: MockBehaviour::Accept,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that rejects every parameter set.
    pub fn rejecting(
        type_name: impl Into<String>,
        kind: ModuleKind,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            behaviour: MockBehaviour::Reject(msg.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times this factory has been asked to instantiate.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ModuleFactory for MockFactory {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn kind(&self) -> ModuleKind {
        self.kind
    }

    fn instantiate(&self, params: ParameterSet) -> Result<ParameterSet, ModuleError> {
        self.calls.lock().unwrap().push(params.clone());

        match &self.behaviour {
            MockBehaviour::Accept => Ok(params),
            MockBehaviour::Reject(msg) => Err(ModuleError::Rejected(msg.clone())),
        }
    }
}
