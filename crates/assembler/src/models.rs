//! Core domain models for the configuration assembler.
//!
//! These types are the source of truth for what a process configuration
//! looks like in memory. They serialise to/from the JSON documents the
//! external runner consumes.

use chrono::{DateTime, Utc};
use modules::{ParamValue, ParameterSet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ModuleInstance
// ---------------------------------------------------------------------------

/// A named, parametrized occurrence of a registered module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInstance {
    /// Unique identifier within the process (referenced by paths).
    pub name: String,
    /// Maps to a registered `ModuleFactory` implementation.
    pub module_type: String,
    /// Typed configuration carried into the runner.
    pub params: ParameterSet,
}

// ---------------------------------------------------------------------------
// PathDef
// ---------------------------------------------------------------------------

/// A named, ordered sequence of instance references.
///
/// The same shape serves both Paths and EndPaths; which list a definition
/// lives in decides when the runner executes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDef {
    pub name: String,
    pub members: Vec<String>,
}

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// A partial configuration document, merged into a [`Process`] by `load`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub instances: Vec<ModuleInstance>,
    #[serde(default)]
    pub paths: Vec<PathDef>,
    #[serde(default)]
    pub end_paths: Vec<PathDef>,
    #[serde(default)]
    pub schedule: Option<Vec<String>>,
    #[serde(default)]
    pub options: ParameterSet,
}

// ---------------------------------------------------------------------------
// Process
// ---------------------------------------------------------------------------

/// The root configuration document for one job.
///
/// Created once, mutated by sequential `load`/`declare`/`set`/builder calls,
/// and handed off immutably via `finalize`. Declaration order is preserved
/// everywhere; it is what the merge rules are defined against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: Uuid,
    /// Job label (the original scripts call this the process name).
    pub label: String,
    pub created_at: DateTime<Utc>,
    /// Job-level options (summary flags, event limits, …), opaque here.
    pub options: ParameterSet,
    pub instances: Vec<ModuleInstance>,
    pub paths: Vec<PathDef>,
    pub end_paths: Vec<PathDef>,
    /// Explicit schedule; `None` means "all paths, then all end-paths".
    pub schedule: Option<Vec<String>>,
}

impl Process {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            created_at: Utc::now(),
            options: ParameterSet::new(),
            instances: Vec::new(),
            paths: Vec::new(),
            end_paths: Vec::new(),
            schedule: None,
        }
    }

    /// Look up a declared instance by name.
    pub fn instance(&self, name: &str) -> Option<&ModuleInstance> {
        self.instances.iter().find(|i| i.name == name)
    }

    /// Look up a path or end-path by name.
    pub fn path(&self, name: &str) -> Option<&PathDef> {
        self.paths
            .iter()
            .chain(self.end_paths.iter())
            .find(|p| p.name == name)
    }
}

// ---------------------------------------------------------------------------
// FinalizedProcess
// ---------------------------------------------------------------------------

/// The immutable hand-off artifact produced by `Process::finalize`.
///
/// All `Ref` parameters have been substituted by the referenced literals and
/// the schedule has been validated and made explicit. The runner consumes
/// this; nothing in this crate mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizedProcess {
    pub(crate) id: Uuid,
    pub(crate) label: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) options: ParameterSet,
    pub(crate) instances: Vec<ModuleInstance>,
    pub(crate) paths: Vec<PathDef>,
    pub(crate) end_paths: Vec<PathDef>,
    pub(crate) schedule: Vec<String>,
}

impl FinalizedProcess {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn options(&self) -> &ParameterSet {
        &self.options
    }

    pub fn instances(&self) -> &[ModuleInstance] {
        &self.instances
    }

    pub fn instance(&self, name: &str) -> Option<&ModuleInstance> {
        self.instances.iter().find(|i| i.name == name)
    }

    pub fn paths(&self) -> &[PathDef] {
        &self.paths
    }

    pub fn end_paths(&self) -> &[PathDef] {
        &self.end_paths
    }

    /// The explicit, validated execution order.
    pub fn schedule(&self) -> &[String] {
        &self.schedule
    }

    /// Typed accessor for a string-list parameter of an instance, e.g. an
    /// output module's resolved command list.
    pub fn string_list(&self, instance: &str, param: &str) -> Option<&[String]> {
        match self.instance(instance)?.params.get(param)? {
            ParamValue::Strings(v) => Some(v),
            _ => None,
        }
    }
}
