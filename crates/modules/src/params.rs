//! Typed parameter values and ordered parameter sets.
//!
//! Defined here (in the modules crate) so both the assembler and individual
//! factory implementations can import them without a circular dependency.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ParamValue
// ---------------------------------------------------------------------------

/// A single typed parameter value.
///
/// `Ref` points at a parameter of another declared instance; it is resolved
/// into the referenced literal when the process is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Bool(bool),
    /// Signed so that counters can use `-1` as the "unlimited" sentinel.
    Int(i64),
    Double(f64),
    Str(String),
    Strings(Vec<String>),
    /// Nested parameter set.
    Pset(ParameterSet),
    /// Reference to `instance`'s parameter `param`, resolved at finalize time.
    Ref { instance: String, param: String },
}

impl ParamValue {
    /// Short kind label used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Str(_) => "str",
            Self::Strings(_) => "strings",
            Self::Pset(_) => "pset",
            Self::Ref { .. } => "ref",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::Strings(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pset(&self) -> Option<&ParameterSet> {
        match self {
            Self::Pset(ps) => Some(ps),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ParameterSet
// ---------------------------------------------------------------------------

/// An ordered mapping from parameter name to [`ParamValue`].
///
/// Insertion order is preserved; overriding an existing name keeps its
/// original position. Serialized as a list of `[name, value]` pairs so the
/// order survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Set `name` to `value`, returning the previous value if one existed.
    /// An existing entry keeps its position; a new entry is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style `insert`, for declaring parameter sets inline.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Merge `other` into `self`: later values win on name collision, except
    /// that two nested `Pset` values merge recursively instead of replacing.
    pub fn merge_from(&mut self, other: ParameterSet) {
        for (name, incoming) in other.entries {
            match (self.get_mut(&name), incoming) {
                (Some(ParamValue::Pset(existing)), ParamValue::Pset(nested)) => {
                    existing.merge_from(nested);
                }
                (_, incoming) => {
                    self.insert(name, incoming);
                }
            }
        }
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut ParamValue> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl FromIterator<(String, ParamValue)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
