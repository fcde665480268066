//! Built-in factories for the two module types every job needs: an event
//! source and a selective output writer.
//!
//! Everything else (filters, producers, calibration modules, …) is expected
//! to come from external collaborator packages that register their own
//! factories. Parameters a factory does not know about are passed through
//! untouched so collaborator-specific knobs survive assembly.

use crate::{
    ModuleError,
    params::{ParamValue, ParameterSet},
    traits::{ModuleFactory, ModuleKind},
};

/// If `name` is present, check its kind. A `Ref` is accepted in place of any
/// kind since it is substituted at finalize time.
fn check_kind(
    params: &ParameterSet,
    name: &str,
    expected: &'static str,
) -> Result<(), ModuleError> {
    match params.get(name) {
        None | Some(ParamValue::Ref { .. }) => Ok(()),
        Some(v) if v.kind_name() == expected => Ok(()),
        Some(v) => Err(ModuleError::WrongKind {
            param: name.to_owned(),
            expected,
            found: v.kind_name(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// `Source` — reads events from one or more input files.
///
/// Required: `fileNames` (strings).
/// Optional: `maxEvents` (int, `-1` = unlimited, the default).
pub struct SourceFactory;

impl ModuleFactory for SourceFactory {
    fn type_name(&self) -> &str {
        "Source"
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Source
    }

    fn instantiate(&self, params: ParameterSet) -> Result<ParameterSet, ModuleError> {
        if !params.contains("fileNames") {
            return Err(ModuleError::MissingParameter {
                module_type: "Source",
                param: "fileNames",
            });
        }
        check_kind(&params, "fileNames", "strings")?;
        check_kind(&params, "maxEvents", "int")?;

        let mut params = params;
        if !params.contains("maxEvents") {
            params.insert("maxEvents", ParamValue::Int(-1));
        }
        Ok(params)
    }
}

// ---------------------------------------------------------------------------
// OutputModule
// ---------------------------------------------------------------------------

/// `OutputModule` — writes selected events plus metadata to a named file.
///
/// Required: `fileName` (str).
/// Optional: `dataTier` (str), `filterName` (str), `selectEvents` (strings of
/// path names gating the write; empty = write every event), `outputCommands`
/// (strings, or a ref to another instance's precomputed command list;
/// defaults to keeping everything).
pub struct OutputModuleFactory;

impl ModuleFactory for OutputModuleFactory {
    fn type_name(&self) -> &str {
        "OutputModule"
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Output
    }

    fn instantiate(&self, params: ParameterSet) -> Result<ParameterSet, ModuleError> {
        if !params.contains("fileName") {
            return Err(ModuleError::MissingParameter {
                module_type: "OutputModule",
                param: "fileName",
            });
        }
        check_kind(&params, "fileName", "str")?;
        check_kind(&params, "dataTier", "str")?;
        check_kind(&params, "filterName", "str")?;
        check_kind(&params, "selectEvents", "strings")?;
        check_kind(&params, "outputCommands", "strings")?;

        let mut params = params;
        if !params.contains("selectEvents") {
            params.insert("selectEvents", ParamValue::Strings(Vec::new()));
        }
        if !params.contains("outputCommands") {
            params.insert("outputCommands", ParamValue::Strings(vec!["keep *".into()]));
        }
        Ok(params)
    }
}
