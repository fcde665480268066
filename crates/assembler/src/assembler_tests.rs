//! Integration tests for the configuration assembler.
//!
//! These walk the whole surface the way a job script would: register module
//! types, merge fragments, declare and parametrize instances, build paths and
//! a schedule, then finalize and inspect the hand-off document.

use pretty_assertions::assert_eq;

use modules::{ParamValue, ParameterSet};

use crate::{AssemblyError, Fragment, ModuleInstance, ModuleRegistry, PathDef, Process};

fn instance(name: &str, module_type: &str, params: ParameterSet) -> ModuleInstance {
    ModuleInstance {
        name: name.into(),
        module_type: module_type.into(),
        params,
    }
}

// ============================================================
// Fragment merge semantics
// ============================================================

/// `load(F1); load(F2)` must equal a single manual merge with F2 winning on
/// collisions.
#[test]
fn sequential_loads_equal_manual_merge() {
    let f1 = Fragment {
        instances: vec![
            instance(
                "source",
                "Source",
                ParameterSet::new()
                    .with("fileNames", ParamValue::Strings(vec!["file:a.dat".into()]))
                    .with("maxEvents", ParamValue::Int(100)),
            ),
            instance(
                "writer",
                "OutputModule",
                ParameterSet::new().with("fileName", ParamValue::Str("a.out".into())),
            ),
        ],
        paths: vec![PathDef { name: "p".into(), members: vec!["writer".into()] }],
        options: ParameterSet::new().with("wantSummary", ParamValue::Bool(false)),
        ..Fragment::default()
    };
    let f2 = Fragment {
        instances: vec![instance(
            "source",
            "Source",
            ParameterSet::new().with("maxEvents", ParamValue::Int(-1)),
        )],
        options: ParameterSet::new().with("wantSummary", ParamValue::Bool(true)),
        ..Fragment::default()
    };

    let mut sequential = Process::new("JOB");
    sequential.load(f1.clone());
    sequential.load(f2);

    // Manual merge: start from F1, apply F2's overrides by hand.
    let mut merged = f1;
    merged.instances[0]
        .params
        .insert("maxEvents", ParamValue::Int(-1));
    merged.options.insert("wantSummary", ParamValue::Bool(true));

    let mut manual = Process::new("JOB");
    manual.load(merged);

    assert_eq!(sequential.instances, manual.instances);
    assert_eq!(sequential.paths, manual.paths);
    assert_eq!(sequential.options, manual.options);
}

// ============================================================
// Round trip
// ============================================================

#[test]
fn process_document_round_trips_through_json() {
    let mut process = Process::new("ROUNDTRIP");
    process
        .declare(instance(
            "source",
            "Source",
            ParameterSet::new()
                .with("fileNames", ParamValue::Strings(vec!["file:events.dat".into()]))
                .with("maxEvents", ParamValue::Int(-1)),
        ))
        .unwrap();
    process
        .declare(instance(
            "writer",
            "OutputModule",
            ParameterSet::new()
                .with("fileName", ParamValue::Str("x.out".into()))
                .with(
                    "dataset",
                    ParamValue::Pset(
                        ParameterSet::new()
                            .with("dataTier", ParamValue::Str("ALCARECO".into()))
                            .with("filterName", ParamValue::Str("IsoTrackSelect".into())),
                    ),
                ),
        ))
        .unwrap();
    process.define_end_path("write_out", vec!["writer".into()]).unwrap();
    process.set_schedule(vec!["write_out".into()]).unwrap();
    process.set_option("wantSummary", ParamValue::Bool(true));

    let json = serde_json::to_string_pretty(&process).unwrap();
    let back: Process = serde_json::from_str(&json).unwrap();

    assert_eq!(process, back);
}

// ============================================================
// Registry scenario
// ============================================================

#[test]
fn source_plus_output_scenario() {
    let registry = ModuleRegistry::with_builtins();
    let mut process = Process::new("SCENARIO");

    let source = registry
        .instantiate(
            "Source",
            "source",
            ParameterSet::new()
                .with("fileNames", ParamValue::Strings(vec!["file:in.dat".into()]))
                .with("maxEvents", ParamValue::Int(-1)),
        )
        .expect("Source is registered");
    let out = registry
        .instantiate(
            "OutputModule",
            "out",
            ParameterSet::new().with("fileName", ParamValue::Str("x.root".into())),
        )
        .expect("OutputModule is registered");

    process.declare(source).unwrap();
    process.declare(out).unwrap();
    process.define_end_path("out_path", vec!["out".into()]).unwrap();

    process
        .set_schedule(vec!["out_path".into()])
        .expect("schedule over a defined end-path");
    let finalized = process.finalize().expect("valid scenario");
    assert_eq!(finalized.schedule(), ["out_path"]);
    assert_eq!(
        finalized
            .instance("source")
            .unwrap()
            .params
            .get("maxEvents")
            .unwrap()
            .as_int(),
        Some(-1)
    );

    // A schedule naming an undefined path is a validation error carrying
    // the offending name.
    let err = process.set_schedule(vec!["missing".into()]).unwrap_err();
    match err {
        AssemblyError::ScheduleValidation { reference, .. } => assert_eq!(reference, "missing"),
        other => panic!("expected ScheduleValidation, got {other}"),
    }
}

// ============================================================
// A full job, the way the original scripts assemble one
// ============================================================

#[test]
fn calibration_style_job_assembles_end_to_end() {
    let registry = ModuleRegistry::with_builtins();
    let mut process = Process::new("ALCAISOTRACK");

    // Standard fragments: a conditions instance plus the stream's
    // precomputed output-command list and selection path.
    process.load(Fragment {
        instances: vec![
            instance(
                "globalTag",
                "ConditionsSource",
                ParameterSet::new().with("tag", ParamValue::Str("default".into())),
            ),
            instance(
                "isoTrackFilter",
                "TrackIsolationFilter",
                ParameterSet::new().with("minPt", ParamValue::Double(10.0)),
            ),
            instance(
                "streamCommands",
                "CommandList",
                ParameterSet::new().with(
                    "outputCommands",
                    ParamValue::Strings(vec![
                        "drop *".into(),
                        "keep IsolatedTracks_*".into(),
                        "keep CaloHits_*".into(),
                    ]),
                ),
            ),
        ],
        paths: vec![PathDef {
            name: "isoTrackPath".into(),
            members: vec!["isoTrackFilter".into()],
        }],
        ..Fragment::default()
    });

    // Job-script overrides on top of the fragments.
    process
        .set("globalTag", "tag", ParamValue::Str("run2_mc".into()))
        .unwrap();
    process.set_option("wantSummary", ParamValue::Bool(true));

    process
        .declare(
            registry
                .instantiate(
                    "Source",
                    "source",
                    ParameterSet::new()
                        .with("fileNames", ParamValue::Strings(vec!["file:pool.dat".into()])),
                )
                .unwrap(),
        )
        .unwrap();
    process
        .declare(
            registry
                .instantiate(
                    "OutputModule",
                    "isoTrackStream",
                    ParameterSet::new()
                        .with("fileName", ParamValue::Str("pool_out.dat".into()))
                        .with("dataTier", ParamValue::Str("ALCARECO".into()))
                        .with("filterName", ParamValue::Str("IsoTrackSelect".into()))
                        .with("selectEvents", ParamValue::Strings(vec!["isoTrackPath".into()]))
                        .with(
                            "outputCommands",
                            ParamValue::Ref {
                                instance: "streamCommands".into(),
                                param: "outputCommands".into(),
                            },
                        ),
                )
                .unwrap(),
        )
        .unwrap();

    process
        .define_end_path("isoTrackStreamOutPath", vec!["isoTrackStream".into()])
        .unwrap();
    process
        .set_schedule(vec!["isoTrackPath".into(), "isoTrackStreamOutPath".into()])
        .unwrap();

    let finalized = process.finalize().expect("job assembles");

    assert_eq!(finalized.label(), "ALCAISOTRACK");
    assert_eq!(finalized.schedule(), ["isoTrackPath", "isoTrackStreamOutPath"]);

    // The stream's command list arrived by reference and is now a literal.
    assert_eq!(
        finalized
            .string_list("isoTrackStream", "outputCommands")
            .unwrap(),
        ["drop *", "keep IsolatedTracks_*", "keep CaloHits_*"]
    );

    // The override on the loaded conditions instance stuck.
    assert_eq!(
        finalized
            .instance("globalTag")
            .unwrap()
            .params
            .get("tag")
            .unwrap()
            .as_str(),
        Some("run2_mc")
    );

    // Source default: unlimited events.
    assert_eq!(
        finalized
            .instance("source")
            .unwrap()
            .params
            .get("maxEvents")
            .unwrap()
            .as_int(),
        Some(-1)
    );
}
