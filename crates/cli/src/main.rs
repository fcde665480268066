//! `pipewright` CLI entry-point.
//!
//! Available sub-commands:
//! - `assemble` — merge fragment files into a finalized process document.
//! - `validate` — validate an assembled process document.
//! - `show`     — print a summary of a process document.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use assembler::Process;

#[derive(Parser)]
#[command(
    name = "pipewright",
    about = "Pipeline configuration assembler",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge fragment files (in order) and write the finalized document.
    Assemble {
        /// Process label recorded in the document.
        #[arg(long, default_value = "JOB")]
        label: String,
        /// Fragment files, merged in the order given (later files win).
        #[arg(long = "fragment", required = true)]
        fragments: Vec<PathBuf>,
        /// Where to write the finalized document.
        #[arg(short = 'o', long)]
        out: PathBuf,
    },
    /// Validate a process document JSON file.
    Validate {
        /// Path to the process document.
        path: PathBuf,
    },
    /// Print a human-readable summary of a process document.
    Show {
        /// Path to the process document.
        path: PathBuf,
    },
}

fn read_process(path: &PathBuf) -> anyhow::Result<Process> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    let process: Process =
        serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))?;
    Ok(process)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Assemble { label, fragments, out } => {
            let mut process = Process::new(label);
            for fragment in &fragments {
                process
                    .load_file(fragment)
                    .with_context(|| format!("while merging {}", fragment.display()))?;
            }

            let finalized = process.finalize()?;
            info!(
                "assembled '{}' with {} instance(s)",
                finalized.label(),
                finalized.instances().len()
            );

            let json = serde_json::to_string_pretty(&finalized)?;
            std::fs::write(&out, json)
                .with_context(|| format!("cannot write {}", out.display()))?;
            println!("✅ Wrote finalized process to {}", out.display());
        }

        Command::Validate { path } => {
            let process = read_process(&path)?;

            match process.finalize() {
                Ok(finalized) => {
                    println!("✅ Configuration is valid. Schedule: {:?}", finalized.schedule());
                }
                Err(e) => {
                    eprintln!("❌ Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }

        Command::Show { path } => {
            let process = read_process(&path)?;

            println!("process '{}' ({})", process.label, process.id);
            println!("instances:");
            for instance in &process.instances {
                println!(
                    "  {:<24} {} ({} parameter(s))",
                    instance.name,
                    instance.module_type,
                    instance.params.len()
                );
            }
            println!("paths:");
            for path_def in &process.paths {
                println!("  {:<24} {}", path_def.name, path_def.members.join(" → "));
            }
            println!("end-paths:");
            for path_def in &process.end_paths {
                println!("  {:<24} {}", path_def.name, path_def.members.join(" → "));
            }
            match &process.schedule {
                Some(entries) => println!("schedule: {}", entries.join(", ")),
                None => println!("schedule: (implicit: all paths, then end-paths)"),
            }
        }
    }

    Ok(())
}
