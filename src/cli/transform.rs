use std::path::PathBuf;
use std::process;

use clap::Args;

use jsx_conditionals::adapter::adapter_for_path;
use jsx_conditionals::{
    map_path_for, transform_file, transform_project, transform_with_adapter, write_outcome,
    FileOutcome, TransformOptions,
};

use super::{format_stats, report, resolve_input, ResolvedInput};

#[derive(Args)]
pub struct TransformArgs {
    /// Input file, or a directory with conditionals.toml
    pub input: PathBuf,
    /// Output file, or output directory for a project (default: stdout
    /// for a file, the configured out_dir for a project)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write a .map file next to each output
    #[arg(long)]
    pub source_map: bool,
    /// Print per-file transform statistics
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn cmd_transform(args: TransformArgs) {
    let TransformArgs {
        input,
        output,
        source_map,
        verbose,
    } = args;

    match resolve_input(&input) {
        ResolvedInput::File { path, project } => {
            let options = TransformOptions {
                source_maps: source_map || project.as_ref().is_some_and(|p| p.source_maps),
            };
            match output {
                Some(out) => {
                    let outcome = transform_file(&path, out, &options);
                    if !finish(&outcome, verbose) {
                        process::exit(1);
                    }
                }
                None => transform_to_stdout(&path, verbose),
            }
        }
        ResolvedInput::Project(mut project) => {
            if let Some(out) = output {
                project.out_dir = out;
            }
            let options = TransformOptions {
                source_maps: source_map || project.source_maps,
            };
            let outcomes = transform_project(&project, &options);
            if outcomes.is_empty() {
                eprintln!(
                    "No source files found in '{}'",
                    project.source_dir.display()
                );
                return;
            }

            let failed = outcomes
                .iter()
                .filter(|outcome| !finish(outcome, verbose))
                .count();
            if failed > 0 {
                eprintln!("error: {} of {} file(s) failed", failed, outcomes.len());
                process::exit(1);
            }
        }
    }
}

/// Report and write one outcome. Returns false on failure.
fn finish(outcome: &FileOutcome, verbose: bool) -> bool {
    let output = match &outcome.result {
        Ok(output) => output,
        Err(diagnostics) => {
            report(&outcome.source_path, &outcome.source, diagnostics);
            eprintln!("error: cannot transform '{}'", outcome.source_path.display());
            return false;
        }
    };
    if let Err(e) = write_outcome(outcome) {
        eprintln!("error: {}", e.message);
        return false;
    }
    eprintln!(
        "Transformed: {} -> {}",
        outcome.source_path.display(),
        outcome.output_path.display()
    );
    if output.source_map.is_some() {
        eprintln!("  map: {}", map_path_for(&outcome.output_path).display());
    }
    if verbose {
        eprintln!("{}", format_stats(&output.stats));
    }
    true
}

fn transform_to_stdout(path: &std::path::Path, verbose: bool) {
    let source = super::read_source(path);
    let filename = path.to_string_lossy();
    let options = TransformOptions { source_maps: false };
    let adapter = adapter_for_path(path);
    match transform_with_adapter(adapter.as_ref(), &source, &filename, &options) {
        Ok(output) => {
            print!("{}", output.code);
            if verbose {
                eprintln!("{}", format_stats(&output.stats));
            }
        }
        Err(diagnostics) => {
            report(path, &source, &diagnostics);
            process::exit(1);
        }
    }
}
