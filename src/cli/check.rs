use std::path::{Path, PathBuf};
use std::process;

use clap::Args;
use rayon::prelude::*;

use jsx_conditionals::adapter::adapter_for_path;
use jsx_conditionals::check_with_adapter;
use jsx_conditionals::diagnostic::Diagnostic;
use jsx_conditionals::transform::TransformStats;

use super::{format_stats, read_source, report, resolve_input, ResolvedInput};

#[derive(Args)]
pub struct CheckArgs {
    /// Input file, or a directory with conditionals.toml
    pub input: PathBuf,
    /// Print per-file transform statistics
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn cmd_check(args: CheckArgs) {
    let CheckArgs { input, verbose } = args;
    let files = match resolve_input(&input) {
        ResolvedInput::File { path, .. } => vec![path],
        ResolvedInput::Project(project) => project.source_files(),
    };
    if files.is_empty() {
        eprintln!("No source files found in '{}'", input.display());
        return;
    }

    let results: Vec<bool> = files
        .par_iter()
        .map(|path| {
            let source = read_source(path);
            let adapter = adapter_for_path(path);
            let result = check_with_adapter(adapter.as_ref(), &source, &path.to_string_lossy());
            (path, source, result)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|(path, source, result)| check_one(path, &source, result, verbose))
        .collect();

    if results.iter().any(|ok| !ok) {
        process::exit(1);
    }
}

fn check_one(
    path: &Path,
    source: &str,
    result: Result<TransformStats, Vec<Diagnostic>>,
    verbose: bool,
) -> bool {
    match result {
        Ok(stats) => {
            eprintln!("OK: {}", path.display());
            if verbose {
                eprintln!("{}", format_stats(&stats));
            }
            true
        }
        Err(diagnostics) => {
            report(path, source, &diagnostics);
            false
        }
    }
}
