pub mod check;
pub mod init;
pub mod transform;
pub mod tree;

use std::path::{Path, PathBuf};
use std::process;

use jsx_conditionals::diagnostic::{render_diagnostics, Diagnostic};
use jsx_conditionals::project::{Project, CONFIG_FILE};
use jsx_conditionals::transform::TransformStats;

/// What an input path names.
pub enum ResolvedInput {
    /// A single file, with the project it sits in, if any.
    File {
        path: PathBuf,
        project: Option<Project>,
    },
    /// A directory: every matching file under its source dir.
    Project(Project),
}

fn load_project(toml_path: &Path) -> Project {
    match Project::load(toml_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e.message);
            process::exit(1);
        }
    }
}

/// Resolve an input path (file or project directory).
///
/// A directory without a conditionals.toml is treated as a source directory
/// with default settings.
pub fn resolve_input(input: &Path) -> ResolvedInput {
    if input.is_dir() {
        let toml_path = input.join(CONFIG_FILE);
        if toml_path.exists() {
            return ResolvedInput::Project(load_project(&toml_path));
        }
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("project");
        let mut project = Project::with_defaults(name, input);
        project.source_dir = input.to_path_buf();
        return ResolvedInput::Project(project);
    }

    if !input.is_file() {
        eprintln!("error: '{}' does not exist", input.display());
        process::exit(1);
    }

    let project = Project::find(input.parent().unwrap_or(Path::new("."))).map(|p| load_project(&p));
    ResolvedInput::File {
        path: input.to_path_buf(),
        project,
    }
}

pub fn read_source(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Render diagnostics against the file they came from.
pub fn report(path: &Path, source: &str, diagnostics: &[Diagnostic]) {
    render_diagnostics(diagnostics, &path.to_string_lossy(), source);
}

pub fn format_stats(stats: &TransformStats) -> String {
    format!(
        "  chains: {}, branches: {}, imports removed: {}",
        stats.chains, stats.branches, stats.imports_removed
    )
}
