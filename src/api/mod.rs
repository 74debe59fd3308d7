use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::adapter::{adapter_for_path, run_adapter, HostAdapter, SourceAdapter};
use crate::ast::navigate::branch_elements;
use crate::diagnostic::Diagnostic;
use crate::format::{format_unit_with_map, Mapping};
use crate::project::Project;
use crate::span::Span;
use crate::transform::{transform_unit, TransformStats};

#[cfg(test)]
mod tests;

/// Options controlling one transform run.
#[derive(Clone, Copy, Debug)]
pub struct TransformOptions {
    /// Produce a JSON source map alongside the code.
    pub source_maps: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self { source_maps: true }
    }
}

impl TransformOptions {
    pub fn for_project(project: &Project) -> Self {
        Self {
            source_maps: project.source_maps,
        }
    }
}

/// Printed output of a transformed unit.
#[derive(Clone, Debug)]
pub struct TransformOutput {
    pub code: String,
    /// JSON-serialized [`SourceMap`], when requested.
    pub source_map: Option<String>,
    pub stats: TransformStats,
}

/// Links every synthesized conditional and fragment in the printed code
/// back to the branch element it came from in `source`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceMap {
    pub version: u32,
    pub source: String,
    pub mappings: Vec<Mapping>,
}

impl SourceMap {
    pub fn new(source: &str, mappings: Vec<Mapping>) -> Self {
        Self {
            version: 1,
            source: source.to_string(),
            mappings,
        }
    }

    pub fn to_json(&self) -> Result<String, Diagnostic> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Diagnostic::error(format!("cannot serialize source map: {}", e), Span::dummy())
        })
    }
}

/// Transform a single source string with default options.
pub fn transform_source(source: &str, filename: &str) -> Result<TransformOutput, Vec<Diagnostic>> {
    transform_source_with_options(source, filename, &TransformOptions::default())
}

/// Transform a single source string. Diagnostics are returned, not printed.
pub fn transform_source_with_options(
    source: &str,
    filename: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, Vec<Diagnostic>> {
    let unit = crate::parse_source_silent(source, filename)?;
    let (unit, stats) =
        transform_unit(unit).map_err(|e| vec![e.in_file(filename).into_diagnostic()])?;
    debug_assert!(
        branch_elements(&unit).is_empty(),
        "branch element survived the transform"
    );

    let (code, mappings) = format_unit_with_map(&unit);
    let source_map = if options.source_maps {
        Some(
            SourceMap::new(filename, mappings)
                .to_json()
                .map_err(|d| vec![d])?,
        )
    } else {
        None
    };
    Ok(TransformOutput {
        code,
        source_map,
        stats,
    })
}

/// Transform host input through `adapter`. Source text goes through
/// [`transform_source_with_options`]; other hosts never get a source map.
pub fn transform_with_adapter(
    adapter: &dyn HostAdapter,
    input: &str,
    filename: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, Vec<Diagnostic>> {
    if adapter.maps_source() {
        return transform_source_with_options(input, filename, options);
    }
    let (code, stats) = run_adapter(adapter, input, filename)?;
    Ok(TransformOutput {
        code,
        source_map: None,
        stats,
    })
}

/// Validate without printing: parse, then run the transform and discard it.
pub fn check_source(source: &str, filename: &str) -> Result<TransformStats, Vec<Diagnostic>> {
    check_with_adapter(&SourceAdapter, source, filename)
}

/// Like [`check_source`], for any host.
pub fn check_with_adapter(
    adapter: &dyn HostAdapter,
    input: &str,
    filename: &str,
) -> Result<TransformStats, Vec<Diagnostic>> {
    let unit = adapter.lower(input, filename)?;
    transform_unit(unit)
        .map(|(_, stats)| stats)
        .map_err(|e| vec![e.in_file(filename).into_diagnostic()])
}

/// One project file after a transform run.
#[derive(Debug)]
pub struct FileOutcome {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    /// Input text, kept for rendering diagnostics.
    pub source: String,
    pub result: Result<TransformOutput, Vec<Diagnostic>>,
}

/// Transform every file of a project in parallel. Units share nothing, so
/// each file is independent; results come back in source order.
pub fn transform_project(project: &Project, options: &TransformOptions) -> Vec<FileOutcome> {
    project
        .source_files()
        .par_iter()
        .map(|path| {
            let output_path = project.output_path(path);
            transform_file(path, output_path, options)
        })
        .collect()
}

/// Read and transform one file. The extension picks the host: `.json` is
/// a serialized tree, anything else is source text.
pub fn transform_file(path: &Path, output_path: PathBuf, options: &TransformOptions) -> FileOutcome {
    let filename = path.to_string_lossy().to_string();
    match std::fs::read_to_string(path) {
        Ok(source) => {
            let adapter = adapter_for_path(path);
            let result = transform_with_adapter(adapter.as_ref(), &source, &filename, options);
            FileOutcome {
                source_path: path.to_path_buf(),
                output_path,
                source,
                result,
            }
        }
        Err(e) => FileOutcome {
            source_path: path.to_path_buf(),
            output_path,
            source: String::new(),
            result: Err(vec![Diagnostic::error(
                format!("cannot read '{}': {}", path.display(), e),
                Span::dummy(),
            )]),
        },
    }
}

/// Write a successful outcome's code (and map, if any) to its output path.
pub fn write_outcome(outcome: &FileOutcome) -> Result<(), Diagnostic> {
    let Ok(output) = &outcome.result else {
        return Ok(());
    };
    let write_err = |path: &Path, e: std::io::Error| {
        Diagnostic::error(
            format!("cannot write '{}': {}", path.display(), e),
            Span::dummy(),
        )
    };
    if let Some(parent) = outcome.output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
    }
    std::fs::write(&outcome.output_path, &output.code)
        .map_err(|e| write_err(&outcome.output_path, e))?;
    if let Some(map) = &output.source_map {
        let map_path = map_path_for(&outcome.output_path);
        std::fs::write(&map_path, map).map_err(|e| write_err(&map_path, e))?;
    }
    Ok(())
}

/// `page.jsx` → `page.jsx.map`
pub fn map_path_for(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".map");
    PathBuf::from(name)
}
