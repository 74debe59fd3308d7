//! Host adapters: how a tree gets into and out of the transform.
//!
//! A host lowers its own representation to a [`SourceUnit`], the engine
//! rewrites it, and the host raises the result back. Two hosts ship here:
//! JSX source text and a JSON-serialized tree.

mod json;
mod source;

#[cfg(test)]
mod tests;

use crate::ast::SourceUnit;
use crate::diagnostic::Diagnostic;
use crate::transform::{transform_unit, TransformStats};

pub use json::JsonAdapter;
pub use source::SourceAdapter;

/// Converts between a host representation and the tree the engine rewrites.
pub trait HostAdapter {
    /// Short name used on the command line.
    fn name(&self) -> &'static str;

    /// Turn host input into a unit. `filename` names the unit.
    fn lower(&self, input: &str, filename: &str) -> Result<SourceUnit, Vec<Diagnostic>>;

    /// Turn a (transformed) unit back into host output.
    fn raise(&self, unit: &SourceUnit) -> Result<String, Vec<Diagnostic>>;

    /// Whether raised output can carry a source map back to the input text.
    fn maps_source(&self) -> bool {
        false
    }
}

/// Create an adapter by name: `"jsx"` or `"json"`.
pub fn create_adapter(name: &str) -> Option<Box<dyn HostAdapter>> {
    match name {
        "jsx" | "tsx" | "js" | "source" => Some(Box::new(SourceAdapter)),
        "json" => Some(Box::new(JsonAdapter::default())),
        _ => None,
    }
}

/// Pick an adapter from a file extension; anything unknown is source text.
pub fn adapter_for_path(path: &std::path::Path) -> Box<dyn HostAdapter> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(create_adapter)
        .unwrap_or_else(|| Box::new(SourceAdapter) as Box<dyn HostAdapter>)
}

/// Lower, transform, raise.
pub fn run_adapter(
    adapter: &dyn HostAdapter,
    input: &str,
    filename: &str,
) -> Result<(String, TransformStats), Vec<Diagnostic>> {
    let unit = adapter.lower(input, filename)?;
    let (unit, stats) =
        transform_unit(unit).map_err(|e| vec![e.in_file(filename).into_diagnostic()])?;
    let output = adapter.raise(&unit)?;
    Ok((output, stats))
}
