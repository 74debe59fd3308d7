use crate::ast::SourceUnit;
use crate::diagnostic::Diagnostic;
use crate::span::Span;

use super::HostAdapter;

/// A tree serialized with `serde_json`, for hosts that lower their own AST.
#[derive(Clone, Copy, Debug)]
pub struct JsonAdapter {
    pub pretty: bool,
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl HostAdapter for JsonAdapter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn lower(&self, input: &str, filename: &str) -> Result<SourceUnit, Vec<Diagnostic>> {
        let mut unit: SourceUnit = serde_json::from_str(input).map_err(|e| {
            let offset = byte_offset(input, e.line(), e.column());
            vec![Diagnostic::error(
                format!("invalid tree: {}", e),
                Span::new(0, offset, offset),
            )
            .with_help("the input must be a serialized SourceUnit".to_string())]
        })?;
        if unit.name.is_empty() {
            unit.name = filename.to_string();
        }
        Ok(unit)
    }

    fn raise(&self, unit: &SourceUnit) -> Result<String, Vec<Diagnostic>> {
        let result = if self.pretty {
            serde_json::to_string_pretty(unit)
        } else {
            serde_json::to_string(unit)
        };
        result.map_err(|e| {
            vec![Diagnostic::error(
                format!("cannot serialize tree: {}", e),
                Span::dummy(),
            )]
        })
    }
}

/// serde_json reports 1-based lines and columns; diagnostics want bytes.
fn byte_offset(input: &str, line: usize, column: usize) -> u32 {
    let line_start: usize = input
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(input.len());
    offset as u32
}
