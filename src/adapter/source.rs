use crate::ast::SourceUnit;
use crate::diagnostic::Diagnostic;
use crate::format::format_unit;
use crate::parser::Parser;

use super::HostAdapter;

/// JSX source text, through the bundled parser and printer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceAdapter;

impl HostAdapter for SourceAdapter {
    fn name(&self) -> &'static str {
        "jsx"
    }

    fn lower(&self, input: &str, filename: &str) -> Result<SourceUnit, Vec<Diagnostic>> {
        Parser::new(input, 0).parse_unit(filename)
    }

    fn raise(&self, unit: &SourceUnit) -> Result<String, Vec<Diagnostic>> {
        Ok(format_unit(unit))
    }

    fn maps_source(&self) -> bool {
        true
    }
}
