pub mod adapter;
pub mod api;
pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod runtime;
pub mod syntax;
pub mod transform;

// Short `crate::X` paths for the front end and config
pub use config::project;
pub use syntax::format;
pub use syntax::lexeme;
pub use syntax::lexer;
pub use syntax::parser;
pub use syntax::span;

// Public API at the crate root: `jsx_conditionals::transform_source()` etc.
pub use api::*;

use diagnostic::{render_diagnostics, Diagnostic};
use parser::Parser;

/// Parse a unit, rendering any diagnostics to stderr.
pub fn parse_source(source: &str, filename: &str) -> Result<ast::SourceUnit, Vec<Diagnostic>> {
    match Parser::new(source, 0).parse_unit(filename) {
        Ok(unit) => Ok(unit),
        Err(errors) => {
            render_diagnostics(&errors, filename, source);
            Err(errors)
        }
    }
}

pub fn parse_source_silent(
    source: &str,
    filename: &str,
) -> Result<ast::SourceUnit, Vec<Diagnostic>> {
    Parser::new(source, 0).parse_unit(filename)
}
