mod expr;
mod markup;
mod stmts;

#[cfg(test)]
mod tests;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::ast::*;
use crate::span::{Span, Spanned};

pub use expr::format_expr;
pub use markup::format_node;

/// What a source-map entry points at in the generated code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingKind {
    Conditional,
    Fragment,
}

/// A synthesized node in the output, linked to the branch element it replaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Byte range in the printed output.
    pub generated: Range<usize>,
    /// Span of the originating `<If>`, `<ElseIf>` or `<Else>` in the input.
    pub original: Span,
    pub kind: MappingKind,
    pub branch: BranchKind,
}

/// Print a unit back to source, preserving top-level comments and comments
/// held by empty expression containers.
pub fn format_unit(unit: &SourceUnit) -> String {
    format_unit_with_map(unit).0
}

/// Like [`format_unit`], also returning a mapping for every node that carries
/// provenance.
pub fn format_unit_with_map(unit: &SourceUnit) -> (String, Vec<Mapping>) {
    let mut ctx = FormatCtx::new(&unit.comments);
    ctx.emit_unit(unit);
    let mut out = ctx.output;
    while out.ends_with("\n\n") {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    (out, ctx.mappings)
}

pub(super) struct FormatCtx {
    pub(super) output: String,
    pub(super) comments: Vec<CommentEntry>,
    pub(super) mappings: Vec<Mapping>,
    /// End of the last statement emitted; comments before it are not leading.
    cursor: u32,
}

#[derive(Clone)]
pub(super) struct CommentEntry {
    pub(super) text: String,
    pub(super) span: Span,
    pub(super) used: bool,
}

impl FormatCtx {
    pub(super) fn new(comments: &[Spanned<String>]) -> Self {
        let entries = comments
            .iter()
            .map(|c| CommentEntry {
                text: c.node.clone(),
                span: c.span,
                used: false,
            })
            .collect();
        Self {
            output: String::new(),
            comments: entries,
            mappings: Vec::new(),
            cursor: 0,
        }
    }

    /// Emit unused comments between the previous statement and `span_start`,
    /// one per line.
    pub(super) fn emit_leading_comments(&mut self, span_start: u32) {
        for entry in self.comments.iter_mut() {
            if entry.used || entry.span.start < self.cursor || entry.span.start >= span_start {
                continue;
            }
            entry.used = true;
            self.output.push_str(&entry.text);
            self.output.push('\n');
        }
    }

    /// Take the comments enclosed by `span`, in source order.
    pub(super) fn take_enclosed_comments(&mut self, span: Span) -> Vec<String> {
        let mut taken = Vec::new();
        for entry in self.comments.iter_mut() {
            if !entry.used && entry.span.start >= span.start && entry.span.end <= span.end {
                entry.used = true;
                taken.push(entry.text.clone());
            }
        }
        taken
    }

    /// Emit comments after the last statement. Comments buried inside
    /// expressions that nothing re-emitted are dropped.
    fn emit_trailing_comments(&mut self, after: u32) {
        for entry in self.comments.iter_mut() {
            if entry.used || entry.span.start < after {
                continue;
            }
            entry.used = true;
            self.output.push_str(&entry.text);
            self.output.push('\n');
        }
    }

    fn emit_unit(&mut self, unit: &SourceUnit) {
        let mut prev_was_import = false;
        for (i, stmt) in unit.stmts.iter().enumerate() {
            let is_import = matches!(stmt.node, Stmt::Import(_));
            if i > 0 && prev_was_import && !is_import {
                self.output.push('\n');
            }
            self.emit_stmt(stmt);
            self.cursor = stmt.span.end;
            prev_was_import = is_import;
        }
        self.emit_trailing_comments(self.cursor);
    }

    /// Record a mapping for a node that starts at `start` in the output.
    pub(super) fn record(&mut self, start: usize, provenance: &Option<Provenance>, kind: MappingKind) {
        if let Some(p) = provenance {
            self.mappings.push(Mapping {
                generated: start..self.output.len(),
                original: p.origin,
                kind,
                branch: p.branch,
            });
        }
    }
}
