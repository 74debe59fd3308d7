use std::fmt;

use crate::ast::BranchKind;
use crate::diagnostic::Diagnostic;
use crate::parser::MAX_NESTING_DEPTH;
use crate::span::Span;

/// Why a unit could not be rewritten. Every kind is fatal for the unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// `<If>`/`<ElseIf>` without a `condition` attribute.
    MissingConditionAttribute,
    /// `condition` given as a string, an element, or `{}`.
    InvalidConditionValueType,
    /// `<ElseIf>`/`<Else>` not preceded by `<If>`/`<ElseIf>`.
    OrphanedBranch,
    /// A child list no front end could have produced.
    MalformedChildList,
    /// The rewritten tree would nest deeper than the parser accepts.
    NestingTooDeep,
}

impl ErrorKind {
    fn help(&self) -> &'static str {
        match self {
            ErrorKind::MissingConditionAttribute => "add a condition: `<If condition={expr}>`",
            ErrorKind::InvalidConditionValueType => {
                "wrap the condition in braces: `condition={expr}`"
            }
            ErrorKind::OrphanedBranch => {
                "place <ElseIf>/<Else> directly after an <If> or <ElseIf> sibling"
            }
            ErrorKind::MalformedChildList => "the tree handed to the transform is not valid JSX",
            ErrorKind::NestingTooDeep => "extract deeply nested markup into separate components",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransformError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    /// Printed form of the offending node.
    pub node_text: Option<String>,
    pub file: Option<String>,
}

impl TransformError {
    pub fn new(kind: ErrorKind, message: String, span: Span) -> Self {
        Self {
            kind,
            message,
            span,
            node_text: None,
            file: None,
        }
    }

    pub(crate) fn orphan(branch: BranchKind, span: Span) -> Self {
        Self::new(
            ErrorKind::OrphanedBranch,
            format!(
                "{} has no matching <If> or <ElseIf>. Only whitespace is allowed between them.",
                branch
            ),
            span,
        )
    }

    pub(crate) fn malformed(message: String, span: Span) -> Self {
        Self::new(ErrorKind::MalformedChildList, message, span)
    }

    pub(crate) fn too_deep(span: Span) -> Self {
        Self::new(
            ErrorKind::NestingTooDeep,
            format!(
                "nesting depth exceeded (maximum {} levels)",
                MAX_NESTING_DEPTH
            ),
            span,
        )
    }

    /// Set the node text unless a deeper frame already did.
    pub fn with_node_text(mut self, text: impl FnOnce() -> String) -> Self {
        if self.node_text.is_none() {
            self.node_text = Some(text());
        }
        self
    }

    pub fn in_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let help = self.kind.help().to_string();
        let mut diag = Diagnostic::error(self.message, self.span);
        if let Some(file) = self.file {
            diag = diag.with_note(format!("in file {}", file));
        }
        if let Some(text) = self.node_text {
            diag = diag.with_note(format!("at node {}", text));
        }
        diag.with_help(help)
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(file) = &self.file {
            write!(f, "\nIn file {}", file)?;
        }
        if let Some(text) = &self.node_text {
            write!(f, "\nAt node {}", text)?;
        }
        Ok(())
    }
}

impl std::error::Error for TransformError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphan_message() {
        let err = TransformError::orphan(BranchKind::Else, Span::new(0, 3, 9));
        assert_eq!(err.kind, ErrorKind::OrphanedBranch);
        assert_eq!(
            err.message,
            "<Else> has no matching <If> or <ElseIf>. Only whitespace is allowed between them."
        );
    }

    #[test]
    fn test_innermost_node_text_wins() {
        let err = TransformError::orphan(BranchKind::ElseIf, Span::dummy())
            .with_node_text(|| "<ElseIf condition={b} />".to_string())
            .with_node_text(|| "<div><ElseIf condition={b} /></div>".to_string());
        assert_eq!(err.node_text.as_deref(), Some("<ElseIf condition={b} />"));
    }

    #[test]
    fn test_display_appends_context() {
        let err = TransformError::new(
            ErrorKind::MissingConditionAttribute,
            "Missing 'condition' property".to_string(),
            Span::dummy(),
        )
        .with_node_text(|| "<If></If>".to_string())
        .in_file("app.jsx");
        assert_eq!(
            err.to_string(),
            "Missing 'condition' property\nIn file app.jsx\nAt node <If></If>"
        );
    }

    #[test]
    fn test_too_deep_has_help() {
        let diag = TransformError::too_deep(Span::new(0, 4, 8)).into_diagnostic();
        assert_eq!(diag.message, "nesting depth exceeded (maximum 256 levels)");
        assert_eq!(
            diag.help.as_deref(),
            Some("extract deeply nested markup into separate components")
        );
    }

    #[test]
    fn test_into_diagnostic_notes() {
        let diag = TransformError::malformed("bad".to_string(), Span::new(0, 1, 2))
            .with_node_text(|| "<x />".to_string())
            .in_file("a.jsx")
            .into_diagnostic();
        assert_eq!(diag.message, "bad");
        assert_eq!(diag.span, Span::new(0, 1, 2));
        assert_eq!(
            diag.notes,
            vec!["in file a.jsx".to_string(), "at node <x />".to_string()]
        );
        assert!(diag.help.is_some());
    }
}
