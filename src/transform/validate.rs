//! Structural checks run on every child list before anything is rewritten.

use crate::ast::display::{element_excerpt, expr_excerpt, node_excerpt};
use crate::ast::{Element, Expr, Fragment, Node};
use crate::span::{Span, Spanned};

use super::error::TransformError;
use super::significance::is_significant;

/// Check that every `<ElseIf>`/`<Else>` in `children` follows an `<If>` or
/// `<ElseIf>`, with only ignorable siblings in between.
pub fn validate_chain(children: &[Spanned<Node>]) -> Result<(), TransformError> {
    for (i, child) in children.iter().enumerate() {
        let Some(kind) = child.node.branch_kind() else {
            continue;
        };
        if !kind.is_continuation() {
            continue;
        }
        let anchored = children[..i]
            .iter()
            .rev()
            .find(|prev| is_significant(&prev.node))
            .and_then(|prev| prev.node.branch_kind())
            .is_some_and(|prev| prev.is_conditional());
        if !anchored {
            return Err(TransformError::orphan(kind, child.span)
                .with_node_text(|| node_excerpt(&child.node)));
        }
    }
    Ok(())
}

/// Shape check for an element's child list.
pub fn check_element(elem: &Element, span: Span) -> Result<(), TransformError> {
    if elem.name.node.is_empty() {
        return Err(
            TransformError::malformed("element has an empty tag name".to_string(), span)
                .with_node_text(|| element_excerpt(elem)),
        );
    }
    if elem.self_closing && !elem.children.is_empty() {
        return Err(TransformError::malformed(
            format!(
                "self-closing <{} /> has {} children",
                elem.name.node,
                elem.children.len()
            ),
            span,
        )
        .with_node_text(|| element_excerpt(elem)));
    }
    check_text_runs(&elem.children).map_err(|e| e.with_node_text(|| element_excerpt(elem)))
}

/// Shape check for a fragment's child list.
pub fn check_fragment(frag: &Fragment) -> Result<(), TransformError> {
    check_text_runs(&frag.children)
        .map_err(|e| e.with_node_text(|| expr_excerpt(&Expr::Fragment(frag.clone()))))
}

/// A front end always merges adjacent text into one node.
fn check_text_runs(children: &[Spanned<Node>]) -> Result<(), TransformError> {
    for pair in children.windows(2) {
        if let (Node::Text(_), Node::Text(_)) = (&pair[0].node, &pair[1].node) {
            return Err(TransformError::malformed(
                "child list has adjacent text nodes".to_string(),
                pair[1].span,
            ));
        }
    }
    Ok(())
}
