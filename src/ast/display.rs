//! Short textual forms of tree nodes for diagnostics.
//!
//! Everything here goes through the canonical printer so that error
//! messages quote nodes exactly as `transform` would print them.

use super::{Element, Expr, Node};
use crate::format;

const EXCERPT_WIDTH: usize = 80;

/// Print a markup child on one line, truncated for use in a message.
pub fn node_excerpt(node: &Node) -> String {
    excerpt(&format::format_node(node))
}

/// Print an element on one line, truncated for use in a message.
pub fn element_excerpt(elem: &Element) -> String {
    excerpt(&format::format_expr(&Expr::Element(elem.clone())))
}

/// Print an expression on one line, truncated for use in a message.
pub fn expr_excerpt(expr: &Expr) -> String {
    excerpt(&format::format_expr(expr))
}

/// Collapse whitespace runs and cut at a fixed width.
fn excerpt(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(EXCERPT_WIDTH - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Attribute, AttrValue, Container};
    use crate::span::Spanned;

    fn if_elem(children: Vec<Node>) -> Element {
        Element {
            name: Spanned::dummy("If".to_string()),
            attrs: vec![Spanned::dummy(Attribute {
                name: Spanned::dummy("condition".to_string()),
                value: Some(Spanned::dummy(AttrValue::Container(Container::of(
                    Spanned::dummy(Expr::Ident("ok".to_string())),
                )))),
            })],
            children: children.into_iter().map(Spanned::dummy).collect(),
            self_closing: false,
        }
    }

    #[test]
    fn test_excerpt_flattens_whitespace() {
        let elem = if_elem(vec![Node::Text("\n    shown\n".to_string())]);
        assert_eq!(element_excerpt(&elem), "<If condition={ok}> shown </If>");
    }

    #[test]
    fn test_excerpt_truncates_long_nodes() {
        let elem = if_elem(vec![Node::Text("x".repeat(200))]);
        let text = node_excerpt(&Node::Element(elem));
        assert_eq!(text.chars().count(), EXCERPT_WIDTH);
        assert!(text.starts_with("<If condition={ok}>xxx"));
        assert!(text.ends_with('…'));
    }

    #[test]
    fn test_expr_excerpt() {
        assert_eq!(expr_excerpt(&Expr::string("a  b")), "\"a b\"");
    }
}
