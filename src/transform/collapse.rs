use crate::ast::{Expr, Fragment, Node, Provenance};
use crate::span::Spanned;

use super::significance::is_significant;

/// Reduce a branch's children to the single expression a conditional arm
/// holds: nothing becomes `null`, one child stands alone, several are
/// wrapped in a fragment that remembers which branch it came from.
pub fn collapse(children: Vec<Spanned<Node>>, origin: Provenance) -> Spanned<Expr> {
    let mut kept: Vec<Spanned<Node>> = children
        .into_iter()
        .filter(|child| is_significant(&child.node))
        .collect();

    match kept.len() {
        0 => Spanned::new(Expr::null(), origin.origin),
        1 => single(kept.remove(0)),
        _ => {
            let fragment = Fragment {
                children: kept,
                provenance: Some(origin),
            };
            Spanned::new(Expr::Fragment(fragment), origin.origin)
        }
    }
}

fn single(child: Spanned<Node>) -> Spanned<Expr> {
    let span = child.span;
    match child.node {
        // Raw text, as written; JSX whitespace rules do not apply to it.
        Node::Text(text) => Spanned::new(Expr::string(text), span),
        Node::Element(elem) => Spanned::new(Expr::Element(elem), span),
        Node::Fragment(frag) => Spanned::new(Expr::Fragment(frag), span),
        Node::Container(container) => match container.expr {
            Some(expr) => *expr,
            // Filtered out as insignificant before we get here.
            None => Spanned::new(Expr::null(), span),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BranchKind, Container, Element};
    use crate::span::Span;

    fn origin() -> Provenance {
        Provenance {
            origin: Span::new(0, 5, 50),
            branch: BranchKind::If,
        }
    }

    fn text(value: &str) -> Spanned<Node> {
        Spanned::dummy(Node::Text(value.to_string()))
    }

    fn elem(name: &str) -> Spanned<Node> {
        Spanned::dummy(Node::Element(Element {
            name: Spanned::dummy(name.to_string()),
            attrs: Vec::new(),
            children: Vec::new(),
            self_closing: true,
        }))
    }

    #[test]
    fn test_nothing_collapses_to_null() {
        let collapsed = collapse(Vec::new(), origin());
        assert_eq!(collapsed.node, Expr::null());
        assert_eq!(collapsed.span, origin().origin);

        let only_ignorable = vec![
            text("\n   "),
            Spanned::dummy(Node::Container(Container::empty())),
        ];
        assert_eq!(collapse(only_ignorable, origin()).node, Expr::null());
    }

    #[test]
    fn test_single_text_keeps_raw_value() {
        let collapsed = collapse(vec![text("  Hello\n")], origin());
        assert_eq!(collapsed.node, Expr::string("  Hello\n"));
    }

    #[test]
    fn test_single_element_is_returned_as_is() {
        let collapsed = collapse(vec![text("\n"), elem("A"), text("\n")], origin());
        let Expr::Element(e) = collapsed.node else {
            panic!("expected element");
        };
        assert_eq!(e.name.node, "A");
    }

    #[test]
    fn test_single_container_is_unwrapped() {
        let inner = Spanned::new(Expr::Ident("name".to_string()), Span::new(0, 20, 24));
        let node = Spanned::dummy(Node::Container(Container::of(inner.clone())));
        assert_eq!(collapse(vec![node], origin()), inner);
    }

    #[test]
    fn test_many_children_become_fragment() {
        let collapsed = collapse(
            vec![elem("A"), text("\n  "), elem("B"), text("tail")],
            origin(),
        );
        let Expr::Fragment(frag) = collapsed.node else {
            panic!("expected fragment");
        };
        assert_eq!(frag.children.len(), 3);
        assert_eq!(frag.provenance, Some(origin()));
        assert_eq!(frag.children[2].node, Node::Text("tail".to_string()));
    }
}
