//! AST navigation: attribute lookup and branch-element search.

use super::{AttrValue, Attribute, Element, Expr, Node, SourceUnit, Stmt};
use crate::span::{Span, Spanned};

/// Find the first attribute called `name` on an element.
///
/// Later duplicates are ignored, matching how JSX hosts resolve props.
pub fn find_attribute<'a>(elem: &'a Element, name: &str) -> Option<&'a Spanned<Attribute>> {
    elem.attrs.iter().find(|attr| attr.node.name.node == name)
}

/// Spans of every `<If>`, `<ElseIf>` or `<Else>` element left in a unit, in
/// source order.
pub fn branch_elements(unit: &SourceUnit) -> Vec<Span> {
    let mut found = Vec::new();
    for stmt in &unit.stmts {
        match &stmt.node {
            Stmt::Import(_) => {}
            Stmt::Binding { init, .. } => collect_expr(init, &mut found),
            Stmt::ExportDefault(expr) | Stmt::Expr(expr) => collect_expr(expr, &mut found),
        }
    }
    found
}

fn collect_expr(expr: &Spanned<Expr>, found: &mut Vec<Span>) {
    match &expr.node {
        Expr::Literal(_) | Expr::Ident(_) => {}
        Expr::Member { object, .. } => collect_expr(object, found),
        Expr::Call { callee, args } => {
            collect_expr(callee, found);
            for arg in args {
                collect_expr(arg, found);
            }
        }
        Expr::Unary { operand, .. } => collect_expr(operand, found),
        Expr::Binary { lhs, rhs, .. } => {
            collect_expr(lhs, found);
            collect_expr(rhs, found);
        }
        Expr::Conditional {
            test,
            consequent,
            alternate,
            ..
        } => {
            collect_expr(test, found);
            collect_expr(consequent, found);
            collect_expr(alternate, found);
        }
        Expr::Element(elem) => collect_element(elem, expr.span, found),
        Expr::Fragment(frag) => collect_children(&frag.children, found),
    }
}

fn collect_element(elem: &Element, span: Span, found: &mut Vec<Span>) {
    if elem.branch_kind().is_some() {
        found.push(span);
    }
    for attr in &elem.attrs {
        let Some(value) = &attr.node.value else {
            continue;
        };
        match &value.node {
            AttrValue::Str(_) => {}
            AttrValue::Container(container) => {
                if let Some(inner) = &container.expr {
                    collect_expr(inner, found);
                }
            }
            AttrValue::Element(inner) => collect_element(inner, value.span, found),
        }
    }
    collect_children(&elem.children, found);
}

fn collect_children(children: &[Spanned<Node>], found: &mut Vec<Span>) {
    for child in children {
        match &child.node {
            Node::Text(_) => {}
            Node::Container(container) => {
                if let Some(inner) = &container.expr {
                    collect_expr(inner, found);
                }
            }
            Node::Element(elem) => collect_element(elem, child.span, found),
            Node::Fragment(frag) => collect_children(&frag.children, found),
        }
    }
}
