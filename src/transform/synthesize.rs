use crate::ast::display::element_excerpt;
use crate::ast::navigate::find_attribute;
use crate::ast::{AttrValue, BranchKind, Element, Expr, Literal, Node, Provenance};
use crate::parser::MAX_NESTING_DEPTH;
use crate::span::{Span, Spanned};

use super::collapse::collapse;
use super::error::{ErrorKind, TransformError};
use super::significance::is_significant;
use super::validate::check_element;
use super::TransformStats;

const CONDITION_ATTR: &str = "condition";

/// Build the conditional for an `<If>` (or an `<ElseIf>` continuing a
/// chain). `following` holds the siblings after it; the `<ElseIf>`/`<Else>`
/// branches this consumes are taken out of it.
///
/// `depth` is the nesting level this link's conditional will sit at. The
/// next link prints inside parentheses in the alternate, two levels deeper.
/// A chain that passes [`MAX_NESTING_DEPTH`] fails before any deeper link
/// is built.
///
/// The condition is moved into the output untouched. Nothing is evaluated.
pub fn synthesize(
    elem: Element,
    span: Span,
    following: &mut [Option<Spanned<Node>>],
    depth: u32,
    stats: &mut TransformStats,
) -> Result<Spanned<Expr>, TransformError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(TransformError::too_deep(span).with_node_text(|| element_excerpt(&elem)));
    }
    let branch = elem.branch_kind().unwrap_or(BranchKind::If);
    check_element(&elem, span)?;
    let test = condition(&elem, span)?;
    let origin = Provenance {
        origin: span,
        branch,
    };
    let consequent = collapse(elem.children, origin);
    let alternate = alternate(following, span, depth, stats)?;

    Ok(Spanned::new(
        Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            provenance: Some(origin),
        },
        span,
    ))
}

/// The `condition` attribute's expression; a bare `condition` means `true`.
fn condition(elem: &Element, span: Span) -> Result<Spanned<Expr>, TransformError> {
    let Some(attr) = find_attribute(elem, CONDITION_ATTR) else {
        return Err(TransformError::new(
            ErrorKind::MissingConditionAttribute,
            format!("Missing '{}' property", CONDITION_ATTR),
            span,
        )
        .with_node_text(|| element_excerpt(elem)));
    };
    let Some(value) = &attr.node.value else {
        return Ok(Spanned::new(Expr::Literal(Literal::Bool(true)), attr.span));
    };
    let found = match &value.node {
        AttrValue::Container(container) => match &container.expr {
            Some(expr) => return Ok((**expr).clone()),
            None => "an empty expression container",
        },
        AttrValue::Str(_) => "a string literal",
        AttrValue::Element(_) => "an element",
    };
    Err(TransformError::new(
        ErrorKind::InvalidConditionValueType,
        format!(
            "'{}' property should be an expression container, found {}",
            CONDITION_ATTR, found
        ),
        value.span,
    )
    .with_node_text(|| element_excerpt(elem)))
}

/// The false arm: the next significant sibling if it continues the chain,
/// otherwise `null`.
fn alternate(
    following: &mut [Option<Spanned<Node>>],
    if_span: Span,
    depth: u32,
    stats: &mut TransformStats,
) -> Result<Spanned<Expr>, TransformError> {
    let next = following
        .iter()
        .position(|slot| slot.as_ref().is_some_and(|n| is_significant(&n.node)));
    let Some(index) = next else {
        return Ok(null_at(if_span));
    };
    let kind = following[index].as_ref().and_then(|n| n.node.branch_kind());
    if !kind.is_some_and(|k| k.is_continuation()) {
        return Ok(null_at(if_span));
    }
    let Some(Spanned {
        node: Node::Element(elem),
        span,
    }) = following[index].take()
    else {
        return Ok(null_at(if_span));
    };
    stats.branches += 1;

    match elem.branch_kind() {
        Some(BranchKind::ElseIf) => {
            synthesize(elem, span, &mut following[index + 1..], depth + 2, stats)
        }
        _ => {
            check_element(&elem, span)?;
            let origin = Provenance {
                origin: span,
                branch: BranchKind::Else,
            };
            Ok(collapse(elem.children, origin))
        }
    }
}

/// A `null` with no source of its own, placed at the end of its chain.
fn null_at(span: Span) -> Spanned<Expr> {
    Spanned::new(Expr::null(), Span::new(span.file_id, span.end, span.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_expr;
    use crate::parser::Parser;
    use crate::ast::Stmt;

    /// Parse `<>…</>` and run the synthesizer on its first significant child.
    fn synth(source: &str) -> (Result<Spanned<Expr>, TransformError>, Vec<Option<Spanned<Node>>>) {
        let unit = Parser::new(source, 0)
            .parse_unit("test.jsx")
            .unwrap_or_else(|diags| panic!("parse errors: {:?}", diags));
        let Stmt::Expr(Spanned {
            node: Expr::Fragment(frag),
            ..
        }) = unit.stmts.into_iter().next().map(|s| s.node).unwrap()
        else {
            panic!("expected fragment");
        };
        let mut slots: Vec<Option<Spanned<Node>>> = frag.children.into_iter().map(Some).collect();
        let index = slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|n| is_significant(&n.node)))
            .unwrap();
        let Some(Spanned {
            node: Node::Element(elem),
            span,
        }) = slots[index].take()
        else {
            panic!("expected element");
        };
        let mut stats = TransformStats::default();
        let result = synthesize(elem, span, &mut slots[index + 1..], 1, &mut stats);
        (result, slots)
    }

    fn synth_ok(source: &str) -> String {
        let (result, _) = synth(source);
        format_expr(&result.unwrap_or_else(|e| panic!("transform error: {}", e)).node)
    }

    #[test]
    fn test_if_alone() {
        assert_eq!(synth_ok("<><If condition={ok}>A</If></>"), "ok ? \"A\" : null");
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            synth_ok("<><If condition={a}>X</If>\n  <Else>Y</Else></>"),
            "a ? \"X\" : \"Y\""
        );
    }

    #[test]
    fn test_elseif_chain_nests_right() {
        assert_eq!(
            synth_ok(
                "<><If condition={a}>X</If><ElseIf condition={b}>Y</ElseIf>\
                 <ElseIf condition={c}>Z</ElseIf><Else>W</Else></>"
            ),
            "a ? \"X\" : (b ? \"Y\" : (c ? \"Z\" : \"W\"))"
        );
    }

    #[test]
    fn test_consumed_branches_leave_ignorable_siblings() {
        let (result, slots) = synth("<><If condition={a}>X</If> {/* c */} <Else>Y</Else>tail</>");
        assert!(result.is_ok());
        let left: Vec<bool> = slots.iter().map(Option::is_some).collect();
        // If taken by the caller, Else taken by the synthesizer.
        assert_eq!(left, vec![false, true, true, true, false, true]);
    }

    #[test]
    fn test_unrelated_sibling_ends_chain() {
        let (result, slots) = synth("<><If condition={a}>X</If><p /><Else>Y</Else></>");
        assert_eq!(format_expr(&result.unwrap().node), "a ? \"X\" : null");
        assert!(slots[2].is_some());
    }

    #[test]
    fn test_chain_stops_at_nesting_limit() {
        let links = "<ElseIf condition={b}>Y</ElseIf>".repeat(MAX_NESTING_DEPTH as usize);
        let (result, _) = synth(&format!("<><If condition={{a}}>X</If>{}</>", links));
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep);
        assert_eq!(err.node_text.as_deref(), Some("<ElseIf condition={b}>Y</ElseIf>"));
    }

    #[test]
    fn test_bare_condition_is_true() {
        assert_eq!(synth_ok("<><If condition>A</If></>"), "true ? \"A\" : null");
    }

    #[test]
    fn test_first_condition_wins() {
        assert_eq!(
            synth_ok("<><If condition={a} condition={b}>A</If></>"),
            "a ? \"A\" : null"
        );
    }

    #[test]
    fn test_condition_is_moved_verbatim() {
        assert_eq!(
            synth_ok("<><If condition={items.length > 0 && !loading}>A</If></>"),
            "items.length > 0 && !loading ? \"A\" : null"
        );
    }

    #[test]
    fn test_missing_condition() {
        let (result, _) = synth("<><If>A</If></>");
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingConditionAttribute);
        assert_eq!(err.message, "Missing 'condition' property");
        assert_eq!(err.node_text.as_deref(), Some("<If>A</If>"));
    }

    #[test]
    fn test_missing_condition_on_elseif() {
        let (result, _) = synth("<><If condition={a}>A</If><ElseIf>B</ElseIf></>");
        assert_eq!(result.unwrap_err().kind, ErrorKind::MissingConditionAttribute);
    }

    #[test]
    fn test_string_condition_is_invalid() {
        let (result, _) = synth("<><If condition=\"yes\">A</If></>");
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConditionValueType);
        assert!(err.message.ends_with("found a string literal"));
    }

    #[test]
    fn test_empty_condition_is_invalid() {
        let (result, _) = synth("<><If condition={/* later */}>A</If></>");
        assert_eq!(result.unwrap_err().kind, ErrorKind::InvalidConditionValueType);
    }

    #[test]
    fn test_element_condition_is_invalid() {
        let (result, _) = synth("<><If condition=<b />>A</If></>");
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConditionValueType);
        assert!(err.message.ends_with("found an element"));
    }

    #[test]
    fn test_provenance_points_at_branches() {
        let source = "<><If condition={a}><A /><B /></If><Else>Y</Else></>";
        let (result, _) = synth(source);
        let expr = result.unwrap();
        let Expr::Conditional {
            consequent,
            provenance,
            ..
        } = expr.node
        else {
            panic!("expected conditional");
        };
        let provenance = provenance.unwrap();
        assert_eq!(provenance.branch, BranchKind::If);
        assert_eq!(
            provenance.origin.slice(source),
            Some("<If condition={a}><A /><B /></If>")
        );
        let Expr::Fragment(frag) = consequent.node else {
            panic!("expected fragment");
        };
        assert_eq!(frag.provenance, Some(provenance));
    }
}
