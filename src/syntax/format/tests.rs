use crate::parser::Parser;
use crate::span::Span;

use super::expr::quote_string;
use super::*;

/// Helper: parse source and format it back.
fn fmt(source: &str) -> String {
    let unit = Parser::new(source, 0)
        .parse_unit("test.jsx")
        .unwrap_or_else(|diags| panic!("parse errors: {:?}", diags));
    format_unit(&unit)
}

fn elem(name: &str) -> Spanned<Node> {
    Spanned::dummy(Node::Element(Element {
        name: Spanned::dummy(name.to_string()),
        attrs: Vec::new(),
        children: Vec::new(),
        self_closing: true,
    }))
}

// --- Round trips ---

#[test]
fn test_component_module() {
    let src = "import React from 'react';\n\
               import { If, Else as Otherwise } from 'jsx-conditionals';\n\
               const App = <div className=\"app\">\n  <If condition={user.loggedIn}>Hi</If>\n</div>;\n\
               export default App;\n";
    insta::assert_snapshot!(fmt(src), @r#"
import React from "react";
import { If, Else as Otherwise } from "jsx-conditionals";

const App = <div className="app">
  <If condition={user.loggedIn}>Hi</If>
</div>;
export default App;
"#);
}

#[test]
fn test_canonical_source_is_stable() {
    let src = "import * as R from \"ramda\";\nimport \"polyfill\";\n\nlet x = <Foo.Bar a b=\"1\" c={2} d=<i /> />;\n";
    assert_eq!(fmt(src), src);
    assert_eq!(fmt(&fmt(src)), src);
}

#[test]
fn test_self_closing_spacing() {
    assert_eq!(fmt("<><A/><B   /></>"), "<><A /><B /></>;\n");
}

#[test]
fn test_empty_element_keeps_closing_tag() {
    assert_eq!(fmt("<div></div>"), "<div></div>;\n");
}

#[test]
fn test_attribute_quote_choice() {
    assert_eq!(fmt("<a title='say \"hi\"' />"), "<a title='say \"hi\"' />;\n");
}

// --- Expressions ---

#[test]
fn test_precedence_parentheses() {
    assert_eq!(fmt("(a || b) && !c"), "(a || b) && !c;\n");
    assert_eq!(fmt("a || b && c"), "a || b && c;\n");
    assert_eq!(fmt("(a - b) - c"), "a - b - c;\n");
    assert_eq!(fmt("a - (b - c)"), "a - (b - c);\n");
    assert_eq!(fmt("(a + b) * c"), "(a + b) * c;\n");
    assert_eq!(fmt("!(a === b)"), "!(a === b);\n");
    assert_eq!(fmt("(a || b).c()"), "(a || b).c();\n");
}

#[test]
fn test_nested_conditionals_are_parenthesized() {
    assert_eq!(fmt("a ? b : c ? d : e"), "a ? b : (c ? d : e);\n");
    assert_eq!(fmt("a ? b ? c : d : e"), "a ? (b ? c : d) : e;\n");
    assert_eq!(fmt("(a ? b : c) ? d : e"), "(a ? b : c) ? d : e;\n");
    assert_eq!(fmt("f(a ? b : c)"), "f(a ? b : c);\n");
}

#[test]
fn test_double_negation_keeps_space() {
    assert_eq!(fmt("- -x"), "- -x;\n");
    assert_eq!(fmt("!!x"), "!!x;\n");
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        fmt("const s = 'it\\'s \"q\"\\n';"),
        "const s = \"it's \\\"q\\\"\\n\";\n"
    );
    assert_eq!(quote_string("a\u{1}b"), "\"a\\u0001b\"");
    assert_eq!(quote_string("back\\slash"), "\"back\\\\slash\"");
}

#[test]
fn test_format_expr_standalone() {
    let expr = Expr::Binary {
        op: BinOp::Add,
        lhs: Box::new(Spanned::dummy(Expr::Ident("a".to_string()))),
        rhs: Box::new(Spanned::dummy(Expr::string("b"))),
    };
    assert_eq!(format_expr(&expr), "a + \"b\"");
}

// --- Comments ---

#[test]
fn test_leading_and_trailing_comments() {
    let src = "// header\nconst a = 1; // trailing\n/* end */";
    assert_eq!(fmt(src), "// header\nconst a = 1;\n// trailing\n/* end */\n");
}

#[test]
fn test_comment_between_statements_stays_between() {
    let src = "a;\n// about b\nb;\n";
    assert_eq!(fmt(src), src);
}

#[test]
fn test_comment_inside_expression_is_not_hoisted() {
    assert_eq!(fmt("f(/* arg */ x);\ng;"), "f(x);\ng;\n");
}

#[test]
fn test_empty_container_keeps_comment() {
    assert_eq!(
        fmt("<div>{/* note */}</div>"),
        "<div>{/* note */}</div>;\n"
    );
}

#[test]
fn test_empty_container_line_comment_keeps_brace() {
    assert_eq!(fmt("<div>{// note\n}</div>"), "<div>{// note\n}</div>;\n");
}

#[test]
fn test_format_node_without_comments() {
    let node = Node::Container(Container::empty());
    assert_eq!(format_node(&node), "{}");
}

// --- Source map ---

#[test]
fn test_source_map_records_synthesized_nodes() {
    let origin = Span::new(0, 10, 40);
    let provenance = Some(Provenance {
        origin,
        branch: BranchKind::If,
    });
    let conditional = Expr::Conditional {
        test: Box::new(Spanned::dummy(Expr::Ident("c".to_string()))),
        consequent: Box::new(Spanned::dummy(Expr::Fragment(Fragment {
            children: vec![elem("A"), elem("B")],
            provenance,
        }))),
        alternate: Box::new(Spanned::dummy(Expr::null())),
        provenance,
    };
    let unit = SourceUnit {
        name: "test.jsx".to_string(),
        stmts: vec![Spanned::dummy(Stmt::Expr(Spanned::dummy(conditional)))],
        comments: Vec::new(),
    };

    let (code, mappings) = format_unit_with_map(&unit);
    assert_eq!(code, "c ? <><A /><B /></> : null;\n");
    assert_eq!(mappings.len(), 2);
    assert_eq!(mappings[0].kind, MappingKind::Fragment);
    assert_eq!(mappings[0].generated, 4..19);
    assert_eq!(&code[mappings[0].generated.clone()], "<><A /><B /></>");
    assert_eq!(mappings[1].kind, MappingKind::Conditional);
    assert_eq!(mappings[1].generated, 0..26);
    assert_eq!(mappings[1].original, origin);
    assert_eq!(mappings[1].branch, BranchKind::If);
}

#[test]
fn test_plain_source_has_no_mappings() {
    let unit = Parser::new("a ? <><b /></> : null", 0)
        .parse_unit("test.jsx")
        .unwrap_or_else(|diags| panic!("parse errors: {:?}", diags));
    let (_, mappings) = format_unit_with_map(&unit);
    assert!(mappings.is_empty());
}

#[test]
fn test_empty_unit_formats_to_empty_string() {
    assert_eq!(fmt(""), "");
}
