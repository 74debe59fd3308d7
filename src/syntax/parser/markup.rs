use crate::ast::*;
use crate::diagnostic::Diagnostic;
use crate::lexeme::Lexeme;
use crate::lexer::LexMode;
use crate::span::{Span, Spanned};

use super::Parser;

enum Markup {
    Element(Element),
    Fragment(Fragment),
}

impl Markup {
    fn into_node(self) -> Node {
        match self {
            Markup::Element(elem) => Node::Element(elem),
            Markup::Fragment(frag) => Node::Fragment(frag),
        }
    }

    fn into_expr(self) -> Expr {
        match self {
            Markup::Element(elem) => Expr::Element(elem),
            Markup::Fragment(frag) => Expr::Fragment(frag),
        }
    }
}

impl<'src> Parser<'src> {
    /// Parse an element or fragment in expression position. `after` is the
    /// lexing mode for whatever follows the final `>`.
    pub(super) fn parse_markup_expr(&mut self, after: LexMode) -> Spanned<Expr> {
        self.parse_markup(after).map(Markup::into_expr)
    }

    fn parse_markup(&mut self, after: LexMode) -> Spanned<Markup> {
        let start = self.current_span();
        self.expect_in(&Lexeme::Lt, LexMode::Tag);
        self.parse_markup_after_lt(start, after)
    }

    fn parse_markup_after_lt(&mut self, start: Span, after: LexMode) -> Spanned<Markup> {
        if !self.enter_nesting() {
            let empty = Fragment {
                children: Vec::new(),
                provenance: None,
            };
            return Spanned::new(Markup::Fragment(empty), start);
        }
        let markup = if self.at(&Lexeme::Gt) {
            self.parse_fragment_rest(start, after)
        } else {
            self.parse_element_rest(start, after)
        };
        self.exit_nesting();
        markup
    }

    fn parse_fragment_rest(&mut self, start: Span, after: LexMode) -> Spanned<Markup> {
        self.expect_in(&Lexeme::Gt, LexMode::Child);
        let children = match self.parse_children("fragment", start) {
            Some(children) => {
                if !self.at(&Lexeme::Gt) {
                    let closing = self.parse_tag_name();
                    self.diagnostics.push(
                        Diagnostic::error(
                            format!("expected closing tag </>, found </{}>", closing.node),
                            closing.span,
                        )
                        .with_help("fragments opened with <> close with </>".to_string()),
                    );
                }
                self.expect_in(&Lexeme::Gt, after);
                children
            }
            None => Vec::new(),
        };
        let frag = Fragment {
            children,
            provenance: None,
        };
        Spanned::new(Markup::Fragment(frag), start.merge(self.prev_span()))
    }

    fn parse_element_rest(&mut self, start: Span, after: LexMode) -> Spanned<Markup> {
        let name = self.parse_tag_name();
        let attrs = self.parse_attributes();

        if self.eat_in(&Lexeme::Slash, LexMode::Tag) {
            self.expect_in(&Lexeme::Gt, after);
            let elem = Element {
                name,
                attrs,
                children: Vec::new(),
                self_closing: true,
            };
            return Spanned::new(Markup::Element(elem), start.merge(self.prev_span()));
        }

        self.expect_in(&Lexeme::Gt, LexMode::Child);
        let label = format!("<{}>", name.node);
        let children = match self.parse_children(&label, start) {
            Some(children) => {
                let closing = self.parse_tag_name();
                if closing.node != name.node {
                    self.diagnostics.push(
                        Diagnostic::error(
                            format!(
                                "expected closing tag </{}>, found </{}>",
                                name.node, closing.node
                            ),
                            closing.span,
                        )
                        .with_note(format!("{} opened here", label))
                        .with_help(format!("close the element with </{}>", name.node)),
                    );
                }
                self.expect_in(&Lexeme::Gt, after);
                children
            }
            None => Vec::new(),
        };

        let elem = Element {
            name,
            attrs,
            children,
            self_closing: false,
        };
        Spanned::new(Markup::Element(elem), start.merge(self.prev_span()))
    }

    /// Parse children until `</`. Returns `None` if the input ended first.
    /// On success the parser is positioned after the `/` of the closing tag.
    fn parse_children(&mut self, label: &str, open: Span) -> Option<Vec<Spanned<Node>>> {
        let mut children = Vec::new();
        loop {
            let start = self.current_span();
            match self.peek().clone() {
                Lexeme::JsxText(text) => {
                    self.bump(LexMode::Child);
                    children.push(Spanned::new(Node::Text(text), start));
                }
                Lexeme::LBrace => {
                    self.bump(LexMode::Script);
                    let container = if self.at(&Lexeme::RBrace) {
                        Container::empty()
                    } else {
                        Container::of(self.parse_expr())
                    };
                    self.expect_in(&Lexeme::RBrace, LexMode::Child);
                    let span = start.merge(self.prev_span());
                    children.push(Spanned::new(Node::Container(container), span));
                }
                Lexeme::Lt => {
                    self.bump(LexMode::Tag);
                    if self.eat_in(&Lexeme::Slash, LexMode::Tag) {
                        return Some(children);
                    }
                    let markup = self.parse_markup_after_lt(start, LexMode::Child);
                    children.push(markup.map(Markup::into_node));
                }
                Lexeme::Eof => {
                    self.diagnostics.push(
                        Diagnostic::error(
                            format!("unclosed {}", label),
                            open,
                        )
                        .with_help("add the matching closing tag".to_string()),
                    );
                    return None;
                }
                _ => {
                    // Left over from a failed `{…}`; skip it and carry on as text.
                    self.error_at_current(&format!(
                        "unexpected {} in JSX children",
                        self.peek().description()
                    ));
                    self.bump(LexMode::Child);
                }
            }
        }
    }

    /// `div`, `my-widget`, `Foo.Bar`, `svg:rect`. Fragments have no name.
    fn parse_tag_name(&mut self) -> Spanned<String> {
        if self.at(&Lexeme::Gt) {
            return Spanned::new(String::new(), self.current_span());
        }
        let first = self.expect_tag_ident();
        let mut name = first.node;
        let mut span = first.span;
        loop {
            let sep = match self.peek() {
                Lexeme::Dot => '.',
                Lexeme::Colon => ':',
                _ => break,
            };
            self.bump(LexMode::Tag);
            let part = self.expect_tag_ident();
            name.push(sep);
            name.push_str(&part.node);
            span = span.merge(part.span);
        }
        Spanned::new(name, span)
    }

    fn expect_tag_ident(&mut self) -> Spanned<String> {
        if let Lexeme::Ident(name) = self.peek().clone() {
            let span = self.current_span();
            self.bump(LexMode::Tag);
            Spanned::new(name, span)
        } else {
            self.error_at_current(&format!(
                "expected tag name, found {}",
                self.peek().description()
            ));
            Spanned::new("_error_".to_string(), self.current_span())
        }
    }

    fn parse_attributes(&mut self) -> Vec<Spanned<Attribute>> {
        let mut attrs = Vec::new();
        loop {
            match self.peek().clone() {
                Lexeme::Ident(_) => {
                    let name = self.parse_tag_name();
                    let value = if self.eat_in(&Lexeme::Eq, LexMode::Tag) {
                        Some(self.parse_attr_value())
                    } else {
                        None
                    };
                    let span = name.span.merge(self.prev_span());
                    attrs.push(Spanned::new(Attribute { name, value }, span));
                }
                Lexeme::LBrace => {
                    self.error_with_help(
                        "spread attributes are not supported",
                        "pass the props explicitly: `name={value}`",
                    );
                    self.bump(LexMode::Script);
                    if !self.at(&Lexeme::RBrace) {
                        self.parse_expr();
                    }
                    self.expect_in(&Lexeme::RBrace, LexMode::Tag);
                }
                _ => return attrs,
            }
        }
    }

    fn parse_attr_value(&mut self) -> Spanned<AttrValue> {
        let start = self.current_span();
        match self.peek().clone() {
            Lexeme::Str(value) => {
                self.bump(LexMode::Tag);
                Spanned::new(AttrValue::Str(value), start)
            }
            Lexeme::LBrace => {
                self.bump(LexMode::Script);
                let container = if self.at(&Lexeme::RBrace) {
                    Container::empty()
                } else {
                    Container::of(self.parse_expr())
                };
                self.expect_in(&Lexeme::RBrace, LexMode::Tag);
                Spanned::new(AttrValue::Container(container), start.merge(self.prev_span()))
            }
            Lexeme::Lt => {
                let markup = self.parse_markup(LexMode::Tag);
                match markup.node {
                    Markup::Element(elem) => Spanned::new(AttrValue::Element(elem), markup.span),
                    Markup::Fragment(_) => {
                        self.diagnostics.push(
                            Diagnostic::error(
                                "fragment attribute values are not supported".to_string(),
                                markup.span,
                            )
                            .with_help("wrap the fragment in braces: `name={<>...</>}`".to_string()),
                        );
                        Spanned::new(AttrValue::Container(Container::empty()), markup.span)
                    }
                }
            }
            _ => {
                self.error_at_current(&format!(
                    "expected attribute value, found {}",
                    self.peek().description()
                ));
                Spanned::new(AttrValue::Str(String::new()), start)
            }
        }
    }
}
