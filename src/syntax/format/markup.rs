use crate::ast::*;
use crate::span::{Span, Spanned};

use super::{FormatCtx, MappingKind};

/// Format a single markup child, without comments.
pub fn format_node(node: &Node) -> String {
    let mut ctx = FormatCtx::new(&[]);
    ctx.emit_node(&Spanned::dummy(node.clone()));
    ctx.output
}

impl FormatCtx {
    pub(super) fn emit_element(&mut self, elem: &Element) {
        self.output.push('<');
        self.output.push_str(&elem.name.node);
        for attr in &elem.attrs {
            self.output.push(' ');
            self.emit_attribute(attr);
        }
        if elem.self_closing && elem.children.is_empty() {
            self.output.push_str(" />");
            return;
        }
        self.output.push('>');
        for child in &elem.children {
            self.emit_node(child);
        }
        self.output.push_str("</");
        self.output.push_str(&elem.name.node);
        self.output.push('>');
    }

    pub(super) fn emit_fragment(&mut self, frag: &Fragment) {
        let start = self.output.len();
        self.output.push_str("<>");
        for child in &frag.children {
            self.emit_node(child);
        }
        self.output.push_str("</>");
        self.record(start, &frag.provenance, MappingKind::Fragment);
    }

    fn emit_node(&mut self, node: &Spanned<Node>) {
        match &node.node {
            Node::Element(elem) => self.emit_element(elem),
            Node::Text(text) => self.output.push_str(text),
            Node::Container(container) => self.emit_container(container, node.span),
            Node::Fragment(frag) => self.emit_fragment(frag),
        }
    }

    /// `{expr}`, or the comments an empty container held.
    fn emit_container(&mut self, container: &Container, span: Span) {
        self.output.push('{');
        match &container.expr {
            Some(expr) => self.emit_expr(&expr.node),
            None => {
                for (i, comment) in self.take_enclosed_comments(span).iter().enumerate() {
                    if i > 0 && !self.output.ends_with('\n') {
                        self.output.push(' ');
                    }
                    self.output.push_str(comment);
                    // A line comment would swallow the closing brace.
                    if comment.starts_with("//") {
                        self.output.push('\n');
                    }
                }
            }
        }
        self.output.push('}');
    }

    fn emit_attribute(&mut self, attr: &Spanned<Attribute>) {
        self.output.push_str(&attr.node.name.node);
        let Some(value) = &attr.node.value else {
            return;
        };
        self.output.push('=');
        match &value.node {
            AttrValue::Str(s) => {
                // Attribute strings have no escapes; pick a quote that fits.
                let quote = if s.contains('"') { '\'' } else { '"' };
                self.output.push(quote);
                self.output.push_str(s);
                self.output.push(quote);
            }
            AttrValue::Container(container) => self.emit_container(container, value.span),
            AttrValue::Element(elem) => self.emit_element(elem),
        }
    }
}
