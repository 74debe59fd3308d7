//! The rewrite engine: one depth-first pass per unit that replaces every
//! `<If>`/`<ElseIf>`/`<Else>` chain with a nested conditional expression.

pub mod collapse;
pub mod error;
pub mod significance;
pub mod synthesize;
pub mod validate;


use serde::Serialize;

use crate::ast::display::element_excerpt;
use crate::ast::*;
use crate::parser::MAX_NESTING_DEPTH;
use crate::span::{Span, Spanned};

pub use error::{ErrorKind, TransformError};

/// Imports from this module exist only to satisfy type checkers and linters.
pub const SENTINEL_MODULE: &str = "jsx-conditionals";

/// What one pass rewrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    /// `<If>` elements turned into conditionals.
    pub chains: usize,
    /// `<ElseIf>`/`<Else>` elements folded into a chain.
    pub branches: usize,
    pub imports_removed: usize,
}

/// Rewrite a unit. On error nothing is returned: the unit is all or nothing.
pub fn transform_unit(unit: SourceUnit) -> Result<(SourceUnit, TransformStats), TransformError> {
    let mut walker = Walker::default();
    let SourceUnit {
        name,
        stmts,
        comments,
    } = unit;

    let mut out = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        if is_sentinel_import(&stmt.node) {
            walker.stats.imports_removed += 1;
            continue;
        }
        out.push(walker.walk_stmt(stmt)?);
    }

    let unit = SourceUnit {
        name,
        stmts: out,
        comments,
    };
    Ok((unit, walker.stats))
}

fn is_sentinel_import(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Import(decl) if decl.source.node == SENTINEL_MODULE)
}

#[derive(Default)]
struct Walker {
    stats: TransformStats,
    /// Nesting the printed output will have at the current node, counted
    /// the way the parser counts it.
    depth: u32,
}

impl Walker {
    fn enter_nesting(&mut self, span: Span) -> Result<(), TransformError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(TransformError::too_deep(span));
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    fn walk_stmt(&mut self, stmt: Spanned<Stmt>) -> Result<Spanned<Stmt>, TransformError> {
        let span = stmt.span;
        let node = match stmt.node {
            Stmt::Import(decl) => Stmt::Import(decl),
            Stmt::Binding { kind, name, init } => Stmt::Binding {
                kind,
                name,
                init: self.walk_expr(init)?,
            },
            Stmt::ExportDefault(expr) => Stmt::ExportDefault(self.walk_expr(expr)?),
            Stmt::Expr(expr) => Stmt::Expr(self.walk_expr(expr)?),
        };
        Ok(Spanned::new(node, span))
    }

    fn walk_expr(&mut self, expr: Spanned<Expr>) -> Result<Spanned<Expr>, TransformError> {
        let span = expr.span;
        let node = match expr.node {
            leaf @ (Expr::Literal(_) | Expr::Ident(_)) => leaf,
            Expr::Member { object, property } => Expr::Member {
                object: self.walk_boxed(object)?,
                property,
            },
            Expr::Call { callee, args } => Expr::Call {
                callee: self.walk_boxed(callee)?,
                args: args
                    .into_iter()
                    .map(|arg| self.walk_expr(arg))
                    .collect::<Result<_, _>>()?,
            },
            Expr::Unary { op, operand } => Expr::Unary {
                op,
                operand: self.walk_boxed(operand)?,
            },
            Expr::Binary { op, lhs, rhs } => Expr::Binary {
                op,
                lhs: self.walk_boxed(lhs)?,
                rhs: self.walk_boxed(rhs)?,
            },
            Expr::Conditional {
                test,
                consequent,
                alternate,
                provenance,
            } => {
                let test = self.walk_boxed(test)?;
                self.enter_nesting(span)?;
                let consequent = self.walk_arm(consequent)?;
                let alternate = self.walk_arm(alternate)?;
                self.exit_nesting();
                Expr::Conditional {
                    test,
                    consequent,
                    alternate,
                    provenance,
                }
            }
            Expr::Element(elem) => match elem.branch_kind() {
                Some(BranchKind::If) => return self.rewrite_standalone(elem, span),
                Some(kind) => {
                    return Err(TransformError::orphan(kind, span)
                        .with_node_text(|| element_excerpt(&elem)))
                }
                None => Expr::Element(self.walk_element(elem, span)?),
            },
            Expr::Fragment(frag) => Expr::Fragment(self.walk_fragment(frag, span)?),
        };
        Ok(Spanned::new(node, span))
    }

    fn walk_boxed(&mut self, expr: Box<Spanned<Expr>>) -> Result<Box<Spanned<Expr>>, TransformError> {
        self.walk_expr(*expr).map(Box::new)
    }

    /// A conditional in either arm of another prints inside parentheses.
    /// An `<If>` there becomes one.
    fn walk_arm(&mut self, arm: Box<Spanned<Expr>>) -> Result<Box<Spanned<Expr>>, TransformError> {
        let parenthesized = match &arm.node {
            Expr::Conditional { .. } => true,
            Expr::Element(elem) => matches!(elem.branch_kind(), Some(BranchKind::If)),
            _ => false,
        };
        if !parenthesized {
            return self.walk_boxed(arm);
        }
        self.enter_nesting(arm.span)?;
        let arm = self.walk_boxed(arm)?;
        self.exit_nesting();
        Ok(arm)
    }

    /// An `<If>` with no sibling list: expression or attribute position.
    fn rewrite_standalone(
        &mut self,
        elem: Element,
        span: Span,
    ) -> Result<Spanned<Expr>, TransformError> {
        let conditional =
            synthesize::synthesize(elem, span, &mut [], self.depth + 1, &mut self.stats)?;
        self.stats.chains += 1;
        self.walk_expr(conditional)
    }

    fn walk_element(&mut self, elem: Element, span: Span) -> Result<Element, TransformError> {
        validate::check_element(&elem, span)?;
        self.enter_nesting(span)?;
        let Element {
            name,
            attrs,
            children,
            self_closing,
        } = elem;
        let attrs = attrs
            .into_iter()
            .map(|attr| self.walk_attribute(attr))
            .collect::<Result<_, _>>()?;
        let children = self.walk_children(children)?;
        self.exit_nesting();
        Ok(Element {
            name,
            attrs,
            children,
            self_closing,
        })
    }

    fn walk_fragment(&mut self, frag: Fragment, span: Span) -> Result<Fragment, TransformError> {
        validate::check_fragment(&frag)?;
        self.enter_nesting(span)?;
        let children = self.walk_children(frag.children)?;
        self.exit_nesting();
        Ok(Fragment {
            children,
            provenance: frag.provenance,
        })
    }

    fn walk_attribute(
        &mut self,
        attr: Spanned<Attribute>,
    ) -> Result<Spanned<Attribute>, TransformError> {
        let Attribute { name, value } = attr.node;
        let value = match value {
            None => None,
            Some(value) => {
                let value_span = value.span;
                let node = match value.node {
                    AttrValue::Str(s) => AttrValue::Str(s),
                    AttrValue::Container(container) => {
                        AttrValue::Container(self.walk_container(container)?)
                    }
                    AttrValue::Element(elem) => match elem.branch_kind() {
                        Some(BranchKind::If) => AttrValue::Container(Container::of(
                            self.rewrite_standalone(elem, value_span)?,
                        )),
                        Some(kind) => {
                            return Err(TransformError::orphan(kind, value_span)
                                .with_node_text(|| element_excerpt(&elem)))
                        }
                        None => AttrValue::Element(self.walk_element(elem, value_span)?),
                    },
                };
                Some(Spanned::new(node, value_span))
            }
        };
        Ok(Spanned::new(Attribute { name, value }, attr.span))
    }

    fn walk_container(&mut self, container: Container) -> Result<Container, TransformError> {
        match container.expr {
            Some(expr) => Ok(Container::of(self.walk_expr(*expr)?)),
            None => Ok(Container::empty()),
        }
    }

    /// Validate a child list, replace each `<If>` with a container holding
    /// its conditional, and drop the branches that conditional consumed.
    fn walk_children(
        &mut self,
        children: Vec<Spanned<Node>>,
    ) -> Result<Vec<Spanned<Node>>, TransformError> {
        validate::validate_chain(&children)?;

        let mut slots: Vec<Option<Spanned<Node>>> = children.into_iter().map(Some).collect();
        for i in 0..slots.len() {
            let Some(child) = slots[i].take() else {
                continue;
            };
            let span = child.span;
            let node = match child.node {
                Node::Text(text) => Node::Text(text),
                Node::Container(container) => Node::Container(self.walk_container(container)?),
                Node::Fragment(frag) => Node::Fragment(self.walk_fragment(frag, span)?),
                Node::Element(elem) => match elem.branch_kind() {
                    Some(BranchKind::If) => {
                        let conditional = synthesize::synthesize(
                            elem,
                            span,
                            &mut slots[i + 1..],
                            self.depth + 1,
                            &mut self.stats,
                        )?;
                        self.stats.chains += 1;
                        Node::Container(Container::of(self.walk_expr(conditional)?))
                    }
                    // A continuation the chain before it did not consume.
                    Some(kind) => {
                        return Err(TransformError::orphan(kind, span)
                            .with_node_text(|| element_excerpt(&elem)))
                    }
                    None => Node::Element(self.walk_element(elem, span)?),
                },
            };
            slots[i] = Some(Spanned::new(node, span));
        }

        // Dropping branches can bring two text runs together.
        let mut out: Vec<Spanned<Node>> = Vec::with_capacity(slots.len());
        for child in slots.into_iter().flatten() {
            if let (Some(prev), Node::Text(text)) = (out.last_mut(), &child.node) {
                if let Node::Text(prev_text) = &mut prev.node {
                    prev_text.push_str(text);
                    prev.span = prev.span.merge(child.span);
                    continue;
                }
            }
            out.push(child);
        }
        Ok(out)
    }
}
