use crate::ast::*;

use super::{FormatCtx, MappingKind};

const PREC_CONDITIONAL: u8 = 1;
const PREC_UNARY: u8 = 14;
const PREC_POSTFIX: u8 = 15;
const PREC_PRIMARY: u8 = 16;

/// Format an expression to a single string, without comments.
pub fn format_expr(expr: &Expr) -> String {
    let mut ctx = FormatCtx::new(&[]);
    ctx.emit_expr(expr);
    ctx.output
}

/// How tightly an expression binds; lower values need parentheses sooner.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Conditional { .. } => PREC_CONDITIONAL,
        Expr::Binary { op, .. } => op.binding_power().0,
        Expr::Unary { .. } => PREC_UNARY,
        Expr::Member { .. } | Expr::Call { .. } => PREC_POSTFIX,
        Expr::Literal(_) | Expr::Ident(_) | Expr::Element(_) | Expr::Fragment(_) => PREC_PRIMARY,
    }
}

/// Double-quoted JavaScript string literal.
pub(super) fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl FormatCtx {
    pub(super) fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => match lit {
                Literal::Null => self.output.push_str("null"),
                Literal::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
                Literal::Number(n) => self.output.push_str(n),
                Literal::Str(s) => self.output.push_str(&quote_string(s)),
            },
            Expr::Ident(name) => self.output.push_str(name),
            Expr::Member { object, property } => {
                self.emit_operand(&object.node, PREC_POSTFIX);
                self.output.push('.');
                self.output.push_str(&property.node);
            }
            Expr::Call { callee, args } => {
                self.emit_operand(&callee.node, PREC_POSTFIX);
                self.output.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.emit_expr(&arg.node);
                }
                self.output.push(')');
            }
            Expr::Unary { op, operand } => {
                self.output.push_str(op.as_str());
                // `- -x` must not print as the decrement operator.
                if *op == UnaryOp::Neg && starts_with_minus(&operand.node) {
                    self.output.push(' ');
                }
                self.emit_operand(&operand.node, PREC_UNARY);
            }
            Expr::Binary { op, lhs, rhs } => {
                let (l_bp, r_bp) = op.binding_power();
                self.emit_operand(&lhs.node, l_bp);
                self.output.push(' ');
                self.output.push_str(op.as_str());
                self.output.push(' ');
                self.emit_operand(&rhs.node, r_bp);
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
                provenance,
            } => {
                let start = self.output.len();
                self.emit_operand(&test.node, PREC_CONDITIONAL + 1);
                self.output.push_str(" ? ");
                self.emit_branch_operand(&consequent.node);
                self.output.push_str(" : ");
                self.emit_branch_operand(&alternate.node);
                self.record(start, provenance, MappingKind::Conditional);
            }
            Expr::Element(elem) => self.emit_element(elem),
            Expr::Fragment(frag) => self.emit_fragment(frag),
        }
    }

    /// Emit `expr`, parenthesized if it binds looser than `min_prec`.
    fn emit_operand(&mut self, expr: &Expr, min_prec: u8) {
        if precedence(expr) < min_prec {
            self.output.push('(');
            self.emit_expr(expr);
            self.output.push(')');
        } else {
            self.emit_expr(expr);
        }
    }

    /// Conditional arms: nested conditionals are always parenthesized.
    fn emit_branch_operand(&mut self, expr: &Expr) {
        self.emit_operand(expr, PREC_CONDITIONAL + 1);
    }
}

fn starts_with_minus(expr: &Expr) -> bool {
    match expr {
        Expr::Unary { op, .. } => *op == UnaryOp::Neg,
        Expr::Literal(Literal::Number(n)) => n.starts_with('-'),
        _ => false,
    }
}
