use crate::ast::*;
use crate::lexeme::Lexeme;
use crate::lexer::LexMode;
use crate::span::Spanned;

use super::Parser;

impl<'src> Parser<'src> {
    pub(super) fn parse_expr(&mut self) -> Spanned<Expr> {
        let test = self.parse_expr_bp(0);
        if !self.eat(&Lexeme::Question) {
            return test;
        }
        if !self.enter_nesting() {
            return test;
        }
        // Conditionals are right-associative: `a ? b : c ? d : e`.
        let consequent = self.parse_expr();
        self.expect(&Lexeme::Colon);
        let alternate = self.parse_expr();
        self.exit_nesting();
        let span = test.span.merge(alternate.span);
        Spanned::new(
            Expr::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
                provenance: None,
            },
            span,
        )
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Spanned<Expr> {
        let mut lhs = self.parse_unary();

        loop {
            let op = match self.peek() {
                Lexeme::EqEqEq => BinOp::StrictEq,
                Lexeme::BangEqEq => BinOp::StrictNe,
                Lexeme::EqEq => BinOp::Eq,
                Lexeme::BangEq => BinOp::Ne,
                Lexeme::Lt => BinOp::Lt,
                Lexeme::Gt => BinOp::Gt,
                Lexeme::LtEq => BinOp::Le,
                Lexeme::GtEq => BinOp::Ge,
                Lexeme::AmpAmp => BinOp::And,
                Lexeme::PipePipe => BinOp::Or,
                Lexeme::Plus => BinOp::Add,
                Lexeme::Minus => BinOp::Sub,
                Lexeme::Star => BinOp::Mul,
                Lexeme::Slash => BinOp::Div,
                Lexeme::Percent => BinOp::Rem,
                _ => break,
            };

            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }

            self.advance(); // consume operator
            let rhs = self.parse_expr_bp(r_bp);
            let span = lhs.span.merge(rhs.span);
            lhs = Spanned::new(
                Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        lhs
    }

    fn parse_unary(&mut self) -> Spanned<Expr> {
        let start = self.current_span();
        let op = match self.peek() {
            Lexeme::Bang => UnaryOp::Not,
            Lexeme::Minus => UnaryOp::Neg,
            _ => {
                let primary = self.parse_primary();
                return self.parse_postfix(primary);
            }
        };
        self.advance();
        if !self.enter_nesting() {
            return Spanned::new(Expr::null(), start);
        }
        let operand = self.parse_unary();
        self.exit_nesting();
        let span = start.merge(operand.span);
        Spanned::new(
            Expr::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    /// Parse postfix operations: `.name` and `(args)` chains.
    fn parse_postfix(&mut self, mut expr: Spanned<Expr>) -> Spanned<Expr> {
        loop {
            if self.eat(&Lexeme::Dot) {
                let property = self.expect_name();
                let span = expr.span.merge(property.span);
                expr = Spanned::new(
                    Expr::Member {
                        object: Box::new(expr),
                        property,
                    },
                    span,
                );
            } else if self.eat(&Lexeme::LParen) {
                let mut args = Vec::new();
                while !self.at(&Lexeme::RParen) && !self.at(&Lexeme::Eof) {
                    args.push(self.parse_expr());
                    if !self.eat(&Lexeme::Comma) {
                        break;
                    }
                }
                self.expect(&Lexeme::RParen);
                let span = expr.span.merge(self.prev_span());
                expr = Spanned::new(
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    span,
                );
            } else {
                break;
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> Spanned<Expr> {
        let start = self.current_span();

        match self.peek().clone() {
            Lexeme::Number(text) => {
                self.advance();
                Spanned::new(Expr::Literal(Literal::Number(text)), start)
            }
            Lexeme::Str(value) => {
                self.advance();
                Spanned::new(Expr::Literal(Literal::Str(value)), start)
            }
            Lexeme::True => {
                self.advance();
                Spanned::new(Expr::Literal(Literal::Bool(true)), start)
            }
            Lexeme::False => {
                self.advance();
                Spanned::new(Expr::Literal(Literal::Bool(false)), start)
            }
            Lexeme::Null => {
                self.advance();
                Spanned::new(Expr::null(), start)
            }
            Lexeme::Ident(name) => {
                self.advance();
                Spanned::new(Expr::Ident(name), start)
            }
            Lexeme::LParen => {
                self.advance();
                if !self.enter_nesting() {
                    return Spanned::new(Expr::null(), start);
                }
                let inner = self.parse_expr();
                self.exit_nesting();
                self.expect(&Lexeme::RParen);
                inner
            }
            Lexeme::Lt => self.parse_markup_expr(LexMode::Script),
            _ => {
                self.error_at_current(&format!(
                    "expected expression, found {}",
                    self.peek().description()
                ));
                Spanned::new(Expr::null(), start)
            }
        }
    }
}
