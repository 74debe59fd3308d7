mod expr;
mod markup;


use crate::ast::*;
use crate::diagnostic::Diagnostic;
use crate::lexeme::Lexeme;
use crate::lexer::{LexMode, Lexer};
use crate::span::{Span, Spanned};

pub(crate) const MAX_NESTING_DEPTH: u32 = 256;

/// Recursive-descent parser that pulls tokens from the lexer one at a time,
/// telling it which [`LexMode`] applies to the next token.
pub(crate) struct Parser<'src> {
    lexer: Lexer<'src>,
    tok: Spanned<Lexeme>,
    prev_span: Span,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str, file_id: u16) -> Self {
        let mut lexer = Lexer::new(source, file_id);
        let tok = lexer.next_token(LexMode::Script);
        Self {
            lexer,
            prev_span: Span::new(file_id, 0, 0),
            tok,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    fn enter_nesting(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            self.depth -= 1;
            self.error_with_help(
                "nesting depth exceeded (maximum 256 levels)",
                "extract deeply nested markup into separate components",
            );
            return false;
        }
        true
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn parse_unit(mut self, name: &str) -> Result<SourceUnit, Vec<Diagnostic>> {
        let mut stmts = Vec::new();
        while !self.at(&Lexeme::Eof) {
            let before = self.tok.span;
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.recover(),
            }
            // Guarantee progress on malformed input.
            if self.tok.span == before && !self.at(&Lexeme::Eof) {
                self.advance();
            }
        }

        let mut diagnostics = self.lexer.take_diagnostics();
        diagnostics.append(&mut self.diagnostics);
        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }
        let comments = self
            .lexer
            .take_comments()
            .into_iter()
            .map(|c| Spanned::new(c.text, c.span))
            .collect();
        Ok(SourceUnit {
            name: name.to_string(),
            stmts,
            comments,
        })
    }

    fn parse_stmt(&mut self) -> Option<Spanned<Stmt>> {
        let start = self.current_span();
        let errors_before = self.diagnostics.len();
        let stmt = match self.peek() {
            Lexeme::Import => Stmt::Import(self.parse_import()),
            Lexeme::Const | Lexeme::Let => {
                let kind = if self.at(&Lexeme::Const) {
                    BindingKind::Const
                } else {
                    BindingKind::Let
                };
                self.advance();
                let name = self.expect_ident();
                self.expect(&Lexeme::Eq);
                let init = self.parse_expr();
                Stmt::Binding { kind, name, init }
            }
            Lexeme::Export => {
                self.advance();
                self.expect(&Lexeme::Default);
                Stmt::ExportDefault(self.parse_expr())
            }
            _ => Stmt::Expr(self.parse_expr()),
        };
        self.eat(&Lexeme::Semicolon);

        if self.diagnostics.len() > errors_before {
            return None;
        }
        Some(Spanned::new(stmt, start.merge(self.prev_span)))
    }

    fn parse_import(&mut self) -> ImportDecl {
        self.expect(&Lexeme::Import);

        let mut decl = ImportDecl {
            default: None,
            namespace: None,
            named: Vec::new(),
            source: Spanned::dummy(String::new()),
        };

        // Side-effect import: `import "polyfill"`
        if let Some(source) = self.try_string() {
            decl.source = source;
            return decl;
        }

        if let Some(ident) = self.try_ident() {
            decl.default = Some(ident);
            if !self.eat(&Lexeme::Comma) {
                self.expect(&Lexeme::From);
                decl.source = self.expect_string();
                return decl;
            }
        }

        if self.eat(&Lexeme::Star) {
            self.expect(&Lexeme::As);
            decl.namespace = Some(self.expect_ident());
        } else if self.eat(&Lexeme::LBrace) {
            while !self.at(&Lexeme::RBrace) && !self.at(&Lexeme::Eof) {
                let imported = self.expect_name();
                let local = if self.eat(&Lexeme::As) {
                    Some(self.expect_ident())
                } else {
                    None
                };
                decl.named.push(ImportSpecifier { imported, local });
                if !self.eat(&Lexeme::Comma) {
                    break;
                }
            }
            self.expect(&Lexeme::RBrace);
        } else {
            self.error_with_help(
                &format!(
                    "expected import clause, found {}",
                    self.peek().description()
                ),
                "write `import Name from \"module\"` or `import { Name } from \"module\"`",
            );
        }

        self.expect(&Lexeme::From);
        decl.source = self.expect_string();
        decl
    }

    /// Skip to the next plausible statement start.
    fn recover(&mut self) {
        loop {
            match self.peek() {
                Lexeme::Eof | Lexeme::Import | Lexeme::Const | Lexeme::Let | Lexeme::Export => {
                    return
                }
                Lexeme::Semicolon => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ─── Token helpers ─────────────────────────────────────────────

    fn peek(&self) -> &Lexeme {
        &self.tok.node
    }

    fn current_span(&self) -> Span {
        self.tok.span
    }

    fn prev_span(&self) -> Span {
        self.prev_span
    }

    /// Consume the current token; lex the next one as script.
    fn advance(&mut self) -> Spanned<Lexeme> {
        self.bump(LexMode::Script)
    }

    /// Consume the current token; lex the next one in `mode`.
    fn bump(&mut self, mode: LexMode) -> Spanned<Lexeme> {
        if self.tok.node == Lexeme::Eof {
            return self.tok.clone();
        }
        let next = self.lexer.next_token(mode);
        let tok = std::mem::replace(&mut self.tok, next);
        self.prev_span = tok.span;
        tok
    }

    fn at(&self, token: &Lexeme) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    fn eat(&mut self, token: &Lexeme) -> bool {
        self.eat_in(token, LexMode::Script)
    }

    fn eat_in(&mut self, token: &Lexeme, mode: LexMode) -> bool {
        if self.at(token) {
            self.bump(mode);
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Lexeme) -> Span {
        self.expect_in(token, LexMode::Script)
    }

    /// Expect `token`; the token after it is lexed in `mode`.
    fn expect_in(&mut self, token: &Lexeme, mode: LexMode) -> Span {
        if self.at(token) {
            let span = self.current_span();
            self.bump(mode);
            span
        } else {
            self.error_at_current(&format!(
                "expected {}, found {}",
                token.description(),
                self.peek().description()
            ));
            self.current_span()
        }
    }

    fn expect_ident(&mut self) -> Spanned<String> {
        match self.try_ident() {
            Some(ident) => ident,
            None => {
                self.error_at_current(&format!(
                    "expected identifier, found {}",
                    self.peek().description()
                ));
                Spanned::new("_error_".to_string(), self.current_span())
            }
        }
    }

    fn try_ident(&mut self) -> Option<Spanned<String>> {
        if let Lexeme::Ident(name) = self.peek().clone() {
            let span = self.current_span();
            self.advance();
            Some(Spanned::new(name, span))
        } else {
            None
        }
    }

    /// An identifier or a keyword used as a name (`x.default`, `{ as }`).
    fn expect_name(&mut self) -> Spanned<String> {
        if let Some(text) = self.peek().keyword_text() {
            let span = self.current_span();
            self.advance();
            return Spanned::new(text.to_string(), span);
        }
        self.expect_ident()
    }

    fn try_string(&mut self) -> Option<Spanned<String>> {
        if let Lexeme::Str(value) = self.peek().clone() {
            let span = self.current_span();
            self.advance();
            Some(Spanned::new(value, span))
        } else {
            None
        }
    }

    fn expect_string(&mut self) -> Spanned<String> {
        match self.try_string() {
            Some(s) => s,
            None => {
                self.error_at_current(&format!(
                    "expected string literal, found {}",
                    self.peek().description()
                ));
                Spanned::new(String::new(), self.current_span())
            }
        }
    }

    fn error_at_current(&mut self, msg: &str) {
        self.diagnostics
            .push(Diagnostic::error(msg.to_string(), self.current_span()));
    }

    fn error_with_help(&mut self, msg: &str, help: &str) {
        self.diagnostics.push(
            Diagnostic::error(msg.to_string(), self.current_span()).with_help(help.to_string()),
        );
    }
}
