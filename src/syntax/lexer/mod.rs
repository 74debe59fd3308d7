use crate::diagnostic::Diagnostic;
use crate::lexeme::Lexeme;
use crate::span::{Span, Spanned};

/// A source comment preserved for the formatter.
#[derive(Clone, Debug)]
pub(crate) struct Comment {
    pub(crate) text: String, // includes the "//" or "/* */" delimiters
    pub(crate) span: Span,
}

/// What the parser expects next. JSX switches the rules for what a token is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LexMode {
    /// Ordinary JavaScript tokens.
    Script,
    /// Inside `<tag ...>`: names may contain `-`, strings have no escapes,
    /// `>` never combines with `=`.
    Tag,
    /// Between tags: raw text up to the next `<` or `{`.
    Child,
}

pub(crate) struct Lexer<'src> {
    source: &'src [u8],
    file_id: u16,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    comments: Vec<Comment>,
}

impl<'src> Lexer<'src> {
    pub(crate) fn new(source: &'src str, file_id: u16) -> Self {
        Self {
            source: source.as_bytes(),
            file_id,
            pos: 0,
            diagnostics: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Drain accumulated comments from the lexer.
    pub(crate) fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Drain accumulated diagnostics from the lexer.
    pub(crate) fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Lex the whole input in script mode. Used by tests and tooling; the
    /// parser drives the lexer token by token instead.
    #[allow(dead_code)]
    pub(crate) fn tokenize(mut self) -> (Vec<Spanned<Lexeme>>, Vec<Comment>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token(LexMode::Script);
            let is_eof = tok.node == Lexeme::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, self.comments, self.diagnostics)
    }

    pub(crate) fn next_token(&mut self, mode: LexMode) -> Spanned<Lexeme> {
        if mode == LexMode::Child {
            return self.next_child_token();
        }
        loop {
            self.skip_whitespace_and_comments();

            if self.pos >= self.source.len() {
                return self.make_token(Lexeme::Eof, self.pos, self.pos);
            }

            let start = self.pos;
            let ch = self.source[self.pos];

            // Identifiers and keywords
            if is_ident_start(ch) {
                return self.scan_ident_or_keyword(mode);
            }

            // Number literals
            if ch.is_ascii_digit() && mode == LexMode::Script {
                return self.scan_number();
            }

            if ch == b'"' || ch == b'\'' {
                return self.scan_string(mode);
            }

            // Symbols
            if let Some(tok) = self.scan_symbol(start, mode) {
                return tok;
            }
            // scan_symbol returned None → error was recorded, try again
        }
    }

    fn next_child_token(&mut self) -> Spanned<Lexeme> {
        let start = self.pos;
        match self.peek() {
            None => self.make_token(Lexeme::Eof, start, start),
            Some(b'<') => {
                self.pos += 1;
                self.make_token(Lexeme::Lt, start, self.pos)
            }
            Some(b'{') => {
                self.pos += 1;
                self.make_token(Lexeme::LBrace, start, self.pos)
            }
            Some(_) => {
                while let Some(ch) = self.peek() {
                    if ch == b'<' || ch == b'{' {
                        break;
                    }
                    self.pos += 1;
                }
                let text = self.text(start, self.pos);
                self.make_token(Lexeme::JsxText(text), start, self.pos)
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }

            if self.at_pair(b'/', b'/') {
                let start = self.pos;
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                self.push_comment(start);
                continue;
            }

            if self.at_pair(b'/', b'*') {
                let start = self.pos;
                self.pos += 2;
                while self.pos < self.source.len() && !self.at_pair(b'*', b'/') {
                    self.pos += 1;
                }
                if self.pos < self.source.len() {
                    self.pos += 2;
                } else {
                    self.diagnostics.push(
                        Diagnostic::error(
                            "unterminated block comment".to_string(),
                            Span::new(self.file_id, start as u32, self.pos as u32),
                        )
                        .with_help("close the comment with `*/`".to_string()),
                    );
                }
                self.push_comment(start);
                continue;
            }

            break;
        }
    }

    fn push_comment(&mut self, start: usize) {
        let text = self.text(start, self.pos);
        self.comments.push(Comment {
            text,
            span: Span::new(self.file_id, start as u32, self.pos as u32),
        });
    }

    fn scan_ident_or_keyword(&mut self, mode: LexMode) -> Spanned<Lexeme> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            let dashed = mode == LexMode::Tag && ch == b'-';
            if !is_ident_continue(ch) && !dashed {
                break;
            }
            self.pos += 1;
        }
        let text = self.text(start, self.pos);
        if mode == LexMode::Tag {
            return self.make_token(Lexeme::Ident(text), start, self.pos);
        }
        let token = Lexeme::from_keyword(&text).unwrap_or(Lexeme::Ident(text));
        self.make_token(token, start, self.pos)
    }

    fn scan_number(&mut self) -> Spanned<Lexeme> {
        let start = self.pos;
        self.eat_digits();
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+') | Some(b'-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.eat_digits();
            }
        }
        let text = self.text(start, self.pos);
        self.make_token(Lexeme::Number(text), start, self.pos)
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    /// Strings in script mode understand escapes; JSX attribute strings are raw.
    fn scan_string(&mut self, mode: LexMode) -> Spanned<Lexeme> {
        let start = self.pos;
        let quote = self.source[self.pos];
        self.pos += 1;

        let mut value: Vec<u8> = Vec::new();
        loop {
            let Some(ch) = self.peek() else {
                self.diagnostics.push(
                    Diagnostic::error(
                        "unterminated string literal".to_string(),
                        Span::new(self.file_id, start as u32, self.pos as u32),
                    )
                    .with_help(format!("close the string with `{}`", quote as char)),
                );
                break;
            };
            self.pos += 1;
            if ch == quote {
                break;
            }
            if ch == b'\n' && mode == LexMode::Script {
                self.diagnostics.push(
                    Diagnostic::error(
                        "line break inside string literal".to_string(),
                        Span::new(self.file_id, start as u32, self.pos as u32),
                    )
                    .with_help("use `\\n` to embed a newline".to_string()),
                );
                break;
            }
            if ch == b'\\' && mode == LexMode::Script {
                self.scan_escape(&mut value);
                continue;
            }
            value.push(ch);
        }

        let value = String::from_utf8_lossy(&value).into_owned();
        self.make_token(Lexeme::Str(value), start, self.pos)
    }

    fn scan_escape(&mut self, out: &mut Vec<u8>) {
        let esc_start = self.pos - 1;
        let Some(ch) = self.peek() else {
            return;
        };
        self.pos += 1;
        match ch {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'0' => out.push(0),
            b'u' => {
                let hex_start = self.pos;
                while self.pos < self.source.len()
                    && self.pos - hex_start < 4
                    && self.source[self.pos].is_ascii_hexdigit()
                {
                    self.pos += 1;
                }
                let decoded = std::str::from_utf8(&self.source[hex_start..self.pos])
                    .ok()
                    .filter(|hex| hex.len() == 4)
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => {
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    }
                    None => self.diagnostics.push(
                        Diagnostic::error(
                            "invalid unicode escape".to_string(),
                            Span::new(self.file_id, esc_start as u32, self.pos as u32),
                        )
                        .with_help("unicode escapes take exactly four hex digits: `\\u00e9`".to_string()),
                    ),
                }
            }
            // \\, \', \" and any other escaped character stand for themselves
            other => out.push(other),
        }
    }

    fn scan_symbol(&mut self, start: usize, mode: LexMode) -> Option<Spanned<Lexeme>> {
        let ch = self.source[self.pos];
        self.pos += 1;

        let token = match ch {
            b'(' => Lexeme::LParen,
            b')' => Lexeme::RParen,
            b'{' => Lexeme::LBrace,
            b'}' => Lexeme::RBrace,
            b',' => Lexeme::Comma,
            b':' => Lexeme::Colon,
            b';' => Lexeme::Semicolon,
            b'.' => Lexeme::Dot,
            b'?' => Lexeme::Question,
            b'+' => Lexeme::Plus,
            b'-' => Lexeme::Minus,
            b'*' => Lexeme::Star,
            b'/' => Lexeme::Slash,
            b'%' => Lexeme::Percent,
            b'=' => {
                if self.eat_byte(b'=') {
                    if self.eat_byte(b'=') {
                        Lexeme::EqEqEq
                    } else {
                        Lexeme::EqEq
                    }
                } else {
                    Lexeme::Eq
                }
            }
            b'!' => {
                if self.eat_byte(b'=') {
                    if self.eat_byte(b'=') {
                        Lexeme::BangEqEq
                    } else {
                        Lexeme::BangEq
                    }
                } else {
                    Lexeme::Bang
                }
            }
            b'<' => {
                if mode == LexMode::Script && self.eat_byte(b'=') {
                    Lexeme::LtEq
                } else {
                    Lexeme::Lt
                }
            }
            b'>' => {
                if mode == LexMode::Script && self.eat_byte(b'=') {
                    Lexeme::GtEq
                } else {
                    Lexeme::Gt
                }
            }
            b'&' if self.eat_byte(b'&') => Lexeme::AmpAmp,
            b'|' if self.eat_byte(b'|') => Lexeme::PipePipe,
            _ => {
                self.diagnostics.push(
                    Diagnostic::error(
                        format!("unexpected character '{}' (U+{:04X})", ch as char, ch),
                        Span::new(self.file_id, start as u32, self.pos as u32),
                    )
                    .with_help(
                        "this character is not part of the supported JavaScript/JSX subset"
                            .to_string(),
                    ),
                );
                return None;
            }
        };

        Some(self.make_token(token, start, self.pos))
    }

    fn eat_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_pair(&self, a: u8, b: u8) -> bool {
        self.peek() == Some(a) && self.peek_at(1) == Some(b)
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.source[start..end]).into_owned()
    }

    fn make_token(&self, token: Lexeme, start: usize, end: usize) -> Spanned<Lexeme> {
        Spanned::new(token, Span::new(self.file_id, start as u32, end as u32))
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$' || ch >= 0x80
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$' || ch >= 0x80
}
