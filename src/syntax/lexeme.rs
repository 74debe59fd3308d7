/// All lexemes of the JavaScript/JSX subset.
#[derive(Clone, Debug, PartialEq)]
pub enum Lexeme {
    // Keywords
    Import,
    From,
    As,
    Const,
    Let,
    Export,
    Default,
    True,
    False,
    Null,

    // Symbols
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
    Dot,       // .
    Question,  // ?
    Eq,        // =
    EqEq,      // ==
    EqEqEq,    // ===
    Bang,      // !
    BangEq,    // !=
    BangEqEq,  // !==
    Lt,        // <
    Gt,        // >
    LtEq,      // <=
    GtEq,      // >=
    AmpAmp,    // &&
    PipePipe,  // ||
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Percent,   // %

    // Literals
    Number(String),
    Str(String),
    Ident(String),

    /// A run of raw text between JSX tags.
    JsxText(String),

    // End of file
    Eof,
}

impl Lexeme {
    /// Try to match an identifier string to a keyword lexeme.
    pub fn from_keyword(s: &str) -> Option<Lexeme> {
        match s {
            "import" => Some(Lexeme::Import),
            "from" => Some(Lexeme::From),
            "as" => Some(Lexeme::As),
            "const" => Some(Lexeme::Const),
            "let" => Some(Lexeme::Let),
            "export" => Some(Lexeme::Export),
            "default" => Some(Lexeme::Default),
            "true" => Some(Lexeme::True),
            "false" => Some(Lexeme::False),
            "null" => Some(Lexeme::Null),
            _ => None,
        }
    }

    /// Keywords that are still valid property and attribute names.
    pub fn keyword_text(&self) -> Option<&'static str> {
        match self {
            Lexeme::Import => Some("import"),
            Lexeme::From => Some("from"),
            Lexeme::As => Some("as"),
            Lexeme::Const => Some("const"),
            Lexeme::Let => Some("let"),
            Lexeme::Export => Some("export"),
            Lexeme::Default => Some("default"),
            Lexeme::True => Some("true"),
            Lexeme::False => Some("false"),
            Lexeme::Null => Some("null"),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Lexeme::Import => "'import'",
            Lexeme::From => "'from'",
            Lexeme::As => "'as'",
            Lexeme::Const => "'const'",
            Lexeme::Let => "'let'",
            Lexeme::Export => "'export'",
            Lexeme::Default => "'default'",
            Lexeme::True => "'true'",
            Lexeme::False => "'false'",
            Lexeme::Null => "'null'",
            Lexeme::LParen => "'('",
            Lexeme::RParen => "')'",
            Lexeme::LBrace => "'{'",
            Lexeme::RBrace => "'}'",
            Lexeme::Comma => "','",
            Lexeme::Colon => "':'",
            Lexeme::Semicolon => "';'",
            Lexeme::Dot => "'.'",
            Lexeme::Question => "'?'",
            Lexeme::Eq => "'='",
            Lexeme::EqEq => "'=='",
            Lexeme::EqEqEq => "'==='",
            Lexeme::Bang => "'!'",
            Lexeme::BangEq => "'!='",
            Lexeme::BangEqEq => "'!=='",
            Lexeme::Lt => "'<'",
            Lexeme::Gt => "'>'",
            Lexeme::LtEq => "'<='",
            Lexeme::GtEq => "'>='",
            Lexeme::AmpAmp => "'&&'",
            Lexeme::PipePipe => "'||'",
            Lexeme::Plus => "'+'",
            Lexeme::Minus => "'-'",
            Lexeme::Star => "'*'",
            Lexeme::Slash => "'/'",
            Lexeme::Percent => "'%'",
            Lexeme::Number(_) => "number literal",
            Lexeme::Str(_) => "string literal",
            Lexeme::Ident(_) => "identifier",
            Lexeme::JsxText(_) => "JSX text",
            Lexeme::Eof => "end of file",
        }
    }
}
