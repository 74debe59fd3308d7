pub mod display;
pub mod navigate;

use serde::{Deserialize, Serialize};

use crate::span::{Span, Spanned};

/// A parsed source file: the unit the transform processes independently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub name: String,
    pub stmts: Vec<Spanned<Stmt>>,
    /// Comments skipped by the lexer, delimiters included.
    #[serde(default)]
    pub comments: Vec<Spanned<String>>,
}

/// Top-level statements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Import(ImportDecl),
    Binding {
        kind: BindingKind,
        name: Spanned<String>,
        init: Spanned<Expr>,
    },
    ExportDefault(Spanned<Expr>),
    Expr(Spanned<Expr>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingKind {
    Const,
    Let,
}

impl BindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingKind::Const => "const",
            BindingKind::Let => "let",
        }
    }
}

/// `import a, * as b, { c, d as e } from "source"` or `import "source"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub default: Option<Spanned<String>>,
    pub namespace: Option<Spanned<String>>,
    pub named: Vec<ImportSpecifier>,
    pub source: Spanned<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub imported: Spanned<String>,
    pub local: Option<Spanned<String>>,
}

impl ImportDecl {
    /// True when the declaration binds nothing (`import "polyfill"`).
    pub fn is_side_effect_only(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }
}

/// Expressions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    Member {
        object: Box<Spanned<Expr>>,
        property: Spanned<String>,
    },
    Call {
        callee: Box<Spanned<Expr>>,
        args: Vec<Spanned<Expr>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    /// `test ? consequent : alternate`
    Conditional {
        test: Box<Spanned<Expr>>,
        consequent: Box<Spanned<Expr>>,
        alternate: Box<Spanned<Expr>>,
        provenance: Option<Provenance>,
    },
    Element(Element),
    Fragment(Fragment),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    /// Kept as written so printing is lossless.
    Number(String),
    Str(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not, // !
    Neg, // -
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    StrictEq, // ===
    StrictNe, // !==
    Eq,       // ==
    Ne,       // !=
    Lt,       // <
    Gt,       // >
    Le,       // <=
    Ge,       // >=
    And,      // &&
    Or,       // ||
    Add,      // +
    Sub,      // -
    Mul,      // *
    Div,      // /
    Rem,      // %
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::StrictEq => "===",
            BinOp::StrictNe => "!==",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }

    /// Returns (left binding power, right binding power).
    /// Higher binding power = higher precedence.
    pub fn binding_power(&self) -> (u8, u8) {
        match self {
            BinOp::Or => (2, 3),
            BinOp::And => (4, 5),
            BinOp::StrictEq | BinOp::StrictNe | BinOp::Eq | BinOp::Ne => (6, 7),
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => (8, 9),
            BinOp::Add | BinOp::Sub => (10, 11),
            BinOp::Mul | BinOp::Div | BinOp::Rem => (12, 13),
        }
    }
}

// ─── Markup tree ───────────────────────────────────────────────────

/// A child of an element or fragment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    Text(String),
    Container(Container),
    Fragment(Fragment),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: Spanned<String>,
    pub attrs: Vec<Spanned<Attribute>>,
    pub children: Vec<Spanned<Node>>,
    pub self_closing: bool,
}

/// `name`, `name="literal"`, `name={expr}` or `name=<Elem />`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: Spanned<String>,
    pub value: Option<Spanned<AttrValue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    Container(Container),
    Element(Element),
}

/// `{expr}`; empty when the braces held nothing but a comment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub expr: Option<Box<Spanned<Expr>>>,
}

impl Container {
    pub fn empty() -> Self {
        Self { expr: None }
    }

    pub fn of(expr: Spanned<Expr>) -> Self {
        Self {
            expr: Some(Box::new(expr)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expr.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub children: Vec<Spanned<Node>>,
    /// Set on fragments the transform synthesizes.
    pub provenance: Option<Provenance>,
}

/// Links a synthesized node back to the branch element it replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub origin: Span,
    pub branch: BranchKind,
}

/// The three pseudo-elements of a conditional chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchKind {
    If,
    ElseIf,
    Else,
}

impl BranchKind {
    pub fn tag(&self) -> &'static str {
        match self {
            BranchKind::If => "If",
            BranchKind::ElseIf => "ElseIf",
            BranchKind::Else => "Else",
        }
    }

    pub fn from_tag(name: &str) -> Option<BranchKind> {
        match name {
            "If" => Some(BranchKind::If),
            "ElseIf" => Some(BranchKind::ElseIf),
            "Else" => Some(BranchKind::Else),
            _ => None,
        }
    }

    /// `ElseIf` and `Else` only make sense after a preceding link.
    pub fn is_continuation(&self) -> bool {
        matches!(self, BranchKind::ElseIf | BranchKind::Else)
    }

    /// `If` and `ElseIf` carry a condition and may start a ternary.
    pub fn is_conditional(&self) -> bool {
        matches!(self, BranchKind::If | BranchKind::ElseIf)
    }
}

impl std::fmt::Display for BranchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.tag())
    }
}

impl Element {
    pub fn branch_kind(&self) -> Option<BranchKind> {
        BranchKind::from_tag(&self.name.node)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn branch_kind(&self) -> Option<BranchKind> {
        self.as_element().and_then(Element::branch_kind)
    }
}

impl Expr {
    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(value.into()))
    }

    pub fn branch_kind(&self) -> Option<BranchKind> {
        match self {
            Expr::Element(elem) => elem.branch_kind(),
            _ => None,
        }
    }
}
