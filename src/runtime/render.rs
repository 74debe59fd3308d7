use std::collections::HashMap;
use std::fmt;

use crate::ast::*;
use crate::diagnostic::Diagnostic;
use crate::span::{Span, Spanned};

use super::value::{Markup, Value};

/// A host function. Arguments arrive evaluated.
pub type HostFn = Box<dyn Fn(&[Value]) -> Value>;

/// How the pseudo-elements behave when they reach the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// The tree was transformed; a pseudo-element here is an error.
    #[default]
    Transformed,
    /// Untransformed: `If`/`ElseIf`/`Else` are plain components whose props
    /// and children were evaluated before they ran.
    Fallback,
}

/// Bindings addressed by dotted path (`user.name`) and host functions.
#[derive(Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    functions: HashMap<String, HostFn>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        self.bindings.insert(path.to_string(), value.into());
        self
    }

    pub fn function(&mut self, path: &str, f: impl Fn(&[Value]) -> Value + 'static) -> &mut Self {
        self.functions.insert(path.to_string(), Box::new(f));
        self
    }

    pub fn lookup(&self, path: &str) -> Option<&Value> {
        self.bindings.get(path)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderError {
    pub message: String,
    pub span: Span,
}

impl RenderError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.message, self.span)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RenderError {}

const FALLBACK_WARNING: &str = " is a special component which is expected to be removed by \
transform at compile-time. If you're seeing this message then the transform wasn't successful";

/// Evaluates a unit to a value, logging every host call.
pub struct Renderer {
    env: Environment,
    mode: RenderMode,
    calls: Vec<String>,
    warnings: Vec<String>,
}

impl Renderer {
    pub fn new(env: Environment, mode: RenderMode) -> Self {
        Self {
            env,
            mode,
            calls: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Host calls made so far, as `name(arg, ...)`.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Warnings the fallback components emitted.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Evaluate every statement; the result is the default export, or else
    /// the value of the last expression statement.
    pub fn render_unit(&mut self, unit: &SourceUnit) -> Result<Value, RenderError> {
        let mut export = None;
        let mut last = Value::Undefined;
        for stmt in &unit.stmts {
            match &stmt.node {
                Stmt::Import(_) => {}
                Stmt::Binding { name, init, .. } => {
                    let value = self.eval(init)?;
                    self.env.bind(&name.node, value);
                }
                Stmt::ExportDefault(expr) => export = Some(self.eval(expr)?),
                Stmt::Expr(expr) => last = self.eval(expr)?,
            }
        }
        Ok(export.unwrap_or(last))
    }

    pub fn eval(&mut self, expr: &Spanned<Expr>) -> Result<Value, RenderError> {
        match &expr.node {
            Expr::Literal(lit) => Ok(eval_literal(lit)),
            Expr::Ident(name) if name == "undefined" => Ok(Value::Undefined),
            Expr::Ident(_) | Expr::Member { .. } => Ok(dotted_path(&expr.node)
                .and_then(|path| self.env.lookup(&path).cloned())
                .unwrap_or(Value::Undefined)),
            Expr::Call { callee, args } => self.eval_call(callee, args, expr.span),
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(match op {
                    UnaryOp::Not => Value::Bool(!value.truthy()),
                    UnaryOp::Neg => Value::Number(-value.to_number()),
                })
            }
            Expr::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs),
            Expr::Conditional {
                test,
                consequent,
                alternate,
                ..
            } => {
                if self.eval(test)?.truthy() {
                    self.eval(consequent)
                } else {
                    self.eval(alternate)
                }
            }
            Expr::Element(elem) => self.eval_element(elem, expr.span),
            Expr::Fragment(frag) => Ok(Value::Markup(Markup::Fragment(
                self.eval_children(&frag.children)?,
            ))),
        }
    }

    fn eval_call(
        &mut self,
        callee: &Spanned<Expr>,
        args: &[Spanned<Expr>],
        span: Span,
    ) -> Result<Value, RenderError> {
        let Some(name) = dotted_path(&callee.node) else {
            return Err(RenderError::new("callee is not a function", callee.span));
        };
        let args = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let Some(function) = self.env.functions.get(&name) else {
            return Err(RenderError::new(format!("{} is not a function", name), span));
        };
        let shown: Vec<String> = args.iter().map(Value::to_string).collect();
        self.calls.push(format!("{}({})", name, shown.join(", ")));
        Ok(function(&args))
    }

    fn eval_binary(
        &mut self,
        op: BinOp,
        lhs: &Spanned<Expr>,
        rhs: &Spanned<Expr>,
    ) -> Result<Value, RenderError> {
        let left = self.eval(lhs)?;
        let short_circuit = match op {
            BinOp::And => !left.truthy(),
            BinOp::Or => left.truthy(),
            _ => false,
        };
        if short_circuit {
            return Ok(left);
        }
        let right = self.eval(rhs)?;
        let value = match op {
            BinOp::StrictEq => Value::Bool(left.strict_eq(&right)),
            BinOp::StrictNe => Value::Bool(!left.strict_eq(&right)),
            BinOp::Eq => Value::Bool(left.loose_eq(&right)),
            BinOp::Ne => Value::Bool(!left.loose_eq(&right)),
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => Value::Bool(compare(op, &left, &right)),
            BinOp::Add => match (&left, &right) {
                (Value::Str(_), _) | (_, Value::Str(_)) => {
                    Value::Str(format!("{}{}", left, right))
                }
                _ => Value::Number(left.to_number() + right.to_number()),
            },
            BinOp::Sub => Value::Number(left.to_number() - right.to_number()),
            BinOp::Mul => Value::Number(left.to_number() * right.to_number()),
            BinOp::Div => Value::Number(left.to_number() / right.to_number()),
            BinOp::Rem => Value::Number(left.to_number() % right.to_number()),
            BinOp::And | BinOp::Or => right,
        };
        Ok(value)
    }

    /// Props and children are evaluated before the element is built, the
    /// way `createElement` receives them.
    fn eval_element(&mut self, elem: &Element, span: Span) -> Result<Value, RenderError> {
        let mut props = Vec::with_capacity(elem.attrs.len());
        for attr in &elem.attrs {
            let value = match &attr.node.value {
                None => Value::Bool(true),
                Some(value) => match &value.node {
                    AttrValue::Str(s) => Value::Str(s.clone()),
                    AttrValue::Container(container) => match &container.expr {
                        Some(expr) => self.eval(expr)?,
                        None => Value::Undefined,
                    },
                    AttrValue::Element(inner) => self.eval_element(inner, value.span)?,
                },
            };
            props.push((attr.node.name.node.clone(), value));
        }
        let children = self.eval_children(&elem.children)?;

        let Some(kind) = elem.branch_kind() else {
            return Ok(Value::Markup(Markup::Element {
                name: elem.name.node.clone(),
                props,
                children,
            }));
        };
        if self.mode == RenderMode::Transformed {
            return Err(RenderError::new(
                format!("{} reached the renderer untransformed", kind),
                span,
            ));
        }

        self.warnings
            .push(format!("<{} />{}", kind.tag(), FALLBACK_WARNING));
        let shown = match kind {
            BranchKind::Else => true,
            BranchKind::If | BranchKind::ElseIf => props
                .iter()
                .find(|(name, _)| name == "condition")
                .is_some_and(|(_, value)| value.truthy()),
        };
        if shown {
            Ok(Value::Markup(Markup::Fragment(children)))
        } else {
            Ok(Value::Null)
        }
    }

    fn eval_children(&mut self, children: &[Spanned<Node>]) -> Result<Vec<Value>, RenderError> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            match &child.node {
                Node::Text(raw) => {
                    if let Some(text) = clean_jsx_text(raw) {
                        out.push(Value::Str(text));
                    }
                }
                Node::Container(container) => {
                    if let Some(expr) = &container.expr {
                        out.push(self.eval(expr)?);
                    }
                }
                Node::Element(elem) => out.push(self.eval_element(elem, child.span)?),
                Node::Fragment(frag) => out.push(Value::Markup(Markup::Fragment(
                    self.eval_children(&frag.children)?,
                ))),
            }
        }
        Ok(out)
    }
}

fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(text) => Value::Number(text.parse().unwrap_or(f64::NAN)),
        Literal::Str(s) => Value::Str(s.clone()),
    }
}

fn compare(op: BinOp, left: &Value, right: &Value) -> bool {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => left.to_number().partial_cmp(&right.to_number()),
    };
    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        BinOp::Lt => ordering.is_lt(),
        BinOp::Gt => ordering.is_gt(),
        BinOp::Le => ordering.is_le(),
        BinOp::Ge => ordering.is_ge(),
        _ => false,
    }
}

/// `a.b.c` for identifier and member chains.
fn dotted_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(name) => Some(name.clone()),
        Expr::Member { object, property } => {
            dotted_path(&object.node).map(|base| format!("{}.{}", base, property.node))
        }
        _ => None,
    }
}

/// JSX text whitespace rules: lines are trimmed where they meet a line
/// break, blank lines vanish, and the remaining lines join with one space.
pub fn clean_jsx_text(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let last_non_empty = lines
        .iter()
        .rposition(|line| line.chars().any(|c| c != ' ' && c != '\t' && c != '\r'));

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.replace('\t', " ");
        let mut trimmed: &str = &line;
        if i != 0 {
            trimmed = trimmed.trim_start_matches(' ');
        }
        if i != lines.len() - 1 {
            trimmed = trimmed.trim_end_matches([' ', '\r']);
        }
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(trimmed);
        if Some(i) != last_non_empty {
            out.push(' ');
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
