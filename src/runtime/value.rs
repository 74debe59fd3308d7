use std::fmt;

/// A runtime value: the subset of JavaScript values markup can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Markup(Markup),
}

/// Rendered markup. Children are kept as values; holes render nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Markup {
    Element {
        name: String,
        props: Vec<(String, Value)>,
        children: Vec<Value>,
    },
    Fragment(Vec<Value>),
}

impl Value {
    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Markup(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Markup(_) => "object",
        }
    }

    /// Numeric coercion for arithmetic and loose comparison.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Str(s) => {
                let t = s.trim();
                if t.is_empty() {
                    0.0
                } else {
                    t.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Markup(_) => f64::NAN,
        }
    }

    /// `===`
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Markup(_), Value::Markup(_)) => false,
            _ => self == other,
        }
    }

    /// `==`, without object-to-primitive conversion.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
            (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
            (Value::Markup(_), _) | (_, Value::Markup(_)) => false,
            (a, b) if a.type_name() == b.type_name() => a.strict_eq(b),
            (a, b) => a.to_number() == b.to_number(),
        }
    }

    /// Markup as HTML-like text. `null`, `undefined` and booleans are holes.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_into(self, &mut out);
        out
    }
}

fn render_into(value: &Value, out: &mut String) {
    match value {
        Value::Undefined | Value::Null | Value::Bool(_) => {}
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::Str(s) => out.push_str(s),
        Value::Markup(Markup::Fragment(children)) => {
            for child in children {
                render_into(child, out);
            }
        }
        Value::Markup(Markup::Element {
            name,
            props,
            children,
        }) => {
            out.push('<');
            out.push_str(name);
            for (key, prop) in props {
                match prop {
                    Value::Bool(true) => {
                        out.push(' ');
                        out.push_str(key);
                    }
                    Value::Str(s) => {
                        out.push_str(&format!(" {}=\"{}\"", key, s));
                    }
                    other => {
                        out.push_str(&format!(" {}={{{}}}", key, other));
                    }
                }
            }
            if children.is_empty() {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in children {
                render_into(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

/// Integers print without a fraction, like `String(n)` does.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Markup(_) => write!(f, "{}", self.render()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
