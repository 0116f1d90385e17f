//! Runtime values.

use std::fmt;

/// The result of evaluating a term.
///
/// Values carry no location: they are runtime data, not syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Void,
}

impl Value {
    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "Str",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::Void => "Void",
        }
    }

    /// The line `print` emits for this value, or `None` when nothing is emitted.
    pub fn print_text(&self) -> Option<String> {
        match self {
            Value::Void => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Void => f.write_str("void"),
        }
    }
}
