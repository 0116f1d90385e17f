//! AST term types for Rinha programs.
//!
//! A program arrives as JSON: every node is an object with a `kind`
//! discriminant, a `location`, and the fields that kind requires. The
//! discriminant fully determines the shape, so terms decode into a
//! closed enum and a node whose fields do not fit its kind is rejected
//! at decode time.

use crate::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete program file: `{ "name": ..., "expression": ..., "location": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Name of the source file the front end lowered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Root term to evaluate.
    pub expression: Term,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Program {
    /// Decode a program from a JSON string.
    pub fn from_json(source: &str) -> crate::Result<Self> {
        Self::decode(serde_json::Deserializer::from_str(source))
    }

    /// Decode a program from any reader (file, stdin, ...).
    pub fn from_reader<R: io::Read>(reader: R) -> crate::Result<Self> {
        Self::decode(serde_json::Deserializer::from_reader(io::BufReader::new(reader)))
    }

    /// Nesting depth grows by one per `let`, so serde_json's depth cap is
    /// lifted and the parser runs on a growable stack instead.
    fn decode<'de, R>(mut de: serde_json::Deserializer<R>) -> crate::Result<Self>
    where
        R: serde_json::de::Read<'de>,
    {
        de.disable_recursion_limit();
        let program = Program::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Ok(program)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Terms
// ══════════════════════════════════════════════════════════════════════════════

/// A located term.
///
/// Decoding and dropping are both stack-safe for
/// arbitrarily long `let` chains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    #[serde(flatten)]
    pub kind: TermKind,
    pub location: Location,
}

impl Term {
    pub fn new(kind: TermKind, location: Location) -> Self {
        Self { kind, location }
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.kind, &mut pending);
        while let Some(mut child) = pending.pop() {
            detach_children(&mut child.kind, &mut pending);
        }
    }
}

/// Move the sub-terms of `kind` into `pending`, leaving a childless `Void`.
fn detach_children(kind: &mut TermKind, pending: &mut Vec<Box<Term>>) {
    if !matches!(
        kind,
        TermKind::Print { .. } | TermKind::Let { .. } | TermKind::Binary { .. }
    ) {
        return;
    }
    match std::mem::replace(kind, TermKind::Void) {
        TermKind::Print { value } => pending.push(value),
        TermKind::Let { value, next, .. } => pending.extend([value, next]),
        TermKind::Binary { lhs, rhs, .. } => pending.extend([lhs, rhs]),
        _ => {}
    }
}

/// The kind of term, tagged by the JSON `kind` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TermKind {
    // ── Literals ──
    /// `"hello"`
    Str { value: String },
    /// `42`
    Int { value: i64 },
    /// `true`, `false`
    Bool { value: bool },

    // ── Effects & bindings ──
    /// `print(value)`
    Print { value: Box<Term> },
    /// `let name = value; next`
    Let {
        name: Parameter,
        value: Box<Term>,
        next: Box<Term>,
    },
    /// A variable reference.
    Var { text: String },

    // ── Operators ──
    /// `lhs op rhs`
    Binary {
        lhs: Box<Term>,
        op: BinaryOp,
        rhs: Box<Term>,
    },

    /// The unit term. Any `value` field (always `null`) is ignored.
    Void,

    /// A `kind` this evaluator does not know about. Its fields are skipped.
    Unknown,
}

impl TermKind {
    /// The JSON discriminant of this kind, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TermKind::Str { .. } => "Str",
            TermKind::Int { .. } => "Int",
            TermKind::Bool { .. } => "Bool",
            TermKind::Print { .. } => "Print",
            TermKind::Let { .. } => "Let",
            TermKind::Var { .. } => "Var",
            TermKind::Binary { .. } => "Binary",
            TermKind::Void => "Void",
            TermKind::Unknown => "Unknown",
        }
    }
}

/// A binding name: `{ "text": "x", "location": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Parameter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: None,
        }
    }
}

// ── Binary Operators ──────────────────────────────────────────────────────────

/// Binary operators as spelled in the JSON `op` field.
///
/// The full operator set decodes so that programs using operators
/// without a reduction rule fail at evaluation with a precise error
/// instead of at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // Comparison
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Lte => "<=",
            BinaryOp::Gte => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn loc() -> serde_json::Value {
        json!({ "start": 0, "end": 1, "filename": "test.rinha" })
    }

    fn decode(value: serde_json::Value) -> crate::Result<Term> {
        Ok(serde_json::from_value(value)?)
    }

    #[test]
    fn test_decode_int_literal() {
        let term = decode(json!({ "kind": "Int", "value": 42, "location": loc() })).unwrap();
        assert_eq!(term.kind, TermKind::Int { value: 42 });
        assert_eq!(term.location, Location::new(0, 1, "test.rinha"));
    }

    #[test]
    fn test_decode_let_chain() {
        let term = decode(json!({
            "kind": "Let",
            "name": { "text": "x", "location": loc() },
            "value": { "kind": "Str", "value": "hi", "location": loc() },
            "next": { "kind": "Var", "text": "x", "location": loc() },
            "location": loc(),
        }))
        .unwrap();
        match &term.kind {
            TermKind::Let { name, value, next } => {
                assert_eq!(name.text, "x");
                assert_eq!(value.kind, TermKind::Str { value: "hi".into() });
                assert_eq!(next.kind, TermKind::Var { text: "x".into() });
            }
            other => panic!("expected Let, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_binary_op() {
        let term = decode(json!({
            "kind": "Binary",
            "lhs": { "kind": "Int", "value": 1, "location": loc() },
            "op": "Sub",
            "rhs": { "kind": "Int", "value": 2, "location": loc() },
            "location": loc(),
        }))
        .unwrap();
        assert!(matches!(term.kind, TermKind::Binary { op: BinaryOp::Sub, .. }));
    }

    #[test]
    fn test_decode_void_ignores_null_value() {
        let term = decode(json!({ "kind": "Void", "value": null, "location": loc() })).unwrap();
        assert_eq!(term.kind, TermKind::Void);
    }

    #[test]
    fn test_unknown_kind_decodes_as_unknown() {
        let term = decode(json!({
            "kind": "Tuple",
            "first": { "kind": "Int", "value": 1, "location": loc() },
            "second": { "kind": "Int", "value": 2, "location": loc() },
            "location": loc(),
        }))
        .unwrap();
        assert_eq!(term.kind, TermKind::Unknown);
    }

    #[test]
    fn test_let_without_next_is_malformed() {
        let err = decode(json!({
            "kind": "Let",
            "name": { "text": "x" },
            "value": { "kind": "Int", "value": 1, "location": loc() },
            "location": loc(),
        }))
        .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn test_int_with_text_payload_is_malformed() {
        let err = decode(json!({ "kind": "Int", "value": "3", "location": loc() })).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn test_unknown_operator_is_malformed() {
        let err = decode(json!({
            "kind": "Binary",
            "lhs": { "kind": "Int", "value": 1, "location": loc() },
            "op": "Pow",
            "rhs": { "kind": "Int", "value": 2, "location": loc() },
            "location": loc(),
        }))
        .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn test_program_from_json() {
        let source = json!({
            "name": "print.rinha",
            "expression": {
                "kind": "Print",
                "value": { "kind": "Bool", "value": true, "location": loc() },
                "location": loc(),
            },
            "location": loc(),
        })
        .to_string();
        let program = Program::from_json(&source).unwrap();
        assert_eq!(program.name.as_deref(), Some("print.rinha"));
        assert_eq!(program.expression.kind.name(), "Print");
    }

    #[test]
    fn test_program_without_metadata() {
        let source = json!({
            "expression": { "kind": "Int", "value": 7, "location": loc() },
        })
        .to_string();
        let program = Program::from_reader(source.as_bytes()).unwrap();
        assert_eq!(program.name, None);
        assert_eq!(program.location, None);
    }

    #[test]
    fn test_program_invalid_json() {
        let err = Program::from_json("{\"expression\": ").unwrap_err();
        assert!(matches!(err, DecodeError::Syntax(_)));
    }

    #[test]
    fn test_term_serializes_back_to_tagged_shape() {
        let term = Term::new(TermKind::Int { value: 5 }, Location::new(0, 1, "test.rinha"));
        let value = serde_json::to_value(&term).unwrap();
        assert_eq!(value, json!({ "kind": "Int", "value": 5, "location": loc() }));
    }

    /// `let v0 = 0; let v1 = 0; ...; v{n-1}` as raw JSON text, built without
    /// a `serde_json::Value` tree.
    fn let_chain_json(n: usize) -> String {
        let loc = r#""location":{"start":0,"end":0,"filename":"deep.rinha"}"#;
        let mut out = String::from(r#"{"expression":"#);
        for i in 0..n {
            out.push_str(&format!(
                r#"{{"kind":"Let","name":{{"text":"v{i}"}},"value":{{"kind":"Int","value":0,{loc}}},"next":"#
            ));
        }
        out.push_str(&format!(r#"{{"kind":"Var","text":"v{}",{loc}}}"#, n - 1));
        for _ in 0..n {
            out.push_str(&format!(",{loc}}}"));
        }
        out.push('}');
        out
    }

    #[test]
    fn test_decode_and_drop_deep_let_chain() {
        let program = Program::from_json(&let_chain_json(5_000)).unwrap();
        let mut depth = 0;
        let mut term = &program.expression;
        while let TermKind::Let { next, .. } = &term.kind {
            depth += 1;
            term = &**next;
        }
        assert_eq!(depth, 5_000);
        assert_eq!(term.kind, TermKind::Var { text: "v4999".into() });
        drop(program);
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let source = format!("{} extra", let_chain_json(1));
        assert!(matches!(Program::from_json(&source), Err(DecodeError::Syntax(_))));
    }

    #[test]
    fn test_binary_op_symbols() {
        assert_eq!(BinaryOp::Add.to_string(), "+");
        assert_eq!(BinaryOp::Sub.as_str(), "-");
        assert_eq!(BinaryOp::Neq.as_str(), "!=");
    }
}
