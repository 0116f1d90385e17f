//! JSON decoding of terms.
//!
//! Every node is decoded in one streaming pass into a flat record of all
//! fields any kind may carry, then checked against its `kind`. Nothing is
//! buffered, so a subtree is parsed exactly once whatever its depth.

use crate::ast::{BinaryOp, Parameter, Term, TermKind};
use crate::stack::ensure_sufficient_stack;
use crate::Location;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ensure_sufficient_stack(|| RawTerm::deserialize(deserializer)?.into_term())
    }
}

/// Union of the fields of every term kind.
#[derive(Deserialize)]
struct RawTerm {
    kind: String,
    location: Location,
    value: Option<Payload>,
    name: Option<Parameter>,
    next: Option<Box<Term>>,
    text: Option<String>,
    lhs: Option<Box<Term>>,
    op: Option<BinaryOp>,
    rhs: Option<Box<Term>>,
}

impl RawTerm {
    fn into_term<E: de::Error>(self) -> Result<Term, E> {
        let RawTerm {
            kind,
            location,
            value,
            name,
            next,
            text,
            lhs,
            op,
            rhs,
        } = self;

        let kind = match kind.as_str() {
            "Str" => match value {
                Some(Payload::Text(value)) => TermKind::Str { value },
                other => return Err(unexpected(other, "a string")),
            },
            "Int" => match value {
                Some(Payload::Int(value)) => TermKind::Int { value },
                other => return Err(unexpected(other, "an integer")),
            },
            "Bool" => match value {
                Some(Payload::Bool(value)) => TermKind::Bool { value },
                other => return Err(unexpected(other, "a boolean")),
            },
            "Print" => TermKind::Print {
                value: term_payload(value)?,
            },
            "Let" => TermKind::Let {
                name: required(name, "name")?,
                value: term_payload(value)?,
                next: required(next, "next")?,
            },
            "Var" => TermKind::Var {
                text: required(text, "text")?,
            },
            "Binary" => TermKind::Binary {
                lhs: required(lhs, "lhs")?,
                op: required(op, "op")?,
                rhs: required(rhs, "rhs")?,
            },
            "Void" => TermKind::Void,
            _ => TermKind::Unknown,
        };
        Ok(Term::new(kind, location))
    }
}

fn required<T, E: de::Error>(field: Option<T>, name: &'static str) -> Result<T, E> {
    field.ok_or_else(|| E::missing_field(name))
}

fn term_payload<E: de::Error>(value: Option<Payload>) -> Result<Box<Term>, E> {
    match value {
        Some(Payload::Term(term)) => Ok(term),
        other => Err(unexpected(other, "a term")),
    }
}

fn unexpected<E: de::Error>(value: Option<Payload>, expected: &'static str) -> E {
    match value {
        None => E::missing_field("value"),
        Some(payload) => E::invalid_type(payload.unexpected(), &expected),
    }
}

// ── `value` payload ──────────────────────────────────────────────────────────

/// The `value` field: a literal for leaves, a nested term for `Print` and
/// `Let`. Its shape is only known once `kind` has been read, which may come
/// later in the object, so it is decoded by what the JSON actually holds.
enum Payload {
    Text(String),
    Int(i64),
    Bool(bool),
    Term(Box<Term>),
    Other(&'static str),
}

impl Payload {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Payload::Text(s) => Unexpected::Str(s),
            Payload::Int(n) => Unexpected::Signed(*n),
            Payload::Bool(b) => Unexpected::Bool(*b),
            Payload::Term(_) => Unexpected::Map,
            Payload::Other(what) => Unexpected::Other(what),
        }
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = Payload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a literal or a term")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Payload, E> {
        Ok(Payload::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Payload, E> {
        Ok(Payload::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Payload, E> {
        i64::try_from(v)
            .map(Payload::Int)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &"a 64-bit signed integer"))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Payload, E> {
        Ok(Payload::Other("floating point number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Payload, E> {
        Ok(Payload::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Payload, E> {
        Ok(Payload::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Payload, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Payload::Other("array"))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Payload, A::Error> {
        let term = Term::deserialize(MapAccessDeserializer::new(map))?;
        Ok(Payload::Term(Box::new(term)))
    }
}
