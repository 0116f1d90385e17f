//! Flat variable scope for the Rinha evaluator.

use crate::Value;
use std::collections::BTreeMap;

/// A single flat binding table.
///
/// `let` writes here and nothing is ever removed: once bound, a name stays
/// visible for the rest of the evaluation and a later `let` of the same
/// name overwrites it, even when the later binding is syntactically nested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    bindings: BTreeMap<String, Value>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the value it replaced, if any.
    pub fn bind(&mut self, name: &str, value: Value) -> Option<Value> {
        self.bindings.insert(name.to_string(), value)
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
