//! Core term evaluator.

use crate::error::{EvalError, EvalResult};
use crate::{EvalConfig, PrintHandler, Scope, Value};
use rinha_types::ast::{BinaryOp, Parameter, Program, Term, TermKind};
use rinha_types::stack::ensure_sufficient_stack;
use rinha_types::Location;

/// The core evaluator — walks terms and produces Values.
///
/// One evaluator owns one [`Scope`] for the duration of a top-level
/// evaluation. Terms are only ever borrowed.
pub struct Evaluator {
    /// Flat variable scope, written by `let` and read by variables.
    pub scope: Scope,
    /// Destination of `print` lines.
    pub output: PrintHandler,
    /// Gas counter — number of terms reduced so far.
    gas: u64,
    gas_limit: u64,
}

impl Evaluator {
    /// Create an evaluator with the default configuration and an empty scope.
    pub fn new(output: PrintHandler) -> Self {
        Self::with_config(EvalConfig::default(), output)
    }

    pub fn with_config(config: EvalConfig, output: PrintHandler) -> Self {
        Self {
            scope: Scope::new(),
            output,
            gas: 0,
            gas_limit: config.gas_limit,
        }
    }

    /// Gas consumed so far.
    pub fn gas_used(&self) -> u64 {
        self.gas
    }

    /// Consume one unit of gas. Returns error if exhausted.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.gas_limit {
            Err(EvalError::GasExhausted {
                limit: self.gas_limit,
            })
        } else {
            Ok(())
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Entry points
    // ══════════════════════════════════════════════════════════════════════

    /// Decode a JSON program and evaluate its root expression.
    pub fn eval_source(&mut self, source: &str) -> EvalResult<Value> {
        let program = Program::from_json(source)?;
        self.eval_program(&program)
    }

    /// Evaluate the root expression of a decoded program.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(program = program.name.as_deref().unwrap_or("<anonymous>"))
    )]
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Value> {
        let value = self.eval_term(&program.expression)?;
        tracing::debug!(gas = self.gas, bindings = self.scope.len(), "evaluation finished");
        Ok(value)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Term evaluation
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate a term to a Value.
    pub fn eval_term(&mut self, term: &Term) -> EvalResult<Value> {
        self.tick()?;
        tracing::trace!(kind = term.kind.name(), location = %term.location, "eval");
        ensure_sufficient_stack(|| match &term.kind {
            TermKind::Str { value } => Ok(Value::Str(value.clone())),
            TermKind::Int { value } => Ok(Value::Int(*value)),
            TermKind::Bool { value } => Ok(Value::Bool(*value)),
            TermKind::Void => Ok(Value::Void),

            TermKind::Let { name, value, next } => self.eval_let(name, value, next),
            TermKind::Var { text } => self.eval_var(text, &term.location),
            TermKind::Binary { lhs, op, rhs } => self.eval_binary(lhs, *op, rhs, &term.location),
            TermKind::Print { value } => self.eval_print(value),

            TermKind::Unknown => {
                tracing::warn!(location = %term.location, "unknown term kind, evaluating to void");
                Ok(Value::Void)
            }
        })
    }

    // ── Bindings ─────────────────────────────────────────────────────────

    fn eval_let(&mut self, name: &Parameter, value: &Term, next: &Term) -> EvalResult<Value> {
        let bound = self.eval_term(value)?;
        tracing::trace!(name = %name.text, value = %bound, "bind");
        self.scope.bind(&name.text, bound);
        self.eval_term(next)
    }

    fn eval_var(&self, name: &str, location: &Location) -> EvalResult<Value> {
        self.scope
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnboundVariable {
                name: name.to_string(),
                location: location.clone(),
            })
    }

    // ── Operators ────────────────────────────────────────────────────────

    fn eval_binary(
        &mut self,
        lhs: &Term,
        op: BinaryOp,
        rhs: &Term,
        location: &Location,
    ) -> EvalResult<Value> {
        let lv = self.eval_term(lhs)?;
        let rv = self.eval_term(rhs)?;

        match op {
            BinaryOp::Add => eval_add(lv, rv, location),
            _ => Err(EvalError::UnsupportedOperator {
                op,
                location: location.clone(),
            }),
        }
    }

    // ── Effects ──────────────────────────────────────────────────────────

    fn eval_print(&mut self, value: &Term) -> EvalResult<Value> {
        let val = self.eval_term(value)?;
        if let Some(line) = val.print_text() {
            tracing::trace!(%line, "print");
            self.output.println(&line)?;
        }
        Ok(Value::Void)
    }
}

/// `+` coercion table. Integer sums stay integers; any pairing involving a
/// string concatenates with the integer rendered in decimal, left operand
/// first. Everything else is a type mismatch.
fn eval_add(lv: Value, rv: Value, location: &Location) -> EvalResult<Value> {
    match (lv, rv) {
        (Value::Int(a), Value::Int(b)) => {
            a.checked_add(b)
                .map(Value::Int)
                .ok_or_else(|| EvalError::ArithmeticOverflow {
                    location: location.clone(),
                })
        }
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
        (Value::Int(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
        (Value::Str(a), Value::Int(b)) => Ok(Value::Str(format!("{a}{b}"))),
        (lv, rv) => Err(EvalError::TypeMismatch {
            op: BinaryOp::Add,
            lhs: lv.type_name(),
            rhs: rv.type_name(),
            location: location.clone(),
        }),
    }
}
