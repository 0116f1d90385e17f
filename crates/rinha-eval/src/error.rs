//! Runtime error types for the Rinha evaluator.

use rinha_types::ast::BinaryOp;
use rinha_types::{DecodeError, Location};
use thiserror::Error;

/// Evaluation error. Any error aborts the current top-level evaluation;
/// lines already printed stay printed.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The program JSON does not match the shape declared by a node's `kind`.
    #[error(transparent)]
    MalformedNode(#[from] DecodeError),

    /// `Var` lookup missed the scope.
    #[error("unbound variable `{name}` at {location}")]
    UnboundVariable { name: String, location: Location },

    /// Operand types have no coercion rule for the operator.
    #[error("type mismatch at {location}: cannot apply `{op}` to {lhs} and {rhs}")]
    TypeMismatch {
        op: BinaryOp,
        lhs: &'static str,
        rhs: &'static str,
        location: Location,
    },

    /// Operator has no reduction rule.
    #[error("unsupported operator `{op}` at {location}")]
    UnsupportedOperator { op: BinaryOp, location: Location },

    /// Integer addition left the `i64` range.
    #[error("integer overflow at {location}")]
    ArithmeticOverflow { location: Location },

    /// Step budget exhausted.
    #[error("gas exhausted after {limit} steps")]
    GasExhausted { limit: u64 },

    /// Writing to the output sink failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
