//! Rinha tree-walking evaluator.
//!
//! Reduces a JSON-encoded AST directly to a [`Value`], executing `print`
//! side effects through an injected [`PrintHandler`] and threading a single
//! flat [`Scope`] through the whole evaluation.

mod config;
mod error;
mod evaluator;
mod print_handler;
mod scope;
mod value;

pub use config::{EvalConfig, DEFAULT_GAS_LIMIT};
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use print_handler::PrintHandler;
pub use scope::Scope;
pub use value::Value;
