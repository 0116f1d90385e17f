//! Shared types for the Rinha evaluator.
//!
//! This crate defines the AST term types, source locations and the
//! decode errors produced when a JSON-encoded program does not match
//! the term shapes. Source text is never parsed here: programs arrive
//! already lowered to JSON by an external front end.

mod decode;
mod error;
mod location;
pub mod ast;
pub mod stack;

pub use error::DecodeError;
pub use location::Location;

/// Result type used when decoding programs.
pub type Result<T> = std::result::Result<T, DecodeError>;
