//! Errors raised while decoding a JSON program into terms.

use serde_json::error::Category;
use thiserror::Error;

/// Errors that can occur while turning a JSON document into a [`Program`].
///
/// [`Program`]: crate::ast::Program
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Syntax(serde_json::Error),

    /// The JSON is well-formed but a node's fields do not match its `kind`.
    #[error("malformed node: {0}")]
    Malformed(serde_json::Error),

    /// Reading the underlying input failed.
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => DecodeError::Io(err.into()),
            Category::Syntax | Category::Eof => DecodeError::Syntax(err),
            Category::Data => DecodeError::Malformed(err),
        }
    }
}
