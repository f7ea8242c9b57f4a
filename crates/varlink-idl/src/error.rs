//! Parse error reporting with source positions.

use thiserror::Error;

/// A failure to parse an interface description.
///
/// Line and column are 1-based and point at the offending token, matching
/// the convention editors and compilers use for user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based line of the offending token.
    pub line: u32,
    /// 1-based column of the offending token.
    pub column: u32,
    /// Human-readable description of what was expected.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}
