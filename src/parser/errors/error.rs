//! Syntax error type

use rowan::{TextRange, TextSize};

use super::codes::ErrorCode;
use super::messages::Message;

/// A located syntax error
///
/// `message` is the full catalog text including the error code prefix, e.g.
/// `XPST0003: Missing expression.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location (byte offsets)
    pub range: TextRange,
    /// XQuery error code
    pub code: Option<ErrorCode>,
}

impl SyntaxError {
    pub fn new(message: Message, range: TextRange) -> Self {
        Self {
            code: Some(message.code()),
            message: message.to_string(),
            range,
        }
    }

    /// Create an error at a specific offset with zero-width range
    pub fn at_offset(message: Message, offset: TextSize) -> Self {
        Self::new(message, TextRange::empty(offset))
    }

    /// Format the error for display
    pub fn format(&self) -> String {
        self.message.clone()
    }

    pub fn is_zero_width(&self) -> bool {
        self.range.is_empty()
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
