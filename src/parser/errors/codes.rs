//! XQuery error codes reported by the parser
//!
//! Only two codes from the `err` namespace can be raised by a syntax-only
//! front-end:
//! - XPST0003: the query does not conform to the grammar
//! - XQST0118: a direct element's closing tag does not match its opening tag

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Grammar violation
    XPST0003,
    /// Mismatched direct element tags
    XQST0118,
}

impl ErrorCode {
    /// Get the error code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XPST0003 => "XPST0003",
            Self::XQST0118 => "XQST0118",
        }
    }

    /// Short description of the error class
    pub fn description(&self) -> &'static str {
        match self {
            Self::XPST0003 => "syntax error",
            Self::XQST0118 => "mismatched element tags",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
