//! # xquery-syntax
//!
//! Error-tolerant, lossless parser front-end for XQuery 1.0, 3.0 and 3.1,
//! with the Full Text, Update Facility and Scripting extensions and the
//! MarkLogic and Saxon vendor syntax.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → Lexer, recursive-descent grammar, rowan CST, diagnostics
//!   ↓
//! dialect   → Extension selection and the language applicability table
//!   ↓
//! base      → Primitives (TextRange, character offsets)
//! ```
//!
//! ## Example
//!
//! ```
//! use xquery::dialect::Dialect;
//!
//! let parse = xquery::parse("for $x in 1 to 3 return $x * 2", &Dialect::w3c());
//! assert!(parse.ok());
//! assert_eq!(parse.syntax().text().to_string(), "for $x in 1 to 3 return $x * 2");
//! ```

// ============================================================================
// MODULES (dependency order: base → dialect → parser)
// ============================================================================

/// Foundation types: TextRange, character offsets
pub mod base;

/// Dialect configuration: extension versions and presets
pub mod dialect;

/// Parser: lexer, grammar, CST and diagnostics
pub mod parser;

use rayon::prelude::*;

// Re-export the entry points and the types needed to walk a result
pub use dialect::Dialect;
pub use parser::{
    Message, Parse, SyntaxElement, SyntaxError, SyntaxKind, SyntaxNode, SyntaxToken, parse,
};

// Re-export foundation types
pub use base::{CharOffsets, TextRange, TextSize};

/// Parse independent documents in parallel, one parser per document.
///
/// The result is in input order and equal to parsing each text with
/// [`parse`].
pub fn parse_many(texts: &[&str], dialect: &Dialect) -> Vec<Parse> {
    tracing::debug!(documents = texts.len(), "parsing documents in parallel");
    texts.par_iter().map(|text| parse(text, dialect)).collect()
}
