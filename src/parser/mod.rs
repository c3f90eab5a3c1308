//! Rowan-based parser for XQuery
//!
//! This module provides a lossless, error-tolerant parser using:
//! - **logos** for the code lexical state, with hand-written scanners for
//!   strings, comments and XML constructors
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (state stack, logos in code mode) → Tokens with SyntaxKind
//!     ↓
//! Parser (pulls tokens on demand, gated by the Dialect) → GreenNode tree
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//! ```
//!
//! Every input produces a complete tree. Malformed input is represented by
//! `ERROR` nodes whose messages are collected in [`Parse::errors`].

#[allow(clippy::module_inception)]
mod parser;

pub mod dump;
pub mod errors;
pub mod grammar;
pub mod keywords;
mod lexer;
mod syntax_kind;

pub use errors::{ErrorCode, Message, SyntaxError};
pub use lexer::{Lexer, LexerSnapshot, Token, tokenize};
pub use parser::Parse;
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, XQueryLanguage};

pub(crate) use parser::{Parsed, Parser};

use crate::dialect::Dialect;

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

/// Parse an XQuery document with the given dialect
pub fn parse(input: &str, dialect: &Dialect) -> Parse {
    let mut parser = Parser::new(input, dialect);
    grammar::source_file(&mut parser);
    let tokens = parser.progress();
    let parse = parser.finish();
    tracing::debug!(
        bytes = input.len(),
        tokens,
        errors = parse.errors.len(),
        "parsed XQuery document"
    );
    parse
}
