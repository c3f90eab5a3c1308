//! Foundation types for the XQuery front-end.
//!
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`CharOffsets`] - Byte to character offset conversion
//!
//! This module has NO dependencies on other crate modules.

mod offsets;

pub use offsets::CharOffsets;
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
