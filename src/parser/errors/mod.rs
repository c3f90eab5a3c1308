//! Parser error handling module
//!
//! - [`ErrorCode`]: the XQuery error codes a syntax-only parser can raise
//! - [`Message`]: the fixed diagnostic catalog
//! - [`SyntaxError`]: a message attached to a source range

mod codes;
mod error;
mod messages;

pub use codes::ErrorCode;
pub use error::SyntaxError;
pub use messages::Message;
