//! The diagnostic message catalog
//!
//! Message texts are part of the parser's output contract (they appear in
//! tree dumps), so every diagnostic goes through [`Message`] instead of
//! being formatted ad hoc at the call site.

use std::fmt;

use super::codes::ErrorCode;

/// A parser diagnostic, before it is attached to a source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    MissingKeyword(&'static str),
    Expected(&'static str),
    ExpectedEither(&'static str, &'static str),
    MissingExpression,
    MissingQName,
    MissingEQName,
    MissingNCName,
    MissingVarName,
    MissingUriString,
    MissingStringLiteral,
    MissingSequenceType,
    MissingItemType,
    MissingLocalName,
    MissingPrefix,
    MissingFunctionBody,
    MissingVarValue,

    UnclosedStringLiteral,
    UnclosedComment,
    CommentEndWithoutStart,
    UnclosedXmlComment,
    UnclosedCdata,
    UnclosedProcessingInstruction,
    UnclosedPragma,
    UnclosedBracedUri,
    UnclosedStringConstructor,
    IncompleteDoubleExponent,
    IncompleteEntityReference,
    EmptyEntityReference,
    UnknownEntityReference,
    EntityReferenceOutsideString,
    CdataOutsideContent,

    InvalidSymbol,
    UnexpectedToken,
    MisplacedVersionDecl,
    MisplacedModuleDecl,
    PrologAfterBody,
    UnknownDeclaration,
    UnsupportedCompatibilityAnnotation(&'static str),
    TransactionSeparatorNotSupported,

    MismatchedClosingTag { open: String, close: String },
    ExpectedClosingTag(String),
}

impl Message {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MismatchedClosingTag { .. } => ErrorCode::XQST0118,
            _ => ErrorCode::XPST0003,
        }
    }

    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKeyword(keyword) => write!(f, "Missing keyword '{keyword}'."),
            Self::Expected(token) => write!(f, "Expected '{token}'."),
            Self::ExpectedEither(a, b) => write!(f, "Expected '{a}' or '{b}'."),
            Self::MissingExpression => f.write_str("Missing expression."),
            Self::MissingQName => f.write_str("Missing qualified name."),
            Self::MissingEQName => f.write_str("Missing URI qualified name or qualified name."),
            Self::MissingNCName => f.write_str("Missing identifier."),
            Self::MissingVarName => f.write_str("Missing variable name."),
            Self::MissingUriString => f.write_str("Missing URI string."),
            Self::MissingStringLiteral => f.write_str("Missing string literal."),
            Self::MissingSequenceType => f.write_str("Missing sequence type."),
            Self::MissingItemType => f.write_str("Missing item type."),
            Self::MissingLocalName => f.write_str("Missing local name after ':' in qualified name."),
            Self::MissingPrefix => f.write_str("Missing prefix before ':' in qualified name."),
            Self::MissingFunctionBody => f.write_str("Missing function body or 'external'."),
            Self::MissingVarValue => f.write_str("Expected ':=' or 'external'."),

            Self::UnclosedStringLiteral => f.write_str("Unclosed string literal."),
            Self::UnclosedComment => f.write_str("Unclosed XQuery comment."),
            Self::CommentEndWithoutStart => f.write_str(
                "End of comment marker found without a '(:' start of comment marker.",
            ),
            Self::UnclosedXmlComment => f.write_str("Unclosed XML comment."),
            Self::UnclosedCdata => f.write_str("Unclosed CDATA section."),
            Self::UnclosedProcessingInstruction => f.write_str("Unclosed processing instruction."),
            Self::UnclosedPragma => f.write_str("Unclosed pragma."),
            Self::UnclosedBracedUri => f.write_str("Unclosed braced URI literal."),
            Self::UnclosedStringConstructor => f.write_str("Unclosed string constructor."),
            Self::IncompleteDoubleExponent => f.write_str("Incomplete double exponent."),
            Self::IncompleteEntityReference => f.write_str("Incomplete entity reference."),
            Self::EmptyEntityReference => f.write_str("Empty entity reference."),
            Self::UnknownEntityReference => f.write_str("Unknown entity reference."),
            Self::EntityReferenceOutsideString => f.write_str(
                "Entity references are only allowed in string literals and XML content.",
            ),
            Self::CdataOutsideContent => {
                f.write_str("CDATA sections are only allowed in direct element content.")
            }

            Self::InvalidSymbol => f.write_str("Invalid XQuery symbol or operator."),
            Self::UnexpectedToken => f.write_str("Unexpected token."),
            Self::MisplacedVersionDecl => f.write_str(
                "The version declaration must be the first declaration in the module.",
            ),
            Self::MisplacedModuleDecl => f.write_str(
                "A module declaration is only allowed at the start of a library module.",
            ),
            Self::PrologAfterBody => {
                f.write_str("Prolog declarations must appear before the query body.")
            }
            Self::UnknownDeclaration => f.write_str("Unknown declaration."),
            Self::UnsupportedCompatibilityAnnotation(keyword) => write!(
                f,
                "Compatibility annotation '{keyword}' is not supported by the active dialect."
            ),
            Self::TransactionSeparatorNotSupported => {
                f.write_str("Transaction separators are only supported by MarkLogic.")
            }

            Self::MismatchedClosingTag { open, close } => write!(
                f,
                "The closing tag '{close}' does not match the opening tag '{open}'."
            ),
            Self::ExpectedClosingTag(open) => write!(f, "Expected closing tag '</{open}>'."),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.code())?;
        self.write_text(f)
    }
}
