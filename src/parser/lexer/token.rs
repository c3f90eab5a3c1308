//! Logos token set for the code lexical state.
//!
//! Only the base state goes through logos. Tokens that open a nested state
//! (string quotes, comments, pragmas, XML comments, CDATA, processing
//! instructions, braced URIs and string constructors) are returned here and
//! the stateful [`super::Lexer`] pushes the matching state.

use logos::Logos;

use crate::parser::SyntaxKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(subpattern name_start = r"[A-Za-z_\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}]")]
#[logos(subpattern name_char = r"(?&name_start)|[\-\.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}]")]
#[logos(subpattern mantissa = r"\.[0-9]+|[0-9]+(\.[0-9]*)?")]
pub(super) enum CodeToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[token("(:")]
    CommentStart,
    #[token(":)")]
    CommentEnd,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"(?&name_start)(?&name_char)*")]
    NcName,
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"\.[0-9]+|[0-9]+\.[0-9]*")]
    Decimal,
    #[regex(r"((?&mantissa))[eE][+-]?[0-9]+")]
    Double,
    #[regex(r"((?&mantissa))[eE][+-]?")]
    PartialDouble,
    #[token("\"")]
    Quote,
    #[token("'")]
    Apostrophe,
    #[token("&")]
    Ampersand,

    // =========================================================================
    // NESTED STATE OPENERS
    // =========================================================================
    #[token("(#")]
    PragmaBegin,
    #[token("#)")]
    PragmaEnd,
    #[token("<!--")]
    XmlCommentStart,
    #[token("<?")]
    PiBegin,
    #[token("<![CDATA[")]
    CdataStart,
    #[token("Q{")]
    BracedUriStart,
    #[token("``[")]
    StringConstructorStart,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("$")]
    Dollar,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(":=")]
    ColonEq,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("@")]
    At,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("=")]
    Eq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
    #[token("=>")]
    FatArrow,
    #[token("?")]
    Question,
    #[token("#")]
    Hash,
    #[token("%")]
    Percent,
}

impl From<CodeToken> for SyntaxKind {
    fn from(token: CodeToken) -> Self {
        use CodeToken::*;
        match token {
            Whitespace => SyntaxKind::WHITE_SPACE,
            CommentStart => SyntaxKind::COMMENT_START_TAG,
            CommentEnd => SyntaxKind::COMMENT_END_TAG,

            NcName => SyntaxKind::NCNAME,
            Integer => SyntaxKind::INTEGER,
            Decimal => SyntaxKind::DECIMAL,
            Double => SyntaxKind::DOUBLE,
            PartialDouble => SyntaxKind::PARTIAL_DOUBLE_LITERAL_EXPONENT,
            Quote | Apostrophe => SyntaxKind::STRING_LITERAL_START,
            Ampersand => SyntaxKind::PARTIAL_ENTITY_REFERENCE,

            PragmaBegin => SyntaxKind::PRAGMA_BEGIN,
            PragmaEnd => SyntaxKind::PRAGMA_END,
            XmlCommentStart => SyntaxKind::XML_COMMENT_START_TAG,
            PiBegin => SyntaxKind::PROCESSING_INSTRUCTION_BEGIN,
            CdataStart => SyntaxKind::CDATA_SECTION_START_TAG,
            BracedUriStart => SyntaxKind::BRACED_URI_LITERAL_START,
            StringConstructorStart => SyntaxKind::STRING_CONSTRUCTOR_START,

            Dollar => SyntaxKind::VARIABLE_INDICATOR,
            LParen => SyntaxKind::PARENTHESIS_OPEN,
            RParen => SyntaxKind::PARENTHESIS_CLOSE,
            LBracket => SyntaxKind::SQUARE_OPEN,
            RBracket => SyntaxKind::SQUARE_CLOSE,
            LBrace => SyntaxKind::BLOCK_OPEN,
            RBrace => SyntaxKind::BLOCK_CLOSE,
            Comma => SyntaxKind::COMMA,
            Semicolon => SyntaxKind::SEPARATOR,
            Colon => SyntaxKind::QNAME_SEPARATOR,
            ColonColon => SyntaxKind::AXIS_SEPARATOR,
            ColonEq => SyntaxKind::ASSIGN_EQUAL,
            Dot => SyntaxKind::DOT,
            DotDot => SyntaxKind::PARENT_SELECTOR,
            Slash => SyntaxKind::DIRECT_DESCENDANTS_PATH,
            SlashSlash => SyntaxKind::ALL_DESCENDANTS_PATH,
            At => SyntaxKind::ATTRIBUTE_SELECTOR,
            Star => SyntaxKind::STAR,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Eq => SyntaxKind::EQUAL,
            BangEq => SyntaxKind::NOT_EQUAL,
            Lt => SyntaxKind::LESS_THAN,
            LtEq => SyntaxKind::LESS_THAN_OR_EQUAL,
            Gt => SyntaxKind::GREATER_THAN,
            GtEq => SyntaxKind::GREATER_THAN_OR_EQUAL,
            LtLt => SyntaxKind::NODE_BEFORE,
            GtGt => SyntaxKind::NODE_AFTER,
            Pipe => SyntaxKind::UNION,
            PipePipe => SyntaxKind::CONCATENATION,
            Bang => SyntaxKind::MAP_OPERATOR,
            FatArrow => SyntaxKind::ARROW,
            Question => SyntaxKind::OPTIONAL,
            Hash => SyntaxKind::FUNCTION_REF_LINK,
            Percent => SyntaxKind::ANNOTATION_INDICATOR,
        }
    }
}
