//! Stateful lexer for XQuery
//!
//! XQuery is not context free at the lexical level: string literals,
//! comments, pragmas, direct XML constructors and string constructors each
//! have their own token rules. The lexer keeps a stack of lexical states.
//! The base state is driven by logos ([`token::CodeToken`]); nested states
//! use small hand-written scanners and push/pop themselves.
//!
//! The only switch the lexer cannot decide on its own is whether `<` starts
//! a direct element constructor or is the less-than operator. The parser
//! decides that and calls [`Lexer::begin_direct_element`].
//!
//! Lexing never fails: unterminated constructs end at EOF without their end
//! token and unknown characters become one-character `BAD_CHARACTER` tokens.

mod chars;
mod token;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::keywords::keyword_kind;
use super::syntax_kind::SyntaxKind;
use chars::{first_char_len, ncname_len, whitespace_len};
use token::CodeToken;

pub(crate) use chars::starts_with_name;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
}

impl Quote {
    fn char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }

    fn doubled(self) -> &'static str {
        match self {
            Self::Double => "\"\"",
            Self::Single => "''",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Base state.
    Code,
    /// Code inside `{` `}` that returns to XML content or attribute values.
    Enclosed,
    /// Code inside a string constructor interpolation, closed by `` }` ``.
    Interpolation,
    StringLiteral(Quote),
    /// Contents of a (nestable) XQuery comment.
    Comment,
    XmlComment,
    Cdata,
    PiTarget,
    PiContents,
    PragmaName,
    PragmaContents,
    BracedUri,
    StringConstructor,
    StartTagOpen,
    StartTag,
    AttrValue(Quote),
    ElemContent,
    EndTag,
}

/// Position and state stack of a [`Lexer`], used to restart lexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerSnapshot {
    pos: usize,
    states: Vec<LexState>,
}

/// Lazy, restartable XQuery lexer
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    states: Vec<LexState>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            src: input,
            pos: 0,
            states: vec![LexState::Code],
        }
    }

    /// Input not yet lexed.
    pub fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn snapshot(&self) -> LexerSnapshot {
        LexerSnapshot {
            pos: self.pos,
            states: self.states.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: LexerSnapshot) {
        self.pos = snapshot.pos;
        self.states = snapshot.states;
    }

    /// Re-enter the lexer at a `<` that starts a direct element constructor.
    ///
    /// `snapshot` must be the one taken right before the `<` was lexed.
    pub fn begin_direct_element(&mut self, snapshot: LexerSnapshot) {
        self.restore(snapshot);
        tracing::trace!(offset = self.pos, "lexer: entering direct element constructor");
        self.states.push(LexState::StartTagOpen);
    }

    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.src.len() {
            return None;
        }
        let src = self.src;
        let rest = &src[self.pos..];
        let (kind, len) = loop {
            if let Some(lexed) = self.lex(rest) {
                break lexed;
            }
        };
        debug_assert!(len > 0, "lexer made no progress at {}", self.pos);
        let start = self.pos;
        self.pos += len;
        Some(Token {
            kind,
            text: &src[start..self.pos],
            range: TextRange::new(TextSize::new(start as u32), TextSize::new(self.pos as u32)),
        })
    }

    fn state(&self) -> LexState {
        self.states.last().copied().unwrap_or(LexState::Code)
    }

    fn push(&mut self, state: LexState) {
        self.states.push(state);
    }

    fn pop(&mut self) {
        if self.states.len() > 1 {
            self.states.pop();
        }
    }

    fn replace(&mut self, state: LexState) {
        self.pop();
        self.push(state);
    }

    /// Lex one token in the current state. `None` means the state changed
    /// without consuming input and the caller must lex again.
    fn lex(&mut self, rest: &str) -> Option<(SyntaxKind, usize)> {
        let lexed = match self.state() {
            LexState::Code | LexState::Enclosed | LexState::Interpolation => self.lex_code(rest),
            LexState::StringLiteral(quote) => self.lex_string(rest, quote),
            LexState::Comment => self.lex_comment(rest),
            LexState::XmlComment => self.lex_delimited(
                rest,
                "-->",
                SyntaxKind::XML_COMMENT_CONTENTS,
                SyntaxKind::XML_COMMENT_END_TAG,
            ),
            LexState::Cdata => self.lex_delimited(
                rest,
                "]]>",
                SyntaxKind::CDATA_SECTION_CONTENTS,
                SyntaxKind::CDATA_SECTION_END_TAG,
            ),
            LexState::PiTarget => return self.lex_pi_target(rest),
            LexState::PiContents => self.lex_delimited(
                rest,
                "?>",
                SyntaxKind::PROCESSING_INSTRUCTION_CONTENTS,
                SyntaxKind::PROCESSING_INSTRUCTION_END,
            ),
            LexState::PragmaName => return self.lex_pragma_name(rest),
            LexState::PragmaContents => {
                let ws = whitespace_len(rest);
                if ws > 0 {
                    (SyntaxKind::WHITE_SPACE, ws)
                } else {
                    self.lex_delimited(rest, "#)", SyntaxKind::PRAGMA_CONTENTS, SyntaxKind::PRAGMA_END)
                }
            }
            LexState::BracedUri => self.lex_braced_uri(rest),
            LexState::StringConstructor => self.lex_string_constructor(rest),
            LexState::StartTagOpen => {
                self.replace(LexState::StartTag);
                if !rest.starts_with('<') {
                    return None;
                }
                (SyntaxKind::OPEN_XML_TAG, 1)
            }
            LexState::StartTag => self.lex_start_tag(rest),
            LexState::AttrValue(quote) => self.lex_attribute_value(rest, quote),
            LexState::ElemContent => self.lex_element_content(rest),
            LexState::EndTag => self.lex_end_tag(rest),
        };
        Some(lexed)
    }

    fn lex_code(&mut self, rest: &str) -> (SyntaxKind, usize) {
        let mut lexer = CodeToken::lexer(rest);
        let (token, len) = match lexer.next() {
            Some(Ok(token)) => (token, lexer.span().end),
            _ => return (SyntaxKind::BAD_CHARACTER, first_char_len(rest)),
        };
        let kind = match token {
            CodeToken::NcName => keyword_kind(&rest[..len]).unwrap_or(SyntaxKind::NCNAME),
            CodeToken::Quote => {
                self.push(LexState::StringLiteral(Quote::Double));
                SyntaxKind::STRING_LITERAL_START
            }
            CodeToken::Apostrophe => {
                self.push(LexState::StringLiteral(Quote::Single));
                SyntaxKind::STRING_LITERAL_START
            }
            CodeToken::Ampersand => return scan_reference(rest),
            CodeToken::CommentStart => {
                self.push(LexState::Comment);
                SyntaxKind::COMMENT_START_TAG
            }
            CodeToken::PragmaBegin => {
                self.push(LexState::PragmaName);
                SyntaxKind::PRAGMA_BEGIN
            }
            CodeToken::XmlCommentStart => {
                self.push(LexState::XmlComment);
                SyntaxKind::XML_COMMENT_START_TAG
            }
            CodeToken::PiBegin => {
                self.push(LexState::PiTarget);
                SyntaxKind::PROCESSING_INSTRUCTION_BEGIN
            }
            CodeToken::CdataStart => {
                self.push(LexState::Cdata);
                SyntaxKind::CDATA_SECTION_START_TAG
            }
            CodeToken::BracedUriStart => {
                self.push(LexState::BracedUri);
                SyntaxKind::BRACED_URI_LITERAL_START
            }
            CodeToken::StringConstructorStart => {
                self.push(LexState::StringConstructor);
                SyntaxKind::STRING_CONSTRUCTOR_START
            }
            CodeToken::LBrace => {
                if self.state() != LexState::Code {
                    self.push(LexState::Enclosed);
                }
                SyntaxKind::BLOCK_OPEN
            }
            CodeToken::RBrace => match self.state() {
                LexState::Interpolation if rest[1..].starts_with('`') => {
                    self.pop();
                    return (SyntaxKind::STRING_INTERPOLATION_CLOSE, 2);
                }
                LexState::Enclosed => {
                    self.pop();
                    SyntaxKind::BLOCK_CLOSE
                }
                _ => SyntaxKind::BLOCK_CLOSE,
            },
            other => other.into(),
        };
        (kind, len)
    }

    fn lex_string(&mut self, rest: &str, quote: Quote) -> (SyntaxKind, usize) {
        if rest.starts_with(quote.doubled()) {
            return (SyntaxKind::ESCAPED_CHARACTER, 2);
        }
        if rest.starts_with(quote.char()) {
            self.pop();
            return (SyntaxKind::STRING_LITERAL_END, 1);
        }
        if rest.starts_with('&') {
            return scan_reference(rest);
        }
        let len = rest
            .find(|c| c == quote.char() || c == '&')
            .unwrap_or(rest.len());
        (SyntaxKind::STRING_LITERAL_CONTENTS, len)
    }

    fn lex_comment(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with(":)") {
            self.pop();
            return (SyntaxKind::COMMENT_END_TAG, 2);
        }
        let bytes = rest.as_bytes();
        let mut depth = 0usize;
        let mut i = 0;
        while i < bytes.len() {
            match (bytes[i], bytes.get(i + 1)) {
                (b'(', Some(b':')) => {
                    depth += 1;
                    i += 2;
                }
                (b':', Some(b')')) if depth == 0 => break,
                (b':', Some(b')')) => {
                    depth -= 1;
                    i += 2;
                }
                _ => i += 1,
            }
        }
        (SyntaxKind::COMMENT_CONTENTS, i)
    }

    /// Contents up to `end` (or EOF), then the `end` token which pops the
    /// state.
    fn lex_delimited(
        &mut self,
        rest: &str,
        end: &str,
        contents: SyntaxKind,
        end_kind: SyntaxKind,
    ) -> (SyntaxKind, usize) {
        if rest.starts_with(end) {
            self.pop();
            return (end_kind, end.len());
        }
        (contents, rest.find(end).unwrap_or(rest.len()))
    }

    fn lex_pi_target(&mut self, rest: &str) -> Option<(SyntaxKind, usize)> {
        if rest.starts_with("?>") {
            self.pop();
            return Some((SyntaxKind::PROCESSING_INSTRUCTION_END, 2));
        }
        let ws = whitespace_len(rest);
        if ws > 0 {
            self.replace(LexState::PiContents);
            return Some((SyntaxKind::WHITE_SPACE, ws));
        }
        let name = ncname_len(rest);
        if name > 0 {
            return Some((SyntaxKind::NCNAME, name));
        }
        self.replace(LexState::PiContents);
        None
    }

    fn lex_pragma_name(&mut self, rest: &str) -> Option<(SyntaxKind, usize)> {
        if rest.starts_with("#)") {
            self.pop();
            return Some((SyntaxKind::PRAGMA_END, 2));
        }
        let ws = whitespace_len(rest);
        if ws > 0 {
            return Some((SyntaxKind::WHITE_SPACE, ws));
        }
        if rest.starts_with("Q{") {
            self.push(LexState::BracedUri);
            return Some((SyntaxKind::BRACED_URI_LITERAL_START, 2));
        }
        if rest.starts_with(':') && starts_with_name(&rest[1..]) {
            return Some((SyntaxKind::QNAME_SEPARATOR, 1));
        }
        let name = ncname_len(rest);
        if name > 0 {
            let after = &rest[name..];
            if !(after.starts_with(':') && starts_with_name(&after[1..])) {
                self.replace(LexState::PragmaContents);
            }
            return Some((SyntaxKind::NCNAME, name));
        }
        self.replace(LexState::PragmaContents);
        None
    }

    fn lex_braced_uri(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with('}') {
            self.pop();
            return (SyntaxKind::BRACED_URI_LITERAL_END, 1);
        }
        if rest.starts_with('&') {
            return scan_reference(rest);
        }
        let len = rest.find(['}', '&']).unwrap_or(rest.len());
        (SyntaxKind::BRACED_URI_LITERAL_CONTENTS, len)
    }

    fn lex_string_constructor(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with("]``") {
            self.pop();
            return (SyntaxKind::STRING_CONSTRUCTOR_END, 3);
        }
        if rest.starts_with("`{") {
            self.push(LexState::Interpolation);
            return (SyntaxKind::STRING_INTERPOLATION_OPEN, 2);
        }
        let len = match (rest.find("]``"), rest.find("`{")) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => rest.len(),
        };
        (SyntaxKind::STRING_CONSTRUCTOR_CONTENTS, len)
    }

    fn lex_start_tag(&mut self, rest: &str) -> (SyntaxKind, usize) {
        let ws = whitespace_len(rest);
        if ws > 0 {
            return (SyntaxKind::WHITE_SPACE, ws);
        }
        let name = ncname_len(rest);
        if name > 0 {
            return (SyntaxKind::NCNAME, name);
        }
        if rest.starts_with("/>") {
            self.pop();
            return (SyntaxKind::SELF_CLOSING_XML_TAG, 2);
        }
        match rest.as_bytes()[0] {
            b'>' => {
                self.replace(LexState::ElemContent);
                (SyntaxKind::END_XML_TAG, 1)
            }
            b':' => (SyntaxKind::QNAME_SEPARATOR, 1),
            b'=' => (SyntaxKind::EQUAL, 1),
            b'"' => {
                self.push(LexState::AttrValue(Quote::Double));
                (SyntaxKind::XML_ATTRIBUTE_VALUE_START, 1)
            }
            b'\'' => {
                self.push(LexState::AttrValue(Quote::Single));
                (SyntaxKind::XML_ATTRIBUTE_VALUE_START, 1)
            }
            _ => (SyntaxKind::BAD_CHARACTER, first_char_len(rest)),
        }
    }

    fn lex_attribute_value(&mut self, rest: &str, quote: Quote) -> (SyntaxKind, usize) {
        if rest.starts_with(quote.doubled()) || rest.starts_with("{{") || rest.starts_with("}}") {
            return (SyntaxKind::ESCAPED_CHARACTER, 2);
        }
        if rest.starts_with(quote.char()) {
            self.pop();
            return (SyntaxKind::XML_ATTRIBUTE_VALUE_END, 1);
        }
        match rest.as_bytes()[0] {
            b'{' => {
                self.push(LexState::Enclosed);
                (SyntaxKind::BLOCK_OPEN, 1)
            }
            b'}' | b'<' => (SyntaxKind::BAD_CHARACTER, 1),
            b'&' => scan_reference(rest),
            _ => {
                let len = rest
                    .find(|c| c == quote.char() || matches!(c, '{' | '}' | '&' | '<'))
                    .unwrap_or(rest.len());
                (SyntaxKind::XML_ATTRIBUTE_VALUE_CONTENTS, len)
            }
        }
    }

    fn lex_element_content(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with("</") {
            self.replace(LexState::EndTag);
            return (SyntaxKind::CLOSE_XML_TAG, 2);
        }
        if rest.starts_with("<!--") {
            self.push(LexState::XmlComment);
            return (SyntaxKind::XML_COMMENT_START_TAG, 4);
        }
        if rest.starts_with("<![CDATA[") {
            self.push(LexState::Cdata);
            return (SyntaxKind::CDATA_SECTION_START_TAG, 9);
        }
        if rest.starts_with("<?") {
            self.push(LexState::PiTarget);
            return (SyntaxKind::PROCESSING_INSTRUCTION_BEGIN, 2);
        }
        if rest.starts_with("{{") || rest.starts_with("}}") {
            return (SyntaxKind::ESCAPED_CHARACTER, 2);
        }
        match rest.as_bytes()[0] {
            b'<' if starts_with_name(&rest[1..]) => {
                self.push(LexState::StartTag);
                (SyntaxKind::OPEN_XML_TAG, 1)
            }
            b'<' | b'}' => (SyntaxKind::BAD_CHARACTER, 1),
            b'{' => {
                self.push(LexState::Enclosed);
                (SyntaxKind::BLOCK_OPEN, 1)
            }
            b'&' => scan_reference(rest),
            _ => {
                let len = rest.find(['<', '{', '}', '&']).unwrap_or(rest.len());
                (SyntaxKind::XML_ELEMENT_CONTENTS, len)
            }
        }
    }

    fn lex_end_tag(&mut self, rest: &str) -> (SyntaxKind, usize) {
        let ws = whitespace_len(rest);
        if ws > 0 {
            return (SyntaxKind::WHITE_SPACE, ws);
        }
        let name = ncname_len(rest);
        if name > 0 {
            return (SyntaxKind::NCNAME, name);
        }
        match rest.as_bytes()[0] {
            b'>' => {
                self.pop();
                (SyntaxKind::END_XML_TAG, 1)
            }
            b':' => (SyntaxKind::QNAME_SEPARATOR, 1),
            _ => (SyntaxKind::BAD_CHARACTER, first_char_len(rest)),
        }
    }
}

/// Scan an entity or character reference starting at `&`.
fn scan_reference(rest: &str) -> (SyntaxKind, usize) {
    let body = &rest[1..];
    if body.starts_with(';') {
        return (SyntaxKind::EMPTY_ENTITY_REFERENCE, 2);
    }
    let (digits, prefix) = if let Some(hex) = body.strip_prefix("#x") {
        (hex.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(hex.len()), 2)
    } else if let Some(dec) = body.strip_prefix('#') {
        (dec.find(|c: char| !c.is_ascii_digit()).unwrap_or(dec.len()), 1)
    } else {
        let name = ncname_len(body);
        if name == 0 {
            return (SyntaxKind::PARTIAL_ENTITY_REFERENCE, 1);
        }
        let len = 1 + name;
        return if rest[len..].starts_with(';') {
            (SyntaxKind::PREDEFINED_ENTITY_REFERENCE, len + 1)
        } else {
            (SyntaxKind::PARTIAL_ENTITY_REFERENCE, len)
        };
    };
    let len = 1 + prefix + digits;
    if digits > 0 && rest[len..].starts_with(';') {
        (SyntaxKind::CHARACTER_REFERENCE, len + 1)
    } else {
        (SyntaxKind::PARTIAL_ENTITY_REFERENCE, len)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
