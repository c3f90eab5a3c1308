//! Recursive descent parser for XQuery
//!
//! Builds a rowan GreenNode tree from tokens pulled lazily from the
//! [`Lexer`]. Supports error recovery and produces a lossless CST.
//!
//! Trivia (whitespace and XQuery comments) is buffered and only emitted when
//! the next token is bumped or the next node is started, so nodes never
//! begin or end with trivia. Diagnostics are stored in [`Parse::errors`] in
//! the pre-order of the `ERROR` nodes that carry them.

use std::collections::VecDeque;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::errors::{Message, SyntaxError};
use super::lexer::{Lexer, LexerSnapshot, Token, starts_with_name};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::dialect::{Dialect, introduced_by};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Check if parsing succeeded without errors or bad characters
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
            && !self
                .syntax()
                .descendants_with_tokens()
                .any(|element| element.kind() == SyntaxKind::BAD_CHARACTER)
    }

    /// The diagnostic carried by an `ERROR` node of this tree.
    pub fn error_for(&self, node: &SyntaxNode) -> Option<&SyntaxError> {
        if node.kind() != SyntaxKind::ERROR {
            return None;
        }
        let path = node_path(node);
        self.syntax()
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::ERROR)
            .position(|n| node_path(&n) == path)
            .and_then(|index| self.errors.get(index))
    }

    /// Render the tree in the indented diagnostic dump format
    pub fn debug_tree(&self) -> String {
        super::dump::debug_tree(self)
    }
}

/// Child indices from the node up to the root. Identifies a node even when
/// identical green nodes are shared.
fn node_path(node: &SyntaxNode) -> Vec<usize> {
    node.ancestors().map(|n| n.index()).collect()
}

/// Outcome of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parsed {
    /// The production matched.
    Node,
    /// The production matched but reported at least one error.
    Error,
    /// Nothing matched and no token was consumed.
    NoMatch,
}

impl Parsed {
    pub(crate) fn is_match(self) -> bool {
        self != Self::NoMatch
    }

    pub(crate) fn is_none(self) -> bool {
        self == Self::NoMatch
    }
}

/// A buffered token with the lexer state it was lexed from, kept for `<`
/// tokens only.
#[derive(Debug)]
struct Lexed<'t> {
    token: Token<'t>,
    snapshot: Option<LexerSnapshot>,
}

/// The parser state
pub(crate) struct Parser<'t> {
    src: &'t str,
    lexer: Lexer<'t>,
    /// Lexed tokens not yet emitted, trivia included.
    buffer: VecDeque<Lexed<'t>>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    dialect: Dialect,
    /// End of the last token emitted into the tree.
    last_end: TextSize,
    /// Number of non-trivia tokens emitted.
    consumed: usize,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(src: &'t str, dialect: &Dialect) -> Self {
        Self {
            src,
            lexer: Lexer::new(src),
            buffer: VecDeque::new(),
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            dialect: *dialect,
            last_end: TextSize::new(0),
            consumed: 0,
        }
    }

    pub(crate) fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    pub(crate) fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Whether the grammar that introduced `kind` is enabled.
    pub(crate) fn supports(&self, kind: SyntaxKind) -> bool {
        introduced_by(kind).is_none_or(|requirement| requirement.is_supported_by(&self.dialect))
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn fill_one(&mut self) -> bool {
        let snapshot = self
            .lexer
            .remaining()
            .starts_with('<')
            .then(|| self.lexer.snapshot());
        match self.lexer.next_token() {
            Some(token) => {
                self.buffer.push_back(Lexed { token, snapshot });
                true
            }
            None => false,
        }
    }

    /// Buffer index of the `n`th non-trivia token.
    fn nth_index(&mut self, n: usize) -> Option<usize> {
        let mut seen = 0;
        let mut index = 0;
        loop {
            if index >= self.buffer.len() && !self.fill_one() {
                return None;
            }
            if !self.buffer[index].token.kind.is_trivia() {
                if seen == n {
                    return Some(index);
                }
                seen += 1;
            }
            index += 1;
        }
    }

    fn nth_token(&mut self, n: usize) -> Option<&Token<'t>> {
        let index = self.nth_index(n)?;
        Some(&self.buffer[index].token)
    }

    /// Kind of the `n`th token ahead, skipping trivia. `EOF` past the end.
    pub(crate) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.nth_token(n).map_or(SyntaxKind::EOF, |t| t.kind)
    }

    pub(crate) fn current(&mut self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn nth_text(&mut self, n: usize) -> &'t str {
        self.nth_token(n).map_or("", |t| t.text)
    }

    pub(crate) fn current_text(&mut self) -> &'t str {
        self.nth_text(0)
    }

    pub(crate) fn nth_range(&mut self, n: usize) -> TextRange {
        let end = TextSize::of(self.src);
        self.nth_token(n).map_or(TextRange::empty(end), |t| t.range)
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn nth_at(&mut self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    pub(crate) fn at_any(&mut self, kinds: &[SyntaxKind]) -> bool {
        let current = self.current();
        kinds.contains(&current)
    }

    pub(crate) fn at_eof(&mut self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// Whether the `n + 1`th token directly follows the `n`th one.
    pub(crate) fn adjacent(&mut self, n: usize) -> bool {
        let next = self.nth(n + 1);
        next != SyntaxKind::EOF && self.nth_range(n).end() == self.nth_range(n + 1).start()
    }

    /// Whether the current `<` is immediately followed by a name, i.e.
    /// starts a direct element constructor.
    pub(crate) fn at_direct_element(&mut self) -> bool {
        if !self.at(SyntaxKind::LESS_THAN) {
            return false;
        }
        let end = usize::from(self.nth_range(0).end());
        starts_with_name(&self.src[end..])
    }

    pub(crate) fn slice(&self, range: TextRange) -> &'t str {
        &self.src[range]
    }

    /// Number of non-trivia tokens consumed so far.
    pub(crate) fn progress(&self) -> usize {
        self.consumed
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn emit_front(&mut self) {
        if let Some(lexed) = self.buffer.pop_front() {
            self.builder.token(lexed.token.kind.into(), lexed.token.text);
            self.last_end = lexed.token.range.end();
        }
    }

    fn front_kind(&self) -> Option<SyntaxKind> {
        self.buffer.front().map(|lexed| lexed.token.kind)
    }

    /// Emit the trivia in front of the next token.
    fn flush_trivia(&mut self) {
        self.nth_index(0);
        while let Some(kind) = self.front_kind() {
            match kind {
                SyntaxKind::COMMENT_START_TAG => self.comment(),
                SyntaxKind::COMMENT_END_TAG => {
                    let error = self.push_error(Message::CommentEndWithoutStart);
                    self.builder.start_node(SyntaxKind::ERROR.into());
                    self.emit_front();
                    self.finish_error(error);
                }
                kind if kind.is_trivia() => self.emit_front(),
                _ => break,
            }
        }
    }

    /// Comment = "(:" CommentContents? ":)"
    fn comment(&mut self) {
        self.builder.start_node(SyntaxKind::COMMENT.into());
        self.emit_front();
        if self.front_kind() == Some(SyntaxKind::COMMENT_CONTENTS) {
            self.emit_front();
        }
        if self.front_kind() == Some(SyntaxKind::COMMENT_END_TAG) {
            self.emit_front();
        } else {
            self.error(Message::UnclosedComment);
        }
        self.builder.finish_node();
    }

    pub(crate) fn bump(&mut self) {
        let kind = self.current();
        self.bump_remap(kind);
    }

    /// Consume the current token, storing it in the tree as `kind`.
    pub(crate) fn bump_remap(&mut self, kind: SyntaxKind) {
        if self.nth_index(0).is_none() {
            return;
        }
        self.flush_trivia();
        if let Some(lexed) = self.buffer.pop_front() {
            self.builder.token(kind.into(), lexed.token.text);
            self.last_end = lexed.token.range.end();
            self.consumed += 1;
        }
    }

    /// Consume a name token, re-tagging keywords as `NCNAME`.
    pub(crate) fn bump_name(&mut self) {
        self.bump_remap(SyntaxKind::NCNAME);
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report it missing.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let text = kind.text().unwrap_or(kind.name());
        if kind.is_keyword() {
            self.error(Message::MissingKeyword(text));
        } else {
            self.error(Message::Expected(text));
        }
        false
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn push_error(&mut self, message: Message) -> usize {
        self.errors.push(SyntaxError::at_offset(message, self.last_end));
        self.errors.len() - 1
    }

    /// Emit a zero-width `ERROR` node after the last consumed token.
    pub(crate) fn error(&mut self, message: Message) {
        tracing::trace!(offset = u32::from(self.last_end), %message, "parser: missing construct");
        self.push_error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.builder.finish_node();
    }

    /// Start an `ERROR` node that wraps the tokens consumed until
    /// [`Parser::finish_error`].
    pub(crate) fn start_error(&mut self, message: Message) -> usize {
        self.start_node(SyntaxKind::ERROR);
        self.push_error(message)
    }

    pub(crate) fn finish_error(&mut self, error: usize) {
        self.builder.finish_node();
        let end = self.last_end;
        if let Some(error) = self.errors.get_mut(error) {
            error.range = TextRange::new(error.range.start(), end.max(error.range.start()));
        }
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Wrap everything emitted since `checkpoint` in an `ERROR` node starting
    /// at `start`. `first_error` is the diagnostic count at the checkpoint,
    /// so the new diagnostic precedes any reported inside the wrapped nodes.
    pub(crate) fn wrap_error(
        &mut self,
        checkpoint: Checkpoint,
        first_error: usize,
        start: TextSize,
        message: Message,
    ) {
        tracing::trace!(offset = u32::from(start), %message, "parser: wrapping stray input");
        self.builder.start_node_at(checkpoint, SyntaxKind::ERROR.into());
        self.builder.finish_node();
        let range = TextRange::new(start, self.last_end.max(start));
        let index = first_error.min(self.errors.len());
        self.errors.insert(index, SyntaxError::new(message, range));
    }

    /// Wrap the current token in an `ERROR` node.
    pub(crate) fn error_and_bump(&mut self, message: Message) {
        tracing::trace!(kind = ?self.current(), %message, "parser: skipping token");
        let error = self.start_error(message);
        self.bump();
        self.finish_error(error);
    }

    /// Wrap a stray token, choosing the message by token class.
    pub(crate) fn error_and_bump_stray(&mut self) {
        if self.at(SyntaxKind::BAD_CHARACTER) {
            self.bump();
            return;
        }
        let kind = self.current();
        if kind.is_punct() || is_xml_markup(kind) {
            self.error_and_bump(Message::InvalidSymbol);
        } else {
            self.error_and_bump(Message::UnexpectedToken);
        }
    }

    /// Wrap tokens in one `ERROR` node until one of `recovery` (or EOF).
    pub(crate) fn error_recover(&mut self, message: Message, recovery: &[SyntaxKind]) {
        let error = self.start_error(message);
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
        }
        self.finish_error(error);
    }

    // =========================================================================
    // Node building
    // =========================================================================

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Open the root node. Leading trivia belongs inside it, so nothing is
    /// flushed first.
    pub(crate) fn start_root(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Emit all remaining trivia, before the root node is finished.
    pub(crate) fn finish_trivia(&mut self) {
        self.flush_trivia();
    }

    // =========================================================================
    // Lexer control
    // =========================================================================

    /// Re-lex the current `<` as the start of a direct element constructor.
    /// Buffered lookahead past the `<` is discarded.
    pub(crate) fn begin_direct_element(&mut self) -> bool {
        let Some(index) = self.nth_index(0) else {
            return false;
        };
        let Some(snapshot) = self.buffer[index].snapshot.take() else {
            return false;
        };
        self.buffer.truncate(index);
        self.lexer.begin_direct_element(snapshot);
        true
    }
}

fn is_xml_markup(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        PRAGMA_END
            | XML_COMMENT_START_TAG
            | PROCESSING_INSTRUCTION_BEGIN
            | CDATA_SECTION_START_TAG
            | OPEN_XML_TAG
            | END_XML_TAG
            | SELF_CLOSING_XML_TAG
            | CLOSE_XML_TAG
            | STRING_CONSTRUCTOR_START
            | STRING_INTERPOLATION_CLOSE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(input: &str) -> Parser<'_> {
        Parser::new(input, &Dialect::w3c())
    }

    #[test]
    fn test_lookahead_skips_trivia() {
        let mut p = parser("for (: c :) $x");
        assert_eq!(p.current(), SyntaxKind::K_FOR);
        assert_eq!(p.nth(1), SyntaxKind::VARIABLE_INDICATOR);
        assert_eq!(p.nth(2), SyntaxKind::NCNAME);
        assert_eq!(p.nth(3), SyntaxKind::EOF);
        assert_eq!(p.nth_text(2), "x");
    }

    #[test]
    fn test_adjacent() {
        let mut p = parser("a:b c :d");
        assert!(p.adjacent(0));
        assert!(p.adjacent(1));
        assert!(!p.adjacent(2));
        assert!(!p.adjacent(5));
    }

    #[test]
    fn test_zero_width_error_before_pending_trivia() {
        let mut p = parser("a  b");
        p.start_root(SyntaxKind::FILE);
        p.bump();
        p.error(Message::MissingExpression);
        p.bump();
        p.finish_trivia();
        p.finish_node();
        let parse = p.finish();
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].range, TextRange::empty(TextSize::new(1)));
        let kinds: Vec<_> = parse
            .syntax()
            .children_with_tokens()
            .map(|element| element.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::NCNAME, SyntaxKind::ERROR, SyntaxKind::WHITE_SPACE, SyntaxKind::NCNAME]
        );
    }

    #[test]
    fn test_error_and_bump_records_range() {
        let mut p = parser(" )");
        p.start_root(SyntaxKind::FILE);
        p.error_and_bump_stray();
        p.finish_node();
        let parse = p.finish();
        assert_eq!(
            parse.errors[0].range,
            TextRange::new(TextSize::new(1), TextSize::new(2))
        );
        assert_eq!(parse.errors[0].message, "XPST0003: Invalid XQuery symbol or operator.");
    }

    #[test]
    fn test_begin_direct_element_relexes() {
        let mut p = parser("<a>x</a>");
        assert!(p.at_direct_element());
        assert_eq!(p.nth(1), SyntaxKind::NCNAME);
        assert!(p.begin_direct_element());
        assert_eq!(p.current(), SyntaxKind::OPEN_XML_TAG);
        assert_eq!(p.nth(2), SyntaxKind::END_XML_TAG);
        assert_eq!(p.nth(3), SyntaxKind::XML_ELEMENT_CONTENTS);
    }

    #[test]
    fn test_less_than_operator_is_not_element() {
        let mut p = parser("< 1");
        assert!(!p.at_direct_element());
    }
}
