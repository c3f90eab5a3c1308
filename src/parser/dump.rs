//! Indented tree dump used by tests and debugging
//!
//! One line per node or token in pre-order, three spaces of indent per
//! depth:
//!
//! ```text
//! Module[FILE(0:7)]
//!    VersionDecl[VERSION_DECL(0:6)]
//!       Leaf[K_XQUERY(0:6)]('xquery')
//!    Error[ERROR(6:6)]('XPST0003: Missing keyword 'version'.')
//!    Leaf[SEPARATOR(6:7)](';')
//! ```
//!
//! Offsets are character offsets. Newlines in token text are written as
//! `\n`.

use std::fmt::Write;

use rowan::WalkEvent;

use super::parser::Parse;
use super::syntax_kind::{SyntaxElement, SyntaxKind};
use crate::base::CharOffsets;

const INDENT: &str = "   ";

pub fn debug_tree(parse: &Parse) -> String {
    let root = parse.syntax();
    let offsets = CharOffsets::new(&root.text().to_string());
    let mut errors = parse.errors().iter();
    let mut out = String::new();
    let mut depth = 0usize;

    for event in root.preorder_with_tokens() {
        let element = match event {
            WalkEvent::Enter(element) => element,
            WalkEvent::Leave(_) => {
                depth = depth.saturating_sub(1);
                continue;
            }
        };
        let kind = element.kind();
        let (start, end) = offsets.char_range(element.text_range());
        let _ = write!(
            out,
            "{}{}[{}({start}:{end})]",
            INDENT.repeat(depth),
            kind.label(),
            kind.name()
        );
        match &element {
            SyntaxElement::Token(token) => {
                let _ = write!(out, "('{}')", escape(token.text()));
            }
            SyntaxElement::Node(_) if kind == SyntaxKind::ERROR => {
                let message = errors.next().map_or("", |error| error.message.as_str());
                let _ = write!(out, "('{}')", escape(message));
            }
            SyntaxElement::Node(_) => {}
        }
        out.push('\n');
        depth += 1;
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('\n', "\\n")
}
