//! Keyword classification
//!
//! XQuery has no reserved words: the lexer classifies every NCName that
//! spells a keyword as its `K_*` kind and the grammar re-tags it `NCNAME`
//! wherever a name is expected.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::SyntaxKind;

static KEYWORDS: LazyLock<FxHashMap<&'static str, SyntaxKind>> =
    LazyLock::new(|| SyntaxKind::KEYWORDS.iter().copied().collect());

/// Look up the keyword kind for an NCName. Keywords are case sensitive.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    KEYWORDS.get(text).copied()
}

/// Whether `text` spells a keyword of any supported dialect.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains_key(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword_kind("for"), Some(SyntaxKind::K_FOR));
        assert_eq!(keyword_kind("ancestor-or-self"), Some(SyntaxKind::K_ANCESTOR_OR_SELF));
        assert_eq!(keyword_kind("NaN"), Some(SyntaxKind::K_NAN));
        assert_eq!(keyword_kind("FOR"), None);
        assert_eq!(keyword_kind("foo"), None);
    }

    #[test]
    fn test_every_keyword_text_round_trips() {
        for (text, kind) in SyntaxKind::KEYWORDS {
            assert!(is_keyword(text));
            assert_eq!(kind.text(), Some(*text));
        }
    }
}
