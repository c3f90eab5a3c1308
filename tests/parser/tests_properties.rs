//! Property tests over arbitrary input
//!
//! The parser must never panic, must cover every input byte, must be
//! deterministic, and must attach each diagnostic to exactly one `ERROR`
//! node, whatever the dialect.

use proptest::prelude::*;
use xquery::dialect::MarkLogicVersion;
use xquery::{Dialect, SyntaxKind};

/// Fragments that steer generated input into the interesting productions.
const FRAGMENTS: &[&str] = &[
    "xquery", "version", "\"3.1\"", ";", "module", "namespace", "declare", "function", "variable",
    "$x", ":=", "for", "let", "in", "return", "where", "order", "by", "if", "then", "else",
    "(", ")", "{", "}", "[", "]", ",", "<a>", "</a>", "<b/>", "(:", ":)", "'s'", "1", "2.5",
    "1e", "&amp;", "&#x20;", "map", "array", "?", "!", "=>", "|", "insert", "node", "into",
    "copy", "modify", "block", "while", "ftcontains", "contains", "text", "using", "stemming",
    "object-node", "tuple", "%", "a:b", "Q{u}l", "``[", "]``", "`{", "}`", "<!--", "-->",
    "<![CDATA[", "]]>", "(#", "#)", "~", " ", "\n",
];

fn dialects() -> impl Strategy<Value = Dialect> {
    prop_oneof![
        Just(Dialect::w3c()),
        Just(Dialect::marklogic(MarkLogicVersion::V9)),
        Just(Dialect::saxon(xquery::dialect::SaxonVersion::V9_8)),
        Just(Dialect::basex()),
        Just(Dialect::zorba()),
    ]
}

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.join(" "))
}

fn error_nodes(parse: &xquery::Parse) -> usize {
    parse
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::ERROR)
        .count()
}

fn check_invariants(input: &str, dialect: &Dialect) -> Result<(), TestCaseError> {
    let parse = xquery::parse(input, dialect);
    prop_assert_eq!(parse.syntax().text().to_string(), input);
    prop_assert_eq!(u32::from(parse.syntax().text_range().len()) as usize, input.len());
    prop_assert_eq!(error_nodes(&parse), parse.errors().len());

    let again = xquery::parse(input, dialect);
    prop_assert_eq!(parse.debug_tree(), again.debug_tree());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_arbitrary_text(input in "\\PC{0,80}", dialect in dialects()) {
        check_invariants(&input, &dialect)?;
    }

    #[test]
    fn prop_token_soup(input in token_soup(), dialect in dialects()) {
        check_invariants(&input, &dialect)?;
    }

    #[test]
    fn prop_parse_many_matches_sequential(
        inputs in prop::collection::vec(token_soup(), 0..8),
        dialect in dialects(),
    ) {
        let texts: Vec<&str> = inputs.iter().map(String::as_str).collect();
        let parallel = xquery::parse_many(&texts, &dialect);
        prop_assert_eq!(parallel.len(), texts.len());
        for (text, parse) in texts.iter().zip(&parallel) {
            let sequential = xquery::parse(text, &dialect);
            prop_assert_eq!(parse.debug_tree(), sequential.debug_tree());
        }
    }
}
