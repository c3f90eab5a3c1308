//! Diagnostics and recovery for malformed input
//!
//! Every case checks the first message verbatim, that the tree still covers
//! the whole input, and that each diagnostic has its `ERROR` node.

#![allow(clippy::unwrap_used)]

use rstest::rstest;
use xquery::{Dialect, SyntaxKind};

fn error_nodes(parse: &xquery::Parse) -> usize {
    parse
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::ERROR)
        .count()
}

#[rstest]
#[case("xquery;", "XPST0003: Missing keyword 'version'.")]
#[case("for $x in 1", "XPST0003: Missing keyword 'return'.")]
#[case("for $x 1 return $x", "XPST0003: Missing keyword 'in'.")]
#[case("if (1) then 2", "XPST0003: Missing keyword 'else'.")]
#[case("1 +", "XPST0003: Missing expression.")]
#[case("\"abc", "XPST0003: Unclosed string literal.")]
#[case("(: abc", "XPST0003: Unclosed XQuery comment.")]
#[case("1 :)", "XPST0003: End of comment marker found without a '(:' start of comment marker.")]
#[case("1 )", "XPST0003: Invalid XQuery symbol or operator.")]
#[case("<a>text", "XPST0003: Expected closing tag '</a>'.")]
#[case("declare foo bar; 1", "XPST0003: Unknown declaration.")]
#[case("declare function f(); 1", "XPST0003: Missing function body or 'external'.")]
#[case("declare variable $x; 1", "XPST0003: Expected ':=' or 'external'.")]
#[case("1 declare namespace a = \"b\";", "XPST0003: Prolog declarations must appear before the query body.")]
#[case("1; 2", "XPST0003: Transaction separators are only supported by MarkLogic.")]
#[case("map { 'a' := 1 }", "XPST0003: Expected ':'.")]
fn test_first_diagnostic(#[case] input: &str, #[case] message: &str) {
    let parse = xquery::parse(input, &Dialect::w3c());
    assert!(!parse.ok(), "expected an error for {input:?}");
    assert_eq!(parse.errors()[0].message, message, "input: {input:?}");
    assert_eq!(parse.syntax().text().to_string(), input);
    assert_eq!(error_nodes(&parse), parse.errors().len());
}

#[test]
fn test_mismatched_closing_tag_uses_xqst0118() {
    let parse = xquery::parse("<a></b>", &Dialect::w3c());
    let error = &parse.errors()[0];
    assert!(error.message.starts_with("XQST0118: "), "{}", error.message);
    assert_eq!(
        error.message,
        "XQST0118: The closing tag 'b' does not match the opening tag 'a'."
    );
}

#[test]
fn test_error_for_finds_the_diagnostic_of_a_node() {
    let parse = xquery::parse("1 )", &Dialect::w3c());
    let error_node = parse
        .syntax()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::ERROR)
        .unwrap();
    let error = parse.error_for(&error_node).unwrap();
    assert_eq!(error.message, "XPST0003: Invalid XQuery symbol or operator.");
}

#[test]
fn test_parsing_continues_after_errors() {
    let input = "declare function f( { 1 }; for $x in (1, 2 return $x";
    let parse = xquery::parse(input, &Dialect::w3c());
    assert!(!parse.ok());
    assert_eq!(parse.syntax().text().to_string(), input);
    let tree = parse.debug_tree();
    assert!(tree.contains("FunctionDecl[FUNCTION_DECL"));
    assert!(tree.contains("FLWORExpr[FLWOR_EXPR"));
}
