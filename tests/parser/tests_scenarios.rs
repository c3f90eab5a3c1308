//! End-to-end parses of small documents, checked against their full dump.

#![allow(clippy::unwrap_used)]

use xquery::Dialect;
use xquery::dialect::FullTextVersion;

fn dump(input: &str) -> String {
    xquery::parse(input, &Dialect::w3c()).debug_tree()
}

#[test]
fn test_empty_input() {
    let parse = xquery::parse("", &Dialect::w3c());
    assert!(parse.ok());
    assert_eq!(parse.syntax().children_with_tokens().count(), 0);
    assert_eq!(parse.debug_tree(), "Module[FILE(0:0)]\n");
}

#[test]
fn test_bad_characters_are_bare_leaves() {
    let parse = xquery::parse("~\u{FFFE}\u{FFFF}", &Dialect::w3c());
    assert!(parse.errors().is_empty());
    assert_eq!(
        parse.debug_tree(),
        "Module[FILE(0:3)]\n   \
         Leaf[BAD_CHARACTER(0:1)]('~')\n   \
         Leaf[BAD_CHARACTER(1:2)]('\u{FFFE}')\n   \
         Leaf[BAD_CHARACTER(2:3)]('\u{FFFF}')\n"
    );
}

#[test]
fn test_integer_literal() {
    let tree = dump("1234");
    assert!(tree.contains("Leaf[INTEGER(0:4)]('1234')"));
    assert_eq!(tree.matches("Leaf[").count(), 1);
}

#[test]
fn test_version_decl_without_version() {
    let expected = "\
Module[FILE(0:7)]
   VersionDecl[VERSION_DECL(0:6)]
      Leaf[K_XQUERY(0:6)]('xquery')
   Error[ERROR(6:6)]('XPST0003: Missing keyword 'version'.')
   Leaf[SEPARATOR(6:7)](';')
";
    assert_eq!(dump("xquery;"), expected);
}

#[test]
fn test_qname_with_numeric_local_part() {
    let parse = xquery::parse("one:234", &Dialect::w3c());
    assert_eq!(parse.errors().len(), 1);
    let tree = parse.debug_tree();
    assert!(tree.contains("Leaf[NCNAME(0:3)]('one')"));
    assert!(tree.contains("Leaf[QNAME_SEPARATOR(3:4)](':')"));
    assert!(tree.contains(
        "Error[ERROR(4:7)]('XPST0003: Missing local name after ':' in qualified name.')"
    ));
    assert!(tree.contains("Leaf[INTEGER(4:7)]('234')"));
}

#[test]
fn test_ftcontains_is_a_name_without_full_text() {
    let parse = xquery::parse("ftcontains", &Dialect::w3c());
    assert!(parse.errors().is_empty());
    assert!(parse.debug_tree().contains("Leaf[NCNAME(0:10)]('ftcontains')"));

    let input = "$a ftcontains \"x\"";
    let parse = xquery::parse(input, &Dialect::w3c());
    assert_eq!(parse.syntax().text().to_string(), input);
    let tree = parse.debug_tree();
    assert!(!tree.contains("FTContainsExpr"));
    assert!(tree.contains("Leaf[NCNAME(3:13)]('ftcontains')"));
    assert!(!tree.contains("K_FTCONTAINS"));
    // the words after the query body are one stray region, not one per token
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].message, "XPST0003: Unexpected token.");
    assert!(tree.contains("Error[ERROR(3:17)]('XPST0003: Unexpected token.')"));

    let parse = xquery::parse("ftcontains(\"x\")", &Dialect::w3c());
    assert!(parse.errors().is_empty());
    assert!(parse.debug_tree().contains("FunctionCall[FUNCTION_CALL(0:15)]"));

    let full_text = Dialect::w3c().with_full_text(Some(FullTextVersion::V1_0));
    let parse = xquery::parse(input, &full_text);
    assert!(parse.errors().is_empty());
    assert!(parse.debug_tree().contains("FTContainsExpr[FT_CONTAINS_EXPR(0:17)]"));
}

#[test]
fn test_library_module_round_trips() {
    let input = r#"xquery version "3.1";
module namespace m = "urn:m";

declare variable $m:limit as xs:integer := 10;

declare function m:top($items as item()*) as item()* {
  for $item at $i in $items
  where $i le $m:limit
  order by $item descending
  return <item n="{$i}">{ $item }</item>
};
"#;
    let parse = xquery::parse(input, &Dialect::w3c());
    assert!(parse.ok(), "{:?}", parse.errors());
    assert_eq!(parse.syntax().text().to_string(), input);
    let tree = parse.debug_tree();
    assert!(tree.contains("LibraryModule[LIBRARY_MODULE"));
    assert!(tree.contains("FLWORExpr[FLWOR_EXPR"));
    assert!(tree.contains("DirElemConstructor[DIR_ELEM_CONSTRUCTOR"));
}
