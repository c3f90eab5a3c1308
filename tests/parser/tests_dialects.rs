//! Dialect gating: extension syntax is only recognised when enabled

#![allow(clippy::unwrap_used)]

use rstest::rstest;
use xquery::Dialect;
use xquery::dialect::{
    FullTextVersion, Implementation, MarkLogicVersion, SaxonVersion, ScriptingVersion,
    UpdateFacilityVersion, XQueryVersion,
};

#[rstest]
#[case::marklogic_json("object-node { \"a\" : 1 }", Dialect::marklogic(MarkLogicVersion::V8), "CompObjectNodeConstructor")]
#[case::saxon_tuple("$t instance of tuple(a: xs:string, *)", Dialect::saxon(SaxonVersion::V9_8), "TupleType")]
#[case::saxon_type_decl("declare type a:t = xs:int; 1", Dialect::saxon(SaxonVersion::V9_8), "TypeDecl")]
#[case::basex_update("insert node <a/> into $x", Dialect::basex(), "InsertExpr")]
#[case::basex_full_text("$a contains text \"x\"", Dialect::basex(), "FTContainsExpr")]
#[case::zorba_block("block { 1 }", Dialect::zorba(), "BlockExpr")]
#[case::zorba_updating("declare updating function f() { () }; 1", Dialect::zorba(), "CompatibilityAnnotation")]
fn test_extension_syntax_is_gated(
    #[case] input: &str,
    #[case] dialect: Dialect,
    #[case] label: &str,
) {
    let enabled = xquery::parse(input, &dialect);
    assert!(enabled.errors().is_empty(), "{input:?}: {:?}", enabled.errors());
    assert!(enabled.debug_tree().contains(&format!("{label}[")), "{input:?}");

    let w3c = xquery::parse(input, &Dialect::w3c());
    assert_eq!(w3c.syntax().text().to_string(), input);
    let tree = w3c.debug_tree();
    let recognised = tree.contains(&format!("{label}[")) && w3c.errors().is_empty();
    assert!(!recognised, "{input:?} should not be recognised without the extension");
}

#[rstest]
#[case("insert")]
#[case("delete")]
#[case("block")]
#[case("ftcontains")]
#[case("object-node")]
#[case("tuple")]
fn test_extension_keywords_are_names_in_w3c(#[case] name: &str) {
    let parse = xquery::parse(name, &Dialect::w3c());
    assert!(parse.errors().is_empty(), "{name}: {:?}", parse.errors());
    assert!(parse.debug_tree().contains(&format!("Leaf[NCNAME(0:{})]", name.len())));
}

#[rstest]
#[case::switch("switch ($x) case 1 return 2 default return 3", "SwitchExpr")]
#[case::try_catch("try { 1 } catch * { 2 }", "TryCatchExpr")]
#[case::count_clause("for $x in 1 count $c return $c", "CountClause")]
#[case::string_concat("'a' || 'b'", "StringConcatExpr")]
#[case::simple_map("$a ! name()", "SimpleMapExpr")]
#[case::inline_function("function($x) { $x }", "InlineFunctionExpr")]
#[case::named_function_ref("abs#1", "NamedFunctionRef")]
#[case::arrow("$a => abs()", "ArrowExpr")]
#[case::map("map { 'a' : 1 }", "MapConstructor")]
#[case::curly_array("array { 1 }", "CurlyArrayConstructor")]
#[case::square_array("[1, 2]", "SquareArrayConstructor")]
fn test_xquery_3_syntax_needs_version(#[case] input: &str, #[case] label: &str) {
    let current = xquery::parse(input, &Dialect::w3c());
    assert!(current.errors().is_empty(), "{input:?}: {:?}", current.errors());
    assert!(current.debug_tree().contains(&format!("{label}[")), "{input:?}");

    let xquery_1 = Dialect::w3c().with_xquery_version(XQueryVersion::V1_0);
    let old = xquery::parse(input, &xquery_1);
    assert_eq!(old.syntax().text().to_string(), input);
    assert!(!old.debug_tree().contains(&format!("{label}[")), "{input:?}");
}

#[test]
fn test_xquery_3_1_syntax_needs_3_1() {
    let xquery_3 = Dialect::w3c().with_xquery_version(XQueryVersion::V3_0);
    let parse = xquery::parse("switch ($x) case 1 return 2 default return 3", &xquery_3);
    assert!(parse.errors().is_empty());

    let parse = xquery::parse("map { 'a' : 1 }", &xquery_3);
    assert!(!parse.errors().is_empty());
    assert!(!parse.debug_tree().contains("MapConstructor["));
}

#[test]
fn test_xquery_3_keywords_are_function_names_in_1_0() {
    let xquery_1 = Dialect::w3c().with_xquery_version(XQueryVersion::V1_0);
    let parse = xquery::parse("switch($x)", &xquery_1);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    let tree = parse.debug_tree();
    assert!(tree.contains("FunctionCall[FUNCTION_CALL(0:10)]"));
    assert!(!tree.contains("SwitchExpr["));

    let parse = xquery::parse("map($x)", &xquery_1);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    assert!(parse.debug_tree().contains("FunctionCall[FUNCTION_CALL(0:7)]"));
}

#[test]
fn test_marklogic_1_0_ml_has_xquery_3_0() {
    let marklogic = Dialect::marklogic(MarkLogicVersion::V9);
    let parse = xquery::parse("try { 1 } catch * { 2 }", &marklogic);
    assert!(parse.errors().is_empty());
    assert!(parse.debug_tree().contains("TryCatchExpr["));
}

#[test]
fn test_update_facility_3_0_requires_version() {
    let update_1 = Dialect::w3c().with_update_facility(Some(UpdateFacilityVersion::V1_0));
    let update_3 = Dialect::w3c().with_update_facility(Some(UpdateFacilityVersion::V3_0));
    assert!(update_1.supports_update());
    assert!(!update_1.supports_update_3_0());
    assert!(update_3.supports_update_3_0());
}

#[test]
fn test_presets() {
    let zorba = Dialect::zorba();
    assert!(zorba.supports_full_text());
    assert!(zorba.supports_update());
    assert!(zorba.supports_scripting());
    assert!(!zorba.supports_marklogic());

    let marklogic = Dialect::marklogic(MarkLogicVersion::V7);
    assert!(marklogic.supports_marklogic());
    assert!(!marklogic.supports_marklogic_8());
    assert_eq!(marklogic.xquery_version, XQueryVersion::V1_0Ml);

    assert_eq!(Dialect::default(), Dialect::w3c());
    assert_eq!(
        Dialect::for_implementation(Implementation::Saxon),
        Dialect::saxon(SaxonVersion::V9_8)
    );
}

#[test]
fn test_builders_compose() {
    let dialect = Dialect::w3c()
        .with_full_text(Some(FullTextVersion::V3_0))
        .with_scripting(Some(ScriptingVersion::V1_0))
        .with_saxon(Some(SaxonVersion::V9_8));
    assert!(dialect.supports_full_text());
    assert!(dialect.supports_scripting());
    assert!(dialect.supports_saxon_9_8());
    assert!(!dialect.supports_update());
}

#[test]
fn test_implementation_from_str() {
    assert_eq!("MarkLogic".parse::<Implementation>().unwrap(), Implementation::MarkLogic);
    let error = "exist".parse::<Implementation>().unwrap_err();
    assert_eq!(error.to_string(), "unknown XQuery implementation 'exist'");
}
