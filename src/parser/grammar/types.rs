use super::*;

// =============================================================================
// Sequence types
// =============================================================================

/// TypeDeclaration = "as" SequenceType
pub(super) fn type_declaration(p: &mut Parser<'_>) -> Parsed {
    if !p.at(K_AS) {
        return Parsed::NoMatch;
    }
    p.start_node(TYPE_DECLARATION);
    p.bump();
    let parsed = expect_sequence_type(p);
    p.finish_node();
    parsed
}

pub(super) fn expect_sequence_type(p: &mut Parser<'_>) -> Parsed {
    let parsed = sequence_type(p);
    if parsed.is_none() {
        p.error(Message::MissingSequenceType);
        return Parsed::Error;
    }
    parsed
}

/// SequenceType = ("empty-sequence" "(" ")") | (ItemType OccurrenceIndicator?)
pub(super) fn sequence_type(p: &mut Parser<'_>) -> Parsed {
    if p.at(K_EMPTY_SEQUENCE) && p.nth_at(1, PARENTHESIS_OPEN) {
        p.start_node(EMPTY_SEQUENCE_TYPE);
        p.bump();
        p.bump();
        p.expect(PARENTHESIS_CLOSE);
        p.finish_node();
        return Parsed::Node;
    }
    let cp = p.checkpoint();
    let parsed = item_type(p);
    if parsed.is_match() && p.at_any(&[OPTIONAL, STAR, PLUS]) {
        p.start_node_at(cp, SEQUENCE_TYPE);
        p.bump();
        p.finish_node();
    }
    parsed
}

/// SequenceTypeUnion = SequenceType ("|" SequenceType)*
pub(super) fn sequence_type_union(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = expect_sequence_type(p);
    if !p.at(UNION) {
        return parsed;
    }
    p.start_node_at(cp, SEQUENCE_TYPE_UNION);
    while p.eat(UNION) {
        expect_sequence_type(p);
    }
    p.finish_node();
    Parsed::Node
}

/// SingleType = SimpleTypeName "?"?
pub(super) fn single_type(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = expect_eqname(p);
    if p.at(OPTIONAL) {
        p.start_node_at(cp, SINGLE_TYPE);
        p.bump();
        p.finish_node();
    }
    parsed
}

// =============================================================================
// Item types
// =============================================================================

/// ItemType = KindTest | ("item" "(" ")") | FunctionTest | MapTest
///          | ArrayTest | AtomicOrUnionType | ParenthesizedItemType
///
/// Saxon 9.8 adds TupleType, UnionType and TypeAlias.
pub(super) fn item_type(p: &mut Parser<'_>) -> Parsed {
    let parsed = kind_test(p);
    if parsed.is_match() {
        return parsed;
    }
    let paren = p.nth_at(1, PARENTHESIS_OPEN);
    match p.current() {
        K_ITEM if paren => {
            p.start_node(ANY_ITEM_TYPE);
            p.bump();
            p.bump();
            p.expect(PARENTHESIS_CLOSE);
            p.finish_node();
            Parsed::Node
        }
        K_FUNCTION if paren => function_test(p),
        ANNOTATION_INDICATOR => function_test(p),
        K_MAP if paren => map_test(p),
        K_ARRAY if paren => array_test(p),
        K_TUPLE if paren && p.supports(TUPLE_TYPE) => tuple_type(p),
        K_UNION if paren && p.supports(UNION_TYPE) => union_type(p),
        BAD_CHARACTER if p.current_text() == "~" && p.supports(TYPE_ALIAS) => {
            p.start_node(TYPE_ALIAS);
            p.bump_remap(TYPE_ALIAS_INDICATOR);
            expect_eqname(p);
            p.finish_node();
            Parsed::Node
        }
        PARENTHESIS_OPEN => {
            p.start_node(PARENTHESIZED_ITEM_TYPE);
            p.bump();
            if item_type(p).is_none() {
                p.error(Message::MissingItemType);
            }
            p.expect(PARENTHESIS_CLOSE);
            p.finish_node();
            Parsed::Node
        }
        _ => eqname(p),
    }
}

/// FunctionTest = Annotation* (AnyFunctionTest | TypedFunctionTest)
/// AnyFunctionTest = "function" "(" "*" ")"
/// TypedFunctionTest = "function" "(" (SequenceType ("," SequenceType)*)? ")" "as" SequenceType
fn function_test(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    while p.at(ANNOTATION_INDICATOR) {
        annotation(p);
    }
    if !(p.at(K_FUNCTION) && p.nth_at(1, PARENTHESIS_OPEN)) {
        p.start_node_at(cp, TYPED_FUNCTION_TEST);
        p.expect(K_FUNCTION);
        p.finish_node();
        return Parsed::Error;
    }
    if p.nth_at(2, STAR) {
        p.start_node_at(cp, ANY_FUNCTION_TEST);
        p.bump();
        p.bump();
        p.bump();
        p.expect(PARENTHESIS_CLOSE);
        p.finish_node();
        return Parsed::Node;
    }
    p.start_node_at(cp, TYPED_FUNCTION_TEST);
    p.bump();
    p.bump();
    if !p.at(PARENTHESIS_CLOSE) {
        expect_sequence_type(p);
        while p.eat(COMMA) {
            expect_sequence_type(p);
        }
    }
    p.expect(PARENTHESIS_CLOSE);
    p.expect(K_AS);
    expect_sequence_type(p);
    p.finish_node();
    Parsed::Node
}

/// MapTest = ("map" "(" "*" ")") | ("map" "(" AtomicOrUnionType "," SequenceType ")")
fn map_test(p: &mut Parser<'_>) -> Parsed {
    if p.nth_at(2, STAR) {
        p.start_node(ANY_MAP_TEST);
        p.bump();
        p.bump();
        p.bump();
        p.expect(PARENTHESIS_CLOSE);
        p.finish_node();
        return Parsed::Node;
    }
    p.start_node(TYPED_MAP_TEST);
    p.bump();
    p.bump();
    expect_eqname(p);
    p.expect(COMMA);
    expect_sequence_type(p);
    p.expect(PARENTHESIS_CLOSE);
    p.finish_node();
    Parsed::Node
}

/// ArrayTest = ("array" "(" "*" ")") | ("array" "(" SequenceType ")")
fn array_test(p: &mut Parser<'_>) -> Parsed {
    let kind = if p.nth_at(2, STAR) { ANY_ARRAY_TEST } else { TYPED_ARRAY_TEST };
    p.start_node(kind);
    p.bump();
    p.bump();
    if kind == ANY_ARRAY_TEST {
        p.bump();
    } else {
        expect_sequence_type(p);
    }
    p.expect(PARENTHESIS_CLOSE);
    p.finish_node();
    Parsed::Node
}

/// TupleType = "tuple" "(" TupleField ("," TupleField)* ("," "*")? ")"
fn tuple_type(p: &mut Parser<'_>) -> Parsed {
    p.start_node(TUPLE_TYPE);
    p.bump();
    p.bump();
    loop {
        if p.at(STAR) {
            p.bump();
            break;
        }
        tuple_field(p);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(PARENTHESIS_CLOSE);
    p.finish_node();
    Parsed::Node
}

/// TupleField = NCName "?"? ((":" | "as") SequenceType)?
fn tuple_field(p: &mut Parser<'_>) {
    p.start_node(TUPLE_FIELD);
    expect_ncname(p);
    p.eat(OPTIONAL);
    if p.eat(QNAME_SEPARATOR) || p.eat(K_AS) {
        expect_sequence_type(p);
    }
    p.finish_node();
}

/// UnionType = "union" "(" EQName ("," EQName)* ")"
fn union_type(p: &mut Parser<'_>) -> Parsed {
    p.start_node(UNION_TYPE);
    p.bump();
    p.bump();
    expect_eqname(p);
    while p.eat(COMMA) {
        expect_eqname(p);
    }
    p.expect(PARENTHESIS_CLOSE);
    p.finish_node();
    Parsed::Node
}

// =============================================================================
// Kind tests
// =============================================================================

/// Kind test node for a keyword followed by `(`, if the active dialect has
/// one.
fn kind_test_node(p: &Parser<'_>, keyword: SyntaxKind) -> Option<SyntaxKind> {
    let kind = match keyword {
        K_DOCUMENT_NODE => DOCUMENT_TEST,
        K_ELEMENT => ELEMENT_TEST,
        K_ATTRIBUTE => ATTRIBUTE_TEST,
        K_SCHEMA_ELEMENT => SCHEMA_ELEMENT_TEST,
        K_SCHEMA_ATTRIBUTE => SCHEMA_ATTRIBUTE_TEST,
        K_PROCESSING_INSTRUCTION => PI_TEST,
        K_COMMENT => COMMENT_TEST,
        K_TEXT => TEXT_TEST,
        K_NAMESPACE_NODE => NAMESPACE_NODE_TEST,
        K_NODE => ANY_KIND_TEST,
        K_BINARY => BINARY_TEST,
        K_OBJECT_NODE => OBJECT_NODE_TEST,
        K_ARRAY_NODE => ARRAY_NODE_TEST,
        K_NUMBER_NODE => NUMBER_NODE_TEST,
        K_BOOLEAN_NODE => BOOLEAN_NODE_TEST,
        K_NULL_NODE => NULL_NODE_TEST,
        K_ATTRIBUTE_DECL | K_COMPLEX_TYPE | K_ELEMENT_DECL | K_MODEL_GROUP | K_SCHEMA_FACET
        | K_SCHEMA_PARTICLE | K_SCHEMA_ROOT | K_SCHEMA_TYPE | K_SCHEMA_WILDCARD
        | K_SIMPLE_TYPE => SCHEMA_COMPONENT_TEST,
        _ => return None,
    };
    p.supports(kind).then_some(kind)
}

/// Whether a kind test starts at the current token.
pub(super) fn at_kind_test(p: &mut Parser<'_>) -> bool {
    let keyword = p.current();
    p.nth_at(1, PARENTHESIS_OPEN) && kind_test_node(p, keyword).is_some()
}

/// KindTest = DocumentTest | ElementTest | AttributeTest | SchemaElementTest
///          | SchemaAttributeTest | PITest | CommentTest | TextTest
///          | NamespaceNodeTest | AnyKindTest
pub(super) fn kind_test(p: &mut Parser<'_>) -> Parsed {
    if !p.nth_at(1, PARENTHESIS_OPEN) {
        return Parsed::NoMatch;
    }
    let keyword = p.current();
    let Some(kind) = kind_test_node(p, keyword) else {
        return Parsed::NoMatch;
    };
    p.start_node(kind);
    p.bump();
    p.bump();
    match kind {
        DOCUMENT_TEST => {
            if p.at_any(&[K_ELEMENT, K_SCHEMA_ELEMENT]) {
                kind_test(p);
            }
        }
        ELEMENT_TEST | ATTRIBUTE_TEST => {
            if name_test(p).is_match() && p.eat(COMMA) {
                expect_eqname(p);
                if kind == ELEMENT_TEST {
                    p.eat(OPTIONAL);
                }
            }
        }
        SCHEMA_ELEMENT_TEST | SCHEMA_ATTRIBUTE_TEST => {
            expect_eqname(p);
        }
        PI_TEST => {
            if !ncname(p) {
                string_literal(p);
            }
        }
        OBJECT_NODE_TEST | ARRAY_NODE_TEST | NUMBER_NODE_TEST | BOOLEAN_NODE_TEST
        | NULL_NODE_TEST => {
            string_literal(p);
        }
        _ => {}
    }
    p.expect(PARENTHESIS_CLOSE);
    p.finish_node();
    Parsed::Node
}

#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, SaxonVersion};
    use crate::parser::parse;

    #[test]
    fn test_occurrence_indicator_wraps_sequence_type() {
        let tree = parse("$a instance of xs:int+", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("SequenceType[SEQUENCE_TYPE(15:22)]"));
    }

    #[test]
    fn test_function_tests() {
        let tree = parse("$f instance of function(*)", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("AnyFunctionTest[ANY_FUNCTION_TEST"));
        let tree = parse("$f instance of function(xs:int) as item()", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("TypedFunctionTest[TYPED_FUNCTION_TEST"));
        assert!(tree.contains("AnyItemType[ANY_ITEM_TYPE"));
    }

    #[test]
    fn test_saxon_tuple_type_is_gated() {
        let input = "$t instance of tuple(a: xs:string, *)";
        let saxon = parse(input, &Dialect::saxon(SaxonVersion::V9_8));
        assert!(saxon.debug_tree().contains("TupleType[TUPLE_TYPE"));
        assert!(saxon.errors.is_empty());
        let w3c = parse(input, &Dialect::w3c());
        assert!(!w3c.debug_tree().contains("TupleType"));
    }

    #[test]
    fn test_saxon_type_alias() {
        let input = "$t instance of ~my:type";
        let saxon = parse(input, &Dialect::saxon(SaxonVersion::V9_8));
        let tree = saxon.debug_tree();
        assert!(tree.contains("TypeAlias[TYPE_ALIAS"));
        assert!(tree.contains("Leaf[TYPE_ALIAS_INDICATOR(15:16)]('~')"));
        assert!(saxon.errors.is_empty());
    }
}
