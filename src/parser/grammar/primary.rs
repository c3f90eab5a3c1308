use super::*;

// =============================================================================
// Primary expressions
// =============================================================================

/// PrimaryExpr = Literal | VarRef | ParenthesizedExpr | ContextItemExpr
///             | FunctionCall | OrderedExpr | UnorderedExpr | NodeConstructor
///             | FunctionItemExpr | MapConstructor | ArrayConstructor
///             | StringConstructor | UnaryLookup
pub(super) fn primary_expr(p: &mut Parser<'_>) -> Parsed {
    match p.current() {
        INTEGER | DECIMAL | DOUBLE | PARTIAL_DOUBLE_LITERAL_EXPONENT | STRING_LITERAL_START => {
            literal(p)
        }
        VARIABLE_INDICATOR => var_ref(p),
        PARENTHESIS_OPEN => parenthesized_expr(p),
        DOT => {
            p.start_node(CONTEXT_ITEM_EXPR);
            p.bump();
            p.finish_node();
            Parsed::Node
        }
        OPTIONAL if p.supports(UNARY_LOOKUP) => {
            lookup(p, UNARY_LOOKUP);
            Parsed::Node
        }
        SQUARE_OPEN if p.supports(SQUARE_ARRAY_CONSTRUCTOR) => square_array_constructor(p),
        STRING_CONSTRUCTOR_START if p.supports(STRING_CONSTRUCTOR) => string_constructor(p),
        ANNOTATION_INDICATOR if p.supports(INLINE_FUNCTION_EXPR) => inline_function_expr(p),
        LESS_THAN if p.at_direct_element() => dir_elem_constructor(p),
        XML_COMMENT_START_TAG => dir_comment_constructor(p),
        PROCESSING_INSTRUCTION_BEGIN => dir_pi_constructor(p),
        CDATA_SECTION_START_TAG => {
            let error = p.start_error(Message::CdataOutsideContent);
            cdata_section(p);
            p.finish_error(error);
            Parsed::Error
        }
        PREDEFINED_ENTITY_REFERENCE | CHARACTER_REFERENCE | PARTIAL_ENTITY_REFERENCE
        | EMPTY_ENTITY_REFERENCE => {
            p.error_and_bump(Message::EntityReferenceOutsideString);
            Parsed::Error
        }
        BRACED_URI_LITERAL_START if p.supports(URI_QUALIFIED_NAME) => named_primary(p),
        kind if kind.is_name() => keyword_primary(p),
        _ => Parsed::NoMatch,
    }
}

/// Primaries introduced by a keyword, falling back to function calls and
/// named function references.
fn keyword_primary(p: &mut Parser<'_>) -> Parsed {
    let brace = p.nth_at(1, BLOCK_OPEN);
    match p.current() {
        K_ORDERED | K_UNORDERED if brace => {
            let kind = if p.at(K_ORDERED) { ORDERED_EXPR } else { UNORDERED_EXPR };
            p.start_node(kind);
            p.bump();
            let parsed = enclosed_expr(p);
            p.finish_node();
            parsed
        }
        K_FUNCTION if p.nth_at(1, PARENTHESIS_OPEN) && p.supports(INLINE_FUNCTION_EXPR) => {
            inline_function_expr(p)
        }
        K_MAP if brace && p.supports(MAP_CONSTRUCTOR) => map_constructor(p),
        K_ARRAY if brace && p.supports(CURLY_ARRAY_CONSTRUCTOR) => {
            p.start_node(CURLY_ARRAY_CONSTRUCTOR);
            p.bump();
            let parsed = enclosed_expr(p);
            p.finish_node();
            parsed
        }
        K_INVOKE if p.nth_at(1, K_UPDATING) && p.supports(UPDATING_FUNCTION_CALL) => {
            updating_function_call(p)
        }
        _ => {
            let parsed = computed_constructor(p);
            if parsed.is_match() {
                return parsed;
            }
            named_primary(p)
        }
    }
}

/// Names that are never function calls: kind tests and the keywords of
/// expressions that look like calls. XQuery 3.0 reserves `function`,
/// `namespace-node` and `switch`, XQuery 3.1 `array` and `map`.
fn is_reserved_function_name(p: &mut Parser<'_>) -> bool {
    if at_kind_test(p) {
        return true;
    }
    match p.current() {
        K_FUNCTION | K_NAMESPACE_NODE | K_SWITCH => return p.supports(INLINE_FUNCTION_EXPR),
        K_ARRAY | K_MAP => return p.supports(MAP_CONSTRUCTOR),
        _ => {}
    }
    matches!(
        p.current(),
        K_ATTRIBUTE
            | K_COMMENT
            | K_DOCUMENT_NODE
            | K_ELEMENT
            | K_EMPTY_SEQUENCE
            | K_IF
            | K_ITEM
            | K_NODE
            | K_PROCESSING_INSTRUCTION
            | K_SCHEMA_ATTRIBUTE
            | K_SCHEMA_ELEMENT
            | K_TEXT
            | K_TYPESWITCH
    )
}

/// FunctionCall = EQName ArgumentList
/// NamedFunctionRef = EQName "#" IntegerLiteral
fn named_primary(p: &mut Parser<'_>) -> Parsed {
    let Some(len) = eqname_len(p, 0) else {
        return Parsed::NoMatch;
    };
    match p.nth(len) {
        FUNCTION_REF_LINK if p.supports(NAMED_FUNCTION_REF) => {
            p.start_node(NAMED_FUNCTION_REF);
            eqname(p);
            p.bump();
            let parsed = if p.eat(INTEGER) {
                Parsed::Node
            } else {
                p.error(Message::Expected("IntegerLiteral"));
                Parsed::Error
            };
            p.finish_node();
            parsed
        }
        PARENTHESIS_OPEN if len > 1 || !is_reserved_function_name(p) => {
            p.start_node(FUNCTION_CALL);
            eqname(p);
            argument_list(p);
            p.finish_node();
            Parsed::Node
        }
        _ => Parsed::NoMatch,
    }
}

/// VarRef = "$" VarName
pub(super) fn var_ref(p: &mut Parser<'_>) -> Parsed {
    p.start_node(VAR_REF);
    let parsed = if var_name(p) { Parsed::Node } else { Parsed::Error };
    p.finish_node();
    parsed
}

/// ParenthesizedExpr = "(" Expr? ")"
pub(super) fn parenthesized_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(PARENTHESIZED_EXPR);
    p.bump();
    expr(p);
    let parsed = if p.expect(PARENTHESIS_CLOSE) { Parsed::Node } else { Parsed::Error };
    p.finish_node();
    parsed
}

// =============================================================================
// Function items
// =============================================================================

/// InlineFunctionExpr = Annotation* "function" "(" ParamList? ")" ("as" SequenceType)? FunctionBody
fn inline_function_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(INLINE_FUNCTION_EXPR);
    while p.at(ANNOTATION_INDICATOR) {
        annotation(p);
    }
    if !p.expect(K_FUNCTION) {
        p.finish_node();
        return Parsed::Error;
    }
    param_list(p);
    type_declaration(p);
    let parsed = enclosed_expr(p);
    p.finish_node();
    parsed
}

/// `invoke updating` PrimaryExpr ArgumentList
fn updating_function_call(p: &mut Parser<'_>) -> Parsed {
    p.start_node(UPDATING_FUNCTION_CALL);
    p.bump();
    p.bump();
    let mut parsed = Parsed::Node;
    if primary_expr(p).is_none() {
        p.error(Message::MissingExpression);
        parsed = Parsed::Error;
    }
    if p.at(PARENTHESIS_OPEN) {
        argument_list(p);
    } else {
        p.error(Message::Expected("("));
        parsed = Parsed::Error;
    }
    p.finish_node();
    parsed
}

// =============================================================================
// Maps, arrays and string constructors
// =============================================================================

/// MapConstructor = "map" "{" (MapConstructorEntry ("," MapConstructorEntry)*)? "}"
fn map_constructor(p: &mut Parser<'_>) -> Parsed {
    p.start_node(MAP_CONSTRUCTOR);
    p.bump();
    p.bump();
    if !p.at(BLOCK_CLOSE) {
        loop {
            map_constructor_entry(p);
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    let parsed = close_brace(p);
    p.finish_node();
    parsed
}

/// MapConstructorEntry = ExprSingle ":" ExprSingle
///
/// Saxon before 9.8 separates the key and value with `:=`.
pub(super) fn map_constructor_entry(p: &mut Parser<'_>) {
    p.start_node(MAP_CONSTRUCTOR_ENTRY);
    if expr_single(p).is_none() {
        p.error(Message::MissingExpression);
    }
    match p.current() {
        QNAME_SEPARATOR => p.bump(),
        ASSIGN_EQUAL if p.dialect().supports_saxon() => p.bump(),
        ASSIGN_EQUAL => p.error_and_bump(Message::Expected(":")),
        _ => p.error(Message::Expected(":")),
    }
    if expr_single(p).is_none() {
        p.error(Message::MissingExpression);
    }
    p.finish_node();
}

/// SquareArrayConstructor = "[" (ExprSingle ("," ExprSingle)*)? "]"
fn square_array_constructor(p: &mut Parser<'_>) -> Parsed {
    p.start_node(SQUARE_ARRAY_CONSTRUCTOR);
    p.bump();
    if !p.at(SQUARE_CLOSE) {
        loop {
            if expr_single(p).is_none() {
                p.error(Message::MissingExpression);
            }
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    let parsed = if p.expect(SQUARE_CLOSE) { Parsed::Node } else { Parsed::Error };
    p.finish_node();
    parsed
}

/// StringConstructor = "``[" StringConstructorContent "]``"
fn string_constructor(p: &mut Parser<'_>) -> Parsed {
    p.start_node(STRING_CONSTRUCTOR);
    p.bump();
    if p.at_any(&[STRING_CONSTRUCTOR_CONTENTS, STRING_INTERPOLATION_OPEN]) {
        p.start_node(STRING_CONSTRUCTOR_CONTENT);
        loop {
            match p.current() {
                STRING_CONSTRUCTOR_CONTENTS => p.bump(),
                STRING_INTERPOLATION_OPEN => string_interpolation(p),
                _ => break,
            }
        }
        p.finish_node();
    }
    let parsed = if p.eat(STRING_CONSTRUCTOR_END) {
        Parsed::Node
    } else {
        p.error(Message::UnclosedStringConstructor);
        Parsed::Error
    };
    p.finish_node();
    parsed
}

/// StringConstructorInterpolation = "`{" Expr? "}`"
fn string_interpolation(p: &mut Parser<'_>) {
    p.start_node(STRING_CONSTRUCTOR_INTERPOLATION);
    p.bump();
    expr(p);
    while !p.at(STRING_INTERPOLATION_CLOSE) && !p.at_eof() {
        p.error_and_bump_stray();
    }
    p.expect(STRING_INTERPOLATION_CLOSE);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, SaxonVersion, UpdateFacilityVersion};
    use crate::parser::parse;

    #[test]
    fn test_function_call_and_reserved_names() {
        let tree = parse("fn:count(1)", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("FunctionCall[FUNCTION_CALL(0:11)]"));
        let tree = parse("text()", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("TextTest[TEXT_TEST(0:6)]"));
        assert!(!tree.contains("FunctionCall"));
    }

    #[test]
    fn test_named_function_ref() {
        let parse = parse("fn:concat#2", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        assert!(parse.debug_tree().contains("NamedFunctionRef[NAMED_FUNCTION_REF(0:11)]"));
    }

    #[test]
    fn test_inline_function() {
        let parse = parse("function($a as xs:int) as xs:int { $a }", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("InlineFunctionExpr[INLINE_FUNCTION_EXPR(0:39)]"));
        assert!(tree.contains("ParamList[PARAM_LIST(8:22)]"));
    }

    #[test]
    fn test_map_and_arrays() {
        let parse = parse("map { 'a' : [1, 2], 'b' : array { 3 } }", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("MapConstructor[MAP_CONSTRUCTOR(0:39)]"));
        assert!(tree.contains("SquareArrayConstructor[SQUARE_ARRAY_CONSTRUCTOR(12:18)]"));
        assert!(tree.contains("CurlyArrayConstructor[CURLY_ARRAY_CONSTRUCTOR(26:37)]"));
    }

    #[test]
    fn test_saxon_assign_map_entry() {
        let input = "map { 'a' := 1 }";
        assert!(parse(input, &Dialect::saxon(SaxonVersion::V9_7)).errors.is_empty());
        let w3c = parse(input, &Dialect::w3c());
        assert_eq!(w3c.errors.len(), 1);
        assert_eq!(w3c.errors[0].message, "XPST0003: Expected ':'.");
        assert_eq!(w3c.errors[0].range, rowan::TextRange::new(10.into(), 12.into()));
    }

    #[test]
    fn test_string_constructor() {
        let parse = parse("``[a`{ 1 }`b]``", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("StringConstructorContent[STRING_CONSTRUCTOR_CONTENT(3:12)]"));
        assert!(tree.contains("StringConstructorInterpolation[STRING_CONSTRUCTOR_INTERPOLATION(4:11)]"));
        let parse = crate::parser::parse("``[a", &Dialect::w3c());
        assert_eq!(parse.errors[0].message, "XPST0003: Unclosed string constructor.");
    }

    #[test]
    fn test_entity_reference_in_code() {
        let parse = parse("&amp;", &Dialect::w3c());
        assert_eq!(
            parse.errors[0].message,
            "XPST0003: Entity references are only allowed in string literals and XML content."
        );
    }

    #[test]
    fn test_invoke_updating_is_gated() {
        let input = "invoke updating $f(1)";
        let update = Dialect::w3c().with_update_facility(Some(UpdateFacilityVersion::V3_0));
        let tree = parse(input, &update).debug_tree();
        assert!(tree.contains("UpdatingFunctionCall[UPDATING_FUNCTION_CALL(0:21)]"));
        let tree = parse(input, &Dialect::w3c()).debug_tree();
        assert!(!tree.contains("UpdatingFunctionCall"));
    }
}
