use super::*;

// =============================================================================
// Expr and ExprSingle
// =============================================================================

/// Expr = ExprSingle ("," ExprSingle)*
///
/// The `EXPR` node is only created for comma-separated sequences.
pub(super) fn expr(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = expr_single(p);
    if parsed.is_none() || !p.at(COMMA) {
        return parsed;
    }
    p.start_node_at(cp, EXPR);
    while p.eat(COMMA) {
        if expr_single(p).is_none() {
            p.error(Message::MissingExpression);
        }
    }
    p.finish_node();
    Parsed::Node
}

pub(super) fn expect_expr_single(p: &mut Parser<'_>) -> Parsed {
    let parsed = expr_single(p);
    if parsed.is_none() {
        p.error(Message::MissingExpression);
        return Parsed::Error;
    }
    parsed
}

/// ExprSingle = FLWORExpr | QuantifiedExpr | SwitchExpr | TypeswitchExpr
///            | IfExpr | TryCatchExpr | OrExpr
///
/// Extension expressions are tried before the operator chain in the order
/// Update Facility, Scripting, then the rest (Full Text, MarkLogic and Saxon
/// syntax is handled inside the chain).
pub(super) fn expr_single(p: &mut Parser<'_>) -> Parsed {
    let next = p.nth(1);
    match p.current() {
        K_FOR if next == VARIABLE_INDICATOR => return flwor_expr(p),
        K_FOR if matches!(next, K_TUMBLING | K_SLIDING) && p.supports(TUMBLING_WINDOW_CLAUSE) => {
            return flwor_expr(p);
        }
        K_LET if next == VARIABLE_INDICATOR => return flwor_expr(p),
        K_LET if next == K_SCORE && p.supports(FT_SCORE_VAR) => return flwor_expr(p),
        K_SOME | K_EVERY if next == VARIABLE_INDICATOR => return quantified_expr(p),
        K_SWITCH if next == PARENTHESIS_OPEN && p.supports(SWITCH_EXPR) => return switch_expr(p),
        K_TYPESWITCH if next == PARENTHESIS_OPEN => return typeswitch_expr(p),
        K_IF if next == PARENTHESIS_OPEN => return if_expr(p),
        K_TRY if next == BLOCK_OPEN && p.supports(TRY_CATCH_EXPR) => return try_catch_expr(p),
        _ => {}
    }
    let parsed = update_expr(p);
    if parsed.is_match() {
        return parsed;
    }
    let parsed = scripting_expr(p);
    if parsed.is_match() {
        return parsed;
    }
    or_expr(p)
}

// =============================================================================
// Operator precedence chain
// =============================================================================

/// Left-associative binary level. The node is only created when an
/// operator follows the first operand and the dialect knows the level.
fn binary_expr(
    p: &mut Parser<'_>,
    kind: SyntaxKind,
    operators: &[SyntaxKind],
    repeat: bool,
    operand: fn(&mut Parser<'_>) -> Parsed,
) -> Parsed {
    let cp = p.checkpoint();
    let parsed = operand(p);
    if parsed.is_none() || !p.at_any(operators) || !p.supports(kind) {
        return parsed;
    }
    p.start_node_at(cp, kind);
    loop {
        p.bump();
        if operand(p).is_none() {
            p.error(Message::MissingExpression);
        }
        if !repeat || !p.at_any(operators) {
            break;
        }
    }
    p.finish_node();
    Parsed::Node
}

/// OrExpr = AndExpr ("or" AndExpr)*
fn or_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, OR_EXPR, &[K_OR], true, and_expr)
}

/// AndExpr = ComparisonExpr ("and" ComparisonExpr)*
fn and_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, AND_EXPR, &[K_AND], true, comparison_expr)
}

const COMPARISON_OPERATORS: &[SyntaxKind] = &[
    EQUAL,
    NOT_EQUAL,
    LESS_THAN,
    LESS_THAN_OR_EQUAL,
    GREATER_THAN,
    GREATER_THAN_OR_EQUAL,
    K_EQ,
    K_NE,
    K_LT,
    K_LE,
    K_GT,
    K_GE,
    K_IS,
    NODE_BEFORE,
    NODE_AFTER,
];

/// ComparisonExpr = FTContainsExpr ((ValueComp | GeneralComp | NodeComp) FTContainsExpr)?
fn comparison_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, COMPARISON_EXPR, COMPARISON_OPERATORS, false, ft_contains_expr)
}

/// StringConcatExpr = RangeExpr ("||" RangeExpr)*
pub(super) fn string_concat_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, STRING_CONCAT_EXPR, &[CONCATENATION], true, range_expr)
}

/// RangeExpr = AdditiveExpr ("to" AdditiveExpr)?
fn range_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, RANGE_EXPR, &[K_TO], false, additive_expr)
}

/// AdditiveExpr = MultiplicativeExpr (("+" | "-") MultiplicativeExpr)*
pub(super) fn additive_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, ADDITIVE_EXPR, &[PLUS, MINUS], true, multiplicative_expr)
}

/// MultiplicativeExpr = UnionExpr (("*" | "div" | "idiv" | "mod") UnionExpr)*
fn multiplicative_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, MULTIPLICATIVE_EXPR, &[STAR, K_DIV, K_IDIV, K_MOD], true, union_expr)
}

/// UnionExpr = IntersectExceptExpr (("union" | "|") IntersectExceptExpr)*
pub(super) fn union_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, UNION_EXPR, &[K_UNION, UNION], true, intersect_except_expr)
}

/// IntersectExceptExpr = InstanceofExpr (("intersect" | "except") InstanceofExpr)*
fn intersect_except_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, INTERSECT_EXCEPT_EXPR, &[K_INTERSECT, K_EXCEPT], true, instanceof_expr)
}

/// Postfix type operator: `operand first second Type`, e.g. `instance of`.
fn type_operator_expr(
    p: &mut Parser<'_>,
    kind: SyntaxKind,
    (first, second): (SyntaxKind, SyntaxKind),
    operand: fn(&mut Parser<'_>) -> Parsed,
    target: fn(&mut Parser<'_>) -> Parsed,
) -> Parsed {
    let cp = p.checkpoint();
    let parsed = operand(p);
    if parsed.is_none() || !(p.at(first) && p.nth_at(1, second)) {
        return parsed;
    }
    p.start_node_at(cp, kind);
    p.bump();
    p.bump();
    target(p);
    p.finish_node();
    Parsed::Node
}

/// InstanceofExpr = TreatExpr ("instance" "of" SequenceType)?
fn instanceof_expr(p: &mut Parser<'_>) -> Parsed {
    type_operator_expr(p, INSTANCEOF_EXPR, (K_INSTANCE, K_OF), treat_expr, expect_sequence_type)
}

/// TreatExpr = CastableExpr ("treat" "as" SequenceType)?
fn treat_expr(p: &mut Parser<'_>) -> Parsed {
    type_operator_expr(p, TREAT_EXPR, (K_TREAT, K_AS), castable_expr, expect_sequence_type)
}

/// CastableExpr = CastExpr ("castable" "as" SingleType)?
fn castable_expr(p: &mut Parser<'_>) -> Parsed {
    type_operator_expr(p, CASTABLE_EXPR, (K_CASTABLE, K_AS), cast_expr, single_type)
}

/// CastExpr = TransformWithExpr ("cast" "as" SingleType)?
fn cast_expr(p: &mut Parser<'_>) -> Parsed {
    type_operator_expr(p, CAST_EXPR, (K_CAST, K_AS), transform_with_expr, single_type)
}

/// TransformWithExpr = ArrowExpr ("transform" "with" "{" Expr? "}")?
fn transform_with_expr(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = arrow_expr(p);
    if parsed.is_none()
        || !(p.at(K_TRANSFORM) && p.nth_at(1, K_WITH))
        || !p.supports(TRANSFORM_WITH_EXPR)
    {
        return parsed;
    }
    p.start_node_at(cp, TRANSFORM_WITH_EXPR);
    p.bump();
    p.bump();
    enclosed_expr(p);
    p.finish_node();
    Parsed::Node
}

/// ArrowExpr = UnaryExpr ("=>" ArrowFunctionSpecifier ArgumentList)*
fn arrow_expr(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = unary_expr(p);
    if parsed.is_none() || !p.at(ARROW) || !p.supports(ARROW_EXPR) {
        return parsed;
    }
    p.start_node_at(cp, ARROW_EXPR);
    while p.eat(ARROW) {
        arrow_function_specifier(p);
        if p.at(PARENTHESIS_OPEN) {
            argument_list(p);
        } else {
            p.error(Message::Expected("("));
        }
    }
    p.finish_node();
    Parsed::Node
}

/// ArrowFunctionSpecifier = EQName | VarRef | ParenthesizedExpr
fn arrow_function_specifier(p: &mut Parser<'_>) {
    match p.current() {
        VARIABLE_INDICATOR => {
            var_ref(p);
        }
        PARENTHESIS_OPEN => {
            parenthesized_expr(p);
        }
        _ => {
            expect_eqname(p);
        }
    }
}

/// UnaryExpr = ("-" | "+")* ValueExpr
fn unary_expr(p: &mut Parser<'_>) -> Parsed {
    if !p.at_any(&[PLUS, MINUS]) {
        return value_expr(p);
    }
    p.start_node(UNARY_EXPR);
    while p.at_any(&[PLUS, MINUS]) {
        p.bump();
    }
    let parsed = if value_expr(p).is_none() {
        p.error(Message::MissingExpression);
        Parsed::Error
    } else {
        Parsed::Node
    };
    p.finish_node();
    parsed
}

/// ValueExpr = ValidateExpr | ExtensionExpr | SimpleMapExpr
fn value_expr(p: &mut Parser<'_>) -> Parsed {
    match p.current() {
        K_VALIDATE if at_validate(p) => validate_expr(p),
        PRAGMA_BEGIN => extension_expr(p),
        _ => simple_map_expr(p),
    }
}

/// SimpleMapExpr = PathExpr ("!" PathExpr)*
fn simple_map_expr(p: &mut Parser<'_>) -> Parsed {
    binary_expr(p, SIMPLE_MAP_EXPR, &[MAP_OPERATOR], true, path_expr)
}

// =============================================================================
// Validate and extension expressions
// =============================================================================

fn at_validate(p: &mut Parser<'_>) -> bool {
    match p.nth(1) {
        BLOCK_OPEN => true,
        K_LAX | K_STRICT => p.nth_at(2, BLOCK_OPEN),
        K_TYPE => true,
        K_AS => p.dialect().supports_marklogic(),
        _ => false,
    }
}

/// ValidateExpr = "validate" (ValidationMode | ("type" TypeName))? "{" Expr "}"
///
/// MarkLogic also accepts `validate as TypeName`.
fn validate_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(VALIDATE_EXPR);
    p.bump();
    match p.current() {
        K_LAX | K_STRICT => p.bump(),
        K_TYPE | K_AS => {
            p.bump();
            expect_eqname(p);
        }
        _ => {}
    }
    let parsed = enclosed_expr(p);
    p.finish_node();
    parsed
}

/// ExtensionExpr = Pragma+ "{" Expr? "}"
fn extension_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(EXTENSION_EXPR);
    while p.at(PRAGMA_BEGIN) {
        pragma(p);
    }
    let parsed = enclosed_expr(p);
    p.finish_node();
    parsed
}

/// Pragma = "(#" S? EQName (S PragmaContents)? "#)"
pub(super) fn pragma(p: &mut Parser<'_>) {
    p.start_node(PRAGMA);
    p.bump();
    expect_eqname(p);
    p.eat(PRAGMA_CONTENTS);
    if !p.eat(PRAGMA_END) {
        p.error(Message::UnclosedPragma);
    }
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::dialect::Dialect;
    use crate::parser::parse;

    fn tree(input: &str) -> String {
        parse(input, &Dialect::w3c()).debug_tree()
    }

    #[test]
    fn test_expr_node_only_for_sequences() {
        assert!(tree("1, 2").contains("Expr[EXPR(0:4)]"));
        assert!(!tree("1").contains("Expr[EXPR"));
    }

    #[test]
    fn test_precedence() {
        let dump = tree("1 + 2 * 3");
        assert!(dump.contains("AdditiveExpr[ADDITIVE_EXPR(0:9)]"));
        assert!(dump.contains("MultiplicativeExpr[MULTIPLICATIVE_EXPR(4:9)]"));

        let dump = tree("1 to 2 || 'a' = 'b' and true() or false()");
        assert!(dump.contains("OrExpr[OR_EXPR(0:41)]"));
        assert!(dump.contains("AndExpr[AND_EXPR(0:30)]"));
        assert!(dump.contains("ComparisonExpr[COMPARISON_EXPR(0:19)]"));
        assert!(dump.contains("StringConcatExpr[STRING_CONCAT_EXPR(0:13)]"));
        assert!(dump.contains("RangeExpr[RANGE_EXPR(0:6)]"));
    }

    #[test]
    fn test_missing_right_operand() {
        let parse = parse("1 +", &Dialect::w3c());
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "XPST0003: Missing expression.");
        assert_eq!(parse.errors[0].range.start(), 3.into());
    }

    #[test]
    fn test_type_operators() {
        assert!(tree("$a instance of xs:int").contains("InstanceofExpr[INSTANCEOF_EXPR(0:21)]"));
        assert!(tree("$a treat as xs:int").contains("TreatExpr[TREAT_EXPR(0:18)]"));
        assert!(tree("$a castable as xs:int?").contains("SingleType[SINGLE_TYPE(15:22)]"));
        assert!(tree("$a cast as xs:int").contains("CastExpr[CAST_EXPR(0:17)]"));
    }

    #[test]
    fn test_arrow_and_unary() {
        let dump = tree("-$a => abs()");
        assert!(dump.contains("ArrowExpr[ARROW_EXPR(0:12)]"));
        assert!(dump.contains("UnaryExpr[UNARY_EXPR(0:3)]"));
    }

    #[test]
    fn test_simple_map() {
        assert!(tree("$a ! name()").contains("SimpleMapExpr[SIMPLE_MAP_EXPR(0:11)]"));
    }

    #[test]
    fn test_extension_and_validate() {
        let parse = parse("(# ext:opt x #) { 1 }", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let dump = parse.debug_tree();
        assert!(dump.contains("ExtensionExpr[EXTENSION_EXPR(0:21)]"));
        assert!(dump.contains("Pragma[PRAGMA(0:15)]"));
        assert!(tree("validate lax { <a/> }").contains("ValidateExpr[VALIDATE_EXPR(0:21)]"));
    }

    #[test]
    fn test_unclosed_pragma() {
        let parse = parse("(# ext:opt", &Dialect::w3c());
        assert_eq!(parse.errors[0].message, "XPST0003: Unclosed pragma.");
    }
}
