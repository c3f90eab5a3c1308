use super::*;

// =============================================================================
// FLWOR
// =============================================================================

/// FLWORExpr = InitialClause IntermediateClause* ReturnClause
pub(super) fn flwor_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(FLWOR_EXPR);
    loop {
        let next = p.nth(1);
        match p.current() {
            K_FOR if (next == K_TUMBLING || next == K_SLIDING) && p.supports(TUMBLING_WINDOW_CLAUSE) => {
                window_clause(p)
            }
            K_FOR if next == VARIABLE_INDICATOR => for_clause(p),
            K_LET if next == VARIABLE_INDICATOR || next == K_SCORE => let_clause(p),
            K_WHERE => {
                p.start_node(WHERE_CLAUSE);
                p.bump();
                expect_expr_single(p);
                p.finish_node();
            }
            K_COUNT if next == VARIABLE_INDICATOR && p.supports(COUNT_CLAUSE) => {
                p.start_node(COUNT_CLAUSE);
                p.bump();
                var_name(p);
                p.finish_node();
            }
            K_GROUP if next == K_BY && p.supports(GROUP_BY_CLAUSE) => group_by_clause(p),
            K_ORDER if next == K_BY => order_by_clause(p),
            K_STABLE if next == K_ORDER => order_by_clause(p),
            _ => break,
        }
    }
    let parsed = return_clause(p);
    p.finish_node();
    parsed
}

/// ReturnClause = "return" ExprSingle
fn return_clause(p: &mut Parser<'_>) -> Parsed {
    if !p.at(K_RETURN) {
        p.error(Message::MissingKeyword("return"));
        return Parsed::Error;
    }
    p.start_node(RETURN_CLAUSE);
    p.bump();
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

/// ForClause = "for" ForBinding ("," ForBinding)*
fn for_clause(p: &mut Parser<'_>) {
    p.start_node(FOR_CLAUSE);
    p.bump();
    loop {
        for_binding(p);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.finish_node();
}

/// ForBinding = "$" VarName TypeDeclaration? AllowingEmpty? PositionalVar? FTScoreVar? "in" ExprSingle
fn for_binding(p: &mut Parser<'_>) {
    p.start_node(FOR_BINDING);
    var_name(p);
    type_declaration(p);
    if p.at(K_ALLOWING) && p.nth_at(1, K_EMPTY) && p.supports(ALLOWING_EMPTY) {
        p.start_node(ALLOWING_EMPTY);
        p.bump();
        p.bump();
        p.finish_node();
    }
    if p.at(K_AT) && p.nth_at(1, VARIABLE_INDICATOR) {
        p.start_node(POSITIONAL_VAR);
        p.bump();
        var_name(p);
        p.finish_node();
    }
    ft_score_var(p);
    p.expect(K_IN);
    expect_expr_single(p);
    p.finish_node();
}

/// LetClause = "let" LetBinding ("," LetBinding)*
fn let_clause(p: &mut Parser<'_>) {
    p.start_node(LET_CLAUSE);
    p.bump();
    loop {
        let_binding(p);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.finish_node();
}

/// LetBinding = (("$" VarName TypeDeclaration?) | FTScoreVar) ":=" ExprSingle
fn let_binding(p: &mut Parser<'_>) {
    p.start_node(LET_BINDING);
    if !ft_score_var(p) {
        var_name(p);
        type_declaration(p);
    }
    p.expect(ASSIGN_EQUAL);
    expect_expr_single(p);
    p.finish_node();
}

/// FTScoreVar = "score" "$" VarName
fn ft_score_var(p: &mut Parser<'_>) -> bool {
    if !(p.at(K_SCORE) && p.nth_at(1, VARIABLE_INDICATOR) && p.supports(FT_SCORE_VAR)) {
        return false;
    }
    p.start_node(FT_SCORE_VAR);
    p.bump();
    var_name(p);
    p.finish_node();
    true
}

// =============================================================================
// Window clauses
// =============================================================================

/// TumblingWindowClause = "tumbling" "window" "$" VarName TypeDeclaration? "in" ExprSingle WindowStartCondition WindowEndCondition?
/// SlidingWindowClause = "sliding" "window" "$" VarName TypeDeclaration? "in" ExprSingle WindowStartCondition WindowEndCondition
fn window_clause(p: &mut Parser<'_>) {
    let sliding = p.nth_at(1, K_SLIDING);
    p.start_node(if sliding { SLIDING_WINDOW_CLAUSE } else { TUMBLING_WINDOW_CLAUSE });
    p.bump();
    p.bump();
    p.expect(K_WINDOW);
    var_name(p);
    type_declaration(p);
    p.expect(K_IN);
    expect_expr_single(p);

    if p.at(K_START) {
        window_condition(p, WINDOW_START_CONDITION);
    } else {
        p.error(Message::MissingKeyword("start"));
    }
    if p.at(K_END) || (p.at(K_ONLY) && p.nth_at(1, K_END)) {
        window_condition(p, WINDOW_END_CONDITION);
    } else if sliding {
        p.error(Message::MissingKeyword("end"));
    }
    p.finish_node();
}

/// WindowStartCondition = "start" WindowVars "when" ExprSingle
/// WindowEndCondition = "only"? "end" WindowVars "when" ExprSingle
fn window_condition(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.eat(K_ONLY);
    p.bump();
    window_vars(p);
    p.expect(K_WHEN);
    expect_expr_single(p);
    p.finish_node();
}

/// WindowVars = ("$" CurrentItem)? PositionalVar? ("previous" "$" PreviousItem)? ("next" "$" NextItem)?
fn window_vars(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    let mut any = false;
    if p.at(VARIABLE_INDICATOR) {
        var_name(p);
        any = true;
    }
    if p.at(K_AT) && p.nth_at(1, VARIABLE_INDICATOR) {
        p.start_node(POSITIONAL_VAR);
        p.bump();
        var_name(p);
        p.finish_node();
        any = true;
    }
    for keyword in [K_PREVIOUS, K_NEXT] {
        if p.at(keyword) && p.nth_at(1, VARIABLE_INDICATOR) {
            p.bump();
            var_name(p);
            any = true;
        }
    }
    if any {
        p.start_node_at(cp, WINDOW_VARS);
        p.finish_node();
    }
}

// =============================================================================
// Group by and order by
// =============================================================================

/// GroupByClause = "group" "by" GroupingSpec ("," GroupingSpec)*
fn group_by_clause(p: &mut Parser<'_>) {
    p.start_node(GROUP_BY_CLAUSE);
    p.bump();
    p.bump();
    loop {
        grouping_spec(p);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.finish_node();
}

/// GroupingSpec = "$" VarName (TypeDeclaration? ":=" ExprSingle)? ("collation" URILiteral)?
fn grouping_spec(p: &mut Parser<'_>) {
    p.start_node(GROUPING_SPEC);
    var_name(p);
    let typed = type_declaration(p).is_match();
    if typed || p.at(ASSIGN_EQUAL) {
        p.expect(ASSIGN_EQUAL);
        expect_expr_single(p);
    }
    if p.eat(K_COLLATION) {
        expect_uri_literal(p);
    }
    p.finish_node();
}

/// OrderByClause = "stable"? "order" "by" OrderSpec ("," OrderSpec)*
fn order_by_clause(p: &mut Parser<'_>) {
    p.start_node(ORDER_BY_CLAUSE);
    p.eat(K_STABLE);
    p.bump();
    p.bump();
    loop {
        p.start_node(ORDER_SPEC);
        expect_expr_single(p);
        order_modifier(p);
        p.finish_node();
        if !p.eat(COMMA) {
            break;
        }
    }
    p.finish_node();
}

/// OrderModifier = ("ascending" | "descending")? ("empty" ("greatest" | "least"))? ("collation" URILiteral)?
fn order_modifier(p: &mut Parser<'_>) {
    if !p.at_any(&[K_ASCENDING, K_DESCENDING, K_EMPTY, K_COLLATION]) {
        return;
    }
    p.start_node(ORDER_MODIFIER);
    if p.at_any(&[K_ASCENDING, K_DESCENDING]) {
        p.bump();
    }
    if p.eat(K_EMPTY) && !p.at_any(&[K_GREATEST, K_LEAST]) {
        p.error(Message::ExpectedEither("greatest", "least"));
    } else if p.at_any(&[K_GREATEST, K_LEAST]) {
        p.bump();
    }
    if p.eat(K_COLLATION) {
        expect_uri_literal(p);
    }
    p.finish_node();
}

// =============================================================================
// Quantified, switch, typeswitch, if
// =============================================================================

/// QuantifiedExpr = ("some" | "every") QuantifiedExprBinding ("," QuantifiedExprBinding)* "satisfies" ExprSingle
pub(super) fn quantified_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(QUANTIFIED_EXPR);
    p.bump();
    loop {
        p.start_node(QUANTIFIED_EXPR_BINDING);
        var_name(p);
        type_declaration(p);
        p.expect(K_IN);
        expect_expr_single(p);
        p.finish_node();
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(K_SATISFIES);
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

/// "(" Expr ")"
fn parenthesized_operand(p: &mut Parser<'_>) {
    p.expect(PARENTHESIS_OPEN);
    if expr(p).is_none() {
        p.error(Message::MissingExpression);
    }
    p.expect(PARENTHESIS_CLOSE);
}

/// SwitchExpr = "switch" "(" Expr ")" SwitchCaseClause+ "default" "return" ExprSingle
pub(super) fn switch_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(SWITCH_EXPR);
    p.bump();
    parenthesized_operand(p);
    if !p.at(K_CASE) {
        p.error(Message::MissingKeyword("case"));
    }
    while p.at(K_CASE) {
        p.start_node(SWITCH_CASE_CLAUSE);
        while p.eat(K_CASE) {
            expect_expr_single(p);
        }
        p.expect(K_RETURN);
        expect_expr_single(p);
        p.finish_node();
    }
    let parsed = if p.at(K_DEFAULT) {
        p.start_node(SWITCH_DEFAULT_RETURN);
        p.bump();
        p.expect(K_RETURN);
        let parsed = expect_expr_single(p);
        p.finish_node();
        parsed
    } else {
        p.error(Message::MissingKeyword("default"));
        Parsed::Error
    };
    p.finish_node();
    parsed
}

/// TypeswitchExpr = "typeswitch" "(" Expr ")" CaseClause+ "default" ("$" VarName)? "return" ExprSingle
pub(super) fn typeswitch_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(TYPESWITCH_EXPR);
    p.bump();
    parenthesized_operand(p);
    if !p.at(K_CASE) {
        p.error(Message::MissingKeyword("case"));
    }
    while p.at(K_CASE) {
        // CaseClause = "case" ("$" VarName "as")? SequenceTypeUnion "return" ExprSingle
        p.start_node(CASE_CLAUSE);
        p.bump();
        if p.at(VARIABLE_INDICATOR) {
            var_name(p);
            p.expect(K_AS);
        }
        sequence_type_union(p);
        p.expect(K_RETURN);
        expect_expr_single(p);
        p.finish_node();
    }
    let parsed = if p.at(K_DEFAULT) {
        p.start_node(DEFAULT_CASE_CLAUSE);
        p.bump();
        if p.at(VARIABLE_INDICATOR) {
            var_name(p);
        }
        p.expect(K_RETURN);
        let parsed = expect_expr_single(p);
        p.finish_node();
        parsed
    } else {
        p.error(Message::MissingKeyword("default"));
        Parsed::Error
    };
    p.finish_node();
    parsed
}

/// IfExpr = "if" "(" Expr ")" "then" ExprSingle "else" ExprSingle
pub(super) fn if_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(IF_EXPR);
    p.bump();
    parenthesized_operand(p);
    p.expect(K_THEN);
    expect_expr_single(p);
    p.expect(K_ELSE);
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

// =============================================================================
// Try/catch
// =============================================================================

/// TryCatchExpr = TryClause CatchClause+
pub(super) fn try_catch_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(TRY_CATCH_EXPR);
    p.start_node(TRY_CLAUSE);
    p.bump();
    enclosed_expr(p);
    p.finish_node();
    let parsed = if p.at(K_CATCH) {
        while p.at(K_CATCH) {
            catch_clause(p);
        }
        Parsed::Node
    } else {
        p.error(Message::MissingKeyword("catch"));
        Parsed::Error
    };
    p.finish_node();
    parsed
}

/// CatchClause = "catch" CatchErrorList EnclosedExpr
///
/// MarkLogic uses `catch ($e) { ... }` instead of an error list.
fn catch_clause(p: &mut Parser<'_>) {
    p.start_node(CATCH_CLAUSE);
    p.bump();
    if p.at(PARENTHESIS_OPEN) {
        if p.dialect().supports_marklogic() {
            marklogic_catch_var(p);
        } else {
            let error = p.start_error(Message::UnexpectedToken);
            marklogic_catch_var(p);
            p.finish_error(error);
        }
    } else {
        // CatchErrorList = NameTest ("|" NameTest)*
        p.start_node(CATCH_ERROR_LIST);
        if name_test(p).is_none() {
            p.error(Message::MissingEQName);
        }
        while p.eat(UNION) {
            if name_test(p).is_none() {
                p.error(Message::MissingEQName);
            }
        }
        p.finish_node();
    }
    enclosed_expr(p);
    p.finish_node();
}

fn marklogic_catch_var(p: &mut Parser<'_>) {
    p.bump();
    var_name(p);
    p.expect(PARENTHESIS_CLOSE);
}

#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, MarkLogicVersion};
    use crate::parser::parse;

    #[test]
    fn test_flwor_clauses() {
        let input = "for $x at $i in (1, 2) let $y := $x where $y count $c \
                     group by $g := $y order by $x descending return $x";
        let parse = parse(input, &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        for label in [
            "ForClause[FOR_CLAUSE",
            "PositionalVar[POSITIONAL_VAR",
            "LetBinding[LET_BINDING",
            "WhereClause[WHERE_CLAUSE",
            "CountClause[COUNT_CLAUSE",
            "GroupingSpec[GROUPING_SPEC",
            "OrderModifier[ORDER_MODIFIER",
            "ReturnClause[RETURN_CLAUSE",
        ] {
            assert!(tree.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_missing_return() {
        let parse = parse("for $x in 1", &Dialect::w3c());
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "XPST0003: Missing keyword 'return'.");
    }

    #[test]
    fn test_missing_in() {
        let parse = parse("for $x 1 return $x", &Dialect::w3c());
        assert_eq!(parse.errors[0].message, "XPST0003: Missing keyword 'in'.");
    }

    #[test]
    fn test_window_clause() {
        let input = "for tumbling window $w in 1 to 10 start $s when true() only end $e when false() return $w";
        let parse = parse(input, &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("TumblingWindowClause[TUMBLING_WINDOW_CLAUSE"));
        assert!(tree.contains("WindowEndCondition[WINDOW_END_CONDITION"));
    }

    #[test]
    fn test_switch_and_typeswitch() {
        let parse = parse("switch ($a) case 1 return 'a' default return 'b'", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("SwitchCaseClause[SWITCH_CASE_CLAUSE"));
        assert!(tree.contains("SwitchDefaultReturn[SWITCH_DEFAULT_RETURN"));

        let parse = crate::parser::parse(
            "typeswitch ($a) case $n as xs:int | xs:double return $n default return ()",
            &Dialect::w3c(),
        );
        assert!(parse.errors.is_empty());
        assert!(parse.debug_tree().contains("SequenceTypeUnion[SEQUENCE_TYPE_UNION"));
    }

    #[test]
    fn test_if_missing_else() {
        let parse = parse("if (1) then 2", &Dialect::w3c());
        assert_eq!(parse.errors.len(), 2);
        assert_eq!(parse.errors[0].message, "XPST0003: Missing keyword 'else'.");
        assert_eq!(parse.errors[1].message, "XPST0003: Missing expression.");
    }

    #[test]
    fn test_try_catch() {
        let parse = parse("try { 1 } catch err:FOER0000 | * { 2 }", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        assert!(parse.debug_tree().contains("CatchErrorList[CATCH_ERROR_LIST"));
    }

    #[test]
    fn test_marklogic_catch() {
        let input = "try { 1 } catch ($e) { 2 }";
        let ml = parse(input, &Dialect::marklogic(MarkLogicVersion::V9));
        assert!(ml.errors.is_empty());
        let w3c = parse(input, &Dialect::w3c());
        assert_eq!(w3c.errors.len(), 1);
        assert_eq!(w3c.errors[0].message, "XPST0003: Unexpected token.");
    }
}
