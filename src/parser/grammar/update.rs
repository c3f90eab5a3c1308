use super::*;

// =============================================================================
// Update Facility
// =============================================================================

/// Updating expressions, tried before the operator chain.
///
/// Returns `NoMatch` without consuming anything when the Update Facility is
/// disabled, so `insert`, `delete` and friends stay ordinary names.
pub(super) fn update_expr(p: &mut Parser<'_>) -> Parsed {
    if !p.supports(INSERT_EXPR) {
        return Parsed::NoMatch;
    }
    let next = p.nth(1);
    let node = matches!(next, K_NODE | K_NODES);
    match p.current() {
        K_INSERT if node => insert_expr(p),
        K_DELETE if node => delete_expr(p),
        K_REPLACE if next == K_NODE || (next == K_VALUE && p.nth_at(2, K_OF)) => replace_expr(p),
        K_RENAME if next == K_NODE => rename_expr(p),
        K_COPY if next == VARIABLE_INDICATOR => transform_expr(p),
        _ => Parsed::NoMatch,
    }
}

/// InsertExpr = "insert" ("node" | "nodes") SourceExpr InsertExprTargetChoice TargetExpr
fn insert_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(INSERT_EXPR);
    p.bump();
    p.bump();
    expect_expr_single(p);
    insert_target_choice(p);
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

/// InsertExprTargetChoice = (("as" ("first" | "last"))? "into") | "after" | "before"
fn insert_target_choice(p: &mut Parser<'_>) {
    match p.current() {
        K_AS | K_INTO | K_AFTER | K_BEFORE => {}
        _ => {
            p.error(Message::MissingKeyword("into"));
            return;
        }
    }
    p.start_node(INSERT_EXPR_TARGET_CHOICE);
    if p.eat(K_AS) {
        if p.at_any(&[K_FIRST, K_LAST]) {
            p.bump();
        } else {
            p.error(Message::ExpectedEither("first", "last"));
        }
        p.expect(K_INTO);
    } else {
        p.bump();
    }
    p.finish_node();
}

/// DeleteExpr = "delete" ("node" | "nodes") TargetExpr
fn delete_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(DELETE_EXPR);
    p.bump();
    p.bump();
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

/// ReplaceExpr = "replace" ("value" "of")? "node" TargetExpr "with" ExprSingle
fn replace_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(REPLACE_EXPR);
    p.bump();
    if p.eat(K_VALUE) {
        p.bump();
    }
    p.expect(K_NODE);
    expect_expr_single(p);
    p.expect(K_WITH);
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

/// RenameExpr = "rename" "node" TargetExpr "as" NewNameExpr
fn rename_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(RENAME_EXPR);
    p.bump();
    p.bump();
    expect_expr_single(p);
    p.expect(K_AS);
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

/// TransformExpr = "copy" CopyBinding ("," CopyBinding)* "modify" ExprSingle "return" ExprSingle
fn transform_expr(p: &mut Parser<'_>) -> Parsed {
    p.start_node(TRANSFORM_EXPR);
    p.bump();
    loop {
        // CopyBinding = "$" VarName ":=" ExprSingle
        p.start_node(COPY_BINDING);
        var_name(p);
        p.expect(ASSIGN_EQUAL);
        expect_expr_single(p);
        p.finish_node();
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(K_MODIFY);
    expect_expr_single(p);
    p.expect(K_RETURN);
    let parsed = expect_expr_single(p);
    p.finish_node();
    parsed
}

#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, UpdateFacilityVersion};
    use crate::parser::parse;

    fn update() -> Dialect {
        Dialect::w3c().with_update_facility(Some(UpdateFacilityVersion::V1_0))
    }

    #[test]
    fn test_insert_target_choices() {
        for (input, len) in [
            ("insert node <a/> into $x", 24),
            ("insert nodes $a as first into $x", 32),
            ("insert node $a before $x", 24),
        ] {
            let parse = parse(input, &update());
            assert!(parse.errors.is_empty(), "{input}");
            let tree = parse.debug_tree();
            assert!(tree.contains(&format!("InsertExpr[INSERT_EXPR(0:{len})]")), "{input}");
            assert!(tree.contains("InsertExprTargetChoice[INSERT_EXPR_TARGET_CHOICE"));
        }
    }

    #[test]
    fn test_missing_target_choice() {
        let parse = parse("insert node $a $x", &update());
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "XPST0003: Missing keyword 'into'.");
        assert_eq!(parse.errors[0].range.start(), 14.into());
    }

    #[test]
    fn test_delete_replace_rename() {
        let parse = parse("delete node $a", &update());
        assert!(parse.debug_tree().contains("DeleteExpr[DELETE_EXPR(0:14)]"));

        let parse = crate::parser::parse("replace value of node $a with 1", &update());
        assert!(parse.errors.is_empty());
        assert!(parse.debug_tree().contains("ReplaceExpr[REPLACE_EXPR(0:31)]"));

        let parse = crate::parser::parse("rename node $a as 'b'", &update());
        assert!(parse.errors.is_empty());
        assert!(parse.debug_tree().contains("RenameExpr[RENAME_EXPR(0:21)]"));
    }

    #[test]
    fn test_transform_expr() {
        let input = "copy $c := $a modify delete node $c/b return $c";
        let parse = parse(input, &update());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("TransformExpr[TRANSFORM_EXPR(0:47)]"));
        assert!(tree.contains("CopyBinding[COPY_BINDING(5:13)]"));
    }

    #[test]
    fn test_keywords_are_names_without_update_facility() {
        let parse = parse("delete node $a", &Dialect::w3c());
        assert!(!parse.debug_tree().contains("DeleteExpr"));
        let parse = crate::parser::parse("insert", &Dialect::w3c());
        assert!(parse.errors.is_empty());
    }
}
