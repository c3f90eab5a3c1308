use super::*;

// =============================================================================
// Scripting Extension
// =============================================================================

/// BlockExpr = "block" Block
///
/// Returns `NoMatch` unless the Scripting Extension is enabled.
pub(super) fn scripting_expr(p: &mut Parser<'_>) -> Parsed {
    if !(p.at(K_BLOCK) && p.nth_at(1, BLOCK_OPEN) && p.supports(BLOCK_EXPR)) {
        return Parsed::NoMatch;
    }
    p.start_node(BLOCK_EXPR);
    p.bump();
    let parsed = block(p);
    p.finish_node();
    parsed
}

/// Block = "{" StatementsAndOptionalExpr "}"
pub(super) fn block(p: &mut Parser<'_>) -> Parsed {
    p.start_node(BLOCK);
    p.bump();
    statements(p);
    let parsed = close_brace(p);
    p.finish_node();
    parsed
}

/// StatementsAndOptionalExpr = Statement* Expr?
///
/// Stops at `}`, at the end of input, or at a token no statement can start
/// with. Returns whether anything was parsed.
pub(super) fn statements(p: &mut Parser<'_>) -> bool {
    let start = p.progress();
    while !p.at(BLOCK_CLOSE) && !p.at_eof() {
        let before = p.progress();
        if statement(p).is_none() || p.progress() == before {
            break;
        }
    }
    p.progress() != start
}

/// Statement = ApplyStatement | AssignStatement | BlockStatement | BreakStatement
///           | ContinueStatement | ExitStatement | VarDeclStatement | WhileStatement
fn statement(p: &mut Parser<'_>) -> Parsed {
    let next = p.nth(1);
    match p.current() {
        BLOCK_OPEN => {
            p.start_node(BLOCK_STATEMENT);
            let parsed = block(p);
            p.finish_node();
            parsed
        }
        K_DECLARE if next == VARIABLE_INDICATOR || next == ANNOTATION_INDICATOR => {
            var_decl_statement(p)
        }
        K_WHILE if next == PARENTHESIS_OPEN => while_statement(p),
        K_BREAK if next == K_LOOP => loop_statement(p, BREAK_STATEMENT),
        K_CONTINUE if next == K_LOOP => loop_statement(p, CONTINUE_STATEMENT),
        K_EXIT if next == K_RETURNING => exit_statement(p),
        VARIABLE_INDICATOR if at_assignment(p) => assign_statement(p),
        _ => apply_statement(p),
    }
}

fn expect_statement(p: &mut Parser<'_>) {
    if statement(p).is_none() {
        p.error(Message::MissingExpression);
    }
}

fn at_assignment(p: &mut Parser<'_>) -> bool {
    match eqname_len(p, 1) {
        Some(len) => p.nth_at(len + 1, ASSIGN_EQUAL),
        None => false,
    }
}

/// ApplyStatement = ExprSimple ";"
///
/// A trailing expression without `;` is left unwrapped.
fn apply_statement(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = expr(p);
    if parsed.is_none() {
        return parsed;
    }
    if p.at(SEPARATOR) {
        p.start_node_at(cp, APPLY_STATEMENT);
        p.bump();
        p.finish_node();
        return Parsed::Node;
    }
    if !p.at(BLOCK_CLOSE) && !p.at_eof() {
        p.start_node_at(cp, APPLY_STATEMENT);
        p.error(Message::Expected(";"));
        p.finish_node();
        return Parsed::Error;
    }
    parsed
}

/// AssignStatement = "$" VarName ":=" ExprSingle ";"
fn assign_statement(p: &mut Parser<'_>) -> Parsed {
    p.start_node(ASSIGN_STATEMENT);
    var_name(p);
    p.bump();
    expect_expr_single(p);
    p.expect(SEPARATOR);
    p.finish_node();
    Parsed::Node
}

/// VarDeclStatement = "declare" Annotation* "$" VarName TypeDeclaration? (":=" ExprSingle)?
///                    ("," "$" VarName TypeDeclaration? (":=" ExprSingle)?)* ";"
fn var_decl_statement(p: &mut Parser<'_>) -> Parsed {
    p.start_node(VAR_DECL_STATEMENT);
    p.bump();
    while p.at(ANNOTATION_INDICATOR) {
        annotation(p);
    }
    loop {
        var_name(p);
        type_declaration(p);
        if p.eat(ASSIGN_EQUAL) {
            expect_expr_single(p);
        }
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(SEPARATOR);
    p.finish_node();
    Parsed::Node
}

/// WhileStatement = "while" "(" Expr ")" Statement
fn while_statement(p: &mut Parser<'_>) -> Parsed {
    p.start_node(WHILE_STATEMENT);
    p.bump();
    p.bump();
    if expr(p).is_none() {
        p.error(Message::MissingExpression);
    }
    p.expect(PARENTHESIS_CLOSE);
    expect_statement(p);
    p.finish_node();
    Parsed::Node
}

/// BreakStatement = "break" "loop" ";"
/// ContinueStatement = "continue" "loop" ";"
fn loop_statement(p: &mut Parser<'_>, kind: SyntaxKind) -> Parsed {
    p.start_node(kind);
    p.bump();
    p.bump();
    p.expect(SEPARATOR);
    p.finish_node();
    Parsed::Node
}

/// ExitStatement = "exit" "returning" ExprSingle ";"
fn exit_statement(p: &mut Parser<'_>) -> Parsed {
    p.start_node(EXIT_STATEMENT);
    p.bump();
    p.bump();
    expect_expr_single(p);
    p.expect(SEPARATOR);
    p.finish_node();
    Parsed::Node
}

#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, ScriptingVersion};
    use crate::parser::parse;

    fn scripting() -> Dialect {
        Dialect::w3c().with_scripting(Some(ScriptingVersion::V1_0))
    }

    #[test]
    fn test_block_expr() {
        let parse = parse("block { declare $x := 1; $x := $x + 1; $x }", &scripting());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("BlockExpr[BLOCK_EXPR(0:43)]"));
        assert!(tree.contains("Block[BLOCK(6:43)]"));
        assert!(tree.contains("VarDeclStatement[VAR_DECL_STATEMENT(8:24)]"));
        assert!(tree.contains("AssignStatement[ASSIGN_STATEMENT(25:38)]"));
    }

    #[test]
    fn test_while_loop() {
        let input = "while ($i < 3) { $i := $i + 1; continue loop; }";
        let parse = parse(input, &scripting());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("ContinueStatement[CONTINUE_STATEMENT(31:45)]"));
        assert!(tree.contains("WhileStatement[WHILE_STATEMENT"));
        assert!(tree.contains("BlockStatement[BLOCK_STATEMENT"));
    }

    #[test]
    fn test_exit_and_apply() {
        let parse = parse("1; exit returning 2;", &scripting());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("ApplyStatement[APPLY_STATEMENT(0:2)]"));
        assert!(tree.contains("ExitStatement[EXIT_STATEMENT(3:20)]"));
    }

    #[test]
    fn test_block_is_a_name_without_scripting() {
        let parse = parse("block", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        assert!(!parse.debug_tree().contains("BlockExpr"));
    }
}
