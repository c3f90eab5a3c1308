use super::*;

// =============================================================================
// Path expressions
// =============================================================================

/// PathExpr = ("/" RelativePathExpr?) | ("//" RelativePathExpr) | RelativePathExpr
pub(super) fn path_expr(p: &mut Parser<'_>) -> Parsed {
    match p.current() {
        DIRECT_DESCENDANTS_PATH => {
            p.start_node(PATH_EXPR);
            p.bump();
            relative_path_expr(p);
            p.finish_node();
            Parsed::Node
        }
        ALL_DESCENDANTS_PATH => {
            p.start_node(PATH_EXPR);
            p.bump();
            let parsed = if relative_path_expr(p).is_none() {
                p.error(Message::MissingExpression);
                Parsed::Error
            } else {
                Parsed::Node
            };
            p.finish_node();
            parsed
        }
        _ => relative_path_expr(p),
    }
}

/// RelativePathExpr = StepExpr (("/" | "//") StepExpr)*
fn relative_path_expr(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = step_expr(p);
    if parsed.is_none() || !p.at_any(&[DIRECT_DESCENDANTS_PATH, ALL_DESCENDANTS_PATH]) {
        return parsed;
    }
    p.start_node_at(cp, RELATIVE_PATH_EXPR);
    while p.at_any(&[DIRECT_DESCENDANTS_PATH, ALL_DESCENDANTS_PATH]) {
        p.bump();
        if step_expr(p).is_none() {
            p.error(Message::MissingExpression);
        }
    }
    p.finish_node();
    Parsed::Node
}

/// StepExpr = PostfixExpr | AxisStep
fn step_expr(p: &mut Parser<'_>) -> Parsed {
    let parsed = postfix_expr(p);
    if parsed.is_match() {
        return parsed;
    }
    axis_step(p)
}

// =============================================================================
// Postfix expressions
// =============================================================================

/// PostfixExpr = PrimaryExpr (Predicate | ArgumentList | Lookup)*
///
/// Dynamic calls need XQuery 3.0 and lookups XQuery 3.1.
fn postfix_expr(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = primary_expr(p);
    if parsed.is_none() || !at_postfix(p) {
        return parsed;
    }
    p.start_node_at(cp, POSTFIX_EXPR);
    while at_postfix(p) {
        match p.current() {
            SQUARE_OPEN => predicate(p),
            PARENTHESIS_OPEN => argument_list(p),
            _ => lookup(p, LOOKUP),
        }
    }
    p.finish_node();
    Parsed::Node
}

fn at_postfix(p: &mut Parser<'_>) -> bool {
    match p.current() {
        SQUARE_OPEN => true,
        PARENTHESIS_OPEN => p.supports(INLINE_FUNCTION_EXPR),
        OPTIONAL => p.supports(LOOKUP),
        _ => false,
    }
}

/// Predicate = "[" Expr "]"
pub(super) fn predicate(p: &mut Parser<'_>) {
    p.start_node(PREDICATE);
    p.bump();
    if expr(p).is_none() {
        p.error(Message::MissingExpression);
    }
    p.expect(SQUARE_CLOSE);
    p.finish_node();
}

/// ArgumentList = "(" (Argument ("," Argument)*)? ")"
/// Argument = ExprSingle | ArgumentPlaceholder
pub(super) fn argument_list(p: &mut Parser<'_>) {
    p.start_node(ARGUMENT_LIST);
    p.bump();
    if !p.at(PARENTHESIS_CLOSE) {
        loop {
            argument(p);
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    p.expect(PARENTHESIS_CLOSE);
    p.finish_node();
}

fn argument(p: &mut Parser<'_>) {
    if p.at(OPTIONAL)
        && (p.nth_at(1, COMMA) || p.nth_at(1, PARENTHESIS_CLOSE))
        && p.supports(ARGUMENT_PLACEHOLDER)
    {
        p.start_node(ARGUMENT_PLACEHOLDER);
        p.bump();
        p.finish_node();
        return;
    }
    if expr_single(p).is_none() {
        p.error(Message::MissingExpression);
    }
}

/// Lookup = "?" KeySpecifier
/// UnaryLookup = "?" KeySpecifier
pub(super) fn lookup(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    key_specifier(p);
    p.finish_node();
}

/// KeySpecifier = NCName | IntegerLiteral | ParenthesizedExpr | "*"
fn key_specifier(p: &mut Parser<'_>) {
    let current = p.current();
    if !(current.is_name() || matches!(current, INTEGER | PARENTHESIS_OPEN | STAR)) {
        p.error(Message::MissingNCName);
        return;
    }
    p.start_node(KEY_SPECIFIER);
    match current {
        INTEGER | STAR => p.bump(),
        PARENTHESIS_OPEN => {
            parenthesized_expr(p);
        }
        _ => p.bump_name(),
    }
    p.finish_node();
}

// =============================================================================
// Axis steps
// =============================================================================

fn forward_axis(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        K_CHILD
            | K_DESCENDANT
            | K_ATTRIBUTE
            | K_SELF
            | K_DESCENDANT_OR_SELF
            | K_FOLLOWING_SIBLING
            | K_FOLLOWING
            | K_NAMESPACE
    )
}

fn reverse_axis(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        K_PARENT | K_ANCESTOR | K_PRECEDING_SIBLING | K_PRECEDING | K_ANCESTOR_OR_SELF
    )
}

/// AxisStep = (ReverseStep | ForwardStep) Predicate*
///
/// The `AXIS_STEP` node is only created when the step has predicates.
fn axis_step(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let current = p.current();
    let parsed = if current == PARENT_SELECTOR {
        p.start_node(ABBREV_REVERSE_STEP);
        p.bump();
        p.finish_node();
        Parsed::Node
    } else if current == ATTRIBUTE_SELECTOR {
        p.start_node(ABBREV_FORWARD_STEP);
        p.bump();
        let parsed = expect_node_test(p);
        p.finish_node();
        parsed
    } else if p.nth_at(1, AXIS_SEPARATOR) && (forward_axis(current) || reverse_axis(current)) {
        let kind = if forward_axis(current) { FORWARD_STEP } else { REVERSE_STEP };
        p.start_node(kind);
        p.bump();
        p.bump();
        let parsed = expect_node_test(p);
        p.finish_node();
        parsed
    } else {
        node_test(p)
    };
    if parsed.is_none() || !p.at(SQUARE_OPEN) {
        return parsed;
    }
    p.start_node_at(cp, AXIS_STEP);
    while p.at(SQUARE_OPEN) {
        predicate(p);
    }
    p.finish_node();
    Parsed::Node
}

/// NodeTest = KindTest | NameTest
fn node_test(p: &mut Parser<'_>) -> Parsed {
    let parsed = kind_test(p);
    if parsed.is_match() {
        return parsed;
    }
    name_test(p)
}

/// Node test after an explicit axis or `@`, with the name test wrapped in a
/// `NAME_TEST` node.
fn expect_node_test(p: &mut Parser<'_>) -> Parsed {
    let parsed = kind_test(p);
    if parsed.is_match() {
        return parsed;
    }
    let cp = p.checkpoint();
    let parsed = name_test(p);
    if parsed.is_none() {
        p.error(Message::MissingEQName);
        return Parsed::Error;
    }
    p.start_node_at(cp, NAME_TEST);
    p.finish_node();
    parsed
}

#[cfg(test)]
mod tests {
    use crate::dialect::Dialect;
    use crate::parser::parse;

    #[test]
    fn test_relative_path_only_with_separator() {
        let tree = parse("a/b//c", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("RelativePathExpr[RELATIVE_PATH_EXPR(0:6)]"));
        let tree = parse("a", &Dialect::w3c()).debug_tree();
        assert!(!tree.contains("RelativePathExpr"));
    }

    #[test]
    fn test_root_path() {
        let parse = parse("/", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        assert!(parse.debug_tree().contains("PathExpr[PATH_EXPR(0:1)]"));
    }

    #[test]
    fn test_explicit_axis_step() {
        let tree = parse("ancestor-or-self::node()", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("ReverseStep[REVERSE_STEP(0:24)]"));
        assert!(tree.contains("AnyKindTest[ANY_KIND_TEST(18:24)]"));
        let tree = parse("child::x", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("ForwardStep[FORWARD_STEP(0:8)]"));
        assert!(tree.contains("NameTest[NAME_TEST(7:8)]"));
    }

    #[test]
    fn test_predicates_wrap_axis_step() {
        let tree = parse("@id[1]", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("AxisStep[AXIS_STEP(0:6)]"));
        assert!(tree.contains("AbbrevForwardStep[ABBREV_FORWARD_STEP(0:3)]"));
        assert!(tree.contains("Predicate[PREDICATE(3:6)]"));
    }

    #[test]
    fn test_postfix_lookup_and_call() {
        let parse = parse("$m?key($a, ?)", &Dialect::w3c());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("PostfixExpr[POSTFIX_EXPR(0:13)]"));
        assert!(tree.contains("KeySpecifier[KEY_SPECIFIER(3:6)]"));
        assert!(tree.contains("ArgumentPlaceholder[ARGUMENT_PLACEHOLDER(11:12)]"));
    }

    #[test]
    fn test_missing_step_after_separator() {
        let parse = parse("a//", &Dialect::w3c());
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "XPST0003: Missing expression.");
        assert_eq!(parse.errors[0].range.start(), 3.into());
    }
}
