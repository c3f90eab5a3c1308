use super::*;

// =============================================================================
// Names
// =============================================================================

/// Whether a (possibly prefixed) QName starts at token `n`, and if so the
/// number of tokens it spans.
pub(super) fn qname_len(p: &mut Parser<'_>, n: usize) -> Option<usize> {
    if !p.nth(n).is_name() {
        return None;
    }
    if p.nth_at(n + 1, QNAME_SEPARATOR) && p.adjacent(n) && p.nth(n + 2).is_name() && p.adjacent(n + 1)
    {
        Some(3)
    } else {
        Some(1)
    }
}

/// Number of tokens of the EQName starting at token `n`, if any.
pub(super) fn eqname_len(p: &mut Parser<'_>, n: usize) -> Option<usize> {
    if p.nth_at(n, BRACED_URI_LITERAL_START) {
        let mut len = 1;
        while p.nth_at(n + len, BRACED_URI_LITERAL_CONTENTS) {
            len += 1;
        }
        if !p.nth_at(n + len, BRACED_URI_LITERAL_END) || !p.nth(n + len + 1).is_name() {
            return None;
        }
        return Some(len + 2);
    }
    qname_len(p, n)
}

/// QName = PrefixedName | UnprefixedName
///
/// A prefixed name is `NCName ":" NCName` without whitespace. A prefix
/// followed by a numeric literal is reported as a missing local name and the
/// literal is wrapped in the error.
pub(super) fn qname(p: &mut Parser<'_>) -> Parsed {
    if p.at(QNAME_SEPARATOR) && p.adjacent(0) && p.nth(1).is_name() {
        p.start_node(QNAME);
        p.error(Message::MissingPrefix);
        p.bump();
        p.bump_name();
        p.finish_node();
        return Parsed::Error;
    }
    if !p.current().is_name() {
        return Parsed::NoMatch;
    }
    if p.nth_at(1, QNAME_SEPARATOR) && p.adjacent(0) && p.adjacent(1) {
        let local = p.nth(2);
        if local.is_name() {
            p.start_node(QNAME);
            p.bump_name();
            p.bump();
            p.bump_name();
            p.finish_node();
            return Parsed::Node;
        }
        if local.is_numeric_literal() {
            p.start_node(QNAME);
            p.bump_name();
            p.bump();
            p.error_and_bump(Message::MissingLocalName);
            p.finish_node();
            return Parsed::Error;
        }
    }
    p.bump_name();
    Parsed::Node
}

/// EQName = QName | URIQualifiedName
pub(super) fn eqname(p: &mut Parser<'_>) -> Parsed {
    if p.at(BRACED_URI_LITERAL_START) {
        return uri_qualified_name(p, false);
    }
    qname(p)
}

/// EQName, or a wildcard when `allow_wildcard` is set.
///
/// URIQualifiedName = BracedURILiteral NCName
/// Wildcard = "*" | (NCName ":*") | ("*:" NCName) | (BracedURILiteral "*")
pub(super) fn uri_qualified_name(p: &mut Parser<'_>, allow_wildcard: bool) -> Parsed {
    let cp = p.checkpoint();
    braced_uri_literal(p);
    if allow_wildcard && p.at(STAR) {
        p.start_node_at(cp, WILDCARD);
        p.bump();
        p.finish_node();
        return Parsed::Node;
    }
    p.start_node_at(cp, URI_QUALIFIED_NAME);
    let parsed = if p.current().is_name() {
        p.bump_name();
        Parsed::Node
    } else {
        p.error(Message::MissingNCName);
        Parsed::Error
    };
    p.finish_node();
    parsed
}

/// BracedURILiteral = "Q" "{" [^{}]* "}"
fn braced_uri_literal(p: &mut Parser<'_>) {
    p.start_node(BRACED_URI_LITERAL);
    p.bump();
    loop {
        match p.current() {
            BRACED_URI_LITERAL_CONTENTS | PREDEFINED_ENTITY_REFERENCE | CHARACTER_REFERENCE => {
                reference_or_bump(p)
            }
            PARTIAL_ENTITY_REFERENCE | EMPTY_ENTITY_REFERENCE => reference_or_bump(p),
            BRACED_URI_LITERAL_END => {
                p.bump();
                break;
            }
            _ => {
                p.error(Message::UnclosedBracedUri);
                break;
            }
        }
    }
    p.finish_node();
}

pub(super) fn expect_eqname(p: &mut Parser<'_>) -> Parsed {
    let parsed = eqname(p);
    if parsed.is_none() {
        p.error(Message::MissingEQName);
        return Parsed::Error;
    }
    parsed
}

pub(super) fn expect_qname(p: &mut Parser<'_>) -> Parsed {
    let parsed = qname(p);
    if parsed.is_none() {
        p.error(Message::MissingQName);
        return Parsed::Error;
    }
    parsed
}

/// NCName, with keywords re-tagged.
pub(super) fn ncname(p: &mut Parser<'_>) -> bool {
    if p.current().is_name() {
        p.bump_name();
        true
    } else {
        false
    }
}

pub(super) fn expect_ncname(p: &mut Parser<'_>) -> bool {
    if ncname(p) {
        return true;
    }
    p.error(Message::MissingNCName);
    false
}

/// "$" VarName
pub(super) fn var_name(p: &mut Parser<'_>) -> bool {
    if !p.expect(VARIABLE_INDICATOR) {
        return false;
    }
    if eqname(p).is_none() {
        p.error(Message::MissingVarName);
        return false;
    }
    true
}

/// NameTest = EQName | Wildcard
pub(super) fn name_test(p: &mut Parser<'_>) -> Parsed {
    if p.at(STAR) {
        p.start_node(WILDCARD);
        p.bump();
        if p.at(QNAME_SEPARATOR) && p.adjacent(0) && p.nth(1).is_name() {
            p.bump();
            p.bump_name();
        }
        p.finish_node();
        return Parsed::Node;
    }
    if p.current().is_name() && p.nth_at(1, QNAME_SEPARATOR) && p.nth_at(2, STAR) && p.adjacent(0)
        && p.adjacent(1)
    {
        p.start_node(WILDCARD);
        p.bump_name();
        p.bump();
        p.bump();
        p.finish_node();
        return Parsed::Node;
    }
    if p.at(BRACED_URI_LITERAL_START) {
        return uri_qualified_name(p, true);
    }
    qname(p)
}

// =============================================================================
// Literals
// =============================================================================

const PREDEFINED_ENTITIES: &[&str] = &["&lt;", "&gt;", "&amp;", "&quot;", "&apos;"];

/// Bump a content token, reporting malformed or unknown references.
pub(super) fn reference_or_bump(p: &mut Parser<'_>) {
    match p.current() {
        PARTIAL_ENTITY_REFERENCE => p.error_and_bump(Message::IncompleteEntityReference),
        EMPTY_ENTITY_REFERENCE => p.error_and_bump(Message::EmptyEntityReference),
        PREDEFINED_ENTITY_REFERENCE if !PREDEFINED_ENTITIES.contains(&p.current_text()) => {
            p.error_and_bump(Message::UnknownEntityReference)
        }
        _ => p.bump(),
    }
}

/// StringLiteral = ('"' ... '"') | ("'" ... "'")
pub(super) fn string_literal(p: &mut Parser<'_>) -> Parsed {
    if !p.at(STRING_LITERAL_START) {
        return Parsed::NoMatch;
    }
    p.start_node(STRING_LITERAL);
    p.bump();
    let parsed = loop {
        match p.current() {
            STRING_LITERAL_CONTENTS | ESCAPED_CHARACTER | PREDEFINED_ENTITY_REFERENCE
            | CHARACTER_REFERENCE | PARTIAL_ENTITY_REFERENCE | EMPTY_ENTITY_REFERENCE => {
                reference_or_bump(p)
            }
            STRING_LITERAL_END => {
                p.bump();
                break Parsed::Node;
            }
            _ => {
                p.error(Message::UnclosedStringLiteral);
                break Parsed::Error;
            }
        }
    };
    p.finish_node();
    parsed
}

pub(super) fn expect_string_literal(p: &mut Parser<'_>) -> bool {
    if string_literal(p).is_match() {
        return true;
    }
    p.error(Message::MissingStringLiteral);
    false
}

/// URILiteral = StringLiteral
pub(super) fn expect_uri_literal(p: &mut Parser<'_>) -> bool {
    if string_literal(p).is_match() {
        return true;
    }
    p.error(Message::MissingUriString);
    false
}

/// Literal = NumericLiteral | StringLiteral
pub(super) fn literal(p: &mut Parser<'_>) -> Parsed {
    match p.current() {
        INTEGER | DECIMAL | DOUBLE => {
            p.bump();
            Parsed::Node
        }
        PARTIAL_DOUBLE_LITERAL_EXPONENT => {
            p.error_and_bump(Message::IncompleteDoubleExponent);
            Parsed::Error
        }
        STRING_LITERAL_START => string_literal(p),
        _ => Parsed::NoMatch,
    }
}

// =============================================================================
// Enclosed expressions
// =============================================================================

/// EnclosedExpr = "{" Expr? "}"
///
/// Tokens the expression could not use are wrapped one by one until the
/// closing brace.
pub(super) fn enclosed_expr(p: &mut Parser<'_>) -> Parsed {
    if !p.at(BLOCK_OPEN) {
        p.error(Message::Expected("{"));
        return Parsed::Error;
    }
    p.start_node(ENCLOSED_EXPR);
    p.bump();
    expr(p);
    let parsed = close_brace(p);
    p.finish_node();
    parsed
}

/// Skip stray tokens up to `}` and consume it.
pub(super) fn close_brace(p: &mut Parser<'_>) -> Parsed {
    let mut parsed = Parsed::Node;
    while !p.at(BLOCK_CLOSE) && !p.at_eof() {
        p.error_and_bump_stray();
        parsed = Parsed::Error;
    }
    if !p.expect(BLOCK_CLOSE) {
        parsed = Parsed::Error;
    }
    parsed
}

#[cfg(test)]
mod tests {
    use crate::dialect::Dialect;
    use crate::parser::parse;

    #[test]
    fn test_prefixed_name_needs_adjacent_parts() {
        let tree = parse("a:b", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("QName[QNAME(0:3)]"));
        let tree = parse("a :b", &Dialect::w3c()).debug_tree();
        assert!(!tree.contains("QName[QNAME"));
    }

    #[test]
    fn test_keyword_prefix_is_retagged() {
        let tree = parse("xs:element", &Dialect::w3c()).debug_tree();
        assert!(tree.contains("Leaf[NCNAME(3:10)]('element')"));
    }

    #[test]
    fn test_unknown_entity_in_string() {
        let parse = parse("\"&foo;\"", &Dialect::w3c());
        assert_eq!(parse.errors[0].message, "XPST0003: Unknown entity reference.");
    }

    #[test]
    fn test_unclosed_string_literal() {
        let parse = parse("\"abc", &Dialect::w3c());
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "XPST0003: Unclosed string literal.");
        assert_eq!(parse.errors[0].range.start(), 4.into());
    }
}
