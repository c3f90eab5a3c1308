use super::*;

// =============================================================================
// Full Text
// =============================================================================

/// FTContainsExpr = StringConcatExpr ("contains" "text" FTSelection FTIgnoreOption?)?
///
/// The pre-recommendation `ftcontains` keyword is accepted in place of
/// `contains text`.
pub(super) fn ft_contains_expr(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = string_concat_expr(p);
    if parsed.is_none() || !at_ft_contains(p) {
        return parsed;
    }
    p.start_node_at(cp, FT_CONTAINS_EXPR);
    if !p.eat(K_FTCONTAINS) {
        p.bump();
        p.bump();
    }
    if ft_selection(p).is_none() {
        p.error(Message::MissingExpression);
    }
    if p.at(K_WITHOUT) && p.nth_at(1, K_CONTENT) {
        // FTIgnoreOption = "without" "content" UnionExpr
        p.start_node(FT_IGNORE_OPTION);
        p.bump();
        p.bump();
        if union_expr(p).is_none() {
            p.error(Message::MissingExpression);
        }
        p.finish_node();
    }
    p.finish_node();
    Parsed::Node
}

fn at_ft_contains(p: &mut Parser<'_>) -> bool {
    if !p.supports(FT_CONTAINS_EXPR) {
        return false;
    }
    p.at(K_FTCONTAINS) || (p.at(K_CONTAINS) && p.nth_at(1, K_TEXT))
}

// =============================================================================
// Selections
// =============================================================================

/// FTSelection = FTOr FTPosFilter*
///
/// The `FT_SELECTION` node is only created when position filters follow.
fn ft_selection(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = ft_or(p);
    if parsed.is_none() || !at_ft_pos_filter(p) {
        return parsed;
    }
    p.start_node_at(cp, FT_SELECTION);
    while at_ft_pos_filter(p) {
        ft_pos_filter(p);
    }
    p.finish_node();
    Parsed::Node
}

/// FTOr = FTAnd ("ftor" FTAnd)*
fn ft_or(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = ft_and(p);
    if parsed.is_none() || !p.at(K_FTOR) {
        return parsed;
    }
    p.start_node_at(cp, FT_OR);
    while p.eat(K_FTOR) {
        if ft_and(p).is_none() {
            p.error(Message::MissingExpression);
        }
    }
    p.finish_node();
    Parsed::Node
}

/// FTAnd = FTMildNot ("ftand" FTMildNot)*
fn ft_and(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = ft_mild_not(p);
    if parsed.is_none() || !p.at(K_FTAND) {
        return parsed;
    }
    p.start_node_at(cp, FT_AND);
    while p.eat(K_FTAND) {
        if ft_mild_not(p).is_none() {
            p.error(Message::MissingExpression);
        }
    }
    p.finish_node();
    Parsed::Node
}

/// FTMildNot = FTUnaryNot ("not" "in" FTUnaryNot)*
fn ft_mild_not(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = ft_unary_not(p);
    if parsed.is_none() || !(p.at(K_NOT) && p.nth_at(1, K_IN)) {
        return parsed;
    }
    p.start_node_at(cp, FT_MILD_NOT);
    while p.at(K_NOT) && p.nth_at(1, K_IN) {
        p.bump();
        p.bump();
        if ft_unary_not(p).is_none() {
            p.error(Message::MissingExpression);
        }
    }
    p.finish_node();
    Parsed::Node
}

/// FTUnaryNot = ("ftnot")? FTPrimaryWithOptions
fn ft_unary_not(p: &mut Parser<'_>) -> Parsed {
    if !p.at(K_FTNOT) {
        return ft_primary_with_options(p);
    }
    p.start_node(FT_UNARY_NOT);
    p.bump();
    if ft_primary_with_options(p).is_none() {
        p.error(Message::MissingExpression);
    }
    p.finish_node();
    Parsed::Node
}

/// FTPrimaryWithOptions = FTPrimary FTMatchOptions? FTWeight?
fn ft_primary_with_options(p: &mut Parser<'_>) -> Parsed {
    let cp = p.checkpoint();
    let parsed = ft_primary(p);
    if parsed.is_none() {
        return parsed;
    }
    let options = p.at(K_USING);
    let weight = !options && p.at(K_WEIGHT) && p.nth_at(1, BLOCK_OPEN);
    if !options && !weight {
        return parsed;
    }
    p.start_node_at(cp, FT_PRIMARY_WITH_OPTIONS);
    ft_match_options(p);
    if p.at(K_WEIGHT) && p.nth_at(1, BLOCK_OPEN) {
        // FTWeight = "weight" "{" Expr "}"
        p.start_node(FT_WEIGHT);
        p.bump();
        p.bump();
        if expr(p).is_none() {
            p.error(Message::MissingExpression);
        }
        close_brace(p);
        p.finish_node();
    }
    p.finish_node();
    Parsed::Node
}

/// FTPrimary = (FTWords FTTimes?) | ("(" FTSelection ")") | FTExtensionSelection
fn ft_primary(p: &mut Parser<'_>) -> Parsed {
    match p.current() {
        STRING_LITERAL_START | BLOCK_OPEN => {
            ft_words(p);
            if p.at(K_OCCURS) {
                // FTTimes = "occurs" FTRange "times"
                p.start_node(FT_TIMES);
                p.bump();
                ft_range(p, FT_RANGE, range_operand);
                p.expect(K_TIMES);
                p.finish_node();
            }
            Parsed::Node
        }
        PARENTHESIS_OPEN => {
            p.bump();
            if ft_selection(p).is_none() {
                p.error(Message::MissingExpression);
            }
            p.expect(PARENTHESIS_CLOSE);
            Parsed::Node
        }
        PRAGMA_BEGIN => {
            // FTExtensionSelection = Pragma+ "{" FTSelection? "}"
            p.start_node(FT_EXTENSION_SELECTION);
            while p.at(PRAGMA_BEGIN) {
                pragma(p);
            }
            if p.expect(BLOCK_OPEN) {
                ft_selection(p);
                close_brace(p);
            }
            p.finish_node();
            Parsed::Node
        }
        _ => Parsed::NoMatch,
    }
}

/// FTWords = FTWordsValue FTAnyallOption?
fn ft_words(p: &mut Parser<'_>) {
    p.start_node(FT_WORDS);

    // FTWordsValue = StringLiteral | ("{" Expr "}")
    p.start_node(FT_WORDS_VALUE);
    if p.at(BLOCK_OPEN) {
        p.bump();
        if expr(p).is_none() {
            p.error(Message::MissingExpression);
        }
        close_brace(p);
    } else {
        string_literal(p);
    }
    p.finish_node();

    // FTAnyallOption = ("any" "word"?) | ("all" "words"?) | "phrase"
    match p.current() {
        K_ANY => {
            p.start_node(FT_ANYALL_OPTION);
            p.bump();
            p.eat(K_WORD);
            p.finish_node();
        }
        K_ALL => {
            p.start_node(FT_ANYALL_OPTION);
            p.bump();
            p.eat(K_WORDS);
            p.finish_node();
        }
        K_PHRASE => {
            p.start_node(FT_ANYALL_OPTION);
            p.bump();
            p.finish_node();
        }
        _ => {}
    }
    p.finish_node();
}

fn at_ft_range(p: &mut Parser<'_>) -> bool {
    match p.current() {
        K_EXACTLY | K_FROM => true,
        K_AT => matches!(p.nth(1), K_LEAST | K_MOST),
        _ => false,
    }
}

/// FTRange = ("exactly" AdditiveExpr) | ("at" "least" AdditiveExpr)
///         | ("at" "most" AdditiveExpr) | ("from" AdditiveExpr "to" AdditiveExpr)
///
/// `FTLiteralRange` has the same shape over integer literals.
fn ft_range(p: &mut Parser<'_>, kind: SyntaxKind, operand: fn(&mut Parser<'_>)) {
    if !at_ft_range(p) {
        p.error(Message::MissingKeyword("exactly"));
        return;
    }
    p.start_node(kind);
    match p.current() {
        K_FROM => {
            p.bump();
            operand(p);
            p.expect(K_TO);
            operand(p);
        }
        K_AT => {
            p.bump();
            p.bump();
            operand(p);
        }
        _ => {
            p.bump();
            operand(p);
        }
    }
    p.finish_node();
}

fn range_operand(p: &mut Parser<'_>) {
    if additive_expr(p).is_none() {
        p.error(Message::MissingExpression);
    }
}

fn integer_operand(p: &mut Parser<'_>) {
    if !p.eat(INTEGER) {
        p.error(Message::Expected("IntegerLiteral"));
    }
}

// =============================================================================
// Position filters
// =============================================================================

fn at_ft_pos_filter(p: &mut Parser<'_>) -> bool {
    match p.current() {
        K_ORDERED | K_WINDOW | K_DISTANCE | K_SAME | K_DIFFERENT => true,
        K_AT => matches!(p.nth(1), K_START | K_END),
        K_ENTIRE => p.nth_at(1, K_CONTENT),
        _ => false,
    }
}

/// FTPosFilter = FTOrder | FTWindow | FTDistance | FTScope | FTContent
fn ft_pos_filter(p: &mut Parser<'_>) {
    match p.current() {
        K_ORDERED => {
            p.start_node(FT_ORDER);
            p.bump();
        }
        K_WINDOW => {
            // FTWindow = "window" AdditiveExpr FTUnit
            p.start_node(FT_WINDOW);
            p.bump();
            range_operand(p);
            ft_unit(p);
        }
        K_DISTANCE => {
            // FTDistance = "distance" FTRange FTUnit
            p.start_node(FT_DISTANCE);
            p.bump();
            ft_range(p, FT_RANGE, range_operand);
            ft_unit(p);
        }
        K_SAME | K_DIFFERENT => {
            // FTScope = ("same" | "different") FTBigUnit
            p.start_node(FT_SCOPE);
            p.bump();
            if p.at_any(&[K_SENTENCE, K_PARAGRAPH]) {
                p.bump();
            } else {
                p.error(Message::ExpectedEither("sentence", "paragraph"));
            }
        }
        _ => {
            // FTContent = ("at" "start") | ("at" "end") | ("entire" "content")
            p.start_node(FT_CONTENT);
            p.bump();
            p.bump();
        }
    }
    p.finish_node();
}

/// FTUnit = "words" | "sentences" | "paragraphs"
fn ft_unit(p: &mut Parser<'_>) {
    if p.at_any(&[K_WORDS, K_SENTENCES, K_PARAGRAPHS]) {
        p.start_node(FT_UNIT);
        p.bump();
        p.finish_node();
    } else {
        p.error(Message::MissingKeyword("words"));
    }
}

// =============================================================================
// Match options
// =============================================================================

/// FTMatchOptions = ("using" FTMatchOption)+
///
/// Also the body of `declare ft-option`.
pub(super) fn ft_match_options(p: &mut Parser<'_>) -> bool {
    if !p.at(K_USING) {
        return false;
    }
    p.start_node(FT_MATCH_OPTIONS);
    while p.eat(K_USING) {
        ft_match_option(p);
    }
    p.finish_node();
    true
}

/// FTMatchOption = FTLanguageOption | FTWildCardOption | FTThesaurusOption
///               | FTStemOption | FTCaseOption | FTDiacriticsOption
///               | FTStopWordOption | FTExtensionOption
fn ft_match_option(p: &mut Parser<'_>) {
    let next = p.nth(1);
    match p.current() {
        K_LOWERCASE | K_UPPERCASE => single_keyword_option(p, FT_CASE_OPTION),
        K_CASE => {
            p.start_node(FT_CASE_OPTION);
            p.bump();
            sensitivity(p);
            p.finish_node();
        }
        K_DIACRITICS => {
            p.start_node(FT_DIACRITICS_OPTION);
            p.bump();
            sensitivity(p);
            p.finish_node();
        }
        K_STEMMING => single_keyword_option(p, FT_STEM_OPTION),
        K_WILDCARDS => single_keyword_option(p, FT_WILDCARD_OPTION),
        K_THESAURUS => ft_thesaurus_option(p),
        K_STOP => ft_stop_word_option(p),
        K_LANGUAGE => {
            p.start_node(FT_LANGUAGE_OPTION);
            p.bump();
            expect_string_literal(p);
            p.finish_node();
        }
        K_OPTION => {
            p.start_node(FT_EXTENSION_OPTION);
            p.bump();
            expect_eqname(p);
            expect_string_literal(p);
            p.finish_node();
        }
        K_NO if matches!(next, K_STEMMING | K_THESAURUS | K_WILDCARDS | K_STOP) => {
            let kind = match next {
                K_STEMMING => FT_STEM_OPTION,
                K_THESAURUS => FT_THESAURUS_OPTION,
                K_WILDCARDS => FT_WILDCARD_OPTION,
                _ => FT_STOP_WORD_OPTION,
            };
            p.start_node(kind);
            p.bump();
            if p.eat(K_STOP) {
                p.expect(K_WORDS);
            } else {
                p.bump();
            }
            p.finish_node();
        }
        EOF => p.error(Message::MissingKeyword("stemming")),
        _ => p.error_and_bump(Message::UnexpectedToken),
    }
}

fn single_keyword_option(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.finish_node();
}

fn sensitivity(p: &mut Parser<'_>) {
    if p.at_any(&[K_INSENSITIVE, K_SENSITIVE]) {
        p.bump();
    } else {
        p.error(Message::ExpectedEither("insensitive", "sensitive"));
    }
}

/// FTThesaurusOption = ("thesaurus" (FTThesaurusID | "default"))
///                   | ("thesaurus" "(" (FTThesaurusID | "default") ("," FTThesaurusID)* ")")
fn ft_thesaurus_option(p: &mut Parser<'_>) {
    p.start_node(FT_THESAURUS_OPTION);
    p.bump();
    if p.eat(PARENTHESIS_OPEN) {
        if !p.eat(K_DEFAULT) {
            ft_thesaurus_id(p);
        }
        while p.eat(COMMA) {
            ft_thesaurus_id(p);
        }
        p.expect(PARENTHESIS_CLOSE);
    } else if !p.eat(K_DEFAULT) {
        ft_thesaurus_id(p);
    }
    p.finish_node();
}

/// FTThesaurusID = "at" URILiteral ("relationship" StringLiteral)? (FTLiteralRange "levels")?
fn ft_thesaurus_id(p: &mut Parser<'_>) {
    if !p.at(K_AT) {
        p.error(Message::MissingKeyword("at"));
        return;
    }
    p.start_node(FT_THESAURUS_ID);
    p.bump();
    expect_uri_literal(p);
    if p.eat(K_RELATIONSHIP) {
        expect_string_literal(p);
    }
    if at_ft_range(p) {
        ft_range(p, FT_LITERAL_RANGE, integer_operand);
        p.expect(K_LEVELS);
    }
    p.finish_node();
}

/// FTStopWordOption = "stop" "words" (FTStopWords | "default") FTStopWordsInclExcl*
fn ft_stop_word_option(p: &mut Parser<'_>) {
    p.start_node(FT_STOP_WORD_OPTION);
    p.bump();
    p.expect(K_WORDS);
    if !p.eat(K_DEFAULT) {
        ft_stop_words(p);
    }
    while p.at_any(&[K_UNION, K_EXCEPT]) {
        // FTStopWordsInclExcl = ("union" | "except") FTStopWords
        p.start_node(FT_STOP_WORDS_INCL_EXCL);
        p.bump();
        ft_stop_words(p);
        p.finish_node();
    }
    p.finish_node();
}

/// FTStopWords = ("at" URILiteral) | ("(" StringLiteral ("," StringLiteral)* ")")
fn ft_stop_words(p: &mut Parser<'_>) {
    match p.current() {
        K_AT => {
            p.start_node(FT_STOP_WORDS);
            p.bump();
            expect_uri_literal(p);
            p.finish_node();
        }
        PARENTHESIS_OPEN => {
            p.start_node(FT_STOP_WORDS);
            p.bump();
            loop {
                expect_string_literal(p);
                if !p.eat(COMMA) {
                    break;
                }
            }
            p.expect(PARENTHESIS_CLOSE);
            p.finish_node();
        }
        _ => p.error(Message::ExpectedEither("at", "(")),
    }
}

#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, FullTextVersion};
    use crate::parser::parse;

    fn full_text() -> Dialect {
        Dialect::w3c().with_full_text(Some(FullTextVersion::V3_0))
    }

    #[test]
    fn test_contains_text() {
        let parse = parse("$a contains text \"hello\"", &full_text());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("FTContainsExpr[FT_CONTAINS_EXPR(0:24)]"));
        assert!(tree.contains("FTWords[FT_WORDS(17:24)]"));
        assert!(tree.contains("FTWordsValue[FT_WORDS_VALUE(17:24)]"));
    }

    #[test]
    fn test_selection_operators_and_filters() {
        let input = "$a contains text (\"a\" ftand \"b\") ftor \"c\" any word using stemming \
                     using case insensitive weight {0.5} ordered window 5 words without content $b";
        let parse = parse(input, &full_text());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        for label in [
            "FTSelection[FT_SELECTION",
            "FTOr[FT_OR",
            "FTAnd[FT_AND",
            "FTAnyallOption[FT_ANYALL_OPTION",
            "FTPrimaryWithOptions[FT_PRIMARY_WITH_OPTIONS",
            "FTStemOption[FT_STEM_OPTION",
            "FTCaseOption[FT_CASE_OPTION",
            "FTWeight[FT_WEIGHT",
            "FTOrder[FT_ORDER",
            "FTWindow[FT_WINDOW",
            "FTUnit[FT_UNIT",
            "FTIgnoreOption[FT_IGNORE_OPTION",
        ] {
            assert!(tree.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_legacy_ftcontains_with_times() {
        let parse = parse("$a ftcontains \"x\" occurs at least 2 times", &full_text());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        assert!(tree.contains("FTContainsExpr[FT_CONTAINS_EXPR(0:41)]"));
        assert!(tree.contains("FTTimes[FT_TIMES(18:41)]"));
        assert!(tree.contains("FTRange[FT_RANGE(25:35)]"));
    }

    #[test]
    fn test_thesaurus_and_stop_words() {
        let input = "$a contains text \"x\" using thesaurus at \"http://t\" relationship \"BT\" \
                     exactly 2 levels using stop words (\"a\", \"the\") except at \"http://s\" \
                     using language \"en\" using no wildcards";
        let parse = parse(input, &full_text());
        assert!(parse.errors.is_empty());
        let tree = parse.debug_tree();
        for label in [
            "FTThesaurusID[FT_THESAURUS_ID",
            "FTLiteralRange[FT_LITERAL_RANGE",
            "FTStopWords[FT_STOP_WORDS",
            "FTStopWordsInclExcl[FT_STOP_WORDS_INCL_EXCL",
            "FTLanguageOption[FT_LANGUAGE_OPTION",
            "FTWildCardOption[FT_WILDCARD_OPTION",
        ] {
            assert!(tree.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_missing_selection() {
        let parse = parse("$a contains text", &full_text());
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "XPST0003: Missing expression.");
        assert_eq!(parse.errors[0].range.start(), 16.into());
    }

    #[test]
    fn test_score_variables() {
        let parse = parse("for $x score $s in 1 let score $t := 2 return $s", &full_text());
        assert!(parse.errors.is_empty());
        assert_eq!(parse.debug_tree().matches("FTScoreVar[FT_SCORE_VAR").count(), 2);
    }

    #[test]
    fn test_ftcontains_is_a_name_without_full_text() {
        for input in ["ftcontains(\"x\")", "let $ftcontains := 1 return $ftcontains"] {
            let parse = parse(input, &Dialect::w3c());
            assert!(parse.errors.is_empty(), "{input}");
            assert!(!parse.debug_tree().contains("FTContainsExpr"), "{input}");
        }
    }
}
