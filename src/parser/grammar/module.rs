use super::*;

// =============================================================================
// Module
// =============================================================================

/// Module = VersionDecl? (LibraryModule | MainModule)
///
/// MarkLogic allows several `;`-separated main modules (transactions), each
/// with its own optional version declaration. Anything left over is wrapped
/// token by token so the root always covers the whole input.
pub(crate) fn source_file(p: &mut Parser<'_>) {
    p.start_root(FILE);
    // nothing but trivia since the start of the current transaction
    let mut at_start = true;
    // the current transaction already has its module
    let mut module_parsed = false;

    while !p.at_eof() {
        let before = p.progress();
        let mut transaction_start = false;

        if at_version_decl(p) {
            if at_start {
                version_decl(p);
                p.expect(SEPARATOR);
            } else {
                let error = p.start_error(Message::MisplacedVersionDecl);
                version_decl(p);
                p.eat(SEPARATOR);
                p.finish_error(error);
            }
        } else if at_module_decl(p) && !module_parsed {
            library_module(p);
            module_parsed = true;
        } else if p.at(SEPARATOR) && module_parsed {
            if p.supports(TRANSACTION_SEPARATOR) {
                p.start_node(TRANSACTION_SEPARATOR);
                p.bump();
                p.finish_node();
            } else {
                p.error_and_bump(Message::TransactionSeparatorNotSupported);
            }
            module_parsed = false;
            transaction_start = true;
        } else if !module_parsed {
            module_parsed = main_module(p);
        }

        if p.progress() == before {
            leftover(p, module_parsed);
        }
        at_start = transaction_start;
    }

    p.finish_trivia();
    p.finish_node();
}

/// Tokens at the top level that no production consumed.
fn leftover(p: &mut Parser<'_>, module_parsed: bool) {
    if at_module_decl(p) {
        let error = p.start_error(Message::MisplacedModuleDecl);
        module_decl(p);
        p.eat(SEPARATOR);
        p.finish_error(error);
    } else if module_parsed && at_prolog_decl(p) {
        let error = p.start_error(Message::PrologAfterBody);
        prolog_decl(p);
        p.eat(SEPARATOR);
        p.finish_error(error);
    } else {
        stray_exprs(p);
    }
}

/// Expressions after a complete query body are wrapped whole in one `ERROR`,
/// with keywords read as names. Tokens that start no expression are wrapped
/// one by one.
fn stray_exprs(p: &mut Parser<'_>) {
    let before = p.progress();
    let first_error = p.error_count();
    let start = p.nth_range(0).start();
    let cp = p.checkpoint();
    while !at_top_level_boundary(p) {
        let step = p.progress();
        if expr_single(p).is_none() || p.progress() == step {
            break;
        }
    }
    if p.progress() == before {
        tracing::trace!(kind = ?p.current(), "parser: stray token at top level");
        p.error_and_bump_stray();
    } else {
        p.wrap_error(cp, first_error, start, Message::UnexpectedToken);
    }
}

fn at_top_level_boundary(p: &mut Parser<'_>) -> bool {
    p.at_eof()
        || p.at(SEPARATOR)
        || at_version_decl(p)
        || at_module_decl(p)
        || at_prolog_decl(p)
}

fn at_version_decl(p: &mut Parser<'_>) -> bool {
    p.at(K_XQUERY)
        && matches!(p.nth(1), K_VERSION | K_ENCODING | SEPARATOR | STRING_LITERAL_START)
}

fn at_module_decl(p: &mut Parser<'_>) -> bool {
    p.at(K_MODULE) && p.nth_at(1, K_NAMESPACE)
}

/// VersionDecl = "xquery" (("encoding" StringLiteral) | ("version" StringLiteral ("encoding" StringLiteral)?))
fn version_decl(p: &mut Parser<'_>) {
    p.start_node(VERSION_DECL);
    p.bump();
    match p.current() {
        K_VERSION => {
            p.bump();
            expect_string_literal(p);
            if p.eat(K_ENCODING) {
                expect_string_literal(p);
            }
        }
        K_ENCODING => {
            p.bump();
            expect_string_literal(p);
        }
        _ => {
            p.finish_node();
            p.error(Message::MissingKeyword("version"));
            if string_literal(p).is_match() && p.eat(K_ENCODING) {
                expect_string_literal(p);
            }
            return;
        }
    }
    p.finish_node();
}

/// LibraryModule = ModuleDecl Prolog
fn library_module(p: &mut Parser<'_>) {
    p.start_node(LIBRARY_MODULE);
    module_decl(p);
    p.expect(SEPARATOR);
    prolog(p);
    p.finish_node();
}

/// ModuleDecl = "module" "namespace" NCName "=" URILiteral
fn module_decl(p: &mut Parser<'_>) {
    p.start_node(MODULE_DECL);
    p.bump();
    p.bump();
    expect_ncname(p);
    p.expect(EQUAL);
    expect_uri_literal(p);
    p.finish_node();
}

/// MainModule = Prolog QueryBody
///
/// A prolog that runs into the end of input is missing its query body.
/// Returns whether anything was parsed.
fn main_module(p: &mut Parser<'_>) -> bool {
    let cp = p.checkpoint();
    let has_prolog = prolog(p);
    let has_body = !at_version_decl(p) && query_body(p);
    if !has_prolog && !has_body {
        return false;
    }
    if !has_body && p.at_eof() {
        p.error(Message::MissingExpression);
    }
    p.start_node_at(cp, MAIN_MODULE);
    p.finish_node();
    true
}

/// QueryBody = Expr
///
/// With the Scripting Extension the body is a statement sequence.
fn query_body(p: &mut Parser<'_>) -> bool {
    let cp = p.checkpoint();
    let parsed = if p.dialect().supports_scripting() {
        statements(p)
    } else {
        expr(p).is_match()
    };
    if parsed {
        p.start_node_at(cp, QUERY_BODY);
        p.finish_node();
    }
    parsed
}

// =============================================================================
// Prolog
// =============================================================================

/// Prolog = ((DefaultNamespaceDecl | Setter | NamespaceDecl | Import) Separator)*
///          ((ContextItemDecl | AnnotatedDecl | OptionDecl) Separator)*
///
/// The setter/declaration order is not enforced. A version or module
/// declaration inside the prolog is reported and skipped.
fn prolog(p: &mut Parser<'_>) -> bool {
    let cp = p.checkpoint();
    let mut any = false;
    loop {
        if at_version_decl(p) && any {
            let error = p.start_error(Message::MisplacedVersionDecl);
            version_decl(p);
            p.eat(SEPARATOR);
            p.finish_error(error);
        } else if at_module_decl(p) {
            let error = p.start_error(Message::MisplacedModuleDecl);
            module_decl(p);
            p.eat(SEPARATOR);
            p.finish_error(error);
        } else if at_prolog_decl(p) {
            prolog_decl(p);
            p.expect(SEPARATOR);
        } else {
            break;
        }
        any = true;
    }
    if any {
        p.start_node_at(cp, PROLOG);
        p.finish_node();
    }
    any
}

/// Keywords that make `declare` the left operand of a binary expression
/// rather than the start of a declaration.
const OPERATOR_KEYWORDS: &[SyntaxKind] = &[
    K_AND, K_OR, K_DIV, K_IDIV, K_MOD, K_EQ, K_NE, K_LT, K_LE, K_GT, K_GE, K_IS, K_TO, K_UNION,
    K_INTERSECT, K_EXCEPT, K_INSTANCE, K_TREAT, K_CASTABLE, K_CAST, K_CONTAINS, K_FTCONTAINS,
];

fn at_prolog_decl(p: &mut Parser<'_>) -> bool {
    let next = p.nth(1);
    match p.current() {
        K_DECLARE => {
            next == ANNOTATION_INDICATOR || (next.is_name() && !OPERATOR_KEYWORDS.contains(&next))
        }
        K_IMPORT => {
            matches!(next, K_SCHEMA | K_MODULE)
                || (next == K_STYLESHEET && p.supports(STYLESHEET_IMPORT))
        }
        _ => false,
    }
}

fn prolog_decl(p: &mut Parser<'_>) {
    if p.at(K_IMPORT) {
        match p.nth(1) {
            K_SCHEMA => schema_import(p),
            K_MODULE => module_import(p),
            _ => stylesheet_import(p),
        }
        return;
    }
    match p.nth(1) {
        K_DEFAULT => default_decl(p),
        K_NAMESPACE => namespace_decl(p),
        K_BOUNDARY_SPACE => setter(p, BOUNDARY_SPACE_DECL, &[K_PRESERVE, K_STRIP]),
        K_CONSTRUCTION => setter(p, CONSTRUCTION_DECL, &[K_STRIP, K_PRESERVE]),
        K_ORDERING => setter(p, ORDERING_MODE_DECL, &[K_ORDERED, K_UNORDERED]),
        K_REVALIDATION if p.supports(REVALIDATION_DECL) => {
            setter(p, REVALIDATION_DECL, &[K_STRICT, K_LAX, K_SKIP])
        }
        K_BASE_URI => {
            p.start_node(BASE_URI_DECL);
            p.bump();
            p.bump();
            expect_uri_literal(p);
            p.finish_node();
        }
        K_COPY_NAMESPACES => copy_namespaces_decl(p),
        K_DECIMAL_FORMAT if p.supports(DECIMAL_FORMAT_DECL) => decimal_format_decl(p),
        K_CONTEXT if p.nth_at(2, K_ITEM) && p.supports(CONTEXT_ITEM_DECL) => context_item_decl(p),
        K_OPTION => {
            // OptionDecl = "declare" "option" EQName StringLiteral
            p.start_node(OPTION_DECL);
            p.bump();
            p.bump();
            expect_eqname(p);
            expect_string_literal(p);
            p.finish_node();
        }
        K_FT_OPTION if p.supports(FT_OPTION_DECL) => {
            // FTOptionDecl = "declare" "ft-option" FTMatchOptions
            p.start_node(FT_OPTION_DECL);
            p.bump();
            p.bump();
            if !ft_match_options(p) {
                p.error(Message::MissingKeyword("using"));
            }
            p.finish_node();
        }
        K_TYPE if p.supports(TYPE_DECL) => type_decl(p),
        K_VARIABLE | K_FUNCTION => annotated_decl(p),
        ANNOTATION_INDICATOR if p.supports(ANNOTATION) => annotated_decl(p),
        _ if at_compatibility_annotation(p, 1) => annotated_decl(p),
        _ => unknown_decl(p),
    }
}

/// UnknownDecl: `declare` followed by a name that starts no declaration.
fn unknown_decl(p: &mut Parser<'_>) {
    p.start_node(UNKNOWN_DECL);
    p.error_recover(Message::UnknownDeclaration, &[SEPARATOR]);
    p.finish_node();
}

/// Setter = "declare" Keyword (Choice1 | Choice2 ...)
fn setter(p: &mut Parser<'_>, kind: SyntaxKind, choices: &[SyntaxKind]) {
    p.start_node(kind);
    p.bump();
    p.bump();
    if p.at_any(choices) {
        p.bump();
    } else {
        let text = |kind: SyntaxKind| kind.text().unwrap_or_default();
        match choices {
            [a, b] => p.error(Message::ExpectedEither(text(*a), text(*b))),
            _ => p.error(Message::MissingKeyword(text(choices[0]))),
        }
    }
    p.finish_node();
}

/// DefaultNamespaceDecl = "declare" "default" ("element" | "function") "namespace" URILiteral
/// DefaultCollationDecl = "declare" "default" "collation" URILiteral
/// EmptyOrderDecl = "declare" "default" "order" "empty" ("greatest" | "least")
fn default_decl(p: &mut Parser<'_>) {
    let kind = match p.nth(2) {
        K_ELEMENT | K_FUNCTION => DEFAULT_NAMESPACE_DECL,
        K_COLLATION => DEFAULT_COLLATION_DECL,
        K_ORDER => EMPTY_ORDER_DECL,
        K_DECIMAL_FORMAT => return decimal_format_decl(p),
        _ => return unknown_decl(p),
    };
    p.start_node(kind);
    p.bump();
    p.bump();
    p.bump();
    match kind {
        DEFAULT_NAMESPACE_DECL => {
            p.expect(K_NAMESPACE);
            expect_uri_literal(p);
        }
        DEFAULT_COLLATION_DECL => {
            expect_uri_literal(p);
        }
        _ => {
            p.expect(K_EMPTY);
            if p.at_any(&[K_GREATEST, K_LEAST]) {
                p.bump();
            } else {
                p.error(Message::ExpectedEither("greatest", "least"));
            }
        }
    }
    p.finish_node();
}

/// NamespaceDecl = "declare" "namespace" NCName "=" URILiteral
fn namespace_decl(p: &mut Parser<'_>) {
    p.start_node(NAMESPACE_DECL);
    p.bump();
    p.bump();
    expect_ncname(p);
    p.expect(EQUAL);
    expect_uri_literal(p);
    p.finish_node();
}

/// CopyNamespacesDecl = "declare" "copy-namespaces" PreserveMode "," InheritMode
fn copy_namespaces_decl(p: &mut Parser<'_>) {
    p.start_node(COPY_NAMESPACES_DECL);
    p.bump();
    p.bump();
    if p.at_any(&[K_PRESERVE, K_NO_PRESERVE]) {
        p.bump();
    } else {
        p.error(Message::ExpectedEither("preserve", "no-preserve"));
    }
    p.expect(COMMA);
    if p.at_any(&[K_INHERIT, K_NO_INHERIT]) {
        p.bump();
    } else {
        p.error(Message::ExpectedEither("inherit", "no-inherit"));
    }
    p.finish_node();
}

const DF_PROPERTY_NAMES: &[SyntaxKind] = &[
    K_DECIMAL_SEPARATOR,
    K_GROUPING_SEPARATOR,
    K_INFINITY,
    K_MINUS_SIGN,
    K_NAN,
    K_PERCENT,
    K_PER_MILLE,
    K_ZERO_DIGIT,
    K_DIGIT,
    K_PATTERN_SEPARATOR,
    K_EXPONENT_SEPARATOR,
];

/// DecimalFormatDecl = "declare" (("decimal-format" EQName) | ("default" "decimal-format"))
///                     (DFPropertyName "=" StringLiteral)*
fn decimal_format_decl(p: &mut Parser<'_>) {
    p.start_node(DECIMAL_FORMAT_DECL);
    p.bump();
    if p.eat(K_DEFAULT) {
        p.bump();
    } else {
        p.bump();
        expect_eqname(p);
    }
    while p.at_any(DF_PROPERTY_NAMES) {
        p.start_node(DF_PROPERTY);
        p.bump();
        p.expect(EQUAL);
        expect_string_literal(p);
        p.finish_node();
    }
    p.finish_node();
}

/// ContextItemDecl = "declare" "context" "item" ("as" ItemType)?
///                   ((":=" VarValue) | ("external" (":=" VarDefaultValue)?))
fn context_item_decl(p: &mut Parser<'_>) {
    p.start_node(CONTEXT_ITEM_DECL);
    p.bump();
    p.bump();
    p.bump();
    if p.eat(K_AS) && item_type(p).is_none() {
        p.error(Message::MissingItemType);
    }
    var_value(p);
    p.finish_node();
}

/// (":=" VarValue) | ("external" (":=" VarDefaultValue)?)
fn var_value(p: &mut Parser<'_>) {
    if p.eat(ASSIGN_EQUAL) {
        expect_expr_single(p);
    } else if p.eat(K_EXTERNAL) {
        if p.eat(ASSIGN_EQUAL) {
            expect_expr_single(p);
        }
    } else {
        p.error(Message::MissingVarValue);
    }
}

/// TypeDecl = "declare" "type" QName "=" ItemType
fn type_decl(p: &mut Parser<'_>) {
    p.start_node(TYPE_DECL);
    p.bump();
    p.bump();
    expect_qname(p);
    p.expect(EQUAL);
    if item_type(p).is_none() {
        p.error(Message::MissingItemType);
    }
    p.finish_node();
}

// =============================================================================
// Imports
// =============================================================================

/// SchemaImport = "import" "schema" SchemaPrefix? URILiteral ("at" URILiteral ("," URILiteral)*)?
fn schema_import(p: &mut Parser<'_>) {
    p.start_node(SCHEMA_IMPORT);
    p.bump();
    p.bump();
    match p.current() {
        // SchemaPrefix = ("namespace" NCName "=") | ("default" "element" "namespace")
        K_NAMESPACE => {
            p.start_node(SCHEMA_PREFIX);
            p.bump();
            expect_ncname(p);
            p.expect(EQUAL);
            p.finish_node();
        }
        K_DEFAULT => {
            p.start_node(SCHEMA_PREFIX);
            p.bump();
            p.expect(K_ELEMENT);
            p.expect(K_NAMESPACE);
            p.finish_node();
        }
        _ => {}
    }
    expect_uri_literal(p);
    location_hints(p);
    p.finish_node();
}

/// ModuleImport = "import" "module" ("namespace" NCName "=")? URILiteral ("at" URILiteral ("," URILiteral)*)?
fn module_import(p: &mut Parser<'_>) {
    p.start_node(MODULE_IMPORT);
    p.bump();
    p.bump();
    if p.eat(K_NAMESPACE) {
        expect_ncname(p);
        p.expect(EQUAL);
    }
    expect_uri_literal(p);
    location_hints(p);
    p.finish_node();
}

fn location_hints(p: &mut Parser<'_>) {
    if p.eat(K_AT) {
        expect_uri_literal(p);
        while p.eat(COMMA) {
            expect_uri_literal(p);
        }
    }
}

/// StylesheetImport = "import" "stylesheet" "at" URILiteral
fn stylesheet_import(p: &mut Parser<'_>) {
    p.start_node(STYLESHEET_IMPORT);
    p.bump();
    p.bump();
    p.expect(K_AT);
    expect_uri_literal(p);
    p.finish_node();
}

// =============================================================================
// Variables and functions
// =============================================================================

fn compatibility_keyword(kind: SyntaxKind) -> bool {
    matches!(kind, K_UPDATING | K_SEQUENTIAL | K_SIMPLE | K_PRIVATE)
}

/// A compatibility annotation at token `n` that is followed by the rest of
/// an annotated declaration.
fn at_compatibility_annotation(p: &mut Parser<'_>, n: usize) -> bool {
    if !compatibility_keyword(p.nth(n)) {
        return false;
    }
    let next = p.nth(n + 1);
    matches!(next, K_FUNCTION | K_VARIABLE | ANNOTATION_INDICATOR) || compatibility_keyword(next)
}

/// AnnotatedDecl = "declare" (Annotation | CompatibilityAnnotation)* (VarDecl | FunctionDecl)
fn annotated_decl(p: &mut Parser<'_>) {
    p.start_node(ANNOTATED_DECL);
    p.bump();
    loop {
        if p.at(ANNOTATION_INDICATOR) {
            annotation(p);
        } else if at_compatibility_annotation(p, 0) {
            compatibility_annotation(p);
        } else {
            break;
        }
    }
    match p.current() {
        K_VARIABLE => var_decl(p),
        K_FUNCTION => function_decl(p),
        _ => p.error(Message::ExpectedEither("variable", "function")),
    }
    p.finish_node();
}

/// CompatibilityAnnotation = "updating" | "sequential" | "simple" | "private"
///
/// Each keyword belongs to one extension; with that extension disabled the
/// annotation is reported and the declaration is still parsed.
fn compatibility_annotation(p: &mut Parser<'_>) {
    let keyword = p.current();
    let dialect = p.dialect();
    let supported = match keyword {
        K_UPDATING => dialect.supports_update(),
        K_SEQUENTIAL | K_SIMPLE => dialect.supports_scripting(),
        _ => dialect.supports_marklogic(),
    };
    if supported {
        p.start_node(COMPATIBILITY_ANNOTATION);
        p.bump();
        p.finish_node();
        return;
    }
    let text = keyword.text().unwrap_or_default();
    let error = p.start_error(Message::UnsupportedCompatibilityAnnotation(text));
    p.start_node(COMPATIBILITY_ANNOTATION);
    p.bump();
    p.finish_node();
    p.finish_error(error);
}

/// Annotation = "%" EQName ("(" Literal ("," Literal)* ")")?
pub(super) fn annotation(p: &mut Parser<'_>) {
    p.start_node(ANNOTATION);
    p.bump();
    expect_eqname(p);
    if p.eat(PARENTHESIS_OPEN) {
        loop {
            if literal(p).is_none() {
                p.error(Message::MissingStringLiteral);
            }
            if !p.eat(COMMA) {
                break;
            }
        }
        p.expect(PARENTHESIS_CLOSE);
    }
    p.finish_node();
}

/// VarDecl = "variable" "$" VarName TypeDeclaration? ((":=" VarValue) | ("external" (":=" VarDefaultValue)?))
fn var_decl(p: &mut Parser<'_>) {
    p.start_node(VAR_DECL);
    p.bump();
    var_name(p);
    type_declaration(p);
    var_value(p);
    p.finish_node();
}

/// FunctionDecl = "function" EQName "(" ParamList? ")" ("as" SequenceType)? (FunctionBody | "external")
///
/// With the Scripting Extension the body is a block of statements.
fn function_decl(p: &mut Parser<'_>) {
    p.start_node(FUNCTION_DECL);
    p.bump();
    expect_eqname(p);
    param_list(p);
    type_declaration(p);
    if p.at(BLOCK_OPEN) {
        if p.dialect().supports_scripting() {
            block(p);
        } else {
            enclosed_expr(p);
        }
    } else if !p.eat(K_EXTERNAL) {
        p.error(Message::MissingFunctionBody);
    }
    p.finish_node();
}

/// "(" (Param ("," Param)*)? ")"
pub(super) fn param_list(p: &mut Parser<'_>) {
    if !p.at(PARENTHESIS_OPEN) {
        p.error(Message::Expected("("));
        return;
    }
    p.start_node(PARAM_LIST);
    p.bump();
    if p.at(VARIABLE_INDICATOR) {
        loop {
            // Param = "$" EQName TypeDeclaration?
            p.start_node(PARAM);
            var_name(p);
            type_declaration(p);
            p.finish_node();
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    p.expect(PARENTHESIS_CLOSE);
    p.finish_node();
}
