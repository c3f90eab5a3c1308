//! Syntax kinds for the Rowan-based CST
//!
//! One closed enum covers every token and node kind of XQuery and its
//! extensions. Keywords carry their source text (the keyword table in
//! [`super::keywords`] is built from it) and nodes carry the label used by
//! the diagnostic tree dump.

macro_rules! syntax_kinds {
    (
        tokens { $($tok:ident $(= $tok_text:literal)?),* $(,)? }
        keywords { $($kw:ident = $kw_text:literal),* $(,)? }
        nodes { $($node:ident = $label:literal),* $(,)? }
    ) => {
        /// All syntax kinds (tokens and nodes) of XQuery.
        ///
        /// Tokens come first, then keywords, then composite nodes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        #[allow(non_camel_case_types)]
        pub enum SyntaxKind {
            $($tok,)*
            $($kw,)*
            $($node,)*
            #[doc(hidden)]
            __LAST,
        }

        impl SyntaxKind {
            /// Every keyword with its source spelling.
            pub const KEYWORDS: &'static [(&'static str, SyntaxKind)] =
                &[$(($kw_text, SyntaxKind::$kw)),*];

            /// The SCREAMING_CASE name of the kind, as printed in tree dumps.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$tok => stringify!($tok),)*
                    $(Self::$kw => stringify!($kw),)*
                    $(Self::$node => stringify!($node),)*
                    Self::__LAST => "__LAST",
                }
            }

            /// Fixed source text of punctuation tokens and keywords.
            pub fn text(self) -> Option<&'static str> {
                match self {
                    $(Self::$tok => {
                        let texts: &[&'static str] = &[$($tok_text)?];
                        texts.first().copied()
                    })*
                    $(Self::$kw => Some($kw_text),)*
                    _ => None,
                }
            }

            /// Check if this is a keyword
            pub fn is_keyword(self) -> bool {
                matches!(self, $(Self::$kw)|*)
            }

            /// Check if this is a composite node kind
            pub fn is_node(self) -> bool {
                matches!(self, $(Self::$node)|*)
            }

            /// Display label used by the tree dump.
            pub fn label(self) -> &'static str {
                match self {
                    Self::WHITE_SPACE => "WhiteSpace",
                    $(Self::$node => $label,)*
                    _ => "Leaf",
                }
            }
        }
    };
}

syntax_kinds! {
    tokens {
        // =====================================================================
        // TRIVIA
        // =====================================================================
        WHITE_SPACE,
        COMMENT_START_TAG = "(:",
        COMMENT_CONTENTS,
        COMMENT_END_TAG = ":)",
        BAD_CHARACTER,

        // =====================================================================
        // LITERALS
        // =====================================================================
        INTEGER,
        DECIMAL,
        DOUBLE,
        PARTIAL_DOUBLE_LITERAL_EXPONENT,
        STRING_LITERAL_START,
        STRING_LITERAL_CONTENTS,
        STRING_LITERAL_END,
        ESCAPED_CHARACTER,
        PREDEFINED_ENTITY_REFERENCE,
        CHARACTER_REFERENCE,
        PARTIAL_ENTITY_REFERENCE,
        EMPTY_ENTITY_REFERENCE,

        // =====================================================================
        // NAMES
        // =====================================================================
        NCNAME,
        QNAME_SEPARATOR = ":",
        BRACED_URI_LITERAL_START = "Q{",
        BRACED_URI_LITERAL_CONTENTS,
        BRACED_URI_LITERAL_END = "}",

        // =====================================================================
        // PUNCTUATION
        // =====================================================================
        VARIABLE_INDICATOR = "$",
        PARENTHESIS_OPEN = "(",
        PARENTHESIS_CLOSE = ")",
        SQUARE_OPEN = "[",
        SQUARE_CLOSE = "]",
        BLOCK_OPEN = "{",
        BLOCK_CLOSE = "}",
        COMMA = ",",
        SEPARATOR = ";",
        AXIS_SEPARATOR = "::",
        ASSIGN_EQUAL = ":=",
        DOT = ".",
        PARENT_SELECTOR = "..",
        DIRECT_DESCENDANTS_PATH = "/",
        ALL_DESCENDANTS_PATH = "//",
        ATTRIBUTE_SELECTOR = "@",
        STAR = "*",
        PLUS = "+",
        MINUS = "-",
        EQUAL = "=",
        NOT_EQUAL = "!=",
        LESS_THAN = "<",
        LESS_THAN_OR_EQUAL = "<=",
        GREATER_THAN = ">",
        GREATER_THAN_OR_EQUAL = ">=",
        NODE_BEFORE = "<<",
        NODE_AFTER = ">>",
        UNION = "|",
        CONCATENATION = "||",
        MAP_OPERATOR = "!",
        ARROW = "=>",
        OPTIONAL = "?",
        FUNCTION_REF_LINK = "#",
        ANNOTATION_INDICATOR = "%",
        TYPE_ALIAS_INDICATOR = "~",

        // =====================================================================
        // NESTED LEXICAL STATES
        // =====================================================================
        PRAGMA_BEGIN = "(#",
        PRAGMA_CONTENTS,
        PRAGMA_END = "#)",
        XML_COMMENT_START_TAG = "<!--",
        XML_COMMENT_CONTENTS,
        XML_COMMENT_END_TAG = "-->",
        PROCESSING_INSTRUCTION_BEGIN = "<?",
        PROCESSING_INSTRUCTION_CONTENTS,
        PROCESSING_INSTRUCTION_END = "?>",
        CDATA_SECTION_START_TAG = "<![CDATA[",
        CDATA_SECTION_CONTENTS,
        CDATA_SECTION_END_TAG = "]]>",
        OPEN_XML_TAG = "<",
        END_XML_TAG = ">",
        SELF_CLOSING_XML_TAG = "/>",
        CLOSE_XML_TAG = "</",
        XML_ATTRIBUTE_VALUE_START,
        XML_ATTRIBUTE_VALUE_CONTENTS,
        XML_ATTRIBUTE_VALUE_END,
        XML_ELEMENT_CONTENTS,
        STRING_CONSTRUCTOR_START = "``[",
        STRING_CONSTRUCTOR_CONTENTS,
        STRING_INTERPOLATION_OPEN = "`{",
        STRING_INTERPOLATION_CLOSE = "}`",
        STRING_CONSTRUCTOR_END = "]``",

        // lookahead past the end of input, never part of a tree
        EOF,
    }

    keywords {
        K_AFTER = "after",
        K_ALL = "all",
        K_ALLOWING = "allowing",
        K_ANCESTOR = "ancestor",
        K_ANCESTOR_OR_SELF = "ancestor-or-self",
        K_AND = "and",
        K_ANY = "any",
        K_ARRAY = "array",
        K_ARRAY_NODE = "array-node",
        K_AS = "as",
        K_ASCENDING = "ascending",
        K_AT = "at",
        K_ATTRIBUTE = "attribute",
        K_ATTRIBUTE_DECL = "attribute-decl",
        K_BASE_URI = "base-uri",
        K_BEFORE = "before",
        K_BINARY = "binary",
        K_BLOCK = "block",
        K_BOOLEAN_NODE = "boolean-node",
        K_BOUNDARY_SPACE = "boundary-space",
        K_BREAK = "break",
        K_BY = "by",
        K_CASE = "case",
        K_CAST = "cast",
        K_CASTABLE = "castable",
        K_CATCH = "catch",
        K_CHILD = "child",
        K_COLLATION = "collation",
        K_COMMENT = "comment",
        K_COMPLEX_TYPE = "complex-type",
        K_CONSTRUCTION = "construction",
        K_CONTAINS = "contains",
        K_CONTENT = "content",
        K_CONTEXT = "context",
        K_CONTINUE = "continue",
        K_COPY = "copy",
        K_COPY_NAMESPACES = "copy-namespaces",
        K_COUNT = "count",
        K_DECIMAL_FORMAT = "decimal-format",
        K_DECIMAL_SEPARATOR = "decimal-separator",
        K_DECLARE = "declare",
        K_DEFAULT = "default",
        K_DELETE = "delete",
        K_DESCENDANT = "descendant",
        K_DESCENDANT_OR_SELF = "descendant-or-self",
        K_DESCENDING = "descending",
        K_DIACRITICS = "diacritics",
        K_DIFFERENT = "different",
        K_DIGIT = "digit",
        K_DISTANCE = "distance",
        K_DIV = "div",
        K_DOCUMENT = "document",
        K_DOCUMENT_NODE = "document-node",
        K_ELEMENT = "element",
        K_ELEMENT_DECL = "element-decl",
        K_ELSE = "else",
        K_EMPTY = "empty",
        K_EMPTY_SEQUENCE = "empty-sequence",
        K_ENCODING = "encoding",
        K_END = "end",
        K_ENTIRE = "entire",
        K_EQ = "eq",
        K_EVERY = "every",
        K_EXACTLY = "exactly",
        K_EXCEPT = "except",
        K_EXIT = "exit",
        K_EXPONENT_SEPARATOR = "exponent-separator",
        K_EXTERNAL = "external",
        K_FIRST = "first",
        K_FOLLOWING = "following",
        K_FOLLOWING_SIBLING = "following-sibling",
        K_FOR = "for",
        K_FROM = "from",
        K_FT_OPTION = "ft-option",
        K_FTAND = "ftand",
        K_FTCONTAINS = "ftcontains",
        K_FTNOT = "ftnot",
        K_FTOR = "ftor",
        K_FUNCTION = "function",
        K_GE = "ge",
        K_GREATEST = "greatest",
        K_GROUP = "group",
        K_GROUPING_SEPARATOR = "grouping-separator",
        K_GT = "gt",
        K_IDIV = "idiv",
        K_IF = "if",
        K_IMPORT = "import",
        K_IN = "in",
        K_INFINITY = "infinity",
        K_INHERIT = "inherit",
        K_INSENSITIVE = "insensitive",
        K_INSERT = "insert",
        K_INSTANCE = "instance",
        K_INTERSECT = "intersect",
        K_INTO = "into",
        K_INVOKE = "invoke",
        K_IS = "is",
        K_ITEM = "item",
        K_LANGUAGE = "language",
        K_LAST = "last",
        K_LAX = "lax",
        K_LE = "le",
        K_LEAST = "least",
        K_LET = "let",
        K_LEVELS = "levels",
        K_LOOP = "loop",
        K_LOWERCASE = "lowercase",
        K_LT = "lt",
        K_MAP = "map",
        K_MINUS_SIGN = "minus-sign",
        K_MOD = "mod",
        K_MODEL_GROUP = "model-group",
        K_MODIFY = "modify",
        K_MODULE = "module",
        K_MOST = "most",
        K_NAMESPACE = "namespace",
        K_NAMESPACE_NODE = "namespace-node",
        K_NAN = "NaN",
        K_NE = "ne",
        K_NEXT = "next",
        K_NO = "no",
        K_NO_INHERIT = "no-inherit",
        K_NO_PRESERVE = "no-preserve",
        K_NODE = "node",
        K_NODES = "nodes",
        K_NOT = "not",
        K_NULL_NODE = "null-node",
        K_NUMBER_NODE = "number-node",
        K_OBJECT_NODE = "object-node",
        K_OCCURS = "occurs",
        K_OF = "of",
        K_ONLY = "only",
        K_OPTION = "option",
        K_OR = "or",
        K_ORDER = "order",
        K_ORDERED = "ordered",
        K_ORDERING = "ordering",
        K_PARAGRAPH = "paragraph",
        K_PARAGRAPHS = "paragraphs",
        K_PARENT = "parent",
        K_PATTERN_SEPARATOR = "pattern-separator",
        K_PER_MILLE = "per-mille",
        K_PERCENT = "percent",
        K_PHRASE = "phrase",
        K_PRECEDING = "preceding",
        K_PRECEDING_SIBLING = "preceding-sibling",
        K_PRESERVE = "preserve",
        K_PREVIOUS = "previous",
        K_PRIVATE = "private",
        K_PROCESSING_INSTRUCTION = "processing-instruction",
        K_RELATIONSHIP = "relationship",
        K_RENAME = "rename",
        K_REPLACE = "replace",
        K_RETURN = "return",
        K_RETURNING = "returning",
        K_REVALIDATION = "revalidation",
        K_SAME = "same",
        K_SATISFIES = "satisfies",
        K_SCHEMA = "schema",
        K_SCHEMA_ATTRIBUTE = "schema-attribute",
        K_SCHEMA_ELEMENT = "schema-element",
        K_SCHEMA_FACET = "schema-facet",
        K_SCHEMA_PARTICLE = "schema-particle",
        K_SCHEMA_ROOT = "schema-root",
        K_SCHEMA_TYPE = "schema-type",
        K_SCHEMA_WILDCARD = "schema-wildcard",
        K_SCORE = "score",
        K_SELF = "self",
        K_SENSITIVE = "sensitive",
        K_SENTENCE = "sentence",
        K_SENTENCES = "sentences",
        K_SEQUENTIAL = "sequential",
        K_SIMPLE = "simple",
        K_SIMPLE_TYPE = "simple-type",
        K_SKIP = "skip",
        K_SLIDING = "sliding",
        K_SOME = "some",
        K_STABLE = "stable",
        K_START = "start",
        K_STEMMING = "stemming",
        K_STOP = "stop",
        K_STRICT = "strict",
        K_STRIP = "strip",
        K_STYLESHEET = "stylesheet",
        K_SWITCH = "switch",
        K_TEXT = "text",
        K_THEN = "then",
        K_THESAURUS = "thesaurus",
        K_TIMES = "times",
        K_TO = "to",
        K_TRANSFORM = "transform",
        K_TREAT = "treat",
        K_TRY = "try",
        K_TUMBLING = "tumbling",
        K_TUPLE = "tuple",
        K_TYPE = "type",
        K_TYPESWITCH = "typeswitch",
        K_UNION = "union",
        K_UNORDERED = "unordered",
        K_UPDATING = "updating",
        K_UPPERCASE = "uppercase",
        K_USING = "using",
        K_VALIDATE = "validate",
        K_VALUE = "value",
        K_VARIABLE = "variable",
        K_VERSION = "version",
        K_WEIGHT = "weight",
        K_WHEN = "when",
        K_WHERE = "where",
        K_WHILE = "while",
        K_WILDCARDS = "wildcards",
        K_WINDOW = "window",
        K_WITH = "with",
        K_WITHOUT = "without",
        K_WORD = "word",
        K_WORDS = "words",
        K_XQUERY = "xquery",
        K_ZERO_DIGIT = "zero-digit",
    }

    nodes {
        // =====================================================================
        // MODULES AND PROLOG
        // =====================================================================
        FILE = "Module",
        ERROR = "Error",
        COMMENT = "Comment",
        VERSION_DECL = "VersionDecl",
        MAIN_MODULE = "MainModule",
        LIBRARY_MODULE = "LibraryModule",
        MODULE_DECL = "ModuleDecl",
        PROLOG = "Prolog",
        QUERY_BODY = "QueryBody",
        TRANSACTION_SEPARATOR = "TransactionSeparator",
        DEFAULT_NAMESPACE_DECL = "DefaultNamespaceDecl",
        NAMESPACE_DECL = "NamespaceDecl",
        BOUNDARY_SPACE_DECL = "BoundarySpaceDecl",
        DEFAULT_COLLATION_DECL = "DefaultCollationDecl",
        BASE_URI_DECL = "BaseURIDecl",
        CONSTRUCTION_DECL = "ConstructionDecl",
        ORDERING_MODE_DECL = "OrderingModeDecl",
        EMPTY_ORDER_DECL = "EmptyOrderDecl",
        COPY_NAMESPACES_DECL = "CopyNamespacesDecl",
        DECIMAL_FORMAT_DECL = "DecimalFormatDecl",
        DF_PROPERTY = "DFPropertyName",
        SCHEMA_IMPORT = "SchemaImport",
        SCHEMA_PREFIX = "SchemaPrefix",
        MODULE_IMPORT = "ModuleImport",
        STYLESHEET_IMPORT = "StylesheetImport",
        CONTEXT_ITEM_DECL = "ContextItemDecl",
        ANNOTATED_DECL = "AnnotatedDecl",
        ANNOTATION = "Annotation",
        COMPATIBILITY_ANNOTATION = "CompatibilityAnnotation",
        VAR_DECL = "VarDecl",
        FUNCTION_DECL = "FunctionDecl",
        PARAM_LIST = "ParamList",
        PARAM = "Param",
        TYPE_DECLARATION = "TypeDeclaration",
        ENCLOSED_EXPR = "EnclosedExpr",
        OPTION_DECL = "OptionDecl",
        FT_OPTION_DECL = "FTOptionDecl",
        REVALIDATION_DECL = "RevalidationDecl",
        TYPE_DECL = "TypeDecl",
        UNKNOWN_DECL = "UnknownDecl",

        // =====================================================================
        // EXPRESSIONS
        // =====================================================================
        EXPR = "Expr",
        FLWOR_EXPR = "FLWORExpr",
        FOR_CLAUSE = "ForClause",
        FOR_BINDING = "ForBinding",
        LET_CLAUSE = "LetClause",
        LET_BINDING = "LetBinding",
        TUMBLING_WINDOW_CLAUSE = "TumblingWindowClause",
        SLIDING_WINDOW_CLAUSE = "SlidingWindowClause",
        WINDOW_START_CONDITION = "WindowStartCondition",
        WINDOW_END_CONDITION = "WindowEndCondition",
        WINDOW_VARS = "WindowVars",
        COUNT_CLAUSE = "CountClause",
        WHERE_CLAUSE = "WhereClause",
        GROUP_BY_CLAUSE = "GroupByClause",
        GROUPING_SPEC = "GroupingSpec",
        ORDER_BY_CLAUSE = "OrderByClause",
        ORDER_SPEC = "OrderSpec",
        ORDER_MODIFIER = "OrderModifier",
        RETURN_CLAUSE = "ReturnClause",
        POSITIONAL_VAR = "PositionalVar",
        ALLOWING_EMPTY = "AllowingEmpty",
        QUANTIFIED_EXPR = "QuantifiedExpr",
        QUANTIFIED_EXPR_BINDING = "QuantifiedExprBinding",
        SWITCH_EXPR = "SwitchExpr",
        SWITCH_CASE_CLAUSE = "SwitchCaseClause",
        SWITCH_DEFAULT_RETURN = "SwitchDefaultReturn",
        TYPESWITCH_EXPR = "TypeswitchExpr",
        CASE_CLAUSE = "CaseClause",
        DEFAULT_CASE_CLAUSE = "DefaultCaseClause",
        SEQUENCE_TYPE_UNION = "SequenceTypeUnion",
        IF_EXPR = "IfExpr",
        TRY_CATCH_EXPR = "TryCatchExpr",
        TRY_CLAUSE = "TryClause",
        CATCH_CLAUSE = "CatchClause",
        CATCH_ERROR_LIST = "CatchErrorList",
        OR_EXPR = "OrExpr",
        AND_EXPR = "AndExpr",
        COMPARISON_EXPR = "ComparisonExpr",
        STRING_CONCAT_EXPR = "StringConcatExpr",
        RANGE_EXPR = "RangeExpr",
        ADDITIVE_EXPR = "AdditiveExpr",
        MULTIPLICATIVE_EXPR = "MultiplicativeExpr",
        UNION_EXPR = "UnionExpr",
        INTERSECT_EXCEPT_EXPR = "IntersectExceptExpr",
        INSTANCEOF_EXPR = "InstanceofExpr",
        TREAT_EXPR = "TreatExpr",
        CASTABLE_EXPR = "CastableExpr",
        CAST_EXPR = "CastExpr",
        ARROW_EXPR = "ArrowExpr",
        UNARY_EXPR = "UnaryExpr",
        VALIDATE_EXPR = "ValidateExpr",
        EXTENSION_EXPR = "ExtensionExpr",
        PRAGMA = "Pragma",
        SIMPLE_MAP_EXPR = "SimpleMapExpr",
        PATH_EXPR = "PathExpr",
        RELATIVE_PATH_EXPR = "RelativePathExpr",
        AXIS_STEP = "AxisStep",
        FORWARD_STEP = "ForwardStep",
        REVERSE_STEP = "ReverseStep",
        ABBREV_FORWARD_STEP = "AbbrevForwardStep",
        ABBREV_REVERSE_STEP = "AbbrevReverseStep",
        NAME_TEST = "NameTest",
        WILDCARD = "Wildcard",
        PREDICATE = "Predicate",
        POSTFIX_EXPR = "PostfixExpr",
        ARGUMENT_LIST = "ArgumentList",
        ARGUMENT_PLACEHOLDER = "ArgumentPlaceholder",
        LOOKUP = "Lookup",
        UNARY_LOOKUP = "UnaryLookup",
        KEY_SPECIFIER = "KeySpecifier",

        // =====================================================================
        // PRIMARY EXPRESSIONS
        // =====================================================================
        STRING_LITERAL = "StringLiteral",
        VAR_REF = "VarRef",
        PARENTHESIZED_EXPR = "ParenthesizedExpr",
        CONTEXT_ITEM_EXPR = "ContextItemExpr",
        ORDERED_EXPR = "OrderedExpr",
        UNORDERED_EXPR = "UnorderedExpr",
        FUNCTION_CALL = "FunctionCall",
        NAMED_FUNCTION_REF = "NamedFunctionRef",
        INLINE_FUNCTION_EXPR = "InlineFunctionExpr",
        MAP_CONSTRUCTOR = "MapConstructor",
        MAP_CONSTRUCTOR_ENTRY = "MapConstructorEntry",
        SQUARE_ARRAY_CONSTRUCTOR = "SquareArrayConstructor",
        CURLY_ARRAY_CONSTRUCTOR = "CurlyArrayConstructor",
        STRING_CONSTRUCTOR = "StringConstructor",
        STRING_CONSTRUCTOR_CONTENT = "StringConstructorContent",
        STRING_CONSTRUCTOR_INTERPOLATION = "StringConstructorInterpolation",

        // =====================================================================
        // CONSTRUCTORS
        // =====================================================================
        DIR_ELEM_CONSTRUCTOR = "DirElemConstructor",
        DIR_ATTRIBUTE_LIST = "DirAttributeList",
        DIR_ATTRIBUTE = "DirAttribute",
        DIR_ATTRIBUTE_VALUE = "DirAttributeValue",
        DIR_ELEM_CONTENT = "DirElemContent",
        DIR_COMMENT_CONSTRUCTOR = "DirCommentConstructor",
        DIR_PI_CONSTRUCTOR = "DirPIConstructor",
        CDATA_SECTION = "CDataSection",
        COMP_DOC_CONSTRUCTOR = "CompDocConstructor",
        COMP_ELEM_CONSTRUCTOR = "CompElemConstructor",
        COMP_ATTR_CONSTRUCTOR = "CompAttrConstructor",
        COMP_NAMESPACE_CONSTRUCTOR = "CompNamespaceConstructor",
        COMP_TEXT_CONSTRUCTOR = "CompTextConstructor",
        COMP_COMMENT_CONSTRUCTOR = "CompCommentConstructor",
        COMP_PI_CONSTRUCTOR = "CompPIConstructor",
        COMP_BINARY_CONSTRUCTOR = "CompBinaryConstructor",
        COMP_OBJECT_NODE_CONSTRUCTOR = "CompObjectNodeConstructor",
        COMP_ARRAY_NODE_CONSTRUCTOR = "CompArrayNodeConstructor",
        COMP_NUMBER_NODE_CONSTRUCTOR = "CompNumberNodeConstructor",
        COMP_BOOLEAN_NODE_CONSTRUCTOR = "CompBooleanNodeConstructor",
        COMP_NULL_NODE_CONSTRUCTOR = "CompNullNodeConstructor",

        // =====================================================================
        // NAMES
        // =====================================================================
        QNAME = "QName",
        URI_QUALIFIED_NAME = "URIQualifiedName",
        BRACED_URI_LITERAL = "BracedURILiteral",

        // =====================================================================
        // TYPES
        // =====================================================================
        SEQUENCE_TYPE = "SequenceType",
        EMPTY_SEQUENCE_TYPE = "EmptySequenceType",
        SINGLE_TYPE = "SingleType",
        ANY_ITEM_TYPE = "AnyItemType",
        PARENTHESIZED_ITEM_TYPE = "ParenthesizedItemType",
        ANY_FUNCTION_TEST = "AnyFunctionTest",
        TYPED_FUNCTION_TEST = "TypedFunctionTest",
        ANY_MAP_TEST = "AnyMapTest",
        TYPED_MAP_TEST = "TypedMapTest",
        ANY_ARRAY_TEST = "AnyArrayTest",
        TYPED_ARRAY_TEST = "TypedArrayTest",
        DOCUMENT_TEST = "DocumentTest",
        ELEMENT_TEST = "ElementTest",
        ATTRIBUTE_TEST = "AttributeTest",
        SCHEMA_ELEMENT_TEST = "SchemaElementTest",
        SCHEMA_ATTRIBUTE_TEST = "SchemaAttributeTest",
        PI_TEST = "PITest",
        COMMENT_TEST = "CommentTest",
        TEXT_TEST = "TextTest",
        NAMESPACE_NODE_TEST = "NamespaceNodeTest",
        ANY_KIND_TEST = "AnyKindTest",
        BINARY_TEST = "BinaryTest",
        OBJECT_NODE_TEST = "ObjectNodeTest",
        ARRAY_NODE_TEST = "ArrayNodeTest",
        NUMBER_NODE_TEST = "NumberNodeTest",
        BOOLEAN_NODE_TEST = "BooleanNodeTest",
        NULL_NODE_TEST = "NullNodeTest",
        SCHEMA_COMPONENT_TEST = "SchemaComponentTest",
        TUPLE_TYPE = "TupleType",
        TUPLE_FIELD = "TupleField",
        UNION_TYPE = "UnionType",
        TYPE_ALIAS = "TypeAlias",

        // =====================================================================
        // FULL TEXT
        // =====================================================================
        FT_CONTAINS_EXPR = "FTContainsExpr",
        FT_SELECTION = "FTSelection",
        FT_OR = "FTOr",
        FT_AND = "FTAnd",
        FT_MILD_NOT = "FTMildNot",
        FT_UNARY_NOT = "FTUnaryNot",
        FT_PRIMARY_WITH_OPTIONS = "FTPrimaryWithOptions",
        FT_WORDS = "FTWords",
        FT_WORDS_VALUE = "FTWordsValue",
        FT_ANYALL_OPTION = "FTAnyallOption",
        FT_TIMES = "FTTimes",
        FT_RANGE = "FTRange",
        FT_WEIGHT = "FTWeight",
        FT_EXTENSION_SELECTION = "FTExtensionSelection",
        FT_ORDER = "FTOrder",
        FT_WINDOW = "FTWindow",
        FT_DISTANCE = "FTDistance",
        FT_UNIT = "FTUnit",
        FT_SCOPE = "FTScope",
        FT_CONTENT = "FTContent",
        FT_MATCH_OPTIONS = "FTMatchOptions",
        FT_CASE_OPTION = "FTCaseOption",
        FT_DIACRITICS_OPTION = "FTDiacriticsOption",
        FT_STEM_OPTION = "FTStemOption",
        FT_THESAURUS_OPTION = "FTThesaurusOption",
        FT_THESAURUS_ID = "FTThesaurusID",
        FT_LITERAL_RANGE = "FTLiteralRange",
        FT_STOP_WORD_OPTION = "FTStopWordOption",
        FT_STOP_WORDS = "FTStopWords",
        FT_STOP_WORDS_INCL_EXCL = "FTStopWordsInclExcl",
        FT_LANGUAGE_OPTION = "FTLanguageOption",
        FT_WILDCARD_OPTION = "FTWildCardOption",
        FT_EXTENSION_OPTION = "FTExtensionOption",
        FT_IGNORE_OPTION = "FTIgnoreOption",
        FT_SCORE_VAR = "FTScoreVar",

        // =====================================================================
        // UPDATE FACILITY
        // =====================================================================
        INSERT_EXPR = "InsertExpr",
        INSERT_EXPR_TARGET_CHOICE = "InsertExprTargetChoice",
        DELETE_EXPR = "DeleteExpr",
        REPLACE_EXPR = "ReplaceExpr",
        RENAME_EXPR = "RenameExpr",
        TRANSFORM_EXPR = "TransformExpr",
        COPY_BINDING = "CopyBinding",
        TRANSFORM_WITH_EXPR = "TransformWithExpr",
        UPDATING_FUNCTION_CALL = "UpdatingFunctionCall",

        // =====================================================================
        // SCRIPTING
        // =====================================================================
        BLOCK_EXPR = "BlockExpr",
        BLOCK = "Block",
        APPLY_STATEMENT = "ApplyStatement",
        ASSIGN_STATEMENT = "AssignStatement",
        BLOCK_STATEMENT = "BlockStatement",
        BREAK_STATEMENT = "BreakStatement",
        CONTINUE_STATEMENT = "ContinueStatement",
        EXIT_STATEMENT = "ExitStatement",
        VAR_DECL_STATEMENT = "VarDeclStatement",
        WHILE_STATEMENT = "WhileStatement",
    }
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or XQuery comment parts)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITE_SPACE | Self::COMMENT_START_TAG | Self::COMMENT_CONTENTS | Self::COMMENT_END_TAG
        )
    }

    /// Check if this is a numeric literal token
    pub fn is_numeric_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::DECIMAL | Self::DOUBLE | Self::PARTIAL_DOUBLE_LITERAL_EXPONENT
        )
    }

    /// Tokens that can be used as a name: `NCNAME` and every keyword.
    pub fn is_name(self) -> bool {
        self == Self::NCNAME || self.is_keyword()
    }

    /// Punctuation and operator tokens of the code lexical state.
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::VARIABLE_INDICATOR as u16)
            && (self as u16) <= (Self::TYPE_ALIAS_INDICATOR as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: SyntaxKind is repr(u16) with contiguous discriminants and
        // the bound is checked above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XQueryLanguage {}

impl rowan::Language for XQueryLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<XQueryLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<XQueryLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<XQueryLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(SyntaxKind::FILE.label(), "Module");
        assert_eq!(SyntaxKind::ERROR.label(), "Error");
        assert_eq!(SyntaxKind::WHITE_SPACE.label(), "WhiteSpace");
        assert_eq!(SyntaxKind::INTEGER.label(), "Leaf");
        assert_eq!(SyntaxKind::K_FOR.label(), "Leaf");
        assert_eq!(SyntaxKind::FLWOR_EXPR.label(), "FLWORExpr");
    }

    #[test]
    fn test_names_and_texts() {
        assert_eq!(SyntaxKind::VERSION_DECL.name(), "VERSION_DECL");
        assert_eq!(SyntaxKind::K_ANCESTOR_OR_SELF.text(), Some("ancestor-or-self"));
        assert_eq!(SyntaxKind::ASSIGN_EQUAL.text(), Some(":="));
        assert_eq!(SyntaxKind::NCNAME.text(), None);
        assert_eq!(SyntaxKind::QUERY_BODY.text(), None);
    }

    #[test]
    fn test_classification() {
        assert!(SyntaxKind::K_XQUERY.is_keyword());
        assert!(!SyntaxKind::NCNAME.is_keyword());
        assert!(SyntaxKind::NCNAME.is_name());
        assert!(SyntaxKind::COMMENT_CONTENTS.is_trivia());
        assert!(!SyntaxKind::COMMENT.is_trivia());
        assert!(SyntaxKind::ARROW.is_punct());
        assert!(SyntaxKind::PATH_EXPR.is_node());
        assert!(!SyntaxKind::INTEGER.is_node());
    }

    #[test]
    fn test_rowan_round_trip() {
        for kind in [SyntaxKind::WHITE_SPACE, SyntaxKind::K_ZERO_DIGIT, SyntaxKind::WHILE_STATEMENT] {
            let raw: rowan::SyntaxKind = kind.into();
            assert_eq!(SyntaxKind::from(raw), kind);
        }
    }
}
