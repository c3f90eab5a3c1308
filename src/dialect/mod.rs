//! Dialect configuration
//!
//! A [`Dialect`] selects which XQuery extensions the parser recognises. It is
//! an immutable `Copy` value passed by reference into [`crate::parse`]; the
//! grammar only attempts an extension production when the dialect enables
//! it, otherwise the extension's keywords are ordinary names.
//!
//! [`Requirement`] and [`introduced_by`] form the language applicability side
//! table: for each node kind they name the grammar that introduced it.

mod versions;

pub use versions::{
    FullTextVersion, Implementation, MarkLogicVersion, SaxonVersion, ScriptingVersion,
    UpdateFacilityVersion, XQueryVersion,
};

use thiserror::Error;

use crate::parser::SyntaxKind;

/// Error returned when a dialect identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    #[error("unknown XQuery implementation '{0}'")]
    UnknownImplementation(String),
    #[error("unknown version '{0}'")]
    UnknownVersion(String),
}

/// The set of grammars enabled for a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialect {
    pub implementation: Implementation,
    pub xquery_version: XQueryVersion,
    pub full_text: Option<FullTextVersion>,
    pub update_facility: Option<UpdateFacilityVersion>,
    pub scripting: Option<ScriptingVersion>,
    pub marklogic: Option<MarkLogicVersion>,
    pub saxon: Option<SaxonVersion>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::w3c()
    }
}

impl Dialect {
    /// W3C XQuery 3.1 without extensions.
    pub const fn w3c() -> Self {
        Self {
            implementation: Implementation::W3C,
            xquery_version: XQueryVersion::V3_1,
            full_text: None,
            update_facility: None,
            scripting: None,
            marklogic: None,
            saxon: None,
        }
    }

    /// MarkLogic's dialect. MarkLogic 8+ also understands the JSON node
    /// constructors and tests.
    pub const fn marklogic(version: MarkLogicVersion) -> Self {
        Self {
            implementation: Implementation::MarkLogic,
            xquery_version: XQueryVersion::V1_0Ml,
            marklogic: Some(version),
            ..Self::w3c()
        }
    }

    /// Saxon's dialect with its XQuery extensions.
    pub const fn saxon(version: SaxonVersion) -> Self {
        Self {
            implementation: Implementation::Saxon,
            saxon: Some(version),
            ..Self::w3c()
        }
    }

    /// BaseX: Full Text 3.0 and Update Facility 3.0.
    pub const fn basex() -> Self {
        Self {
            implementation: Implementation::BaseX,
            full_text: Some(FullTextVersion::V3_0),
            update_facility: Some(UpdateFacilityVersion::V3_0),
            ..Self::w3c()
        }
    }

    /// Zorba: Full Text 1.0, Update Facility 1.0 and Scripting.
    pub const fn zorba() -> Self {
        Self {
            implementation: Implementation::Zorba,
            xquery_version: XQueryVersion::V3_0,
            full_text: Some(FullTextVersion::V1_0),
            update_facility: Some(UpdateFacilityVersion::V1_0),
            scripting: Some(ScriptingVersion::V1_0),
            ..Self::w3c()
        }
    }

    /// Preset for an implementation with its newest supported extensions.
    pub fn for_implementation(implementation: Implementation) -> Self {
        match implementation {
            Implementation::W3C => Self::w3c(),
            Implementation::MarkLogic => Self::marklogic(MarkLogicVersion::V9),
            Implementation::Saxon => Self::saxon(SaxonVersion::V9_8),
            Implementation::BaseX => Self::basex(),
            Implementation::Zorba => Self::zorba(),
        }
    }

    pub const fn with_xquery_version(self, version: XQueryVersion) -> Self {
        Self {
            xquery_version: version,
            ..self
        }
    }

    pub const fn with_full_text(self, version: Option<FullTextVersion>) -> Self {
        Self {
            full_text: version,
            ..self
        }
    }

    pub const fn with_update_facility(self, version: Option<UpdateFacilityVersion>) -> Self {
        Self {
            update_facility: version,
            ..self
        }
    }

    pub const fn with_scripting(self, version: Option<ScriptingVersion>) -> Self {
        Self {
            scripting: version,
            ..self
        }
    }

    pub const fn with_marklogic(self, version: Option<MarkLogicVersion>) -> Self {
        Self {
            marklogic: version,
            ..self
        }
    }

    pub const fn with_saxon(self, version: Option<SaxonVersion>) -> Self {
        Self {
            saxon: version,
            ..self
        }
    }

    pub fn supports_full_text(&self) -> bool {
        self.full_text.is_some()
    }

    pub fn supports_update(&self) -> bool {
        self.update_facility.is_some()
    }

    /// `transform with`, `invoke updating` and `%updating` function types.
    pub fn supports_update_3_0(&self) -> bool {
        self.update_facility >= Some(UpdateFacilityVersion::V3_0)
    }

    pub fn supports_scripting(&self) -> bool {
        self.scripting.is_some()
    }

    pub fn supports_marklogic(&self) -> bool {
        self.marklogic.is_some()
    }

    /// JSON node constructors and kind tests.
    pub fn supports_marklogic_8(&self) -> bool {
        self.marklogic >= Some(MarkLogicVersion::V8)
    }

    pub fn supports_saxon(&self) -> bool {
        self.saxon.is_some()
    }

    /// Tuple and union types, type aliases and `declare type`.
    pub fn supports_saxon_9_8(&self) -> bool {
        self.saxon >= Some(SaxonVersion::V9_8)
    }
}

/// The grammar a node kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    XQuery30,
    XQuery31,
    FullText,
    UpdateFacility10,
    UpdateFacility30,
    Scripting,
    MarkLogic,
    MarkLogic80,
    Saxon,
    Saxon98,
}

impl Requirement {
    /// Whether `dialect` enables the grammar this requirement names.
    ///
    /// MarkLogic's `1.0-ml` includes the XQuery 3.0 grammar.
    pub fn is_supported_by(self, dialect: &Dialect) -> bool {
        match self {
            Self::XQuery30 => dialect.xquery_version >= XQueryVersion::V1_0Ml,
            Self::XQuery31 => dialect.xquery_version >= XQueryVersion::V3_1,
            Self::FullText => dialect.supports_full_text(),
            Self::UpdateFacility10 => dialect.supports_update(),
            Self::UpdateFacility30 => dialect.supports_update_3_0(),
            Self::Scripting => dialect.supports_scripting(),
            Self::MarkLogic => dialect.supports_marklogic(),
            Self::MarkLogic80 => dialect.supports_marklogic_8(),
            Self::Saxon => dialect.supports_saxon(),
            Self::Saxon98 => dialect.supports_saxon_9_8(),
        }
    }
}

/// Which grammar introduced `kind`. `None` for XQuery 1.0 constructs and
/// for tokens.
pub fn introduced_by(kind: SyntaxKind) -> Option<Requirement> {
    use SyntaxKind::*;
    let requirement = match kind {
        TUMBLING_WINDOW_CLAUSE | SLIDING_WINDOW_CLAUSE | WINDOW_START_CONDITION
        | WINDOW_END_CONDITION | WINDOW_VARS | COUNT_CLAUSE | GROUP_BY_CLAUSE | GROUPING_SPEC
        | ALLOWING_EMPTY | SWITCH_EXPR | SWITCH_CASE_CLAUSE | SWITCH_DEFAULT_RETURN
        | TRY_CATCH_EXPR | TRY_CLAUSE | CATCH_CLAUSE | CATCH_ERROR_LIST | SEQUENCE_TYPE_UNION
        | SIMPLE_MAP_EXPR | STRING_CONCAT_EXPR | NAMED_FUNCTION_REF | INLINE_FUNCTION_EXPR
        | ARGUMENT_PLACEHOLDER | ANNOTATION | CONTEXT_ITEM_DECL
        | DECIMAL_FORMAT_DECL | DF_PROPERTY | URI_QUALIFIED_NAME | BRACED_URI_LITERAL
        | COMP_NAMESPACE_CONSTRUCTOR | NAMESPACE_NODE_TEST | ANY_FUNCTION_TEST
        | TYPED_FUNCTION_TEST | PARENTHESIZED_ITEM_TYPE => Requirement::XQuery30,

        ARROW_EXPR | MAP_CONSTRUCTOR | MAP_CONSTRUCTOR_ENTRY | SQUARE_ARRAY_CONSTRUCTOR
        | CURLY_ARRAY_CONSTRUCTOR | LOOKUP | UNARY_LOOKUP | KEY_SPECIFIER | ANY_MAP_TEST
        | TYPED_MAP_TEST | ANY_ARRAY_TEST | TYPED_ARRAY_TEST | STRING_CONSTRUCTOR
        | STRING_CONSTRUCTOR_CONTENT | STRING_CONSTRUCTOR_INTERPOLATION => Requirement::XQuery31,

        FT_CONTAINS_EXPR | FT_SELECTION | FT_OR | FT_AND | FT_MILD_NOT | FT_UNARY_NOT
        | FT_PRIMARY_WITH_OPTIONS | FT_WORDS | FT_WORDS_VALUE | FT_ANYALL_OPTION | FT_TIMES
        | FT_RANGE | FT_WEIGHT | FT_EXTENSION_SELECTION | FT_ORDER | FT_WINDOW | FT_DISTANCE
        | FT_UNIT | FT_SCOPE | FT_CONTENT | FT_MATCH_OPTIONS | FT_CASE_OPTION
        | FT_DIACRITICS_OPTION | FT_STEM_OPTION | FT_THESAURUS_OPTION | FT_THESAURUS_ID
        | FT_LITERAL_RANGE | FT_STOP_WORD_OPTION | FT_STOP_WORDS | FT_STOP_WORDS_INCL_EXCL
        | FT_LANGUAGE_OPTION | FT_WILDCARD_OPTION | FT_EXTENSION_OPTION | FT_IGNORE_OPTION
        | FT_SCORE_VAR | FT_OPTION_DECL => Requirement::FullText,

        INSERT_EXPR | INSERT_EXPR_TARGET_CHOICE | DELETE_EXPR | REPLACE_EXPR | RENAME_EXPR
        | TRANSFORM_EXPR | COPY_BINDING | REVALIDATION_DECL => Requirement::UpdateFacility10,

        TRANSFORM_WITH_EXPR | UPDATING_FUNCTION_CALL => Requirement::UpdateFacility30,

        BLOCK_EXPR | BLOCK | APPLY_STATEMENT | ASSIGN_STATEMENT | BLOCK_STATEMENT
        | BREAK_STATEMENT | CONTINUE_STATEMENT | EXIT_STATEMENT | VAR_DECL_STATEMENT
        | WHILE_STATEMENT => Requirement::Scripting,

        STYLESHEET_IMPORT | COMP_BINARY_CONSTRUCTOR | BINARY_TEST | SCHEMA_COMPONENT_TEST
        | TRANSACTION_SEPARATOR => Requirement::MarkLogic,

        COMP_OBJECT_NODE_CONSTRUCTOR | COMP_ARRAY_NODE_CONSTRUCTOR
        | COMP_NUMBER_NODE_CONSTRUCTOR | COMP_BOOLEAN_NODE_CONSTRUCTOR
        | COMP_NULL_NODE_CONSTRUCTOR | OBJECT_NODE_TEST | ARRAY_NODE_TEST | NUMBER_NODE_TEST
        | BOOLEAN_NODE_TEST | NULL_NODE_TEST => Requirement::MarkLogic80,

        TUPLE_TYPE | TUPLE_FIELD | UNION_TYPE | TYPE_ALIAS | TYPE_DECL => Requirement::Saxon98,

        _ => return None,
    };
    Some(requirement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_w3c_without_extensions() {
        let dialect = Dialect::default();
        assert_eq!(dialect.implementation, Implementation::W3C);
        assert_eq!(dialect.xquery_version, XQueryVersion::V3_1);
        assert!(!dialect.supports_full_text());
        assert!(!dialect.supports_update());
        assert!(!dialect.supports_scripting());
        assert!(!dialect.supports_marklogic());
        assert!(!dialect.supports_saxon());
    }

    #[test]
    fn test_presets() {
        assert!(Dialect::basex().supports_update_3_0());
        assert!(Dialect::basex().supports_full_text());

        let zorba = Dialect::zorba();
        assert!(zorba.supports_scripting());
        assert!(zorba.supports_update());
        assert!(!zorba.supports_update_3_0());

        assert!(Dialect::marklogic(MarkLogicVersion::V8).supports_marklogic_8());
        assert!(!Dialect::marklogic(MarkLogicVersion::V7).supports_marklogic_8());
        assert!(!Dialect::saxon(SaxonVersion::V9_7).supports_saxon_9_8());
    }

    #[test]
    fn test_builder_returns_modified_copy() {
        let base = Dialect::w3c();
        let with_ft = base.with_full_text(Some(FullTextVersion::V3_0));
        assert!(!base.supports_full_text());
        assert!(with_ft.supports_full_text());
    }

    #[test]
    fn test_requirement_lookup() {
        assert_eq!(introduced_by(SyntaxKind::FT_WORDS), Some(Requirement::FullText));
        assert_eq!(introduced_by(SyntaxKind::IF_EXPR), None);
        assert_eq!(introduced_by(SyntaxKind::NCNAME), None);

        let ft = Dialect::w3c().with_full_text(Some(FullTextVersion::V1_0));
        assert!(Requirement::FullText.is_supported_by(&ft));
        assert!(!Requirement::FullText.is_supported_by(&Dialect::w3c()));
        assert!(Requirement::XQuery31.is_supported_by(&Dialect::w3c()));
        assert!(
            !Requirement::XQuery31
                .is_supported_by(&Dialect::w3c().with_xquery_version(XQueryVersion::V1_0))
        );

        let marklogic = Dialect::marklogic(MarkLogicVersion::V9);
        assert!(Requirement::XQuery30.is_supported_by(&marklogic));
        assert!(!Requirement::XQuery31.is_supported_by(&marklogic));
    }

    #[test]
    fn test_dialect_is_send_sync_copy() {
        fn assert_traits<T: Send + Sync + Copy>() {}
        assert_traits::<Dialect>();
    }
}
