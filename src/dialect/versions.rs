//! Version enums for the XQuery base language and each extension.

use std::fmt;
use std::str::FromStr;

use super::DialectError;

/// Implementation (vendor) whose syntax the document is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Implementation {
    #[default]
    W3C,
    MarkLogic,
    Saxon,
    BaseX,
    Zorba,
}

impl Implementation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W3C => "w3c",
            Self::MarkLogic => "marklogic",
            Self::Saxon => "saxon",
            Self::BaseX => "basex",
            Self::Zorba => "zorba",
        }
    }
}

impl FromStr for Implementation {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w3c" => Ok(Self::W3C),
            "marklogic" => Ok(Self::MarkLogic),
            "saxon" => Ok(Self::Saxon),
            "basex" => Ok(Self::BaseX),
            "zorba" => Ok(Self::Zorba),
            _ => Err(DialectError::UnknownImplementation(s.to_string())),
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base XQuery language version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XQueryVersion {
    V1_0,
    /// MarkLogic's `1.0-ml` flavour of XQuery 1.0.
    V1_0Ml,
    V3_0,
    #[default]
    V3_1,
}

impl XQueryVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_0Ml => "1.0-ml",
            Self::V3_0 => "3.0",
            Self::V3_1 => "3.1",
        }
    }
}

impl FromStr for XQueryVersion {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.0" => Ok(Self::V1_0),
            "1.0-ml" => Ok(Self::V1_0Ml),
            "3.0" => Ok(Self::V3_0),
            "3.1" => Ok(Self::V3_1),
            _ => Err(DialectError::UnknownVersion(s.to_string())),
        }
    }
}

impl fmt::Display for XQueryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// XQuery and XPath Full Text version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FullTextVersion {
    V1_0,
    V3_0,
}

/// XQuery Update Facility version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateFacilityVersion {
    V1_0,
    V3_0,
}

/// XQuery Scripting Extension version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptingVersion {
    V1_0,
}

/// MarkLogic server release whose extensions are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkLogicVersion {
    V6,
    V7,
    V8,
    V9,
}

impl FromStr for MarkLogicVersion {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6" | "6.0" => Ok(Self::V6),
            "7" | "7.0" => Ok(Self::V7),
            "8" | "8.0" => Ok(Self::V8),
            "9" | "9.0" => Ok(Self::V9),
            _ => Err(DialectError::UnknownVersion(s.to_string())),
        }
    }
}

/// Saxon release whose extensions are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaxonVersion {
    V9_4,
    V9_5,
    V9_6,
    V9_7,
    V9_8,
}

impl FromStr for SaxonVersion {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "9.4" => Ok(Self::V9_4),
            "9.5" => Ok(Self::V9_5),
            "9.6" => Ok(Self::V9_6),
            "9.7" => Ok(Self::V9_7),
            "9.8" => Ok(Self::V9_8),
            _ => Err(DialectError::UnknownVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implementation_from_str() {
        assert_eq!("w3c".parse::<Implementation>().unwrap(), Implementation::W3C);
        assert_eq!(
            "MarkLogic".parse::<Implementation>().unwrap(),
            Implementation::MarkLogic
        );
        assert!("oracle".parse::<Implementation>().is_err());
    }

    #[test]
    fn test_xquery_version_round_trips_through_display() {
        for version in [
            XQueryVersion::V1_0,
            XQueryVersion::V1_0Ml,
            XQueryVersion::V3_0,
            XQueryVersion::V3_1,
        ] {
            assert_eq!(version.to_string().parse::<XQueryVersion>().unwrap(), version);
        }
    }

    #[test]
    fn test_extension_versions_are_ordered() {
        assert!(MarkLogicVersion::V8 > MarkLogicVersion::V7);
        assert!(SaxonVersion::V9_8 > SaxonVersion::V9_4);
        assert_eq!("9.8".parse::<SaxonVersion>().unwrap(), SaxonVersion::V9_8);
        assert_eq!("8.0".parse::<MarkLogicVersion>().unwrap(), MarkLogicVersion::V8);
    }
}
