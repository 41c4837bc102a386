//! Format tag and metadata structures for SBOM documents and components.

use super::lenient::{present, text};
use super::{Component, Lenient, LenientText};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// SBOM format type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SbomFormat {
    #[serde(rename = "CycloneDX")]
    CycloneDx,
    #[serde(rename = "SPDX")]
    Spdx,
    /// Neither CycloneDX nor SPDX markers were found
    #[default]
    Unknown,
}

impl SbomFormat {
    /// Whether this is one of the two recognised formats
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycloneDx => write!(f, "CycloneDX"),
            Self::Spdx => write!(f, "SPDX"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// CycloneDX `metadata` object.
///
/// Only the root `component` is modelled; `tools`, `timestamp` and any other
/// entries are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub component: Option<Lenient<Component>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `{name, value}` property entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<LenientText>,
    /// Non-string values keep their JSON shape
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub value: Option<LenientText>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    /// Create a property with a name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(LenientText::from(name.into())),
            value: Some(LenientText::from(value.into())),
            extra: Map::new(),
        }
    }

    /// Check whether this property has the given name
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        text(self.name.as_ref()) == Some(name)
    }

    /// The value as text, if it is a string, number or boolean
    #[must_use]
    pub fn value_text(&self) -> Option<&str> {
        text(self.value.as_ref())
    }
}
