//! Core SBOM document and component data structures.
//!
//! The model covers the fields the checker and the fixer reason about. Every
//! other key is kept in an `extra` map so a fixed document is written back with
//! nothing dropped.

use super::lenient::{present, text};
use super::{Lenient, LenientList, LenientText, Metadata, Property, SbomFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Component type used when a component does not declare one.
pub const DEFAULT_COMPONENT_TYPE: &str = "package";

/// Display sentinel for a missing name or version.
pub const NOT_AVAILABLE: &str = "N/A";

/// A parsed SBOM document.
///
/// CycloneDX documents list their components under `components`; SPDX
/// documents list them under `packages`. Use [`SbomDocument::components`] to
/// read the sequence that matches the detected [`SbomFormat`].
///
/// Converting a JSON object never fails on the shape of a modelled field:
/// values of an unexpected type are kept raw and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomDocument {
    /// Detected format, set by the loader; never serialized
    #[serde(skip)]
    pub format: SbomFormat,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub bom_format: Option<LenientText>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub spdx_version: Option<LenientText>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<LenientText>,
    /// SPDX document name
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<LenientText>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Lenient<Metadata>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub components: Option<LenientList<Component>>,
    /// SPDX packages
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub packages: Option<LenientList<Component>>,
    /// Never read; only its presence matters to the fixer
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SbomDocument {
    /// Build a typed document from an already parsed JSON value.
    ///
    /// Fails only when `value` is not a JSON object.
    pub fn from_value(value: Value, format: SbomFormat) -> Result<Self, serde_json::Error> {
        let mut document: Self = serde_json::from_value(value)?;
        document.format = format;
        Ok(document)
    }

    /// The component sequence for the detected format.
    ///
    /// CycloneDX reads `components`, SPDX reads `packages`. A missing or
    /// non-array list is empty and entries that are not objects are skipped.
    /// Unknown documents have no components.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        let list = match self.format {
            SbomFormat::CycloneDx => self.components.as_ref(),
            SbomFormat::Spdx => self.packages.as_ref(),
            SbomFormat::Unknown => None,
        };
        list.into_iter().flat_map(LenientList::entries)
    }

    /// Number of components for the detected format
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components().count()
    }

    /// The CycloneDX root component (`metadata.component`), if any
    #[must_use]
    pub fn root_component(&self) -> Option<&Component> {
        self.metadata
            .as_ref()
            .and_then(Lenient::parsed)
            .and_then(|m| m.component.as_ref())
            .and_then(Lenient::parsed)
    }

    /// `spdxVersion` for SPDX documents, `specVersion` otherwise
    #[must_use]
    pub fn version_label(&self) -> Option<&str> {
        match self.format {
            SbomFormat::Spdx => text(self.spdx_version.as_ref()),
            _ => text(self.spec_version.as_ref()),
        }
    }

    /// The SPDX document `name`
    #[must_use]
    pub fn document_name(&self) -> Option<&str> {
        text(self.name.as_ref())
    }

    /// Serialize as two-space indented JSON, non-ASCII characters unescaped.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A component (CycloneDX) or package (SPDX) entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(
        rename = "bom-ref",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub bom_ref: Option<LenientText>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub component_type: Option<LenientText>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<LenientText>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version: Option<LenientText>,
    /// SPDX spelling of the version field
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version_info: Option<LenientText>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub purl: Option<LenientText>,
    /// SPDX external references
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub external_refs: Option<LenientList<ExternalRef>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub properties: Option<LenientList<Property>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Component {
    /// Create a component with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(LenientText::from(name.into())),
            ..Self::default()
        }
    }

    /// Set the component type
    #[must_use]
    pub fn with_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = Some(LenientText::from(component_type.into()));
        self
    }

    /// Set the version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(LenientText::from(version.into()));
        self
    }

    /// Set the bom-ref
    #[must_use]
    pub fn with_bom_ref(mut self, bom_ref: impl Into<String>) -> Self {
        self.bom_ref = Some(LenientText::from(bom_ref.into()));
        self
    }

    /// Set the direct purl
    #[must_use]
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(LenientText::from(purl.into()));
        self
    }

    /// Add a property; a raw `properties` value is replaced
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let property = Lenient::Parsed(Property::new(name, value));
        match self.properties.as_mut().and_then(Lenient::parsed_mut) {
            Some(list) => list.push(property),
            None => self.properties = Some(Lenient::Parsed(vec![property])),
        }
        self
    }

    /// The bom-ref as text
    #[must_use]
    pub fn bom_ref(&self) -> Option<&str> {
        text(self.bom_ref.as_ref())
    }

    /// The direct `purl` field as text
    #[must_use]
    pub fn purl(&self) -> Option<&str> {
        text(self.purl.as_ref())
    }

    /// Name for display, `N/A` when absent
    #[must_use]
    pub fn display_name(&self) -> &str {
        text(self.name.as_ref()).unwrap_or(NOT_AVAILABLE)
    }

    /// Version with the CycloneDX → SPDX fallback.
    ///
    /// `version` wins when present and non-empty, otherwise `versionInfo`.
    #[must_use]
    pub fn resolved_version(&self) -> Option<&str> {
        text(self.version.as_ref())
            .filter(|v| !v.is_empty())
            .or(text(self.version_info.as_ref()))
    }

    /// Version for display, `N/A` when neither field is present
    #[must_use]
    pub fn display_version(&self) -> &str {
        self.resolved_version().unwrap_or(NOT_AVAILABLE)
    }

    /// Declared type, `package` when absent
    #[must_use]
    pub fn type_or_default(&self) -> &str {
        text(self.component_type.as_ref()).unwrap_or(DEFAULT_COMPONENT_TYPE)
    }

    /// Iterate over the well-formed properties, if any
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().flat_map(LenientList::entries)
    }

    /// Iterate over the well-formed external references, if any
    pub fn external_refs(&self) -> impl Iterator<Item = &ExternalRef> {
        self.external_refs.iter().flat_map(LenientList::entries)
    }
}

/// SPDX `externalRefs` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRef {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<LenientText>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub reference_locator: Option<LenientText>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExternalRef {
    /// Create an external reference
    pub fn new(reference_type: impl Into<String>, reference_locator: impl Into<String>) -> Self {
        Self {
            reference_type: Some(LenientText::from(reference_type.into())),
            reference_locator: Some(LenientText::from(reference_locator.into())),
            extra: Map::new(),
        }
    }

    /// `referenceType` as text
    #[must_use]
    pub fn reference_type(&self) -> Option<&str> {
        text(self.reference_type.as_ref())
    }

    /// `referenceLocator` as text
    #[must_use]
    pub fn reference_locator(&self) -> Option<&str> {
        text(self.reference_locator.as_ref())
    }
}

/// CycloneDX `dependencies` entry: one component and the bom-refs it depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    #[serde(rename = "ref")]
    pub reference: String,
    pub depends_on: Vec<String>,
}

impl DependencyEdge {
    /// Create an edge from `reference` to each of `depends_on`
    pub fn new(reference: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            reference: reference.into(),
            depends_on,
        }
    }
}

impl From<DependencyEdge> for Value {
    fn from(edge: DependencyEdge) -> Self {
        json!({"ref": edge.reference, "dependsOn": edge.depends_on})
    }
}
