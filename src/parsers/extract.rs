//! Component extraction for detected documents.

use crate::error::{PreflightError, Result};
use crate::model::{Component, PackageUrl, SbomDocument, SbomFormat};

/// A borrowed, display-ready view of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedComponent<'a> {
    /// Name, `N/A` when absent
    pub name: &'a str,
    /// `version`, else `versionInfo`, else `N/A`
    pub version: &'a str,
    /// Declared type, `package` when absent
    pub component_type: &'a str,
    /// Resolved purl (direct field or first purl external reference)
    pub purl: Option<PackageUrl>,
    /// The source component
    pub component: &'a Component,
}

impl<'a> ExtractedComponent<'a> {
    fn from_component(component: &'a Component) -> Self {
        Self {
            name: component.display_name(),
            version: component.display_version(),
            component_type: component.type_or_default(),
            purl: component.resolve_purl(),
            component,
        }
    }

    /// Ecosystem of the purl, when the purl is well-formed
    #[must_use]
    pub fn ecosystem(&self) -> Option<String> {
        self.purl.as_ref().and_then(PackageUrl::ecosystem)
    }
}

/// Yields the ordered component sequence of a detected document.
///
/// CycloneDX reads `components` and SPDX reads `packages`. Extraction borrows
/// the document and never mutates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentExtractor;

impl ComponentExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extract the components in document order.
    ///
    /// Fails with `UnsupportedFormat` for an `Unknown` document; callers are
    /// expected to stop before extraction in that case.
    pub fn extract<'a>(&self, document: &'a SbomDocument) -> Result<Vec<ExtractedComponent<'a>>> {
        if document.format == SbomFormat::Unknown {
            return Err(PreflightError::unsupported_format(
                SbomFormat::Unknown,
                "cannot extract components from an unrecognised document",
            ));
        }

        let components: Vec<_> = document
            .components()
            .map(ExtractedComponent::from_component)
            .collect();

        tracing::debug!(
            "extracted {} components from {} document",
            components.len(),
            document.format
        );
        Ok(components)
    }
}
