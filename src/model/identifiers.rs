//! Package URL handling for SBOM components.
//!
//! A purl is kept as an opaque string. The only structure ever read from it is
//! the ecosystem segment between `pkg:` and the first `/`, which is all the
//! ecosystem histogram needs.
//!
//! Resolution order for a component's purl:
//!
//! 1. The direct `purl` field, when non-empty
//! 2. The `referenceLocator` of the first `externalRefs` entry whose
//!    `referenceType` is `purl` (later matches are ignored)
//! 3. Nothing

use super::Component;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme prefix every well-formed purl starts with
pub const PURL_PREFIX: &str = "pkg:";

/// `referenceType` value marking an SPDX external reference as a purl
pub const PURL_REFERENCE_TYPE: &str = "purl";

/// An opaque package URL string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageUrl(String);

impl PackageUrl {
    /// Wrap a purl string; returns `None` for an empty string.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// The raw purl text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the text literally starts with `pkg:`
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.0.starts_with(PURL_PREFIX)
    }

    /// Extract the ecosystem key.
    ///
    /// Takes the text before the first `/` and strips every `pkg:` occurrence
    /// from it, so `pkg:npm/lodash@4.17.21` gives `npm`. Returns `None` when the
    /// purl does not start with `pkg:`. No case folding or aliasing is applied.
    #[must_use]
    pub fn ecosystem(&self) -> Option<String> {
        if !self.has_scheme() {
            return None;
        }
        let head = self.0.split('/').next().unwrap_or_default();
        Some(head.replace(PURL_PREFIX, ""))
    }
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Component {
    /// Resolve this component's purl (direct field, then `externalRefs`).
    #[must_use]
    pub fn resolve_purl(&self) -> Option<PackageUrl> {
        if let Some(purl) = self.purl()
            && !purl.is_empty()
        {
            return PackageUrl::new(purl);
        }

        self.external_refs()
            .find(|r| r.reference_type() == Some(PURL_REFERENCE_TYPE))?
            .reference_locator()
            .and_then(PackageUrl::new)
    }

    /// Ecosystem of the resolved purl, if it is well-formed
    #[must_use]
    pub fn ecosystem(&self) -> Option<String> {
        self.resolve_purl().and_then(|p| p.ecosystem())
    }
}
