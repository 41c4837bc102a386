//! Root component rewriting for Syft CycloneDX output.
//!
//! Syft writes a minimal `metadata.component` (often `type: file`), which makes
//! Dependency-Track file the whole SBOM as a generic file. The normalizer
//! replaces it with an `application` component named after the project and
//! records how many components each language contributes.

use super::NormalizeConfig;
use crate::diagnostics::Histogram;
use crate::model::{Component, Lenient, LenientList, Metadata, Property, SbomDocument};
use std::path::Path;

/// Component type written on the new root
pub const APPLICATION_TYPE: &str = "application";

/// Property name prefix for per-language counts on the root component
pub const ECOSYSTEM_PROPERTY_PREFIX: &str = "cdx:ecosystem:";

/// Language key used when a language property carries no value
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Name and version written on the root component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub name: String,
    pub version: String,
}

impl ProjectIdentity {
    /// Resolve overrides against the input path and configured defaults.
    ///
    /// An empty override counts as absent.
    #[must_use]
    pub fn resolve(
        input: &Path,
        name: Option<&str>,
        version: Option<&str>,
        config: &NormalizeConfig,
    ) -> Self {
        let name = name
            .filter(|n| !n.is_empty())
            .map_or_else(|| derive_project_name(input, &config.fallback_name), str::to_string);
        let version = version
            .filter(|v| !v.is_empty())
            .unwrap_or(config.default_version.as_str())
            .to_string();
        Self { name, version }
    }
}

/// Derive a project name from a file name.
///
/// Takes the stem, removes every literal `sbom`, turns `_` into spaces and
/// trims; `sbom_MyApp.json` gives `MyApp`. An empty result gives `fallback`.
#[must_use]
pub fn derive_project_name(input: &Path, fallback: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let derived = stem.replace("sbom", "").replace('_', " ");
    let derived = derived.trim();
    if derived.is_empty() {
        fallback.to_string()
    } else {
        derived.to_string()
    }
}

/// Rewrites the CycloneDX root component.
#[derive(Debug, Clone, Default)]
pub struct MetadataNormalizer {
    config: NormalizeConfig,
}

impl MetadataNormalizer {
    #[must_use]
    pub const fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Count components per value of the language property, in first-seen order
    #[must_use]
    pub fn language_histogram<'a>(
        &self,
        components: impl IntoIterator<Item = &'a Component>,
    ) -> Histogram {
        components
            .into_iter()
            .flat_map(Component::properties)
            .filter(|p| p.is_named(&self.config.language_property))
            .map(|p| p.value_text().unwrap_or(UNKNOWN_LANGUAGE).to_string())
            .collect()
    }

    /// Replace `metadata.component` and return the bom-ref it was given.
    ///
    /// The previous root contributes only its bom-ref; every other field is
    /// dropped. Other `metadata` entries are left as they are. When the
    /// document has components, the root carries one `cdx:ecosystem:<lang>`
    /// property per language, so running this twice gives the same result.
    /// A `metadata` value that is not an object is replaced.
    pub fn normalize(&self, document: &mut SbomDocument, identity: &ProjectIdentity) -> String {
        let bom_ref = document
            .root_component()
            .and_then(Component::bom_ref)
            .map_or_else(|| self.config.placeholder_bom_ref.clone(), str::to_string);

        let mut root = Component::new(identity.name.as_str())
            .with_type(APPLICATION_TYPE)
            .with_version(identity.version.as_str())
            .with_bom_ref(bom_ref.as_str());

        let components: Vec<&Component> = document
            .components
            .iter()
            .flat_map(LenientList::entries)
            .collect();
        if !components.is_empty() {
            let languages = self.language_histogram(components.iter().copied());
            tracing::debug!("found {} languages across {} components", languages.len(), components.len());
            root.properties = Some(LenientList::from_items(
                languages
                    .iter()
                    .map(|(lang, count)| {
                        Property::new(
                            format!("{ECOSYSTEM_PROPERTY_PREFIX}{lang}"),
                            format!("{count} components"),
                        )
                    })
                    .collect(),
            ));
        }

        let mut metadata = match document.metadata.take() {
            Some(Lenient::Parsed(metadata)) => metadata,
            Some(Lenient::Raw(raw)) => {
                tracing::warn!("replacing metadata that is not an object: {raw}");
                Metadata::default()
            }
            None => Metadata::default(),
        };
        metadata.component = Some(Lenient::Parsed(root));
        document.metadata = Some(Lenient::Parsed(metadata));

        bom_ref
    }
}
