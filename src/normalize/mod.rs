//! Repairs Syft CycloneDX output for Dependency-Track.
//!
//! The fix path runs [`MetadataNormalizer`] then [`DependencyGraphSynthesizer`]
//! over a loaded CycloneDX document. [`SbomFixer`] wraps both together with
//! loading and output path selection.
//!
//! ```no_run
//! use sbom_preflight::normalize::{FixRequest, SbomFixer};
//! use std::path::Path;
//!
//! let outcome = SbomFixer::default().fix_path(&FixRequest::new(Path::new("sbomiOS.json")))?;
//! std::fs::write(&outcome.output_path, outcome.document.to_json_pretty()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dependencies;
mod metadata;

pub use dependencies::DependencyGraphSynthesizer;
pub use metadata::{
    APPLICATION_TYPE, ECOSYSTEM_PROPERTY_PREFIX, MetadataNormalizer, ProjectIdentity,
    UNKNOWN_LANGUAGE, derive_project_name,
};

use crate::error::{PreflightError, Result};
use crate::model::{SbomDocument, SbomFormat};
use crate::parsers::{FormatDetector, load_document};
use std::path::{Path, PathBuf};

/// Built-in project version when none is given
pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";

/// Built-in project name when none is given and none can be derived
pub const FALLBACK_PROJECT_NAME: &str = "iOS Application";

/// Built-in bom-ref for a root component that had none
pub const PLACEHOLDER_BOM_REF: &str = "root-component";

/// Syft property naming a component's language
pub const SYFT_LANGUAGE_PROPERTY: &str = "syft:package:language";

/// Suffix appended to the input stem for the default output path
pub const FIXED_SUFFIX: &str = "_fixed";

/// Fixed values used by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeConfig {
    pub default_version: String,
    pub fallback_name: String,
    pub placeholder_bom_ref: String,
    pub language_property: String,
    pub output_suffix: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_PROJECT_VERSION.to_string(),
            fallback_name: FALLBACK_PROJECT_NAME.to_string(),
            placeholder_bom_ref: PLACEHOLDER_BOM_REF.to_string(),
            language_property: SYFT_LANGUAGE_PROPERTY.to_string(),
            output_suffix: FIXED_SUFFIX.to_string(),
        }
    }
}

/// Inputs of one fix run
#[derive(Debug, Clone, Default)]
pub struct FixRequest {
    pub input: PathBuf,
    /// Explicit output path; `None` derives `<stem><suffix><ext>`
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub version: Option<String>,
}

impl FixRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Result of a fix run, ready to be written
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub document: SbomDocument,
    pub identity: ProjectIdentity,
    pub output_path: PathBuf,
    /// Whether a root dependency edge was added
    pub synthesized_dependencies: bool,
}

impl FixOutcome {
    /// Number of well-formed entries in `components`
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.document.components.as_ref().map_or(0, |c| c.entries().count())
    }

    /// Write the fixed document to `output_path` as indented JSON.
    ///
    /// Any failure is [`PreflightError::Io`] naming the output path; nothing
    /// else about the run is undone.
    pub fn write(&self) -> Result<()> {
        let json = self
            .document
            .to_json_pretty()
            .map_err(|e| PreflightError::io(&self.output_path, e.into()))?;
        std::fs::write(&self.output_path, json)
            .map_err(|e| PreflightError::io(&self.output_path, e))?;
        tracing::info!("wrote fixed SBOM to {}", self.output_path.display());
        Ok(())
    }
}

/// Loads, normalizes and prepares a CycloneDX document for writing.
#[derive(Debug, Clone, Default)]
pub struct SbomFixer {
    config: NormalizeConfig,
    detector: FormatDetector,
}

impl SbomFixer {
    #[must_use]
    pub fn new(config: NormalizeConfig) -> Self {
        Self {
            config,
            detector: FormatDetector::new(),
        }
    }

    /// The settings in use
    #[must_use]
    pub const fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize the root component and add a dependency graph if missing.
    ///
    /// Returns whether a dependency edge was synthesized.
    pub fn fix_document(&self, document: &mut SbomDocument, identity: &ProjectIdentity) -> bool {
        let root_ref = MetadataNormalizer::new(self.config.clone()).normalize(document, identity);
        DependencyGraphSynthesizer::new().synthesize(document, &root_ref)
    }

    /// Run the whole fix over one input file.
    ///
    /// Only CycloneDX input is accepted; SPDX and unrecognised documents are
    /// `UnsupportedFormat`.
    pub fn fix_path(&self, request: &FixRequest) -> Result<FixOutcome> {
        let parsed = load_document(&request.input, &self.detector)?;
        let mut document = parsed.document;
        if document.format != SbomFormat::CycloneDx {
            return Err(PreflightError::unsupported_format(
                document.format,
                "only CycloneDX documents can be fixed",
            ));
        }

        let identity = ProjectIdentity::resolve(
            &request.input,
            request.name.as_deref(),
            request.version.as_deref(),
            &self.config,
        );
        let synthesized_dependencies = self.fix_document(&mut document, &identity);

        let output_path = request
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&request.input, &self.config.output_suffix));

        tracing::debug!(
            "fixed {} as {} v{}",
            request.input.display(),
            identity.name,
            identity.version
        );

        Ok(FixOutcome {
            document,
            identity,
            output_path,
            synthesized_dependencies,
        })
    }
}

impl SbomFixer {
    /// [`SbomFixer::fix_path`], then write the result to its output path
    pub fn fix_and_write(&self, request: &FixRequest) -> Result<FixOutcome> {
        let outcome = self.fix_path(request)?;
        outcome.write()?;
        Ok(outcome)
    }
}

/// `<dir>/<stem><suffix><.ext>` next to `input`
#[must_use]
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(file_name)
}
