//! Configuration types for check and fix runs.

use super::defaults::{
    DEFAULT_PROJECT_VERSION, DEFAULT_SAMPLE_SIZE, FALLBACK_PROJECT_NAME, FIXED_SUFFIX,
    PLACEHOLDER_BOM_REF, SYFT_LANGUAGE_PROPERTY,
};
use crate::diagnostics::{Platform, SbomChecker, SpdxPolicy};
use crate::normalize::{NormalizeConfig, SbomFixer};
use crate::parsers::FormatPriority;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Unified application configuration loaded from a config file.
///
/// Command-line flags override individual values after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Diagnostic settings
    pub check: CheckConfig,
    /// Fixer settings
    pub fix: FixConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Settings for `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CheckConfig {
    /// How SPDX documents are treated: extract or reject
    pub spdx_policy: SpdxPolicy,
    /// Number of sample components shown per document
    pub sample_size: usize,
    /// Platforms whose remediation is shown for empty SBOMs
    pub platforms: Vec<Platform>,
    /// Which format wins when both markers are present
    pub format_priority: FormatPriority,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            spdx_policy: SpdxPolicy::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            platforms: Platform::ALL.to_vec(),
            format_priority: FormatPriority::default(),
        }
    }
}

impl CheckConfig {
    /// Build a checker with these settings
    #[must_use]
    pub fn checker(&self) -> SbomChecker {
        SbomChecker::new()
            .with_spdx_policy(self.spdx_policy)
            .with_sample_size(self.sample_size)
            .with_platforms(self.platforms.clone())
            .with_priority(self.format_priority)
    }
}

/// Settings for `fix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FixConfig {
    /// Project version when `--project-version` is not given
    pub default_version: String,
    /// Project name when none is given and the file name yields none
    pub fallback_name: String,
    /// bom-ref for a root component that had none
    pub placeholder_bom_ref: String,
    /// Component property holding the language
    pub language_property: String,
    /// Suffix added to the input stem for the default output file
    pub output_suffix: String,
}

impl Default for FixConfig {
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

impl From<&FixConfig> for NormalizeConfig {
    fn from(config: &FixConfig) -> Self {
        Self {
            default_version: config.default_version.clone(),
            fallback_name: config.fallback_name.clone(),
            placeholder_bom_ref: config.placeholder_bom_ref.clone(),
            language_property: config.language_property.clone(),
            output_suffix: config.output_suffix.clone(),
        }
    }
}

impl FixConfig {
    /// Build a fixer with these settings
    #[must_use]
    pub fn fixer(&self) -> SbomFixer {
        SbomFixer::new(self.into())
    }
}

/// Output settings for reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format for `check`
    pub format: ReportFormat,
    /// Disable colored output
    pub no_color: bool,
}
