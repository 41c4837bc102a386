//! Format detection for parsed SBOM documents.
//!
//! Detection is a pure function of the top-level keys: `bomFormat` marks a
//! CycloneDX document and `spdxVersion` marks an SPDX one. When both markers
//! are present the configured [`FormatPriority`] decides.

use crate::model::SbomFormat;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level key that marks a CycloneDX document
pub const CYCLONEDX_MARKER: &str = "bomFormat";

/// Top-level key that marks an SPDX document
pub const SPDX_MARKER: &str = "spdxVersion";

/// Which format wins when a document carries both markers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
pub enum FormatPriority {
    /// `bomFormat` wins over `spdxVersion`
    #[default]
    #[serde(rename = "cyclonedx-first")]
    #[value(name = "cyclonedx-first")]
    CycloneDxFirst,
    /// `spdxVersion` wins over `bomFormat`
    #[serde(rename = "spdx-first")]
    SpdxFirst,
}

/// Outcome of format detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    /// The detected format; `Unknown` when no marker was found
    pub format: SbomFormat,
    /// `specVersion` (CycloneDX) or `spdxVersion` (SPDX), when present
    pub version: Option<String>,
    /// Any warnings about the detection
    pub warnings: Vec<String>,
}

impl DetectionResult {
    fn unknown(reason: &str) -> Self {
        Self {
            format: SbomFormat::Unknown,
            version: None,
            warnings: vec![reason.to_string()],
        }
    }

    /// Whether downstream stages can proceed
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.format.is_known()
    }
}

/// Classifies an untyped JSON document as CycloneDX, SPDX or Unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatDetector {
    priority: FormatPriority,
}

impl FormatDetector {
    /// Create a detector with the default CycloneDX-first priority
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with an explicit tie-break priority
    #[must_use]
    pub const fn with_priority(priority: FormatPriority) -> Self {
        Self { priority }
    }

    /// The tie-break priority in use
    #[must_use]
    pub const fn priority(&self) -> FormatPriority {
        self.priority
    }

    /// Detect the format of a parsed document.
    ///
    /// Never fails: a non-object value or an object without markers is
    /// classified as [`SbomFormat::Unknown`].
    #[must_use]
    pub fn detect(&self, document: &Value) -> DetectionResult {
        let Some(object) = document.as_object() else {
            tracing::debug!("top-level JSON value is not an object");
            return DetectionResult::unknown("top-level JSON value is not an object");
        };

        let has_cdx = object.contains_key(CYCLONEDX_MARKER);
        let has_spdx = object.contains_key(SPDX_MARKER);

        let format = match (has_cdx, has_spdx, self.priority) {
            (true, true, FormatPriority::CycloneDxFirst) | (true, false, _) => {
                SbomFormat::CycloneDx
            }
            (true, true, FormatPriority::SpdxFirst) | (false, true, _) => SbomFormat::Spdx,
            (false, false, _) => {
                tracing::debug!("no {CYCLONEDX_MARKER} or {SPDX_MARKER} key found");
                return DetectionResult::unknown(
                    "neither CycloneDX (bomFormat) nor SPDX (spdxVersion) markers found",
                );
            }
        };

        let mut warnings = Vec::new();
        if has_cdx && has_spdx {
            warnings.push(format!(
                "document carries both {CYCLONEDX_MARKER} and {SPDX_MARKER}; treating it as {format}"
            ));
        }

        let version_key = match format {
            SbomFormat::Spdx => SPDX_MARKER,
            _ => "specVersion",
        };
        let version = object.get(version_key).and_then(scalar_text);

        tracing::debug!(
            "detected {} (version: {})",
            format,
            version.as_deref().unwrap_or("unspecified")
        );

        DetectionResult {
            format,
            version,
            warnings,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Detect with the default priority
#[must_use]
pub fn detect_format(document: &Value) -> DetectionResult {
    FormatDetector::new().detect(document)
}
