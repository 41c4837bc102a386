//! Loading, format detection and component extraction.
//!
//! Every input goes through the same three steps:
//!
//! 1. [`load_json`] reads the file in one scoped call and parses it into an
//!    untyped [`serde_json::Value`]
//! 2. [`FormatDetector`] classifies the value as CycloneDX, SPDX or Unknown
//! 3. The value is converted into a typed [`SbomDocument`]
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_preflight::parsers::{load_document, ComponentExtractor, FormatDetector};
//! use std::path::Path;
//!
//! let parsed = load_document(Path::new("sbom.json"), &FormatDetector::new())?;
//! for component in ComponentExtractor::new().extract(&parsed.document)? {
//!     println!("{} @ {}", component.name, component.version);
//! }
//! # Ok::<(), sbom_preflight::PreflightError>(())
//! ```

mod detection;
mod extract;

pub use detection::{
    CYCLONEDX_MARKER, DetectionResult, FormatDetector, FormatPriority, SPDX_MARKER, detect_format,
};
pub use extract::{ComponentExtractor, ExtractedComponent};

use crate::error::{PreflightError, Result};
use crate::model::{SbomDocument, SbomFormat};
use serde_json::Value;
use std::path::Path;

/// Maximum SBOM file size (512 MB).
pub const MAX_SBOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// A typed document together with how it was detected.
#[derive(Debug, Clone)]
pub struct ParsedSbom {
    pub document: SbomDocument,
    pub detection: DetectionResult,
}

impl ParsedSbom {
    /// The detected format
    #[must_use]
    pub const fn format(&self) -> SbomFormat {
        self.document.format
    }
}

/// Read and parse a JSON file.
///
/// A missing path is `FileNotFound`. Oversized, unreadable or unparseable
/// content is `InvalidJson`. The file handle is released before this returns.
pub fn load_json(path: &Path) -> Result<Value> {
    let metadata = std::fs::metadata(path).map_err(|e| PreflightError::from_read(path, e))?;
    if metadata.is_dir() {
        return Err(PreflightError::invalid_json(path, "path is a directory"));
    }
    if metadata.len() > MAX_SBOM_FILE_SIZE {
        return Err(PreflightError::invalid_json(
            path,
            format!(
                "file is {} MB, exceeding the {} MB limit",
                metadata.len() / (1024 * 1024),
                MAX_SBOM_FILE_SIZE / (1024 * 1024),
            ),
        ));
    }

    let content = std::fs::read_to_string(path).map_err(|e| PreflightError::from_read(path, e))?;
    let value = parse_json_str(&content, path)?;
    tracing::info!("loaded {} ({} bytes)", path.display(), content.len());
    Ok(value)
}

/// Parse JSON text, attributing failures to `path`
pub fn parse_json_str(content: &str, path: &Path) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| PreflightError::invalid_json(path, e.to_string()))
}

/// Detect the format of a parsed value and convert it to a typed document.
///
/// An `Unknown` document is `UnsupportedFormat`. Modelled fields with an
/// unexpected shape do not fail the conversion: they are kept as raw JSON and
/// the components that do not fit are left out of extraction. Only a value
/// that is not a JSON object is `InvalidJson`.
pub fn parse_value(value: Value, path: &Path, detector: &FormatDetector) -> Result<ParsedSbom> {
    let detection = detector.detect(&value);

    if !detection.is_known() {
        let reason = detection
            .warnings
            .first()
            .cloned()
            .unwrap_or_else(|| "unknown format".to_string());
        return Err(PreflightError::unsupported_format(SbomFormat::Unknown, reason));
    }

    for warning in &detection.warnings {
        tracing::warn!("{}: {}", path.display(), warning);
    }

    let document = SbomDocument::from_value(value, detection.format).map_err(|e| {
        PreflightError::invalid_json(
            path,
            format!("malformed {} document: {e}", detection.format),
        )
    })?;

    Ok(ParsedSbom {
        document,
        detection,
    })
}

/// Load, detect and convert one file
pub fn load_document(path: &Path, detector: &FormatDetector) -> Result<ParsedSbom> {
    let value = load_json(path)?;
    parse_value(value, path, detector)
}

/// Parse and detect in-memory JSON text
pub fn parse_document_str(
    content: &str,
    path: &Path,
    detector: &FormatDetector,
) -> Result<ParsedSbom> {
    let value = parse_json_str(content, path)?;
    parse_value(value, path, detector)
}
