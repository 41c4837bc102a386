//! Per-document diagnostic report.

use super::Histogram;
use crate::error::{FailureKind, PreflightError};
use crate::model::SbomFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Statistics and verdict for one input document.
///
/// `valid` is true exactly when `failure` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub source: PathBuf,
    pub format: SbomFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSummary>,
    pub component_count: usize,
    pub type_histogram: Histogram,
    pub ecosystem_histogram: Histogram,
    pub sample_components: Vec<ComponentSample>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl DiagnosticReport {
    /// An empty report for `source`, not yet judged
    pub(crate) fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            format: SbomFormat::Unknown,
            spec_version: None,
            project: None,
            component_count: 0,
            type_histogram: Histogram::new(),
            ecosystem_histogram: Histogram::new(),
            sample_components: Vec::new(),
            valid: false,
            failure: None,
        }
    }

    /// Mark the report invalid with the given error and guidance
    pub(crate) fn fail(mut self, error: &PreflightError, remediation: Vec<String>) -> Self {
        self.valid = false;
        self.failure = Some(Failure {
            kind: error.kind(),
            message: error.to_string(),
            remediation,
        });
        self
    }

    /// File name of the source, for headings
    #[must_use]
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map_or_else(|| self.source.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Number of components beyond the sample
    #[must_use]
    pub fn unsampled_count(&self) -> usize {
        self.component_count
            .saturating_sub(self.sample_components.len())
    }
}

/// Root component (CycloneDX) or document name (SPDX)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One of the first few components of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSample {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
}

/// Why a document is not usable, and what to do about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remediation: Vec<String>,
}

/// Reports for every input of one invocation, in argument order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BatchReport {
    pub reports: Vec<DiagnosticReport>,
}

impl BatchReport {
    /// True when every document passed (vacuously true for no documents)
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.reports.iter().all(|r| r.valid)
    }

    /// Number of documents that failed
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.valid).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_sets_kind_and_message() {
        let report = DiagnosticReport::new(Path::new("dir/a.json"))
            .fail(&PreflightError::file_not_found("dir/a.json"), Vec::new());
        assert!(!report.valid);
        let failure = report.failure.unwrap();
        assert_eq!(failure.kind, FailureKind::FileNotFound);
        assert_eq!(failure.message, "File not found: dir/a.json");
    }

    #[test]
    fn test_source_name_is_file_name() {
        assert_eq!(DiagnosticReport::new(Path::new("dir/a.json")).source_name(), "a.json");
    }

    #[test]
    fn test_json_field_names() {
        let report = DiagnosticReport::new(Path::new("a.json"));
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("componentCount").is_some());
        assert!(value.get("typeHistogram").is_some());
        assert!(value.get("ecosystemHistogram").is_some());
        assert!(value.get("sampleComponents").is_some());
        assert!(value.get("failure").is_none());
        assert_eq!(value["format"], "Unknown");
    }

    #[test]
    fn test_batch_all_valid() {
        let mut good = DiagnosticReport::new(Path::new("a.json"));
        good.valid = true;
        let bad = DiagnosticReport::new(Path::new("b.json"))
            .fail(&PreflightError::invalid_json("b.json", "eof"), Vec::new());

        let batch = BatchReport {
            reports: vec![good.clone()],
        };
        assert!(batch.all_valid());

        let batch = BatchReport {
            reports: vec![good, bad],
        };
        assert!(!batch.all_valid());
        assert_eq!(batch.invalid_count(), 1);
    }
}
