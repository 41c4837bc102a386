//! Single-document and batch diagnostics.
//!
//! A document passes through Load, Detect, Extract, Classify and Report. The
//! first failing stage ends the run and decides the failure kind; every
//! failure is recorded in the returned [`DiagnosticReport`] rather than
//! propagated, so a batch always processes every input.

use super::remediation::{Platform, remediation_for};
use super::report::{BatchReport, ComponentSample, DiagnosticReport, ProjectSummary};
use super::Histogram;
use crate::error::PreflightError;
use crate::model::{SbomDocument, SbomFormat};
use crate::parsers::{ComponentExtractor, FormatDetector, FormatPriority, load_json, parse_value};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Default number of sample components in a report
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// How the checker treats SPDX documents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SpdxPolicy {
    /// Read `packages` and report on them like CycloneDX components
    #[default]
    Extract,
    /// Fail with `UnsupportedFormat` and recommend regenerating as CycloneDX
    Reject,
}

impl std::fmt::Display for SpdxPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extract => write!(f, "extract"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Runs diagnostics over SBOM files.
#[derive(Debug, Clone)]
pub struct SbomChecker {
    detector: FormatDetector,
    extractor: ComponentExtractor,
    spdx_policy: SpdxPolicy,
    sample_size: usize,
    platforms: Vec<Platform>,
}

impl Default for SbomChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomChecker {
    /// Checker with default policies: SPDX extracted, 5 samples, all platforms
    #[must_use]
    pub fn new() -> Self {
        Self {
            detector: FormatDetector::new(),
            extractor: ComponentExtractor::new(),
            spdx_policy: SpdxPolicy::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            platforms: Platform::ALL.to_vec(),
        }
    }

    #[must_use]
    pub const fn with_spdx_policy(mut self, policy: SpdxPolicy) -> Self {
        self.spdx_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: FormatPriority) -> Self {
        self.detector = FormatDetector::with_priority(priority);
        self
    }

    /// Check every path in order; a failing file never stops the batch
    pub fn check_paths<P: AsRef<Path>>(&self, paths: &[P]) -> BatchReport {
        let reports = paths.iter().map(|p| self.check_path(p.as_ref())).collect();
        BatchReport { reports }
    }

    /// Load and check one file
    #[must_use]
    pub fn check_path(&self, path: &Path) -> DiagnosticReport {
        match load_json(path) {
            Ok(value) => self.check_value(value, path),
            Err(err) => self.failed(DiagnosticReport::new(path), &err),
        }
    }

    /// Check an already parsed JSON value; `source` only labels the report
    #[must_use]
    pub fn check_value(&self, value: Value, source: &Path) -> DiagnosticReport {
        match parse_value(value, source, &self.detector) {
            Ok(parsed) => self.check_document(&parsed.document, source),
            Err(err) => self.failed(DiagnosticReport::new(source), &err),
        }
    }

    /// Check a typed document.
    ///
    /// Borrows the document; nothing in it is modified.
    #[must_use]
    pub fn check_document(&self, document: &SbomDocument, source: &Path) -> DiagnosticReport {
        let mut report = DiagnosticReport::new(source);
        report.format = document.format;
        report.spec_version = document.version_label().map(str::to_string);
        report.project = project_summary(document);

        if document.format == SbomFormat::Spdx && self.spdx_policy == SpdxPolicy::Reject {
            let err = PreflightError::unsupported_format(
                SbomFormat::Spdx,
                "Dependency-Track requires CycloneDX format",
            );
            return self.failed(report, &err);
        }

        let components = match self.extractor.extract(document) {
            Ok(components) => components,
            Err(err) => return self.failed(report, &err),
        };

        report.component_count = components.len();
        if components.is_empty() {
            let err = PreflightError::ZeroComponents {
                format: document.format,
            };
            return self.failed(report, &err);
        }

        let mut types = Histogram::new();
        let mut ecosystems = Histogram::new();
        for component in &components {
            types.record(component.component_type);
            if let Some(ecosystem) = component.ecosystem() {
                ecosystems.record(ecosystem);
            }
        }
        report.type_histogram = types.sorted_desc();
        report.ecosystem_histogram = ecosystems.sorted_desc();

        report.sample_components = components
            .iter()
            .take(self.sample_size)
            .map(|c| ComponentSample {
                name: c.name.to_string(),
                version: c.version.to_string(),
                purl: c.purl.as_ref().map(ToString::to_string),
            })
            .collect();

        tracing::debug!(
            "{}: {} components, {} types, {} ecosystems",
            source.display(),
            report.component_count,
            report.type_histogram.len(),
            report.ecosystem_histogram.len()
        );

        report.valid = true;
        report
    }

    fn failed(&self, report: DiagnosticReport, err: &PreflightError) -> DiagnosticReport {
        tracing::warn!("{}: {}", report.source.display(), err);
        let format = match err {
            PreflightError::UnsupportedFormat { format, .. }
            | PreflightError::ZeroComponents { format } => *format,
            _ => report.format,
        };
        let remediation = remediation_for(err.kind(), format, &self.platforms);
        report.fail(err, remediation)
    }
}

fn project_summary(document: &SbomDocument) -> Option<ProjectSummary> {
    match document.format {
        SbomFormat::CycloneDx => {
            let root = document.root_component();
            Some(ProjectSummary {
                name: root.map_or("N/A", |c| c.display_name()).to_string(),
                version: Some(root.map_or("N/A", |c| c.display_version()).to_string()),
            })
        }
        SbomFormat::Spdx => document.document_name().map(|name| ProjectSummary {
            name: name.to_string(),
            version: None,
        }),
        SbomFormat::Unknown => None,
    }
}

/// Check a list of files with the default checker
pub fn check_files(paths: &[PathBuf]) -> BatchReport {
    SbomChecker::new().check_paths(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;

    fn check(value: Value) -> DiagnosticReport {
        SbomChecker::new().check_value(value, Path::new("test.json"))
    }

    #[test]
    fn test_single_component_scenario() {
        let report = check(json!({
            "bomFormat": "CycloneDX",
            "specVersion": "1.4",
            "components": [{"name": "left-pad", "version": "1.3.0",
                            "purl": "pkg:npm/left-pad@1.3.0", "type": "library"}]
        }));
        assert!(report.valid);
        assert_eq!(report.component_count, 1);
        assert_eq!(report.type_histogram.get("library"), 1);
        assert_eq!(report.ecosystem_histogram.get("npm"), 1);
        assert_eq!(report.spec_version.as_deref(), Some("1.4"));
        assert_eq!(report.sample_components[0].purl.as_deref(), Some("pkg:npm/left-pad@1.3.0"));
    }

    #[test]
    fn test_unread_fields_do_not_fail_the_check() {
        let report = check(json!({
            "bomFormat": "CycloneDX",
            "components": [{"name": "a", "purl": "pkg:npm/a@1"}],
            "dependencies": [{"ref": "a", "dependsOn": [{"ref": "b"}]}]
        }));
        assert!(report.valid, "{:?}", report.failure);
        assert_eq!(report.ecosystem_histogram.get("npm"), 1);

        let report = check(json!({
            "bomFormat": "CycloneDX",
            "specVersion": 1.5,
            "metadata": {"component": "root"},
            "components": [
                {"name": "a", "version": 3, "purl": "pkg:npm/a@3",
                 "properties": [{"name": "x", "value": ["l1", "l2"]}]},
                {"name": "b", "properties": {"x": "y"}, "externalRefs": "none"}
            ]
        }));
        assert!(report.valid, "{:?}", report.failure);
        assert_eq!(report.component_count, 2);
        assert_eq!(report.spec_version.as_deref(), Some("1.5"));
        assert_eq!(report.sample_components[0].version, "3");
        assert_eq!(report.project.unwrap().name, "N/A");
    }

    #[test]
    fn test_spdx_odd_external_refs_are_skipped() {
        let report = check(json!({
            "spdxVersion": "SPDX-2.3",
            "packages": [{"name": "a", "versionInfo": "1", "externalRefs": [
                "stray",
                {"referenceType": "purl", "referenceLocator": "pkg:pypi/a@1"}
            ]}]
        }));
        assert!(report.valid);
        assert_eq!(report.ecosystem_histogram.get("pypi"), 1);
    }

    #[test]
    fn test_empty_spdx_policies() {
        let doc = json!({"spdxVersion": "SPDX-2.3", "name": "proj", "packages": []});

        let extract = check(doc.clone());
        assert!(!extract.valid);
        assert_eq!(extract.failure.unwrap().kind, FailureKind::ZeroComponents);

        let reject = SbomChecker::new()
            .with_spdx_policy(SpdxPolicy::Reject)
            .check_value(doc, Path::new("test.json"));
        assert!(!reject.valid);
        let failure = reject.failure.unwrap();
        assert_eq!(failure.kind, FailureKind::UnsupportedFormat);
        assert!(failure.remediation.iter().any(|l| l.contains("cyclonedx-json")));
    }

    #[test]
    fn test_unknown_format_is_invalid() {
        let report = check(json!({"name": "something"}));
        assert!(!report.valid);
        assert_eq!(report.format, SbomFormat::Unknown);
        let failure = report.failure.unwrap();
        assert_eq!(failure.kind, FailureKind::UnsupportedFormat);
        assert!(failure.message.contains("neither CycloneDX"));
    }

    #[test]
    fn test_zero_components_remediation_respects_platforms() {
        let report = SbomChecker::new()
            .with_platforms(vec![Platform::Android])
            .check_value(json!({"bomFormat": "CycloneDX", "components": []}), Path::new("a.json"));
        let failure = report.failure.unwrap();
        assert!(failure.remediation.iter().any(|l| l.contains("Android")));
        assert!(!failure.remediation.iter().any(|l| l.contains("iOS")));
    }

    #[test]
    fn test_histograms_sorted_descending() {
        let report = check(json!({
            "bomFormat": "CycloneDX",
            "components": [
                {"name": "a", "type": "library", "purl": "pkg:pypi/a@1"},
                {"name": "b", "type": "framework", "purl": "pkg:npm/b@1"},
                {"name": "c", "type": "framework", "purl": "pkg:npm/c@1"},
                {"name": "d", "purl": "not-a-purl"}
            ]
        }));
        let types: Vec<_> = report.type_histogram.iter().collect();
        assert_eq!(types, vec![("framework", 2), ("library", 1), ("package", 1)]);
        let ecosystems: Vec<_> = report.ecosystem_histogram.iter().collect();
        assert_eq!(ecosystems, vec![("npm", 2), ("pypi", 1)]);
    }

    #[test]
    fn test_sample_size_and_remaining_count() {
        let components: Vec<_> = (0..8).map(|i| json!({"name": format!("c{i}")})).collect();
        let report = check(json!({"bomFormat": "CycloneDX", "components": components}));
        assert_eq!(report.sample_components.len(), 5);
        assert_eq!(report.unsampled_count(), 3);

        let report = SbomChecker::new().with_sample_size(2).check_value(
            json!({"bomFormat": "CycloneDX", "components": [{"name": "x"}]}),
            Path::new("a.json"),
        );
        assert_eq!(report.sample_components.len(), 1);
        assert_eq!(report.unsampled_count(), 0);
    }

    #[test]
    fn test_project_summary() {
        let report = check(json!({
            "bomFormat": "CycloneDX",
            "metadata": {"component": {"name": "App", "version": "2.0"}},
            "components": [{"name": "a"}]
        }));
        let project = report.project.unwrap();
        assert_eq!(project.name, "App");
        assert_eq!(project.version.as_deref(), Some("2.0"));

        let report = check(json!({"spdxVersion": "SPDX-2.3", "name": "proj", "packages": [{"name": "a"}]}));
        assert_eq!(report.project.unwrap().name, "proj");
        assert_eq!(report.spec_version.as_deref(), Some("SPDX-2.3"));
    }

    #[test]
    fn test_check_document_does_not_mutate() {
        let value = json!({"bomFormat": "CycloneDX", "components": [{"name": "a"}]});
        let parsed = parse_value(value, Path::new("a.json"), &FormatDetector::new()).unwrap();
        let before = parsed.document.clone();
        let _ = SbomChecker::new().check_document(&parsed.document, Path::new("a.json"));
        assert_eq!(parsed.document, before);
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"bomFormat": "CycloneDX", "components": [{"name": "a"}]}"#)
            .unwrap();
        let missing = dir.path().join("missing.json");

        let batch = check_files(&[missing, good]);
        assert_eq!(batch.reports.len(), 2);
        assert!(!batch.reports[0].valid);
        assert!(batch.reports[1].valid);
        assert!(!batch.all_valid());
    }
}
