//! Summary report generator for shell output.
//!
//! One framed block per input file, followed by a closing verdict line.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::diagnostics::{BatchReport, DiagnosticReport, Failure, Histogram};
use crate::error::FailureKind;
use crate::model::SbomFormat;

const RULE_WIDTH: usize = 60;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn rule(&self) -> String {
        self.color(&"=".repeat(RULE_WIDTH), "dim")
    }

    fn ok(&self, text: &str) -> String {
        format!("{} {text}", self.color("[OK]", "green"))
    }

    fn error(&self, text: &str) -> String {
        format!("{} {text}", self.color("[ERROR]", "red"))
    }

    fn info(&self, text: &str) -> String {
        format!("{} {text}", self.color("[INFO]", "cyan"))
    }

    /// Render the block for one document
    #[must_use]
    pub fn render_document(&self, report: &DiagnosticReport) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            self.rule(),
            format!("{} {}", self.color("Analyzing:", "bold"), report.source_name()),
            self.rule(),
        ];

        self.push_header(report, &mut lines);

        if let Some(failure) = &report.failure {
            self.push_failure(failure, &mut lines);
            return lines;
        }

        lines.push(String::new());
        lines.push(self.ok(&format!("{} components detected", report.component_count)));

        lines.push(String::new());
        lines.push(self.color("Component types:", "bold"));
        self.push_histogram(&report.type_histogram, &mut lines);

        if !report.ecosystem_histogram.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Ecosystems:", "bold"));
            self.push_histogram(&report.ecosystem_histogram, &mut lines);
        }

        lines.push(String::new());
        lines.push(self.color(
            &format!("Component examples (first {}):", report.sample_components.len()),
            "bold",
        ));
        for (i, sample) in report.sample_components.iter().enumerate() {
            lines.push(format!("   {}. {} @ {}", i + 1, sample.name, sample.version));
            if let Some(purl) = &sample.purl {
                lines.push(format!("      {}", self.color(purl, "dim")));
            }
        }
        let remaining = report.unsampled_count();
        if remaining > 0 {
            lines.push(self.color(&format!("   ... and {remaining} other components"), "dim"));
        }

        lines.push(String::new());
        lines.push(self.rule());
        lines.push(self.ok("This SBOM is valid and ready for Dependency-Track"));
        lines.push(self.rule());
        lines
    }

    fn push_header(&self, report: &DiagnosticReport, lines: &mut Vec<String>) {
        match report.format {
            SbomFormat::Unknown => {
                if report
                    .failure
                    .as_ref()
                    .is_some_and(|f| f.kind == FailureKind::UnsupportedFormat)
                {
                    lines.push(format!(
                        "{} Unknown (neither CycloneDX nor SPDX)",
                        self.color("Format:", "cyan")
                    ));
                }
            }
            format => {
                let version = report.spec_version.as_deref().unwrap_or("Unknown");
                lines.push(format!("{} {format} {version}", self.color("Format:", "cyan")));
            }
        }

        if let Some(project) = &report.project {
            let version = project
                .version
                .as_ref()
                .map(|v| format!(" v{v}"))
                .unwrap_or_default();
            lines.push(format!(
                "{} {}{version}",
                self.color("Project:", "cyan"),
                project.name
            ));
        }
    }

    fn push_failure(&self, failure: &Failure, lines: &mut Vec<String>) {
        lines.push(String::new());
        lines.push(self.error(&failure.message));
        if !failure.remediation.is_empty() {
            lines.push(String::new());
            lines.push(self.info("Solution:"));
            for line in &failure.remediation {
                lines.push(format!("   {line}"));
            }
        }
    }

    fn push_histogram(&self, histogram: &Histogram, lines: &mut Vec<String>) {
        for (key, count) in histogram.iter() {
            lines.push(format!("   - {key}: {count}"));
        }
    }

    /// The closing verdict for a batch
    #[must_use]
    pub fn render_verdict(&self, batch: &BatchReport) -> Vec<String> {
        if batch.all_valid() {
            vec![
                String::new(),
                self.ok("All SBOMs are valid!"),
                self.info("You can upload them to Dependency-Track"),
            ]
        } else {
            vec![
                String::new(),
                format!(
                    "{} Some SBOMs have issues - see above",
                    self.color("[WARNING]", "yellow")
                ),
            ]
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_report(&self, batch: &BatchReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        for report in &batch.reports {
            lines.extend(self.render_document(report));
        }
        lines.extend(self.render_verdict(batch));

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::SbomChecker;
    use serde_json::json;
    use std::path::Path;

    fn render(value: serde_json::Value) -> String {
        let report = SbomChecker::new().check_value(value, Path::new("dir/sbomApp.json"));
        SummaryReporter::new()
            .no_color()
            .generate_report(&BatchReport {
                reports: vec![report],
            })
            .unwrap()
    }

    #[test]
    fn test_valid_document_block() {
        let components: Vec<_> = (0..7)
            .map(|i| json!({"name": format!("lib{i}"), "version": "1.0", "type": "library",
                            "purl": format!("pkg:npm/lib{i}@1.0")}))
            .collect();
        let output = render(json!({
            "bomFormat": "CycloneDX",
            "specVersion": "1.5",
            "metadata": {"component": {"name": "App", "version": "3.2"}},
            "components": components
        }));

        assert!(output.contains("Analyzing: sbomApp.json"));
        assert!(output.contains("Format: CycloneDX 1.5"));
        assert!(output.contains("Project: App v3.2"));
        assert!(output.contains("[OK] 7 components detected"));
        assert!(output.contains("   - library: 7"));
        assert!(output.contains("   - npm: 7"));
        assert!(output.contains("   1. lib0 @ 1.0"));
        assert!(output.contains("      pkg:npm/lib0@1.0"));
        assert!(output.contains("... and 2 other components"));
        assert!(output.contains("[OK] This SBOM is valid and ready for Dependency-Track"));
        assert!(output.contains("[OK] All SBOMs are valid!"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_zero_components_block() {
        let output = render(json!({"bomFormat": "CycloneDX", "specVersion": "1.4", "components": []}));
        assert!(output.contains("[ERROR] 0 components detected in CycloneDX document"));
        assert!(output.contains("[INFO] Solution:"));
        assert!(output.contains("Podfile.lock"));
        assert!(output.contains("[WARNING] Some SBOMs have issues - see above"));
        assert!(!output.contains("ready for Dependency-Track"));
    }

    #[test]
    fn test_unknown_format_block() {
        let output = render(json!({"hello": "world"}));
        assert!(output.contains("Format: Unknown (neither CycloneDX nor SPDX)"));
        assert!(output.contains("[ERROR]"));
    }

    #[test]
    fn test_colored_output() {
        let report = SbomChecker::new().check_value(
            json!({"bomFormat": "CycloneDX", "components": [{"name": "a"}]}),
            Path::new("a.json"),
        );
        let output = SummaryReporter::new()
            .generate_report(&BatchReport {
                reports: vec![report],
            })
            .unwrap();
        assert!(output.contains("\x1b[32m[OK]\x1b[0m"));
    }
}
