//! Check command handler.
//!
//! Implements the `check` subcommand: diagnose every input file, render the
//! reports and signal failure if any file is invalid.

use crate::config::{AppConfig, Validatable};
use crate::diagnostics::SpdxPolicy;
use crate::pipeline::{OutputTarget, exit_codes, should_use_color, write_output};
use crate::reports::{ReportFormat, create_reporter_with_options};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// Command-line values that override the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct CheckOverrides {
    pub format: Option<ReportFormat>,
    pub spdx_policy: Option<SpdxPolicy>,
    pub sample_size: Option<usize>,
    pub no_color: bool,
}

impl CheckOverrides {
    /// Layer these values over `config`
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(policy) = self.spdx_policy {
            config.check.spdx_policy = policy;
        }
        if let Some(sample_size) = self.sample_size {
            config.check.sample_size = sample_size;
        }
        if self.no_color {
            config.output.no_color = true;
        }
    }
}

/// Run the check command, returning the desired exit code.
///
/// Per-file problems are part of the report and only affect the exit code.
/// Errors are returned for invalid configuration or unwritable output.
pub fn run_check(files: &[PathBuf], config: &AppConfig, output_file: Option<PathBuf>) -> Result<i32> {
    if files.is_empty() {
        bail!("no SBOM files given");
    }

    config.ensure_valid()?;

    tracing::debug!(
        "checking {} file(s) with spdx policy {}",
        files.len(),
        config.check.spdx_policy
    );
    let batch = config.check.checker().check_paths(files);

    let target = OutputTarget::from_option(output_file);
    let use_color = should_use_color(config.output.no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(config.output.format, use_color);
    let output = reporter
        .generate_report(&batch)
        .context("failed to render report")?;
    write_output(&output, &target)?;

    if batch.all_valid() {
        Ok(exit_codes::SUCCESS)
    } else {
        tracing::warn!("{} of {} SBOMs have issues", batch.invalid_count(), batch.reports.len());
        Ok(exit_codes::FAILURE)
    }
}
