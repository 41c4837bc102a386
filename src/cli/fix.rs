//! Fix command handler.
//!
//! Implements the `fix` subcommand: normalize a Syft CycloneDX SBOM and write
//! the repaired document.

use crate::config::{FixConfig, Validatable};
use crate::normalize::FixRequest;
use crate::pipeline::{OutputTarget, exit_codes, write_output};
use anyhow::{Context, Result};

/// Run the fix command, returning the desired exit code.
///
/// Unusable input (missing, malformed, not CycloneDX) is logged and yields
/// [`exit_codes::FAILURE`]. Invalid configuration and failing to write the
/// output are returned as errors.
pub fn run_fix(request: &FixRequest, config: &FixConfig, quiet: bool) -> Result<i32> {
    config.ensure_valid()?;

    let target = OutputTarget::from_option(request.output.clone());
    let to_stdout = request.output.is_some() && target == OutputTarget::Stdout;
    let fixer = config.fixer();
    let result = if to_stdout {
        fixer.fix_path(request)
    } else {
        fixer.fix_and_write(request)
    };
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) if err.is_recoverable() => {
            tracing::error!("{err}");
            return Ok(exit_codes::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    let target = OutputTarget::from_option(Some(outcome.output_path.clone()));
    if to_stdout {
        let json = outcome
            .document
            .to_json_pretty()
            .context("failed to serialize fixed SBOM")?;
        write_output(&json, &target)?;
    }

    if !quiet {
        eprintln!("Fixed SBOM written to {target}");
        eprintln!("   Project name: {}", outcome.identity.name);
        eprintln!("   Version: {}", outcome.identity.version);
        eprintln!("   Components: {}", outcome.component_count());
    }
    if outcome.synthesized_dependencies {
        tracing::debug!("added a root dependency edge");
    }

    Ok(exit_codes::SUCCESS)
}
