//! **Pre-flight checks and repairs for SBOMs bound for Dependency-Track.**
//!
//! `sbom-preflight` inspects CycloneDX and SPDX JSON documents before they are
//! uploaded to a vulnerability-management platform, and repairs the minimal
//! root component Syft writes into its CycloneDX output.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: A typed, partial model of the JSON documents. Unmodelled
//!   keys are kept verbatim so a fixed document loses nothing.
//! - **[`parsers`]**: Scoped file loading, format detection with an explicit
//!   CycloneDX-first tie-break, and component extraction.
//! - **[`diagnostics`]**: [`SbomChecker`] produces a [`DiagnosticReport`] per
//!   document: component count, type and ecosystem histograms, sample
//!   components and a verdict with remediation guidance.
//! - **[`normalize`]**: [`SbomFixer`] rewrites the root component as an
//!   application and adds a root dependency edge when the graph is missing.
//! - **[`reports`]**: Summary and JSON renderers for diagnostic reports.
//! - **[`config`]**: YAML configuration with discovery and validation.
//!
//! ## Checking an SBOM
//!
//! ```no_run
//! use sbom_preflight::SbomChecker;
//! use std::path::Path;
//!
//! let report = SbomChecker::new().check_path(Path::new("sbomAndroid.json"));
//! if report.valid {
//!     println!("{} components", report.component_count);
//! } else if let Some(failure) = &report.failure {
//!     eprintln!("{}", failure.message);
//! }
//! ```
//!
//! ## Fixing Syft output
//!
//! ```no_run
//! use sbom_preflight::normalize::{FixRequest, SbomFixer};
//!
//! let request = FixRequest::new("sbomiOS.json").with_name("My iOS App");
//! let outcome = SbomFixer::default().fix_path(&request)?;
//! println!("root is now {} v{}", outcome.identity.name, outcome.identity.version);
//! # Ok::<(), sbom_preflight::PreflightError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // self is kept for API consistency across reporters
    clippy::unused_self
)]

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, CheckConfig, ConfigError, FixConfig, OutputConfig, Validatable};
pub use diagnostics::{BatchReport, DiagnosticReport, Histogram, Platform, SbomChecker, SpdxPolicy};
pub use error::{FailureKind, PreflightError, Result};
pub use model::{Component, PackageUrl, SbomDocument, SbomFormat};
pub use normalize::{FixRequest, SbomFixer};
pub use parsers::{FormatDetector, FormatPriority, load_document};
pub use reports::{ReportFormat, ReportGenerator};
