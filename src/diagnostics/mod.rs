//! SBOM diagnostics: component statistics and a pass/fail verdict.
//!
//! [`SbomChecker`] turns each input into a [`DiagnosticReport`] holding the
//! component count, type and ecosystem histograms, a few sample components
//! and, for failed documents, the failure kind with remediation guidance.

mod checker;
mod histogram;
mod remediation;
mod report;

pub use checker::{DEFAULT_SAMPLE_SIZE, SbomChecker, SpdxPolicy, check_files};
pub use histogram::Histogram;
pub use remediation::{Platform, REGENERATE_HINT, remediation_for};
pub use report::{BatchReport, ComponentSample, DiagnosticReport, Failure, ProjectSummary};
