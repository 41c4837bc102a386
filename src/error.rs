//! Unified error types for sbom-preflight.
//!
//! Four error kinds describe why a single SBOM cannot be used
//! ([`PreflightError::FileNotFound`], [`PreflightError::InvalidJson`],
//! [`PreflightError::UnsupportedFormat`], [`PreflightError::ZeroComponents`]).
//! They are recovered at the per-file boundary of a batch: the file's verdict
//! becomes invalid and the remaining files are still processed. IO failures
//! while writing output and configuration problems are fatal.

use crate::model::SbomFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for sbom-preflight operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PreflightError {
    /// The input path does not resolve to a readable file
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input could not be parsed as a JSON document
    #[error("JSON error in {}: {message}", path.display())]
    InvalidJson { path: PathBuf, message: String },

    /// Neither CycloneDX nor SPDX, or a format the operation does not accept
    #[error("Unsupported SBOM format ({format}): {reason}")]
    UnsupportedFormat { format: SbomFormat, reason: String },

    /// The document was recognised but lists no components
    #[error("0 components detected in {format} document")]
    ZeroComponents { format: SbomFormat },

    /// Writing an output file failed
    #[error("IO error at {}: {message}", path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenient Result type for sbom-preflight operations
pub type Result<T> = std::result::Result<T, PreflightError>;

/// Stable identifier for the per-file error kinds, used in JSON reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FailureKind {
    FileNotFound,
    InvalidJson,
    UnsupportedFormat,
    ZeroComponents,
    Io,
    Config,
}

impl PreflightError {
    /// Create a file-not-found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an invalid JSON error
    pub fn invalid_json(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidJson {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: SbomFormat, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format,
            reason: reason.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: path.into(),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Map a read failure to the per-file taxonomy.
    ///
    /// A missing path is `FileNotFound`; anything else that stops the read
    /// (permissions, a directory, invalid UTF-8) means the content cannot be
    /// parsed and is reported as `InvalidJson`.
    pub fn from_read(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            _ => Self::invalid_json(path, err.to_string()),
        }
    }

    /// Whether the error only invalidates one file of a batch.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::InvalidJson { .. }
                | Self::UnsupportedFormat { .. }
                | Self::ZeroComponents { .. }
        )
    }

    /// The kind tag of this error
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::FileNotFound { .. } => FailureKind::FileNotFound,
            Self::InvalidJson { .. } => FailureKind::InvalidJson,
            Self::UnsupportedFormat { .. } => FailureKind::UnsupportedFormat,
            Self::ZeroComponents { .. } => FailureKind::ZeroComponents,
            Self::Io { .. } => FailureKind::Io,
            Self::Config(_) => FailureKind::Config,
        }
    }
}
