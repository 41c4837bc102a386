//! Default values shared by configuration, CLI and discovery.

pub use crate::diagnostics::DEFAULT_SAMPLE_SIZE;
pub use crate::normalize::{
    DEFAULT_PROJECT_VERSION, FALLBACK_PROJECT_NAME, FIXED_SUFFIX, PLACEHOLDER_BOM_REF,
    SYFT_LANGUAGE_PROPERTY,
};

/// Upper bound accepted for `check.sample_size`
pub const MAX_SAMPLE_SIZE: usize = 100;

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "sbom-preflight";

/// Config file names searched in each directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-preflight.yaml",
    ".sbom-preflight.yml",
    "sbom-preflight.yaml",
    "sbom-preflight.yml",
];

/// File name written by `config init`
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".sbom-preflight.yaml";
