//! Configuration module for sbom-preflight.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - A JSON Schema of the file format
//!
//! # Configuration File
//!
//! Place a `.sbom-preflight.yaml` file in your project root or
//! `~/.config/sbom-preflight/`:
//!
//! ```yaml
//! check:
//!   spdx_policy: reject
//!   platforms: [ios]
//! fix:
//!   default_version: 0.1.0
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAMES, DEFAULT_CONFIG_FILE_NAME, MAX_SAMPLE_SIZE,
};
pub use types::{AppConfig, CheckConfig, FixConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_full_example_config,
    load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all options that can be set in
/// `.sbom-preflight.yaml` files. Editors can use it for validation and
/// autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = value["properties"].as_object().unwrap();
        assert!(properties.contains_key("check"));
        assert!(properties.contains_key("fix"));
        assert!(properties.contains_key("output"));
    }
}
