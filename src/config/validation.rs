//! Configuration validation for sbom-preflight.

use super::defaults::MAX_SAMPLE_SIZE;
use super::types::{AppConfig, CheckConfig, FixConfig, OutputConfig};
use crate::error::PreflightError;

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fail with [`PreflightError::Config`] listing every problem found.
    fn ensure_valid(&self) -> Result<(), PreflightError> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let details: Vec<_> = errors.iter().map(ToString::to_string).collect();
        Err(PreflightError::config(details.join("; ")))
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.check.validate());
        errors.extend(self.fix.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for CheckConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.sample_size > MAX_SAMPLE_SIZE {
            errors.push(ConfigError::new(
                "check.sample_size",
                format!(
                    "Sample size must be at most {MAX_SAMPLE_SIZE}, got {}",
                    self.sample_size
                ),
            ));
        }

        for (i, platform) in self.platforms.iter().enumerate() {
            if self.platforms[..i].contains(platform) {
                errors.push(ConfigError::new(
                    "check.platforms",
                    format!("Platform '{platform}' is listed more than once"),
                ));
            }
        }

        errors
    }
}

impl Validatable for FixConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let required = [
            ("fix.default_version", &self.default_version),
            ("fix.fallback_name", &self.fallback_name),
            ("fix.placeholder_bom_ref", &self.placeholder_bom_ref),
            ("fix.language_property", &self.language_property),
            ("fix.output_suffix", &self.output_suffix),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ConfigError::new(field, "Value must not be empty"));
            }
        }

        if self.output_suffix.contains(['/', '\\']) {
            errors.push(ConfigError::new(
                "fix.output_suffix",
                format!(
                    "Suffix must not contain a path separator, got '{}'",
                    self.output_suffix
                ),
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Both fields are closed enums or booleans
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Platform;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_sample_size_bound() {
        let config = CheckConfig {
            sample_size: MAX_SAMPLE_SIZE + 1,
            ..CheckConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "check.sample_size");

        let zero = CheckConfig {
            sample_size: 0,
            ..CheckConfig::default()
        };
        assert!(zero.is_valid());
    }

    #[test]
    fn test_duplicate_platforms() {
        let config = CheckConfig {
            platforms: vec![Platform::Ios, Platform::Android, Platform::Ios],
            ..CheckConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("ios"));
    }

    #[test]
    fn test_fix_config_validation() {
        let config = FixConfig {
            default_version: " ".to_string(),
            output_suffix: "/fixed".to_string(),
            ..FixConfig::default()
        };
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["fix.default_version", "fix.output_suffix"]);
    }

    #[test]
    fn test_app_config_collects_all_sections() {
        let config = AppConfig {
            check: CheckConfig {
                sample_size: 1000,
                ..CheckConfig::default()
            },
            fix: FixConfig {
                fallback_name: String::new(),
                ..FixConfig::default()
            },
            ..AppConfig::default()
        };
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_ensure_valid_reports_config_error() {
        assert!(AppConfig::default().ensure_valid().is_ok());

        let config = FixConfig {
            fallback_name: String::new(),
            output_suffix: "a/b".to_string(),
            ..FixConfig::default()
        };
        let err = config.ensure_valid().unwrap_err();
        assert_eq!(err.kind(), crate::error::FailureKind::Config);
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: fix.fallback_name: Value must not be empty; \
             fix.output_suffix: Suffix must not contain a path separator, got 'a/b'"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("check.sample_size", "too big");
        assert_eq!(err.to_string(), "check.sample_size: too big");
    }
}
