//! Remediation guidance attached to failed diagnostics.

use crate::error::FailureKind;
use crate::model::SbomFormat;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Command that regenerates an SBOM in the accepted format
pub const REGENERATE_HINT: &str = "syft <target> -o cyclonedx-json > sbom.json";

/// Build target a zero-component hint is written for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// Every supported platform, in display order
    pub const ALL: [Self; 2] = [Self::Android, Self::Ios];

    /// How to produce a populated SBOM for this platform
    #[must_use]
    pub fn guidance(&self) -> Vec<String> {
        match self {
            Self::Android => vec![
                "For Android: Scan the APK/AAB after compilation".to_string(),
                "  ./gradlew assembleRelease".to_string(),
                "  syft app/build/outputs/apk/release/app-release.apk -o cyclonedx-json > sbom.json"
                    .to_string(),
            ],
            Self::Ios => vec![
                "For iOS: Scan the Podfile.lock".to_string(),
                "  syft Podfile.lock -o cyclonedx-json > sbom.json".to_string(),
            ],
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Android => write!(f, "android"),
            Self::Ios => write!(f, "ios"),
        }
    }
}

/// Guidance lines for a failure of `kind` on a document of `format`.
///
/// Load failures carry no guidance: the error message already names the file.
#[must_use]
pub fn remediation_for(kind: FailureKind, format: SbomFormat, platforms: &[Platform]) -> Vec<String> {
    match kind {
        FailureKind::ZeroComponents => {
            let mut lines = vec![
                "Dependency-Track will have nothing to analyze".to_string(),
                "No vulnerabilities will be detected".to_string(),
            ];
            for platform in platforms {
                lines.extend(platform.guidance());
            }
            lines
        }
        FailureKind::UnsupportedFormat if format == SbomFormat::Spdx => vec![
            "Dependency-Track requires CycloneDX format".to_string(),
            "Regenerate SBOM with '-o cyclonedx-json'".to_string(),
            format!("  Example: {REGENERATE_HINT}"),
        ],
        FailureKind::UnsupportedFormat => vec![
            "Generate a CycloneDX JSON SBOM".to_string(),
            format!("  Example: {REGENERATE_HINT}"),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_components_lists_selected_platforms() {
        let both = remediation_for(FailureKind::ZeroComponents, SbomFormat::CycloneDx, &Platform::ALL);
        assert!(both.iter().any(|l| l.contains("Android")));
        assert!(both.iter().any(|l| l.contains("Podfile.lock")));

        let ios = remediation_for(FailureKind::ZeroComponents, SbomFormat::CycloneDx, &[Platform::Ios]);
        assert!(!ios.iter().any(|l| l.contains("Android")));
        assert!(ios.iter().any(|l| l.contains("iOS")));
    }

    #[test]
    fn test_spdx_rejection_recommends_cyclonedx() {
        let lines = remediation_for(FailureKind::UnsupportedFormat, SbomFormat::Spdx, &[]);
        assert!(lines.iter().any(|l| l.contains("-o cyclonedx-json")));
    }

    #[test]
    fn test_load_failures_have_no_guidance() {
        assert!(remediation_for(FailureKind::FileNotFound, SbomFormat::Unknown, &Platform::ALL).is_empty());
        assert!(remediation_for(FailureKind::InvalidJson, SbomFormat::Unknown, &Platform::ALL).is_empty());
    }
}
