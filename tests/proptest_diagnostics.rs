//! Property-based tests for detection, diagnostics and normalization.
//!
//! Ensures arbitrary input never panics, and that histogram counts and
//! fixer output keep their invariants across random documents.

use proptest::prelude::*;
use sbom_preflight::{
    SbomChecker, SbomFixer,
    model::{PackageUrl, SbomDocument, SbomFormat},
    normalize::ProjectIdentity,
    parsers::{FormatDetector, detect_format, parse_document_str},
};
use serde_json::{Value, json};
use std::path::Path;

fn ecosystem_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("npm".to_string()),
        Just("maven".to_string()),
        Just("cocoapods".to_string()),
        Just("golang".to_string()),
        "[a-z]{1,10}",
    ]
}

fn component_strategy() -> impl Strategy<Value = Value> {
    (
        ecosystem_strategy(),
        "[a-zA-Z0-9_-]{1,20}",
        "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
        prop::option::of(prop_oneof![Just("library"), Just("framework"), Just("file")]),
    )
        .prop_map(|(eco, name, version, ty)| {
            let mut component = json!({
                "bom-ref": format!("{eco}-{name}"),
                "name": name,
                "version": version,
                "purl": format!("pkg:{eco}/{name}@{version}"),
            });
            if let Some(ty) = ty {
                component["type"] = json!(ty);
            }
            component
        })
}

proptest! {
    // Text inputs mostly fail to parse, so these only assert no-panic.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_document_str_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_document_str(&s, Path::new("fuzz.json"), &FormatDetector::new());
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = parse_document_str(&s, Path::new("fuzz.json"), &FormatDetector::new());
    }

    #[test]
    fn purl_ecosystem_doesnt_panic(s in "\\PC{0,200}") {
        if let Some(purl) = PackageUrl::new(s.clone()) {
            let eco = purl.ecosystem();
            prop_assert_eq!(eco.is_some(), s.starts_with("pkg:"));
        }
    }

    #[test]
    fn check_value_doesnt_panic(
        key in prop_oneof![Just("bomFormat"), Just("spdxVersion"), Just("other")],
        components in prop::collection::vec(any::<i64>().prop_map(Value::from), 0..10),
    ) {
        let value = json!({ key: "x", "components": components, "packages": [] });
        let report = SbomChecker::new().check_value(value, Path::new("fuzz.json"));
        prop_assert_eq!(report.valid, report.failure.is_none());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn ecosystem_histogram_sums_to_component_count(
        components in prop::collection::vec(component_strategy(), 1..50),
    ) {
        let n = components.len();
        let value = json!({"bomFormat": "CycloneDX", "specVersion": "1.5", "components": components});
        let report = SbomChecker::new().check_value(value, Path::new("prop.json"));

        prop_assert!(report.valid);
        prop_assert_eq!(report.component_count, n);
        prop_assert_eq!(report.ecosystem_histogram.total(), n);
        prop_assert_eq!(report.type_histogram.total(), n);
        prop_assert!(report.sample_components.len() <= 5);
    }

    #[test]
    fn histograms_are_sorted_descending(
        components in prop::collection::vec(component_strategy(), 1..50),
    ) {
        let value = json!({"bomFormat": "CycloneDX", "components": components});
        let report = SbomChecker::new().check_value(value, Path::new("prop.json"));

        let counts: Vec<usize> = report.ecosystem_histogram.iter().map(|(_, c)| c).collect();
        prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn zero_components_is_always_invalid(
        cdx in any::<bool>(),
    ) {
        let value = if cdx {
            json!({"bomFormat": "CycloneDX", "components": []})
        } else {
            json!({"spdxVersion": "SPDX-2.3", "packages": []})
        };
        let report = SbomChecker::new().check_value(value, Path::new("empty.json"));
        prop_assert!(!report.valid);
        prop_assert_eq!(report.component_count, 0);
    }

    #[test]
    fn detection_is_total(
        has_cdx in any::<bool>(),
        has_spdx in any::<bool>(),
    ) {
        let mut value = json!({"name": "x"});
        if has_cdx {
            value["bomFormat"] = json!("CycloneDX");
        }
        if has_spdx {
            value["spdxVersion"] = json!("SPDX-2.3");
        }
        let expected = match (has_cdx, has_spdx) {
            (true, _) => SbomFormat::CycloneDx,
            (false, true) => SbomFormat::Spdx,
            (false, false) => SbomFormat::Unknown,
        };
        prop_assert_eq!(detect_format(&value).format, expected);
    }

    #[test]
    fn fix_is_idempotent_and_links_every_component(
        components in prop::collection::vec(component_strategy(), 0..30),
        name in "[A-Za-z ]{1,20}",
    ) {
        let n = components.len();
        let value = json!({"bomFormat": "CycloneDX", "components": components});
        let mut document = SbomDocument::from_value(value, SbomFormat::CycloneDx).unwrap();
        let identity = ProjectIdentity { name, version: "1.0.0".to_string() };
        let fixer = SbomFixer::default();

        prop_assert!(fixer.fix_document(&mut document, &identity));
        let once = document.clone();
        let edges = document.dependencies.as_ref().and_then(Value::as_array).unwrap();
        prop_assert_eq!(edges.len(), 1);
        prop_assert_eq!(edges[0]["dependsOn"].as_array().map(Vec::len), Some(n));

        prop_assert!(!fixer.fix_document(&mut document, &identity));
        prop_assert_eq!(once, document);
    }
}
