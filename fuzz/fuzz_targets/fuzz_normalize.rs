#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_preflight::model::{SbomDocument, SbomFormat};
use sbom_preflight::normalize::{ProjectIdentity, SbomFixer};

/// Fuzz the fixer on arbitrary CycloneDX-shaped documents.
///
/// A second run over the fixed document must not change it.
fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(mut document) = SbomDocument::from_value(value, SbomFormat::CycloneDx) else {
        return;
    };

    let fixer = SbomFixer::default();
    let identity = ProjectIdentity {
        name: "fuzz".to_string(),
        version: "1.0.0".to_string(),
    };
    fixer.fix_document(&mut document, &identity);
    let once = document.clone();
    fixer.fix_document(&mut document, &identity);
    assert_eq!(once, document);

    let _ = document.to_json_pretty();
});
