#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz format detection on arbitrary JSON values.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = sbom_preflight::parsers::detect_format(&value);
    }
});
