#![no_main]
use libfuzzer_sys::fuzz_target;
use std::path::Path;

/// Fuzz the full diagnostic path: parse, detect, convert, extract and classify.
///
/// Every input must yield a report; the verdict must agree with the failure.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(s)
    {
        let report = sbom_preflight::SbomChecker::new().check_value(value, Path::new("fuzz.json"));
        assert_eq!(report.valid, report.failure.is_none());
    }
});
