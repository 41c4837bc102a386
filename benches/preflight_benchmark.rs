//! Benchmarks for the diagnose and fix hot paths.
//!
//! Run with: cargo bench --bench preflight_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sbom_preflight::SbomChecker;
use sbom_preflight::model::{SbomDocument, SbomFormat};
use sbom_preflight::normalize::{ProjectIdentity, SbomFixer};
use sbom_preflight::parsers::detect_format;
use serde_json::{Value, json};
use std::hint::black_box;
use std::path::Path;

const ECOSYSTEMS: [&str; 4] = ["npm", "maven", "cocoapods", "golang"];
const LANGUAGES: [&str; 3] = ["swift", "objective-c", "java"];

/// Generate a Syft-like CycloneDX document with `count` components.
fn generate_sbom(count: usize) -> Value {
    let components: Vec<Value> = (0..count)
        .map(|i| {
            let eco = ECOSYSTEMS[i % ECOSYSTEMS.len()];
            let name = format!("component-{i}");
            let version = format!("1.{}.{}", i % 10, i % 100);
            json!({
                "bom-ref": format!("pkg:{eco}/{name}@{version}?package-id={i:x}"),
                "type": if i % 7 == 0 { "file" } else { "library" },
                "name": name,
                "version": version,
                "purl": format!("pkg:{eco}/{name}@{version}"),
                "properties": [
                    {"name": "syft:package:foundBy", "value": "bench-cataloger"},
                    {"name": "syft:package:language", "value": LANGUAGES[i % LANGUAGES.len()]}
                ]
            })
        })
        .collect();

    json!({
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "metadata": {"component": {"bom-ref": "root", "type": "file", "name": "Podfile.lock"}},
        "components": components
    })
}

fn bench_detect(c: &mut Criterion) {
    let sbom = generate_sbom(1000);

    c.bench_function("detect_format_1000_components", |b| {
        b.iter(|| black_box(detect_format(black_box(&sbom))));
    });
}

fn bench_check_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_scaling");
    let checker = SbomChecker::new();

    for size in &[100usize, 1000, 10_000] {
        let document = SbomDocument::from_value(generate_sbom(*size), SbomFormat::CycloneDx)
            .expect("generated document is well-formed");
        group.bench_with_input(BenchmarkId::new("check_document", size), size, |b, _| {
            b.iter(|| {
                black_box(checker.check_document(black_box(&document), Path::new("bench.json")))
            });
        });
    }

    group.finish();
}

fn bench_fix_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("fix_scaling");
    let fixer = SbomFixer::default();
    let identity = ProjectIdentity {
        name: "Bench App".to_string(),
        version: "1.0.0".to_string(),
    };

    for size in &[100usize, 1000, 10_000] {
        let document = SbomDocument::from_value(generate_sbom(*size), SbomFormat::CycloneDx)
            .expect("generated document is well-formed");
        group.bench_with_input(BenchmarkId::new("fix_document", size), size, |b, _| {
            b.iter(|| {
                let mut doc = document.clone();
                black_box(fixer.fix_document(&mut doc, &identity));
                doc
            });
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let document = SbomDocument::from_value(generate_sbom(1000), SbomFormat::CycloneDx)
        .expect("generated document is well-formed");

    c.bench_function("to_json_pretty_1000_components", |b| {
        b.iter(|| black_box(document.to_json_pretty()));
    });
}

criterion_group!(
    benches,
    bench_detect,
    bench_check_scaling,
    bench_fix_scaling,
    bench_serialize
);
criterion_main!(benches);
