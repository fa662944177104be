//! Pipeline benchmark: CSV text → records → feature vectors.

use cheat_trainer::features::{parse_sequence, FeatureExtractor};
use cheat_trainer::loader::read_records;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fmt::Write;

fn make_csv(n: usize) -> String {
    let mut csv =
        String::from("timeSpentPerQuestion,answerChangesPerQuestion,tabSwitchCount,label\n");
    for i in 0..n {
        let times: Vec<String> = (0..20).map(|q| ((i + q) % 90).to_string()).collect();
        let changes: Vec<String> = (0..20).map(|q| ((i * q) % 3).to_string()).collect();
        writeln!(
            csv,
            "\"[{}]\",\"[{}]\",{},{}",
            times.join(","),
            changes.join(","),
            i % 7,
            i % 2
        )
        .unwrap();
    }
    csv
}

fn bench_parse_sequence(c: &mut Criterion) {
    let text = format!(
        "[{}]",
        (0..50).map(|i| format!("{}.5", i)).collect::<Vec<_>>().join(", ")
    );
    c.bench_function("parse_sequence_50", |b| {
        b.iter(|| parse_sequence(black_box(&text)).unwrap())
    });
}

fn bench_feature_extraction(c: &mut Criterion) {
    let csv = make_csv(1000);
    let records = read_records(csv.as_bytes()).unwrap();
    let extractor = FeatureExtractor::new();

    c.bench_function("feature_extract_1000_records", |b| {
        b.iter(|| extractor.extract_all(black_box(&records)).unwrap())
    });
}

fn bench_load_and_extract(c: &mut Criterion) {
    let csv = make_csv(1000);
    let extractor = FeatureExtractor::new();

    c.bench_function("load_and_extract_1000_records", |b| {
        b.iter(|| {
            let records = read_records(black_box(csv.as_bytes())).unwrap();
            black_box(extractor.extract_all(&records).unwrap())
        })
    });
}

criterion_group!(
    benches,
    bench_parse_sequence,
    bench_feature_extraction,
    bench_load_and_extract
);
criterion_main!(benches);
