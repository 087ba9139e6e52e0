//! Benchmarks for dataset loading, filtering and pagination.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use datahub_catalog::dataset::{Dataset, DatasetDocument};
use datahub_catalog::filter::{FilterCriteria, FilterEngine};
use datahub_catalog::flags::FlagStore;
use datahub_catalog::model::{DataSource, DatasetRecord, FlagKind, SelectionPath};
use datahub_catalog::pagination::paginate;
use datahub_catalog::resolver::CodeTables;

const REGIONS: [&str; 6] = ["USA", "BRA", "JPN", "IND", "DEU", "WLD"];
const INDICATORS: [&str; 4] = ["Prices", "Labour Market", "National Accounts", "External Sector"];

/// Synthetic region-coded records.
fn generate_records(count: usize) -> Vec<DatasetRecord> {
    (0..count)
        .map(|i| {
            let region = REGIONS[i % REGIONS.len()];
            let indicator = INDICATORS[i % INDICATORS.len()];
            DatasetRecord::new(
                format!("BENCH.{region}.{i}"),
                format!("{region}: {indicator} series {i}"),
                indicator,
                "Headline",
                "",
            )
            .with_region(region)
        })
        .collect()
}

/// Synthetic document JSON with a duplicate every tenth record.
fn generate_document(count: usize) -> String {
    let mut records = generate_records(count);
    let duplicates: Vec<_> = records.iter().step_by(10).cloned().collect();
    records.extend(duplicates);
    serde_json::json!({ "frequent": records, "categories": {} }).to_string()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [100, 1000, 10000] {
        let data = generate_document(size);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("document", size), &data, |b, data| {
            b.iter(|| {
                let document = DatasetDocument::from_json(DataSource::Imf, data);
                black_box(document.map(|d| Dataset::from_document(DataSource::Imf, d)))
            });
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let tables = CodeTables::builtin();
    let engine = FilterEngine::new(DataSource::Imf, &tables);

    let mut flags = FlagStore::new();
    for i in (0..10000).step_by(7) {
        flags.set(&format!("BENCH.{}.{i}", REGIONS[i % REGIONS.len()]), FlagKind::Plus, true);
    }

    let cases = [
        ("all", FilterCriteria::new()),
        (
            "region",
            FilterCriteria::new().with_selection(SelectionPath::new().with_category("Asia")),
        ),
        (
            "country_indicator",
            FilterCriteria::new().with_selection(
                SelectionPath::new()
                    .with_category("Americas")
                    .with_subcategory("United States")
                    .with_subset("Prices"),
            ),
        ),
        ("search", FilterCriteria::new().with_query("labour")),
        ("flag", FilterCriteria::new().with_flag(FlagKind::Plus)),
    ];

    for size in [1000, 10000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));

        for (name, criteria) in &cases {
            group.bench_with_input(BenchmarkId::new(*name, size), &records, |b, records| {
                b.iter(|| black_box(engine.filter(records, criteria, &flags)));
            });
        }
    }

    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate");
    let records = generate_records(10000);
    let refs: Vec<&DatasetRecord> = records.iter().collect();

    for page in [1_i64, 500, 999_999] {
        group.bench_with_input(BenchmarkId::new("page", page), &page, |b, &page| {
            b.iter(|| black_box(paginate(&refs, page, 10)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_filter, bench_paginate);
criterion_main!(benches);
