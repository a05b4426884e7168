//! Benchmarks for the extraction and deduplication pipeline.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::io::Write;

use hostsmate::collector::DomainCollector;
use hostsmate::extractor::extract_domain;
use hostsmate::formatter::{format_raw_lines, PipelineContext};
use hostsmate::whitelist::WhitelistSet;

/// Generate a raw artifact mixing the line shapes found in public lists
fn generate_raw(count: usize) -> String {
    (0..count)
        .map(|i| match i % 5 {
            0 => format!("127.0.0.1 ads{}.example.com\n", i),
            1 => format!("0.0.0.0 tracker{}.example.net # comment\n", i),
            2 => format!("||pixel{}.example.org^\n", i / 2),
            3 => "# section header\n".to_string(),
            _ => format!("0.0.0.0 ads{}.example.com\n", i - 4),
        })
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_domain");

    let lines = [
        ("loopback", "127.0.0.1 ads.example.com"),
        ("null_route", "0.0.0.0 tracker.example.net extra"),
        ("pattern", "||pixel.example.org^$third-party"),
        ("no_match", "!!! nothing to see here"),
    ];
    for (name, line) in lines {
        group.bench_function(name, |b| b.iter(|| black_box(extract_domain(black_box(line)))));
    }

    group.finish();
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");

    for size in [1000, 10000, 100000] {
        let raw = generate_raw(size);
        group.bench_with_input(BenchmarkId::new("lines", size), &raw, |b, raw| {
            b.iter(|| {
                let mut collector = DomainCollector::new();
                for line in raw.lines() {
                    collector.insert(extract_domain(line));
                }
                black_box(collector.len())
            });
        });
    }

    group.finish();
}

fn bench_format_raw_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_raw_lines");
    let dir = tempfile::TempDir::new().unwrap();

    for size in [10000, 100000] {
        let path = dir.path().join(format!("raw_{}", size));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(generate_raw(size).as_bytes()).unwrap();

        let whitelist = WhitelistSet::from_text("127.0.0.1 ads0.example.com\n");
        group.bench_with_input(BenchmarkId::new("artifact", size), &path, |b, path| {
            b.iter(|| {
                let mut ctx = PipelineContext::new(whitelist.clone());
                format_raw_lines(&mut ctx, path).unwrap();
                black_box(ctx.collector.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_collect, bench_format_raw_lines);
criterion_main!(benches);
