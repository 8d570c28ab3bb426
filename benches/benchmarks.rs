use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mime_range::cache::{CacheConfig, ParseCache};
use mime_range::*;

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

// Benchmark media type parsing
fn bench_parse_media_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_media_type");

    let test_cases = vec![
        ("simple", "text/html"),
        ("with_charset", "text/html; charset=utf-8"),
        ("quoted", "multipart/form-data; boundary=\"----WebKit FormBoundary7MA4YWxkTrZu0gW\""),
    ];

    for (name, input) in test_cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, &input| {
            b.iter(|| MediaType::from_string(black_box(input)));
        });
    }

    group.finish();
}

// Benchmark media type formatting
fn bench_format_media_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_media_type");

    let mt = MediaType::new(
        "multipart",
        "form-data",
        [("charset", "utf-8"), ("boundary", "----boundary")],
    );

    group.bench_function("with_params", |b| {
        b.iter(|| black_box(&mt).to_string());
    });

    group.finish();
}

// Benchmark range parsing and negotiation
fn bench_media_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_range");

    group.bench_function("parse_browser_accept", |b| {
        b.iter(|| MediaRange::from_string(black_box(BROWSER_ACCEPT)));
    });

    let range = MediaRange::from_string(BROWSER_ACCEPT).unwrap();
    let available: Vec<MediaType> = ["application/json", "application/xml", "text/html"]
        .iter()
        .map(|s| MediaType::from_string(s).unwrap())
        .collect();

    group.bench_function("query", |b| {
        b.iter(|| black_box(&range).query(available.iter()));
    });

    group.bench_function("quality_miss", |b| {
        let missing = MediaType::from_string("font/woff2").unwrap();
        let strict = MediaRange::from_string("text/html, application/json;q=0.5").unwrap();
        b.iter(|| black_box(&strict).quality(black_box(&missing)));
    });

    group.finish();
}

// Benchmark cached constructors
fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");

    group.bench_function("range_hit", |b| {
        let cache: ParseCache<MediaRange> = ParseCache::new(CacheConfig::default());
        b.iter(|| cache.parse(black_box(BROWSER_ACCEPT)));
    });

    group.bench_function("global_type_hit", |b| {
        b.iter(|| type_from_string(black_box("application/rss+xml")));
    });

    group.bench_function("file_type", |b| {
        b.iter(|| file_type(black_box("index.html")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_media_type,
    bench_format_media_type,
    bench_media_range,
    bench_cache
);
criterion_main!(benches);
