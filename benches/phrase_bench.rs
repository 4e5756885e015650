//! Date phrase and name folding benchmarks.
//!
//! Every scraped record goes through one phrase parse and two name folds, so
//! these sit on the hot path of a bulk collection.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `phrase` | Parse throughput per grammar, plus a rejected phrase |
//! | `normalize` | Folding ASCII, Romanian and mixed-script names |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench phrase_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fixrec::normalizer::normalize;
use fixrec::{phrase, ReferenceClock};
use std::hint::black_box;

fn phrase_bench(c: &mut Criterion) {
    let clock = ReferenceClock::ymd(2025, 4, 30).unwrap();
    let mut group = c.benchmark_group("phrase");
    group.throughput(Throughput::Elements(1));

    for (name, text) in [
        ("today", "astăzi, 15:30"),
        ("tomorrow", "mâine, 15:15"),
        ("day_month", "03.05, 16:00"),
        ("label_day", "lun. 28, 00:30"),
        ("fully_qualified", "Sâmbătă, 3 mai 2025, 19:30"),
        ("rejected", "foo, bar"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| phrase::parse(black_box(text), &clock))
        });
    }
    group.finish();
}

fn normalize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(1));

    for (name, text) in [
        ("ascii", "Universitatea Craiova"),
        ("romanian", "Oţelul Galaţi"),
        ("mixed", "  Śląsk Wrocław / Atlético  "),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| normalize(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(benches, phrase_bench, normalize_bench);
criterion_main!(benches);
