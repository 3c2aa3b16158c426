//! Microbenchmark that isolates the aligner from all other overhead
//! (candidate collection, sorting, rendering).

use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use sift::{Candidate, Pattern, could_match, score};

/// Deterministic corpus of identifier-shaped candidates.
fn generate_corpus() -> Vec<String> {
    const WORDS: &[&str] = &[
        "get", "set", "index", "match", "score", "pattern", "buffer", "reader", "value", "state", "item", "handle",
        "parse", "write", "cache", "field",
    ];
    let mut rng = StdRng::seed_from_u64(42);
    (0..10_000)
        .map(|_| {
            let parts = rng.random_range(2..5);
            let mut name = String::new();
            for i in 0..parts {
                if i > 0 {
                    name.push(if rng.random_bool(0.5) { '_' } else { '.' });
                }
                name.push_str(WORDS[rng.random_range(0..WORDS.len())]);
            }
            name
        })
        .collect()
}

fn bench_matcher(c: &mut Criterion) {
    let corpus = generate_corpus();

    c.bench_function("micro_score", |b| {
        let pattern = Pattern::compile(b"gsc").expect("pattern compiles");
        b.iter(|| {
            let mut count = 0u64;
            for line in &corpus {
                if score(&pattern, &Candidate::new(line.as_bytes()), false).is_some() {
                    count += 1;
                }
            }
            count
        });
    });

    c.bench_function("micro_score_prefiltered", |b| {
        let pattern = Pattern::compile(b"gsc").expect("pattern compiles");
        b.iter(|| {
            let mut count = 0u64;
            for line in &corpus {
                let candidate = Candidate::new(line.as_bytes());
                if could_match(&pattern, &candidate) && score(&pattern, &candidate, false).is_some() {
                    count += 1;
                }
            }
            count
        });
    });

    c.bench_function("micro_score_name_only", |b| {
        let pattern = Pattern::compile(b"match").expect("pattern compiles");
        b.iter(|| {
            let mut count = 0u64;
            for line in &corpus {
                if score(&pattern, &Candidate::new(line.as_bytes()), true).is_some() {
                    count += 1;
                }
            }
            count
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_matcher
);
criterion_main!(benches);
