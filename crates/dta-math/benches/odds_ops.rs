//! Criterion benchmarks for `dta-math`.
//!
//! The update is evaluated once per catalog test per assessment, so these
//! mostly guard against accidental regressions in the log-odds path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dta_math::{post_test_probability, post_test_probability_log};

fn bench_post_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("post_test");

    for (name, pre, lr) in [
        ("low_prior_strong_lr", 0.05, 12.0),
        ("even_prior", 0.5, 9.3),
        ("high_prior_rule_out", 0.65, 0.1),
    ] {
        group.bench_with_input(BenchmarkId::new("direct", name), &(pre, lr), |b, &(p, l)| {
            b.iter(|| black_box(post_test_probability(black_box(p), black_box(l))));
        });

        group.bench_with_input(BenchmarkId::new("log_odds", name), &(pre, lr), |b, &(p, l)| {
            b.iter(|| black_box(post_test_probability_log(black_box(p), black_box(l))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_post_test);
criterion_main!(benches);
