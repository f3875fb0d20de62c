use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_studentized_range(c: &mut Criterion) {
    let qs: Vec<f64> = (1..=100).map(|i| i as f64 * 0.06).collect();

    c.bench_function("studentized_range_cdf_k4_df297_100", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &q in &qs {
                acc += hs_prob::studentized_range::cdf(q, 4.0, 297.0).unwrap();
            }
            black_box(acc)
        })
    });

    c.bench_function("studentized_range_cdf_k4_dfinf_100", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &q in &qs {
                acc += hs_prob::studentized_range::cdf(q, 4.0, f64::INFINITY).unwrap();
            }
            black_box(acc)
        })
    });

    c.bench_function("studentized_range_quantile_95", |b| {
        b.iter(|| black_box(hs_prob::studentized_range::quantile(0.95, 4.0, 297.0).unwrap()))
    });
}

criterion_group!(benches, bench_studentized_range);
criterion_main!(benches);
