use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use durand_kerner::{
    filter::{gaussian_impulse_response, Window},
    Overrides, Precision,
};

criterion_main!(micro_benches, realistic_benches);
criterion_group!(micro_benches, unity_machine, unity_arbitrary);

/// `x^n - 1`
fn roots_of_unity(n: usize) -> Vec<f64> {
    let mut coeffs = vec![0.0; n + 1];
    coeffs[0] = 1.0;
    coeffs[n] = -1.0;
    coeffs
}

pub fn unity_machine(c: &mut Criterion) {
    let mut group = c.benchmark_group("roots of unity machine");
    for n in [2, 4, 8, 16, 32] {
        let coeffs = roots_of_unity(n);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                black_box(Precision::Machine.find_roots(black_box(&coeffs), &Overrides::default()))
            })
        });
    }
    group.finish();
}

pub fn unity_arbitrary(c: &mut Criterion) {
    let mut group = c.benchmark_group("roots of unity dps 50");
    for n in [2, 4, 8, 16] {
        let coeffs = roots_of_unity(n);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                black_box(
                    Precision::arbitrary(50).find_roots(black_box(&coeffs), &Overrides::default()),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(realistic_benches, gaussian_filter_zeros);

pub fn gaussian_filter_zeros(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian filter zeros");
    group.sample_size(10);
    for taps in [3, 5, 7, 9, 11] {
        let coeffs = gaussian_impulse_response(1.0, taps, Window::Hann);
        for (name, precision) in [
            ("machine", Precision::Machine),
            ("dps 30", Precision::arbitrary(30)),
            ("dps 50", Precision::arbitrary(50)),
        ] {
            group.bench_function(BenchmarkId::new(name, taps), |b| {
                b.iter(|| {
                    black_box(precision.find_roots(black_box(&coeffs), &Overrides::default()))
                })
            });
        }
    }
    group.finish();
}
