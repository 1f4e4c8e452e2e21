use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kepler_planner::kepler::eccentric_from_mean;
use kepler_planner::{Attractor, ClassicalElements, Orbit};

const SAMPLES: usize = 10_000;

/// Pre-generated `(M, e)` pairs with `e` drawn from `range`.
fn cases(rng: &mut StdRng, e_min: f64, e_max: f64, m_max: f64) -> Vec<(f64, f64)> {
    (0..SAMPLES)
        .map(|_| {
            let e = rng.random_range(e_min..e_max);
            let m = rng.random_range(-m_max..m_max);
            (m, e)
        })
        .collect()
}

fn bench_solver(c: &mut Criterion, name: &str, seed: u64, e_min: f64, e_max: f64, m_max: f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    c.bench_function(name, |b| {
        b.iter_batched(
            || cases(&mut rng, e_min, e_max, m_max),
            |cases| {
                for (m, e) in cases {
                    let f = eccentric_from_mean(black_box(m), black_box(e));
                    black_box(f.ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Typical elliptical regime: e ∈ [0.0, 0.7)
fn bench_typical(c: &mut Criterion) {
    bench_solver(c, "solve_kepler_equation/elliptical_e<0.7", 0xDEADBEEF, 0.0, 0.7, 20.0);
}

/// High-eccentricity ellipses: e ∈ [0.7, 0.99)
fn bench_high_e(c: &mut Criterion) {
    bench_solver(c, "solve_kepler_equation/elliptical_0.7..0.99", 0xBADF00D, 0.7, 0.99, 20.0);
}

/// Hyperbolic regime, including far-out mean anomalies.
fn bench_hyperbolic(c: &mut Criterion) {
    bench_solver(c, "solve_kepler_equation/hyperbolic_1.01..5", 0xFEEDFACE, 1.01, 5.0, 500.0);
}

/// Full position lookup by time on a fixed Molniya-like orbit.
fn bench_position_at_time(c: &mut Criterion) {
    let orbit = Orbit::from_elements(
        &ClassicalElements::from_degrees(0.74, 26_600.0, 63.4, 270.0, 40.0),
        Arc::new(Attractor::earth()),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let times: Vec<f64> = (0..SAMPLES).map(|_| rng.random_range(0.0..1.0e6)).collect();

    c.bench_function("orbit/position_at_time", |b| {
        b.iter(|| {
            for &t in &times {
                black_box(orbit.position_at_time(black_box(t)).ok());
            }
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_hyperbolic, bench_position_at_time
);
criterion_main!(benches);
