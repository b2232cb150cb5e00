//! Balancing benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use treefold::{balance, perturb, shape};

fn benchmark_balancing(c: &mut Criterion) {
    for n in [1_000i64, 10_000] {
        c.bench_function(&format!("a1_n={n}"), |b| {
            b.iter(|| {
                let target = shape::near_complete(0..n).unwrap();
                let mut source = shape::near_complete(0..n).unwrap();
                let mut rng = StdRng::seed_from_u64(7);
                perturb::scramble(&mut source, &mut rng);
                let stats = balance::a1(&mut source, &target).unwrap();
                black_box(stats);
            });
        });
    }

    c.bench_function("a3_n=1000", |b| {
        b.iter(|| {
            let target = shape::near_complete(0..1_000).unwrap();
            let mut source = shape::near_complete(0..1_000).unwrap();
            let mut rng = StdRng::seed_from_u64(7);
            perturb::scramble(&mut source, &mut rng);
            let stats = balance::a3(&mut source, &target).unwrap();
            black_box(stats);
        });
    });
}

criterion_group!(benches, benchmark_balancing);
criterion_main!(benches);
