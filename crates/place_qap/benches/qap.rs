//! QAP solver benchmarks.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use place_core::perm::random_perm;
use place_core::prelude::*;
use place_core::rng::seeded_rng;
use place_qap::{CetsSolver, CostTensor, DreznerSolver};
use rand::Rng;

fn random_tensor(n: usize, seed: u64) -> CostTensor {
    let mut rng = seeded_rng(seed);
    let mut c = vec![vec![vec![vec![0i64; n]; n]; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            for k in 0..n {
                for l in 0..n {
                    if k == l {
                        continue;
                    }
                    let v = rng.gen_range(0..100);
                    c[i][j][k][l] = v;
                    c[j][i][l][k] = v;
                }
            }
        }
    }
    CostTensor::from_nested(&c).unwrap()
}

fn bench_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("tensor_cost");

    for n in [8, 12, 16] {
        let tensor = random_tensor(n, n as u64);
        let perm = random_perm(n, &mut seeded_rng(1));

        group.bench_with_input(BenchmarkId::new("n", n), &tensor, |b, tensor| {
            b.iter(|| tensor.cost(&perm))
        });
    }

    group.finish();
}

fn bench_swap_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_delta");

    for n in [8, 12, 16] {
        let tensor = random_tensor(n, n as u64);
        let perm = random_perm(n, &mut seeded_rng(2));

        group.bench_with_input(BenchmarkId::new("n", n), &tensor, |b, tensor| {
            b.iter(|| tensor.swap_delta(&perm, 0, n - 1))
        });
    }

    group.finish();
}

fn bench_drezner_round(c: &mut Criterion) {
    let tensor = random_tensor(8, 21);
    let common = CommonParams {
        time: -1.0,
        max_iters: 1,
        seed: 7,
        ..CommonParams::new(1, 8)
    };

    c.bench_function("drezner_round_8", |b| {
        b.iter(|| {
            let mut solver =
                DreznerSolver::new(tensor.clone(), &common, &DreznerParams::default()).unwrap();
            solver.solve().unwrap()
        })
    });
}

fn bench_cets_iteration(c: &mut Criterion) {
    let tensor = random_tensor(8, 22);
    let common = CommonParams {
        time: -1.0,
        max_iters: 1,
        seed: 7,
        ..CommonParams::new(1, 8)
    };
    let params = CetsParams {
        pool_size: 20,
        ..CetsParams::default()
    };

    c.bench_function("cets_iteration_8", |b| {
        b.iter(|| {
            let mut solver = CetsSolver::new(tensor.clone(), &common, &params).unwrap();
            solver.solve().unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_cost,
    bench_swap_delta,
    bench_drezner_round,
    bench_cets_iteration,
);
criterion_main!(benches);
