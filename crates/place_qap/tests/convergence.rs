//! End-to-end scenarios over the tensor-form solvers.

use place_core::prelude::*;
use place_qap::{brute_force, CetsSolver, CostTensor, DreznerSolver};

fn zero_tensor(n: usize) -> CostTensor {
    let c = vec![vec![vec![vec![0i64; n]; n]; n]; n];
    CostTensor::from_nested(&c).unwrap()
}

/// Only pair (0, 1) costs anything: |k - l| over a line of 3 slots.
fn forced_ordering_tensor() -> CostTensor {
    let n = 3;
    let mut c = vec![vec![vec![vec![0i64; n]; n]; n]; n];
    for k in 0..n {
        for l in 0..n {
            let d = (k as i64 - l as i64).abs();
            c[0][1][k][l] = d;
            c[1][0][l][k] = d;
        }
    }
    CostTensor::from_nested(&c).unwrap()
}

/// Pair (0, 2) pays one unit exactly when its slots are two apart.
fn rotational_tensor() -> CostTensor {
    let n = 4;
    let mut c = vec![vec![vec![vec![0i64; n]; n]; n]; n];
    for k in 0..n {
        for l in 0..n {
            if (k as i64 - l as i64).abs() == 2 {
                c[0][2][k][l] = 1;
                c[2][0][l][k] = 1;
            }
        }
    }
    CostTensor::from_nested(&c).unwrap()
}

fn common(n: usize, time: f64, seed: i64) -> CommonParams {
    CommonParams::new(1, n).with_time(time).with_seed(seed)
}

#[test]
fn trivial_instance_costs_zero() {
    let tensor = zero_tensor(3);

    let mut drezner =
        DreznerSolver::new(tensor.clone(), &common(3, 0.05, 1), &DreznerParams::default()).unwrap();
    assert_eq!(tensor.cost(&drezner.solve().unwrap()), 0);

    let mut cets = CetsSolver::new(
        tensor.clone(),
        &common(3, 0.05, 1),
        &CetsParams {
            pool_size: 5,
            ..CetsParams::default()
        },
    )
    .unwrap();
    assert_eq!(tensor.cost(&cets.solve().unwrap()), 0);
}

#[test]
fn forced_ordering_reaches_optimum() {
    let tensor = forced_ordering_tensor();
    let (_, optimum) = brute_force(&tensor);
    assert_eq!(optimum, 1);

    let mut drezner =
        DreznerSolver::new(tensor.clone(), &common(3, 0.1, 2), &DreznerParams::default()).unwrap();
    let perm = drezner.solve().unwrap();
    assert_eq!(tensor.cost(&perm), 1);
    assert_eq!((perm[0] as i64 - perm[1] as i64).abs(), 1);

    let mut cets = CetsSolver::new(
        tensor.clone(),
        &common(3, 0.1, 2),
        &CetsParams {
            pool_size: 5,
            ..CetsParams::default()
        },
    )
    .unwrap();
    assert_eq!(tensor.cost(&cets.solve().unwrap()), 1);
}

#[test]
fn rotational_symmetry_reaches_optimum() {
    let tensor = rotational_tensor();
    let (_, optimum) = brute_force(&tensor);

    let mut drezner =
        DreznerSolver::new(tensor.clone(), &common(4, 0.1, 3), &DreznerParams::default()).unwrap();
    assert_eq!(tensor.cost(&drezner.solve().unwrap()), optimum);

    let mut cets = CetsSolver::new(
        tensor.clone(),
        &common(4, 0.1, 3),
        &CetsParams {
            pool_size: 5,
            ..CetsParams::default()
        },
    )
    .unwrap();
    assert_eq!(tensor.cost(&cets.solve().unwrap()), optimum);
}

#[test]
fn layout_built_instance_reaches_optimum() {
    // 2x2 grid, four devices, two overlapping nets.
    let mut layout = Layout::new();
    let mut pins = Vec::new();
    for _ in 0..4 {
        let d = layout.add_device(5, 5);
        pins.push(layout.add_pin(d, Point::new(0, 0)).unwrap());
    }
    layout.add_net(vec![pins[0], pins[1], pins[2]]).unwrap();
    layout.add_net(vec![pins[2], pins[3]]).unwrap();

    let grid = Grid::new(2, 2, 70, 70).unwrap();
    let tensor = CostTensor::from_layout(&layout, &grid).unwrap();
    tensor.validate().unwrap();

    let (_, optimum) = brute_force(&tensor);

    let common = CommonParams::new(2, 2).with_time(0.2).with_seed(5);
    let mut drezner =
        DreznerSolver::new(tensor.clone(), &common, &DreznerParams::default()).unwrap();
    assert_eq!(tensor.cost(&drezner.solve().unwrap()), optimum);
}

#[test]
fn pool_reaches_optimum_on_mid_size_instance() {
    // n = 8 random symmetric instance against brute force.
    let tensor = {
        use place_core::rng::seeded_rng;
        use rand::Rng;
        let n = 8;
        let mut rng = seeded_rng(4242);
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
    };

    let (_, optimum) = brute_force(&tensor);

    let params = CetsParams {
        pool_size: 25,
        ..CetsParams::default()
    };
    let mut solver = CetsSolver::new(tensor.clone(), &common(8, 1.0, 9), &params).unwrap();
    assert_eq!(tensor.cost(&solver.solve().unwrap()), optimum);
}

#[test]
fn trace_best_is_monotone() {
    let tensor = forced_ordering_tensor();
    let mut common = common(3, 0.2, 11);
    common.debug_interval = 0.001;

    let mut solver = CetsSolver::new(
        tensor.clone(),
        &common,
        &CetsParams {
            pool_size: 5,
            ..CetsParams::default()
        },
    )
    .unwrap();
    let perm = solver.solve().unwrap();

    let snaps = solver.snapshots();
    assert!(!snaps.is_empty());

    let costs: Vec<i64> = snaps.iter().map(|s| tensor.cost(&s.perm)).collect();
    assert!(costs.windows(2).all(|w| w[0] >= w[1]), "trace not monotone: {costs:?}");

    // The final record carries the returned best.
    assert_eq!(snaps.last().unwrap().perm, perm);

    // Elapsed stamps are non-decreasing.
    let stamps: Vec<f64> = snaps.iter().map(|s| s.elapsed).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}
