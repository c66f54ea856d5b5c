//! End-to-end scenarios over the separable-form solvers.

use place_core::prelude::*;
use place_gfdr::{GotoSolver, NewGotoSolver, SeparableCost};

/// Unit-weight clique over `members` on the given grid, no pin terms.
fn clique_instance(grid: &Grid, members: &[usize]) -> SeparableCost {
    let n = grid.slot_count();
    let zeros = vec![vec![0i64; n]; n];
    let mut weight = vec![vec![0i64; n]; n];
    for &i in members {
        for &j in members {
            if i != j {
                weight[i][j] = 1;
            }
        }
    }
    SeparableCost::from_matrices(grid, &zeros, &zeros, &zeros, &zeros, &weight).unwrap()
}

fn min_cost_exhaustive(sep: &SeparableCost) -> i64 {
    let n = sep.device_count();
    let mut perm: Vec<usize> = (0..n).collect();
    let mut best = sep.cost(&perm);
    let mut c = vec![0usize; n];
    let mut i = 0;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(c[i], i);
            }
            best = best.min(sep.cost(&perm));
            c[i] += 1;
            i = 0;
        } else {
            c[i] = 0;
            i += 1;
        }
    }
    best
}

#[test]
fn forced_adjacency_on_a_line() {
    // Two devices interact on a 1x3 line with unit pitch: optimum 1.
    let grid = Grid::new(1, 3, 1, 1).unwrap();
    let sep = clique_instance(&grid, &[0, 1]);

    let common = CommonParams::new(1, 3).with_time(0.1).with_seed(3);
    let mut solver = GotoSolver::new(sep.clone(), &common, &GotoParams::default()).unwrap();
    let perm = solver.solve().unwrap();

    assert_eq!(sep.cost(&perm), 1);
    assert_eq!((perm[0] as i64 - perm[1] as i64).abs(), 1);
}

#[test]
fn clique_converges_to_contiguous_block() {
    // Four mutually wired devices on a 3x3 grid with unit pitch gather into
    // a 2x2 block: four side pairs plus two diagonals, cost 4 + 4 = 8.
    let grid = Grid::new(3, 3, 1, 1).unwrap();
    let sep = clique_instance(&grid, &[0, 1, 2, 3]);
    assert_eq!(min_cost_exhaustive(&sep), 8);

    let common = CommonParams::new(3, 3).with_time(1.0).with_seed(4);
    let mut solver = GotoSolver::new(sep.clone(), &common, &GotoParams::default()).unwrap();
    let perm = solver.solve().unwrap();
    assert_eq!(sep.cost(&perm), 8);
}

#[test]
fn pool_variant_matches_exhaustive_optimum() {
    let grid = Grid::new(2, 3, 7, 5).unwrap();
    let sep = clique_instance(&grid, &[0, 2, 4]);
    let optimum = min_cost_exhaustive(&sep);

    let common = CommonParams::new(2, 3).with_time(0.5).with_seed(6);
    let pool = CetsParams {
        pool_size: 10,
        ..CetsParams::default()
    };
    let mut solver = NewGotoSolver::new(sep.clone(), &common, &pool, &GotoParams::default()).unwrap();
    let perm = solver.solve().unwrap();
    assert_eq!(sep.cost(&perm), optimum);
}

#[test]
fn identity_invariant_instance() {
    // No interactions at all: every permutation costs zero.
    let grid = Grid::new(2, 2, 7, 7).unwrap();
    let sep = clique_instance(&grid, &[]);

    let common = CommonParams::new(2, 2).with_time(0.05).with_seed(7);
    let mut solver = GotoSolver::new(sep.clone(), &common, &GotoParams::default()).unwrap();
    let perm = solver.solve().unwrap();
    assert_eq!(sep.cost(&perm), 0);
}

#[test]
fn trace_best_is_monotone() {
    let grid = Grid::new(2, 2, 1, 1).unwrap();
    let sep = clique_instance(&grid, &[0, 1, 2]);

    let mut common = CommonParams::new(2, 2).with_time(0.2).with_seed(8);
    common.debug_interval = 0.001;

    let mut solver = GotoSolver::new(sep.clone(), &common, &GotoParams::default()).unwrap();
    let perm = solver.solve().unwrap();

    let snaps = solver.snapshots();
    assert!(!snaps.is_empty());

    let costs: Vec<i64> = snaps.iter().map(|s| sep.cost(&s.perm)).collect();
    assert!(costs.windows(2).all(|w| w[0] >= w[1]), "trace not monotone: {costs:?}");
    assert_eq!(snaps.last().unwrap().perm, perm);
}
