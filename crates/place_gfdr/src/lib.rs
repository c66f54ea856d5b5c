//! # place_gfdr
//!
//! Force-directed relaxation solvers of the grid placement engine.
//!
//! This crate provides:
//! - `SeparableCost`: the pairwise cost split into x/y center-distance and
//!   direction-selected pin terms
//! - `Placement`: permutation + inverse + priority vector with cached cost
//! - `k_best_sums`: k smallest pairwise sums of two sorted arrays
//! - `MedianSelector`: O(n log n) candidate-slot scoring with an O(n^2)
//!   reference implementation
//! - `Relaxer`: the GFDR chained-swap move
//! - `sorg::construct`: stochastic greedy initial placement
//! - `GotoSolver` (SORG restarts + relaxation) and `NewGotoSolver` (pool +
//!   CES + recombination)
//!
//! ## Example
//!
//! ```rust
//! use place_core::prelude::*;
//! use place_gfdr::{GotoSolver, SeparableCost};
//!
//! // Two devices on a 1x2 grid wired by a single net.
//! let mut layout = Layout::new();
//! let a = layout.add_device(5, 5);
//! let b = layout.add_device(5, 5);
//! let pa = layout.add_pin(a, Point::new(1, 0)).unwrap();
//! let pb = layout.add_pin(b, Point::new(-1, 0)).unwrap();
//! layout.add_net(vec![pa, pb]).unwrap();
//!
//! let grid = Grid::new(1, 2, 10, 10).unwrap();
//! let sep = SeparableCost::from_layout(&layout, &grid).unwrap();
//!
//! let common = CommonParams::new(1, 2).with_time(0.05).with_seed(1);
//! let mut solver = GotoSolver::new(sep.clone(), &common, &GotoParams::default()).unwrap();
//! let perm = solver.solve().unwrap();
//! assert_eq!(sep.cost(&perm), 8);
//! ```

pub mod goto_solver;
pub mod kbest;
pub mod median;
pub mod new_goto;
pub mod placement;
pub mod relax;
pub mod separable;
pub mod sorg;

pub use goto_solver::GotoSolver;
pub use kbest::k_best_sums;
pub use median::MedianSelector;
pub use new_goto::NewGotoSolver;
pub use placement::Placement;
pub use relax::Relaxer;
pub use separable::{SeparableCost, MAX_NET_LCM};
