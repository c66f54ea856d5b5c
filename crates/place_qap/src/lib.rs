//! # place_qap
//!
//! Quadratic-assignment core of the grid placement engine.
//!
//! This crate provides:
//! - `CostTensor`: the rank-4 cost tensor built from a layout and a slot
//!   grid (or from raw arrays), with exact O(n) swap deltas
//! - `SolutionArena` / `CandidateList`: recycling solution storage and
//!   bounded worst-tracked candidate lists
//! - `DreznerSolver`: iterated list-descent search
//! - `CetsSolver`: critical-event tabu search with recombination over
//!   priority vectors
//! - `brute_force`: exhaustive reference optimum for small instances
//!
//! ## Example
//!
//! ```rust
//! use place_core::prelude::*;
//! use place_qap::{brute_force, CostTensor, DreznerSolver};
//!
//! // A 1x3 line where only devices 0 and 1 interact.
//! let n = 3;
//! let mut c = vec![vec![vec![vec![0i64; n]; n]; n]; n];
//! for k in 0..n {
//!     for l in 0..n {
//!         let d = (k as i64 - l as i64).abs();
//!         c[0][1][k][l] = d;
//!         c[1][0][l][k] = d;
//!     }
//! }
//! let tensor = CostTensor::from_nested(&c).unwrap();
//!
//! let (_, optimum) = brute_force(&tensor);
//! assert_eq!(optimum, 1);
//!
//! let common = CommonParams::new(1, 3).with_time(0.05).with_seed(1);
//! let mut solver = DreznerSolver::new(tensor.clone(), &common, &DreznerParams::default()).unwrap();
//! let perm = solver.solve().unwrap();
//! assert_eq!(tensor.cost(&perm), optimum);
//! ```

pub mod brute;
pub mod cets;
pub mod drezner;
pub mod pool;
pub mod tensor;

pub use brute::brute_force;
pub use cets::CetsSolver;
pub use drezner::DreznerSolver;
pub use pool::{CandidateList, Handle, Solution, SolutionArena};
pub use tensor::{CostTensor, MAX_NET_LCM};
