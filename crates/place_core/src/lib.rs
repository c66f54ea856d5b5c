//! # place_core
//!
//! Core types and utilities for the grid placement engine.
//!
//! This crate provides:
//! - `Layout` / `Grid`: the placement instance model (devices, pins, nets,
//!   slot geometry)
//! - permutation primitives (`perm`): identity, random, inverse, Hamming
//!   distance and its swap delta
//! - `Budget`: wall-clock / iteration stop criteria
//! - `ProgressTrace`: periodic best-so-far snapshots
//! - parameter sets with validation (`config`)
//! - `PlaceError`: unified error type
//!
//! ## Example
//!
//! ```rust
//! use place_core::prelude::*;
//!
//! let mut layout = Layout::new();
//! let a = layout.add_device(10, 10);
//! let b = layout.add_device(10, 10);
//! let pa = layout.add_pin(a, Point::new(1, 0)).unwrap();
//! let pb = layout.add_pin(b, Point::new(-1, 0)).unwrap();
//! layout.add_net(vec![pa, pb]).unwrap();
//!
//! let grid = Grid::new(1, 2, 70, 70).unwrap();
//! assert_eq!(grid.slot_count(), layout.device_count());
//! ```

pub mod budget;
pub mod config;
pub mod error;
pub mod perm;
pub mod prelude;
pub mod rng;
pub mod solver;
pub mod trace;
pub mod types;

pub use budget::Budget;
pub use config::{CetsParams, CommonParams, DreznerParams, EngineConfig, GotoParams};
pub use error::{PlaceError, Result};
pub use solver::Solver;
pub use trace::{ProgressTrace, Snapshot};
pub use types::{Device, Grid, Layout, Net, Pin, Point};
