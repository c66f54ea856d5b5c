//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use place_core::prelude::*;
//! ```

pub use crate::budget::Budget;
pub use crate::config::{CetsParams, CommonParams, DreznerParams, EngineConfig, GotoParams};
pub use crate::error::{PlaceError, Result};
pub use crate::solver::Solver;
pub use crate::trace::{ProgressTrace, Snapshot};
pub use crate::types::{Device, Grid, Layout, Net, Pin, Point};
