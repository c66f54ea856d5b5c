//! Solver abstraction.

use crate::error::Result;
use crate::trace::Snapshot;

/// A placement solver: a pure transformation from (cost data, parameters) to
/// a permutation of the devices over the slots, plus a progress trace.
pub trait Solver {
    /// Runs the search and returns the best permutation found; device `i` is
    /// placed at slot `perm[i]`.
    fn solve(&mut self) -> Result<Vec<usize>>;

    /// Best-so-far snapshots recorded during the last `solve` call.
    fn snapshots(&self) -> &[Snapshot];
}
