//! Slot grid geometry.

use serde::{Deserialize, Serialize};

use crate::error::{PlaceError, Result};
use crate::types::Point;

/// A regular row/column grid of placement slots.
///
/// Slot `s` sits in row `s / cols`, column `s % cols`; the pitch between
/// neighbouring slots is `step_x` horizontally and `step_y` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Horizontal slot pitch
    pub step_x: i64,
    /// Vertical slot pitch
    pub step_y: i64,
}

impl Grid {
    /// Creates a grid; both dimensions must be positive.
    pub fn new(rows: usize, cols: usize, step_x: i64, step_y: i64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PlaceError::parameter("rows", "grid dimensions must be positive"));
        }
        if step_x <= 0 || step_y <= 0 {
            return Err(PlaceError::parameter("step_x", "slot pitch must be positive"));
        }
        Ok(Self {
            rows,
            cols,
            step_x,
            step_y,
        })
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Horizontal coordinate of slot `s`.
    #[inline]
    pub fn slot_x(&self, s: usize) -> i64 {
        (s % self.cols) as i64 * self.step_x
    }

    /// Vertical coordinate of slot `s`.
    #[inline]
    pub fn slot_y(&self, s: usize) -> i64 {
        (s / self.cols) as i64 * self.step_y
    }

    /// Position of slot `s`.
    pub fn slot_position(&self, s: usize) -> Point {
        Point::new(self.slot_x(s), self.slot_y(s))
    }

    /// Positions of all slots in slot order.
    pub fn slot_positions(&self) -> Vec<Point> {
        (0..self.slot_count()).map(|s| self.slot_position(s)).collect()
    }
}
