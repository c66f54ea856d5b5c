//! Error types for the placement engine.

use thiserror::Error;

/// Unified error type for placement operations.
#[derive(Error, Debug)]
pub enum PlaceError {
    /// Device count does not match the grid, or a tensor dimension mismatch
    #[error("Shape mismatch: {0}")]
    InvalidShape(String),

    /// Cost tensor violates C[i][j][k][l] == C[j][i][l][k]
    #[error("Cost not symmetric at ({i},{j},{k},{l})")]
    CostNotSymmetric {
        /// First device index
        i: usize,
        /// Second device index
        j: usize,
        /// First slot index
        k: usize,
        /// Second slot index
        l: usize,
    },

    /// Cost tensor has a nonzero self-pair or self-slot entry
    #[error("Cost not zero-diagonal at ({i},{j},{k},{l})")]
    CostNotZeroDiagonal {
        /// First device index
        i: usize,
        /// Second device index
        j: usize,
        /// First slot index
        k: usize,
        /// Second slot index
        l: usize,
    },

    /// LCM of (net size - 1) over the nets exceeds the scaling cap
    #[error("Net weight overflow: lcm {lcm} exceeds {cap}")]
    OverscaledNet {
        /// The overflowing least common multiple
        lcm: i64,
        /// The configured cap
        cap: i64,
    },

    /// Neither a time budget nor an iteration cap was given
    #[error("No stop criterion: set a time budget or an iteration cap")]
    BudgetUnspecified,

    /// A named parameter violates its constraint
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name as exposed to callers
        name: &'static str,
        /// Human-readable constraint violation
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for placement operations.
pub type Result<T> = std::result::Result<T, PlaceError>;

impl PlaceError {
    /// Creates a shape mismatch error with the given message.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// Creates an invalid parameter error for `name`.
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
