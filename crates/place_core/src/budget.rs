//! Solve budget: wall-clock deadline and/or iteration cap.

use std::time::{Duration, Instant};

use crate::error::{PlaceError, Result};

/// Stop criterion for a solver run.
///
/// At least one of the two limits must be present. The deadline is soft:
/// solvers poll [`Budget::expired`] at loop boundaries, so the overrun is
/// bounded by one inner pass.
#[derive(Debug, Clone)]
pub struct Budget {
    started: Instant,
    deadline: Option<Duration>,
    max_iters: Option<u64>,
}

impl Budget {
    /// Builds a budget from raw parameters: `time` in seconds (`-1.0` means
    /// unbounded) and `max_iters` (`-1` means uncapped). Both unbounded is
    /// rejected.
    pub fn from_params(time: f64, max_iters: i64) -> Result<Self> {
        let deadline = if time < 0.0 {
            None
        } else if time == 0.0 {
            return Err(PlaceError::parameter("time", "time budget must be positive"));
        } else {
            Some(Duration::from_secs_f64(time))
        };

        let max_iters = if max_iters < 0 {
            None
        } else if max_iters == 0 {
            return Err(PlaceError::parameter("max_iters", "iteration cap must be positive"));
        } else {
            Some(max_iters as u64)
        };

        if deadline.is_none() && max_iters.is_none() {
            return Err(PlaceError::BudgetUnspecified);
        }

        Ok(Self {
            started: Instant::now(),
            deadline,
            max_iters,
        })
    }

    /// Restarts the clock. Solvers call this at the top of `solve`.
    pub fn start(&mut self) {
        self.started = Instant::now();
    }

    /// Whether the budget is exhausted after `iter` completed iterations.
    pub fn expired(&self, iter: u64) -> bool {
        if let Some(deadline) = self.deadline {
            if self.started.elapsed() > deadline {
                return true;
            }
        }
        if let Some(cap) = self.max_iters {
            if iter >= cap {
                return true;
            }
        }
        false
    }

    /// Whether only the wall clock is limiting (no iteration cap).
    pub fn time_limited(&self) -> bool {
        self.deadline.is_some()
    }

    /// Elapsed time since the budget was started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
