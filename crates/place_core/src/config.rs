//! Solver parameter sets.
//!
//! Every set carries a `validate` method; solvers validate on construction
//! and refuse to run otherwise.

use serde::{Deserialize, Serialize};

use crate::error::{PlaceError, Result};

/// Parameters shared by every solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonParams {
    /// Grid rows (required)
    pub rows: usize,
    /// Grid columns (required)
    pub cols: usize,
    /// Horizontal slot pitch
    pub step_x: i64,
    /// Vertical slot pitch
    pub step_y: i64,
    /// Wall-clock budget in seconds; `-1.0` means unbounded
    pub time: f64,
    /// Iteration cap; `-1` means uncapped
    pub max_iters: i64,
    /// PRNG seed; `-1` samples a fresh one
    pub seed: i64,
    /// Snapshot interval in seconds; `-1.0` disables the trace
    pub debug_interval: f64,
}

impl CommonParams {
    /// Common parameters for a `rows x cols` grid with default knobs.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            step_x: 70,
            step_y: 70,
            time: 1.0,
            max_iters: -1,
            seed: -1,
            debug_interval: -1.0,
        }
    }

    /// Overrides the time budget.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks shape and budget constraints against the instance size.
    pub fn validate(&self, device_count: usize) -> Result<()> {
        if self.rows * self.cols != device_count {
            return Err(PlaceError::shape(format!(
                "{} devices for a {}x{} grid",
                device_count, self.rows, self.cols
            )));
        }
        if self.step_x <= 0 || self.step_y <= 0 {
            return Err(PlaceError::parameter("step_x", "slot pitch must be positive"));
        }
        if self.time < 0.0 && self.time != -1.0 {
            return Err(PlaceError::parameter("time", "negative budgets are not allowed"));
        }
        if self.time == -1.0 && self.max_iters == -1 {
            return Err(PlaceError::BudgetUnspecified);
        }
        Ok(())
    }
}

/// Parameters of the list-descent solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreznerParams {
    /// Capacity of each rolling list
    pub list_capacity: usize,
}

impl Default for DreznerParams {
    fn default() -> Self {
        Self { list_capacity: 2 }
    }
}

impl DreznerParams {
    /// Checks the list capacity constraint.
    pub fn validate(&self) -> Result<()> {
        if self.list_capacity < 1 {
            return Err(PlaceError::parameter("K", "list capacity must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters of the critical-event tabu search solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CetsParams {
    /// Pool size S
    pub pool_size: usize,
    /// Elite percentage z in (0, 100]
    pub elite_pct: u32,
    /// Lower jump bound n1
    pub n1: usize,
    /// Upper jump bound n2
    pub n2: usize,
    /// Tabu tenure (kept for interface parity; moves are strict descent)
    pub tabu_tenure: usize,
}

impl Default for CetsParams {
    fn default() -> Self {
        Self {
            pool_size: 100,
            elite_pct: 10,
            n1: 2,
            n2: 7,
            tabu_tenure: 1,
        }
    }
}

impl CetsParams {
    /// Size-tuned defaults: larger instances trade pool size for sweep
    /// depth, short budgets get smaller pools.
    pub fn tuned(n: usize, time: f64) -> Self {
        let mut params = Self::default();
        if n <= 30 {
            params.n2 = 7;
            params.pool_size = 100;
        } else if n <= 55 {
            params.n2 = 8;
            params.pool_size = if time <= 5.0 { 50 } else { 100 };
        } else {
            params.n2 = 8;
            params.pool_size = if time <= 10.0 { 25 } else { 100 };
        }
        params
    }

    /// Checks the pool constraints against the instance size.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.pool_size < 1 {
            return Err(PlaceError::parameter("S", "pool size must be at least 1"));
        }
        if self.elite_pct == 0 || self.elite_pct > 100 {
            return Err(PlaceError::parameter("z", "elite percentage must be in (0, 100]"));
        }
        if self.n1 < 1 {
            return Err(PlaceError::parameter("n1", "jump bound must be at least 1"));
        }
        if self.n1 > self.n2 {
            return Err(PlaceError::parameter("n1", "n1 must not exceed n2"));
        }
        if self.tabu_tenure < 1 {
            return Err(PlaceError::parameter("tabu_tenure", "tenure must be positive"));
        }
        let _ = n;
        Ok(())
    }

    /// Jump bounds clamped to the instance size.
    pub fn clamped_bounds(&self, n: usize) -> (usize, usize) {
        let n2 = self.n2.min(n);
        let n1 = self.n1.min(n2);
        (n1, n2)
    }

    /// Elite prefix size: `ceil(S * z / 100)`.
    pub fn elite_size(&self) -> usize {
        (self.pool_size * self.elite_pct as usize + 99) / 100
    }
}

/// Parameters of the force-directed relaxation solvers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GotoParams {
    /// Maximum chained-swap depth, at least 2
    pub lambda_max: usize,
    /// Candidate slots examined per relaxation, at least 1
    pub eps: usize,
}

impl Default for GotoParams {
    fn default() -> Self {
        Self {
            lambda_max: 4,
            eps: 4,
        }
    }
}

impl GotoParams {
    /// Checks the relaxation constraints.
    pub fn validate(&self) -> Result<()> {
        if self.lambda_max < 2 {
            return Err(PlaceError::parameter("lambda_max", "chain depth must be at least 2"));
        }
        if self.eps < 1 {
            return Err(PlaceError::parameter("eps", "candidate count must be at least 1"));
        }
        Ok(())
    }
}

/// Aggregated tuning knobs of the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// List-descent solver knobs
    #[serde(default)]
    pub drezner: DreznerParams,
    /// CETS solver knobs
    #[serde(default)]
    pub cets: CetsParams,
    /// Relaxation solver knobs
    #[serde(default)]
    pub goto: GotoParams,
}

impl EngineConfig {
    /// Loads a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
