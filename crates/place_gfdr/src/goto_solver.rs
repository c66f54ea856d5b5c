//! Goto solver: SORG restarts refined by per-device relaxation.

use rand::rngs::StdRng;
use tracing::debug;

use place_core::budget::Budget;
use place_core::config::{CommonParams, GotoParams};
use place_core::error::Result;
use place_core::rng::{resolve_seed, seeded_rng};
use place_core::solver::Solver;
use place_core::trace::{ProgressTrace, Snapshot};

use crate::placement::Placement;
use crate::relax::Relaxer;
use crate::separable::SeparableCost;
use crate::sorg;

/// Restart-based force-directed solver over the separable cost form.
pub struct GotoSolver {
    sep: SeparableCost,
    lambda_max: usize,
    eps: usize,
    budget: Budget,
    trace: ProgressTrace,
    rng: StdRng,
    seed: u64,
}

impl GotoSolver {
    /// Builds a solver; `eps` is clamped to the slot count.
    pub fn new(sep: SeparableCost, common: &CommonParams, params: &GotoParams) -> Result<Self> {
        common.validate(sep.device_count())?;
        params.validate()?;
        let budget = Budget::from_params(common.time, common.max_iters)?;
        let seed = resolve_seed(common.seed);
        Ok(Self {
            eps: params.eps.min(sep.device_count()),
            lambda_max: params.lambda_max,
            sep,
            budget,
            trace: ProgressTrace::new(common.debug_interval),
            rng: seeded_rng(seed),
            seed,
        })
    }
}

impl Solver for GotoSolver {
    fn solve(&mut self) -> Result<Vec<usize>> {
        let n = self.sep.device_count();
        debug!(
            seed = self.seed,
            lambda = self.lambda_max,
            eps = self.eps,
            n,
            "goto solve"
        );

        self.budget.start();

        let mut best = Placement::identity(&self.sep);
        self.trace.begin(&best.perm);

        let mut relaxer = Relaxer::new(&self.sep, self.lambda_max, self.eps);
        let mut rounds: u64 = 0;

        while !self.budget.expired(rounds) {
            let mut sol = sorg::construct(&self.sep, &mut self.rng);
            for device in 0..n {
                relaxer.relax(&self.sep, &mut sol, device);
                if sol.cost < best.cost {
                    best.assign_from(&sol);
                }
            }
            self.trace.note(&best.perm);
            rounds += 1;
        }

        self.trace.finish(&best.perm);
        debug!(cost = best.cost, rounds, "goto done");
        Ok(best.perm)
    }

    fn snapshots(&self) -> &[Snapshot] {
        self.trace.snapshots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::separable::tests::random_instance;
    use place_core::perm::is_permutation;

    fn common(rows: usize, cols: usize, time: f64, seed: i64) -> CommonParams {
        CommonParams::new(rows, cols)
            .with_time(time)
            .with_seed(seed)
    }

    #[test]
    fn test_rejects_invalid_params() {
        let sep = random_instance(2, 2, 1);
        let params = GotoParams {
            lambda_max: 1,
            eps: 4,
        };
        assert!(GotoSolver::new(sep, &common(2, 2, 1.0, 0), &params).is_err());
    }

    #[test]
    fn test_returns_valid_permutation() {
        let sep = random_instance(3, 3, 33);
        let mut solver =
            GotoSolver::new(sep.clone(), &common(3, 3, 0.1, 2), &GotoParams::default()).unwrap();
        let perm = solver.solve().unwrap();
        assert!(is_permutation(&perm));
    }

    #[test]
    fn test_solution_not_worse_than_identity() {
        let sep = random_instance(2, 3, 34);
        let identity_cost = sep.cost(&(0..6).collect::<Vec<_>>());
        let mut solver =
            GotoSolver::new(sep.clone(), &common(2, 3, 0.1, 3), &GotoParams::default()).unwrap();
        let perm = solver.solve().unwrap();
        assert!(sep.cost(&perm) <= identity_cost);
    }
}
