//! Pool-based force-directed solver.
//!
//! The pool discipline of the critical-event search, with GFDR relaxation as
//! the descent primitive: an ordered pool of S priority-vectored placements,
//! a CES sweep (relaxation passes interleaved with cyclic jumps) on a random
//! elite member, and the recombination family on priority vectors.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use place_core::budget::Budget;
use place_core::config::{CetsParams, CommonParams, GotoParams};
use place_core::error::Result;
use place_core::rng::{resolve_seed, seeded_rng};
use place_core::solver::Solver;
use place_core::trace::{ProgressTrace, Snapshot};

use crate::placement::Placement;
use crate::relax::Relaxer;
use crate::separable::SeparableCost;

/// Parents drawn by the centroid recombination.
const CENTROID_MIN_PARENTS: usize = 2;
const CENTROID_MAX_PARENTS: usize = 5;

/// Relaxation sweeps after each recombination.
const RECOMB_LS_SWEEPS: usize = 5;

/// Pool solver combining CES sweeps and recombination over the separable
/// cost form.
pub struct NewGotoSolver {
    sep: SeparableCost,
    relaxer: Relaxer,
    pool: Vec<Placement>,
    best: Placement,
    pool_size: usize,
    top: usize,
    n1: usize,
    n2: usize,
    budget: Budget,
    trace: ProgressTrace,
    rng: StdRng,
    seed: u64,
    jump_order: Vec<usize>,
}

impl NewGotoSolver {
    /// Builds a solver from pool and relaxation parameters.
    pub fn new(
        sep: SeparableCost,
        common: &CommonParams,
        pool_params: &CetsParams,
        relax_params: &GotoParams,
    ) -> Result<Self> {
        let n = sep.device_count();
        common.validate(n)?;
        pool_params.validate(n)?;
        relax_params.validate()?;

        let (n1, n2) = pool_params.clamped_bounds(n);
        let eps = relax_params.eps.min(n);
        let budget = Budget::from_params(common.time, common.max_iters)?;
        let seed = resolve_seed(common.seed);

        let relaxer = Relaxer::new(&sep, relax_params.lambda_max, eps);
        let pool = (0..pool_params.pool_size + 2)
            .map(|_| Placement::identity(&sep))
            .collect();
        let best = Placement::identity(&sep);

        Ok(Self {
            relaxer,
            pool,
            best,
            pool_size: pool_params.pool_size,
            top: pool_params.elite_size(),
            n1,
            n2,
            budget,
            trace: ProgressTrace::new(common.debug_interval),
            rng: seeded_rng(seed),
            seed,
            jump_order: (0..n).collect(),
            sep,
        })
    }

    fn generate_pool(&mut self) {
        for i in 0..self.pool.len() {
            self.pool[i].randomize(&self.sep, &mut self.rng);
        }
        self.best.assign_from(&self.pool[0]);
        self.sort_pool(self.pool_size);
        self.update_best();
    }

    fn sort_pool(&mut self, prefix: usize) {
        self.pool[..prefix].sort_by_key(|p| p.cost);
    }

    fn update_best(&mut self) {
        if self.pool[0].cost < self.best.cost {
            self.best.assign_from(&self.pool[0]);
        }
    }

    fn note_best(&mut self, idx: usize) {
        if self.pool[idx].cost < self.best.cost {
            self.best.assign_from(&self.pool[idx]);
        }
    }

    /// CES sweep: for k in [n1, n2], one relaxation pass over every device,
    /// then a cyclic jump of p positions, p uniform in [n1, k].
    fn run_ces(&mut self, idx: usize) {
        let n = self.sep.device_count();

        for k in self.n1..=self.n2 {
            if self.budget.expired(0) {
                return;
            }

            for device in 0..n {
                self.relaxer.relax(&self.sep, &mut self.pool[idx], device);
                self.note_best(idx);
            }

            let p = self.rng.gen_range(self.n1..=k);
            self.jump(idx, p);
            self.note_best(idx);
        }
    }

    fn jump(&mut self, idx: usize, p: usize) {
        self.jump_order.shuffle(&mut self.rng);
        for i in 0..p {
            let a = self.jump_order[i];
            let b = self.jump_order[(i + 1) % p];
            self.pool[idx].apply_swap(a, b, 0);
        }
        let cost = self.sep.cost(&self.pool[idx].perm);
        self.pool[idx].cost = cost;
    }

    /// Bounded relaxation sweeps over all devices; stops early when a sweep
    /// moves nothing.
    fn local_search(&mut self, idx: usize, sweeps: usize) {
        let n = self.sep.device_count();

        for _ in 0..sweeps {
            let mut moved = false;
            for device in 0..n {
                if self.relaxer.relax(&self.sep, &mut self.pool[idx], device) {
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }

        self.note_best(idx);
    }

    fn run_recombination(&mut self, variant: u32) {
        let s = self.pool_size;
        match variant {
            1 => {
                self.pool[s].randomize(&self.sep, &mut self.rng);
                self.local_search(s, RECOMB_LS_SWEEPS);
                self.sort_pool(s + 1);
            }
            2 => {
                let a = self.rng.gen_range(0..s);
                let b = self.rng.gen_range(0..s);
                self.crossover(a, b);
                self.local_search(s, RECOMB_LS_SWEEPS);
                self.local_search(s + 1, RECOMB_LS_SWEEPS);
                self.sort_pool(s + 2);
            }
            _ => {
                let want = self.rng.gen_range(CENTROID_MIN_PARENTS..=CENTROID_MAX_PARENTS);
                let cnt = want.min(self.top).max(1);
                let mut idx: Vec<usize> = (0..self.top).collect();
                idx.shuffle(&mut self.rng);
                idx.truncate(cnt);
                self.centroid(&idx);
                self.local_search(s, RECOMB_LS_SWEEPS);
                self.sort_pool(s + 1);
            }
        }
    }

    fn crossover(&mut self, a: usize, b: usize) {
        let n = self.sep.device_count();
        let s = self.pool_size;

        for i in 0..n {
            let (pa, pb) = (self.pool[a].prior[i], self.pool[b].prior[i]);
            let (ca, cb) = if self.rng.gen::<bool>() {
                (pa, pb)
            } else {
                (pb, pa)
            };
            self.pool[s].prior[i] = ca;
            self.pool[s + 1].prior[i] = cb;
        }

        self.pool[s].rederive(&self.sep);
        self.pool[s + 1].rederive(&self.sep);
    }

    fn centroid(&mut self, parents: &[usize]) {
        let n = self.sep.device_count();
        let s = self.pool_size;

        for i in 0..n {
            let sum: f64 = parents.iter().map(|&p| self.pool[p].prior[i]).sum();
            self.pool[s].prior[i] = sum / parents.len() as f64;
        }
        self.pool[s].rederive(&self.sep);
    }
}

impl Solver for NewGotoSolver {
    fn solve(&mut self) -> Result<Vec<usize>> {
        debug!(
            seed = self.seed,
            s = self.pool_size,
            top = self.top,
            n1 = self.n1,
            n2 = self.n2,
            "new-goto solve"
        );

        self.budget.start();
        self.generate_pool();
        self.trace.begin(&self.best.perm);

        let mut iter: u64 = 0;
        while !self.budget.expired(iter) {
            self.sort_pool(self.pool_size);
            self.update_best();

            let l = self.rng.gen_range(0..self.top);
            self.run_ces(l);
            self.sort_pool(self.pool_size);

            let variant = self.rng.gen_range(1..=3);
            self.run_recombination(variant);

            self.trace.note(&self.best.perm);
            iter += 1;
        }

        self.sort_pool(self.pool_size);
        self.update_best();
        self.trace.finish(&self.best.perm);

        debug!(cost = self.best.cost, iters = iter, "new-goto done");
        Ok(self.best.perm.clone())
    }

    fn snapshots(&self) -> &[Snapshot] {
        self.trace.snapshots()
    }
}
