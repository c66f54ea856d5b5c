//! Critical-event tabu search with recombination.
//!
//! Population solver over priority-vectored solutions: an ordered pool of S
//! candidates, a heavy critical-event sweep on a random elite member, and a
//! family of recombination operators (random restart, uniform crossover,
//! elite centroid) each followed by a short local search. Only the priority
//! vector survives recombination; the permutation is re-derived by ranking.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use place_core::budget::Budget;
use place_core::config::{CetsParams, CommonParams};
use place_core::error::Result;
use place_core::rng::{resolve_seed, seeded_rng};
use place_core::solver::Solver;
use place_core::trace::{ProgressTrace, Snapshot};

use crate::tensor::CostTensor;

/// Parents drawn by the centroid recombination.
const CENTROID_MIN_PARENTS: usize = 2;
const CENTROID_MAX_PARENTS: usize = 5;

/// Local search sweeps after each recombination.
const RECOMB_LS_SWEEPS: usize = 5;

/// A pool member: priority vector, derived permutation and cached cost.
#[derive(Debug, Clone)]
struct PoolEntry {
    prior: Vec<f64>,
    perm: Vec<usize>,
    cost: i64,
}

impl PoolEntry {
    fn zeroed(n: usize) -> Self {
        Self {
            prior: vec![0.0; n],
            perm: (0..n).collect(),
            cost: 0,
        }
    }

    fn assign_from(&mut self, other: &PoolEntry) {
        self.prior.copy_from_slice(&other.prior);
        self.perm.copy_from_slice(&other.perm);
        self.cost = other.cost;
    }
}

/// Ranks device indices by ascending priority (ties by index); the rank of
/// device `i` becomes `perm[i]`. The same priorities always yield the same
/// permutation.
fn priority_to_perm(prior: &[f64], perm: &mut [usize]) {
    let n = prior.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        prior[i]
            .partial_cmp(&prior[j])
            .unwrap_or(Ordering::Equal)
            .then_with(|| i.cmp(&j))
    });
    for (rank, &i) in order.iter().enumerate() {
        perm[i] = rank;
    }
}

/// Swaps positions `r` and `s` of an entry, keeping priority and permutation
/// aligned, and applies the precomputed cost delta.
fn exchange(entry: &mut PoolEntry, delta: i64, r: usize, s: usize) {
    entry.perm.swap(r, s);
    entry.prior.swap(r, s);
    entry.cost += delta;
}

/// Critical-event tabu search solver over a rank-4 cost tensor.
pub struct CetsSolver {
    tensor: CostTensor,
    pool_size: usize,
    top: usize,
    n1: usize,
    n2: usize,
    budget: Budget,
    trace: ProgressTrace,
    rng: StdRng,
    seed: u64,
    pool: Vec<PoolEntry>,
    best: PoolEntry,
    jump_order: Vec<usize>,
}

impl CetsSolver {
    /// Builds a solver; validates shape, pool and jump-bound constraints.
    pub fn new(tensor: CostTensor, common: &CommonParams, params: &CetsParams) -> Result<Self> {
        let n = tensor.n();
        common.validate(n)?;
        params.validate(n)?;

        let (n1, n2) = params.clamped_bounds(n);
        let budget = Budget::from_params(common.time, common.max_iters)?;
        let seed = resolve_seed(common.seed);

        let pool = (0..params.pool_size + 2)
            .map(|_| PoolEntry::zeroed(n))
            .collect();

        Ok(Self {
            tensor,
            pool_size: params.pool_size,
            top: params.elite_size(),
            n1,
            n2,
            budget,
            trace: ProgressTrace::new(common.debug_interval),
            rng: seeded_rng(seed),
            seed,
            pool,
            best: PoolEntry::zeroed(n),
            jump_order: (0..n).collect(),
        })
    }

    fn randomize_entry(&mut self, idx: usize) {
        let entry = &mut self.pool[idx];
        for p in entry.prior.iter_mut() {
            *p = self.rng.gen::<f64>();
        }
        priority_to_perm(&entry.prior, &mut entry.perm);
        entry.cost = self.tensor.cost(&entry.perm);
    }

    fn generate_pool(&mut self) {
        for i in 0..self.pool.len() {
            self.randomize_entry(i);
        }
        self.best.assign_from(&self.pool[0]);
        self.sort_pool(self.pool_size);
        self.update_best();
    }

    /// Sorts the first `prefix` entries ascending by cost.
    fn sort_pool(&mut self, prefix: usize) {
        self.pool[..prefix].sort_by_key(|e| e.cost);
    }

    /// Pool is sorted; adopts the head if it beats the incumbent.
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

    /// The heavy step: for k in [n1, n2], one strict-descent pair sweep
    /// followed by a cyclic jump of p positions, p uniform in [n1, k].
    fn run_cets(&mut self, idx: usize) {
        let n = self.tensor.n();

        for k in self.n1..=self.n2 {
            if self.budget.expired(0) {
                return;
            }

            for r in 0..n {
                for s in (r + 1)..n {
                    let delta = self.tensor.swap_delta(&self.pool[idx].perm, r, s);
                    if delta < 0 {
                        exchange(&mut self.pool[idx], delta, r, s);
                        self.note_best(idx);
                    }
                }
            }

            let p = self.rng.gen_range(self.n1..=k);
            self.jump(idx, p);
            self.note_best(idx);
        }
    }

    /// Rotates p randomly chosen positions, then recomputes the cost from
    /// scratch to avoid delta drift.
    fn jump(&mut self, idx: usize, p: usize) {
        self.jump_order.shuffle(&mut self.rng);
        for i in 0..p {
            let a = self.jump_order[i];
            let b = self.jump_order[(i + 1) % p];
            exchange(&mut self.pool[idx], 0, a, b);
        }
        let cost = self.tensor.cost(&self.pool[idx].perm);
        self.pool[idx].cost = cost;
    }

    /// Bounded first-improvement sweeps; stops early on a clean sweep.
    fn local_search(&mut self, idx: usize, sweeps: usize) {
        let n = self.tensor.n();

        for _ in 0..sweeps {
            let mut moved = false;
            for r in 0..n {
                for s in (r + 1)..n {
                    let delta = self.tensor.swap_delta(&self.pool[idx].perm, r, s);
                    if delta < 0 {
                        exchange(&mut self.pool[idx], delta, r, s);
                        moved = true;
                    }
                }
            }
            if !moved {
                break;
            }
        }

        self.note_best(idx);
    }

    /// Runs one recombination variant and re-sorts the touched prefix.
    fn run_recombination(&mut self, variant: u32) {
        let s = self.pool_size;
        match variant {
            1 => {
                // random restart
                self.randomize_entry(s);
                self.local_search(s, RECOMB_LS_SWEEPS);
                self.sort_pool(s + 1);
            }
            2 => {
                // uniform crossover of two random parents
                let a = self.rng.gen_range(0..s);
                let b = self.rng.gen_range(0..s);
                self.crossover(a, b);
                self.local_search(s, RECOMB_LS_SWEEPS);
                self.local_search(s + 1, RECOMB_LS_SWEEPS);
                self.sort_pool(s + 2);
            }
            _ => {
                // centroid of a few elite members
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

    /// Coordinate-wise fair-coin crossover of the priors of parents `a`, `b`
    /// into the two scratch entries.
    fn crossover(&mut self, a: usize, b: usize) {
        let n = self.tensor.n();
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

        for child in [s, s + 1] {
            let entry = &mut self.pool[child];
            priority_to_perm(&entry.prior, &mut entry.perm);
            entry.cost = self.tensor.cost(&entry.perm);
        }
    }

    /// Coordinate-wise mean of the chosen parents' priors into scratch.
    fn centroid(&mut self, parents: &[usize]) {
        let n = self.tensor.n();
        let s = self.pool_size;

        for i in 0..n {
            let sum: f64 = parents.iter().map(|&p| self.pool[p].prior[i]).sum();
            self.pool[s].prior[i] = sum / parents.len() as f64;
        }

        let entry = &mut self.pool[s];
        priority_to_perm(&entry.prior, &mut entry.perm);
        entry.cost = self.tensor.cost(&entry.perm);
    }
}

impl Solver for CetsSolver {
    fn solve(&mut self) -> Result<Vec<usize>> {
        debug!(
            seed = self.seed,
            s = self.pool_size,
            top = self.top,
            n1 = self.n1,
            n2 = self.n2,
            "cets solve"
        );

        self.budget.start();
        self.generate_pool();
        self.trace.begin(&self.best.perm);

        let mut iter: u64 = 0;
        while !self.budget.expired(iter) {
            self.sort_pool(self.pool_size);
            self.update_best();

            let l = self.rng.gen_range(0..self.top);
            self.run_cets(l);
            self.sort_pool(self.pool_size);

            let variant = self.rng.gen_range(1..=3);
            self.run_recombination(variant);

            self.trace.note(&self.best.perm);
            iter += 1;
        }

        self.sort_pool(self.pool_size);
        self.update_best();
        self.trace.finish(&self.best.perm);

        debug!(cost = self.best.cost, iters = iter, "cets done");
        Ok(self.best.perm.clone())
    }

    fn snapshots(&self) -> &[Snapshot] {
        self.trace.snapshots()
    }
}
