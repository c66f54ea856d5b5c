//! List-descent QAP solver.
//!
//! Iterated neighbourhood search after Z. Drezner, "A New Heuristic for the
//! Quadratic Assignment Problem" (Journal of Applied Mathematics and Decision
//! Sciences, 6(3), 2002). Three rolling lists hold the best K permutations at
//! Hamming distance `dp`, `dp+1`, `dp+2` from the incumbent; the windows
//! advance until a drawn target distance is exceeded, and the search restarts
//! from a fresh random center whenever its improvement counter runs out.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use place_core::budget::Budget;
use place_core::config::{CommonParams, DreznerParams};
use place_core::error::Result;
use place_core::perm::{hamming_delta, identity, random_perm};
use place_core::rng::{resolve_seed, seeded_rng};
use place_core::solver::Solver;
use place_core::trace::{ProgressTrace, Snapshot};

use crate::pool::{CandidateList, Solution, SolutionArena};
use crate::tensor::CostTensor;

/// Drezner-style list-descent solver over a rank-4 cost tensor.
pub struct DreznerSolver {
    tensor: CostTensor,
    list_capacity: usize,
    budget: Budget,
    trace: ProgressTrace,
    rng: StdRng,
    seed: u64,
}

impl DreznerSolver {
    /// Builds a solver; validates the grid shape against the tensor and the
    /// list capacity constraint.
    pub fn new(tensor: CostTensor, common: &CommonParams, params: &DreznerParams) -> Result<Self> {
        common.validate(tensor.n())?;
        params.validate()?;
        let budget = Budget::from_params(common.time, common.max_iters)?;
        let seed = resolve_seed(common.seed);
        Ok(Self {
            tensor,
            list_capacity: params.list_capacity,
            budget,
            trace: ProgressTrace::new(common.debug_interval),
            rng: seeded_rng(seed),
            seed,
        })
    }

    /// One restart round: random center, then the counter-driven cycle of
    /// `qap_iter` invocations. Returns the best solution of the round.
    fn round(&mut self, arena: &mut SolutionArena) -> Solution {
        let n = self.tensor.n();

        let perm = random_perm(n, &mut self.rng);
        let cost = self.tensor.cost(&perm);
        let mut center = Solution { perm, cost };
        let mut bfs = center.clone();

        let mut c = 0;
        loop {
            if self.budget.expired(0) {
                break;
            }

            // target distance in {n-4, n-3, n-2}, at least 1
            let mut d = n as i64 - self.rng.gen_range(2..=4);
            if d <= 0 {
                d = 1;
            }

            let (iter_best, iter_second, memory_best) = self.qap_iter(&center, d, arena);

            if iter_best.cost < bfs.cost {
                c = 0;
                bfs = iter_best.clone();
            }
            c += 1;

            match c {
                1 | 3 => center = memory_best.unwrap_or_else(|| iter_best.clone()),
                2 | 4 => center = iter_second.unwrap_or(iter_best),
                _ => break,
            }
        }

        bfs
    }

    /// The inner window walk. Returns the best solution found, the runner-up
    /// and the best element of the final window (the "memory").
    fn qap_iter(
        &mut self,
        center: &Solution,
        d: i64,
        arena: &mut SolutionArena,
    ) -> (Solution, Option<Solution>, Option<Solution>) {
        let k = self.list_capacity;

        let mut list0 = CandidateList::new(k);
        let mut list1 = CandidateList::new(k);
        let mut list2 = CandidateList::new(k);

        let h = arena.create(&center.perm, center.cost);
        list0.push(h, arena);

        let mut bfs = center.clone();
        let mut bfs2: Option<Solution> = None;
        let mut memory_best: Option<Solution> = None;

        let mut dp: i64 = 0;
        while dp <= d {
            if self.budget.expired(0) {
                break;
            }

            let prev = bfs.cost;
            self.new_bfs(&mut list0, &mut bfs, &mut bfs2, arena);

            if bfs.cost != prev {
                list1.clear();
                list2.clear();
                dp = 0;
            }

            self.upd_lists(&list0, &mut list1, &mut list2, &bfs, arena);

            memory_best = list0.best(arena).map(|h| arena.get(h).clone());

            if list1.is_empty() {
                list0 = std::mem::replace(&mut list2, CandidateList::new(k));
                list1.clear();
                dp += 1;
            } else {
                list0 = std::mem::replace(&mut list1, std::mem::replace(&mut list2, CandidateList::new(k)));
            }

            dp += 1;
        }

        (bfs, bfs2, memory_best)
    }

    /// Exhausts pairwise swaps over the window: a strict improvement replaces
    /// the incumbent and restarts the sweep from the shrunk window; the best
    /// non-improving candidate is tracked as the runner-up.
    fn new_bfs(
        &self,
        list0: &mut CandidateList,
        bfs: &mut Solution,
        bfs2: &mut Option<Solution>,
        arena: &mut SolutionArena,
    ) {
        let n = self.tensor.n();

        'sweep: loop {
            if self.budget.expired(0) {
                break;
            }

            for idx in 0..list0.len() {
                let cur = arena.get(list0.handles()[idx]).clone();

                for j in 0..n {
                    for k in (j + 1)..n {
                        let cand_cost = cur.cost + self.tensor.swap_delta(&cur.perm, j, k);

                        if cand_cost < bfs.cost {
                            *bfs = cur.clone();
                            bfs.perm.swap(j, k);
                            bfs.cost = cand_cost;

                            list0.clear();
                            let h = arena.create(&bfs.perm, bfs.cost);
                            list0.push(h, arena);
                            continue 'sweep;
                        }

                        if bfs2.as_ref().map_or(true, |b| cand_cost < b.cost) {
                            let mut cand = cur.clone();
                            cand.perm.swap(j, k);
                            cand.cost = cand_cost;
                            *bfs2 = Some(cand);
                        }
                    }
                }
            }

            break;
        }
    }

    /// Feeds the next two windows with every swap that moves a window element
    /// one or two Hamming steps away from the incumbent.
    fn upd_lists(
        &self,
        list0: &CandidateList,
        list1: &mut CandidateList,
        list2: &mut CandidateList,
        bfs: &Solution,
        arena: &mut SolutionArena,
    ) {
        let n = self.tensor.n();

        for idx in 0..list0.len() {
            let cur = arena.get(list0.handles()[idx]).clone();

            for j in 0..n {
                for k in (j + 1)..n {
                    let dh = hamming_delta(&cur.perm, &bfs.perm, j, k);
                    if dh <= 0 {
                        continue;
                    }

                    let cost = cur.cost + self.tensor.swap_delta(&cur.perm, j, k);
                    let mut perm = cur.perm.clone();
                    perm.swap(j, k);

                    let h = arena.create(&perm, cost);
                    let kept = if dh == 1 {
                        list1.insert(h, arena)
                    } else {
                        list2.insert(h, arena)
                    };
                    if !kept {
                        arena.free_last();
                    }
                }
            }
        }
    }
}

impl Solver for DreznerSolver {
    fn solve(&mut self) -> Result<Vec<usize>> {
        let n = self.tensor.n();
        debug!(seed = self.seed, k = self.list_capacity, n, "drezner solve");

        self.budget.start();

        if n <= 1 {
            let perm = identity(n);
            self.trace.begin(&perm);
            self.trace.finish(&perm);
            return Ok(perm);
        }

        let perm = random_perm(n, &mut self.rng);
        let cost = self.tensor.cost(&perm);
        let mut best = Solution { perm, cost };
        self.trace.begin(&best.perm);

        let mut arena = SolutionArena::new(n);
        let mut rounds: u64 = 0;

        while !self.budget.expired(rounds) {
            let round_best = self.round(&mut arena);
            if round_best.cost < best.cost {
                best = round_best;
            }
            arena.free_all();
            self.trace.note(&best.perm);
            rounds += 1;
        }

        self.trace.finish(&best.perm);
        debug!(cost = best.cost, rounds, "drezner done");
        Ok(best.perm)
    }

    fn snapshots(&self) -> &[Snapshot] {
        self.trace.snapshots()
    }
}
