//! Generalized force-directed relaxation (GFDR).
//!
//! One relaxation step tries to improve the placement by moving a single
//! device: first the plain swap with the occupant of its cheapest median
//! slot, then, failing that, chains of swaps explored breadth-first over the
//! eps best candidate slots until the accumulated delta turns negative or the
//! chain depth cap is reached.

use crate::median::MedianSelector;
use crate::placement::Placement;
use crate::separable::SeparableCost;

/// Reusable relaxation machinery: median scratch plus eps saved states.
#[derive(Debug)]
pub struct Relaxer {
    median: MedianSelector,
    scratch: Vec<Placement>,
    deltas: Vec<i64>,
    lambda_max: usize,
    eps: usize,
}

impl Relaxer {
    /// Builds the relaxer; `eps` must already be clamped to the slot count.
    pub fn new(sep: &SeparableCost, lambda_max: usize, eps: usize) -> Self {
        Self {
            median: MedianSelector::new(sep),
            scratch: (0..eps).map(|_| Placement::identity(sep)).collect(),
            deltas: vec![0; eps],
            lambda_max,
            eps,
        }
    }

    /// Attempts an improving move for `device`; returns whether one was
    /// applied to `sol`.
    pub fn relax(&mut self, sep: &SeparableCost, sol: &mut Placement, device: usize) -> bool {
        self.median.select(sep, sol, device, self.eps);

        {
            let opt_device = sol.slot_device[self.median.slots()[0]];
            let delta = sep.swap_delta(&sol.perm, device, opt_device);
            if delta < 0 {
                sol.apply_swap(device, opt_device, delta);
                return true;
            }
        }

        if self.lambda_max == 2 {
            return false;
        }

        // Seed one saved state per candidate slot with its (non-improving)
        // first swap applied.
        for q in 0..self.eps {
            self.scratch[q].assign_from(sol);

            let swap_device = sol.slot_device[self.median.slots()[q]];
            let delta = sep.swap_delta(&sol.perm, device, swap_device);

            self.scratch[q].apply_swap(device, swap_device, delta);
            self.deltas[q] = delta;
        }

        for _lambda in 3..=self.lambda_max {
            for q in 0..self.eps {
                self.median.select(sep, &self.scratch[q], device, self.eps);

                let swap_device = self.scratch[q].slot_device[self.median.slots()[0]];
                let delta = sep.swap_delta(&self.scratch[q].perm, device, swap_device);

                self.scratch[q].apply_swap(device, swap_device, delta);
                self.deltas[q] += delta;

                if self.deltas[q] < 0 {
                    sol.assign_from(&self.scratch[q]);
                    return true;
                }
            }
        }

        false
    }
}
