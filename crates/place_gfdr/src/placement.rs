//! Working solution of the relaxation solvers.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::Rng;

use crate::separable::SeparableCost;

/// A placement under relaxation: the device-to-slot permutation, its inverse,
/// the priority vector used by recombination, and the cached cost.
#[derive(Debug, Clone)]
pub struct Placement {
    /// Device `i` occupies slot `perm[i]`
    pub perm: Vec<usize>,
    /// Slot `s` holds device `slot_device[s]`
    pub slot_device: Vec<usize>,
    /// Priority vector; only its ordering matters
    pub prior: Vec<f64>,
    /// Cached total wire length
    pub cost: i64,
}

impl Placement {
    /// The identity placement (device `i` at slot `i`).
    pub fn identity(sep: &SeparableCost) -> Self {
        let n = sep.device_count();
        let perm: Vec<usize> = (0..n).collect();
        let cost = sep.cost(&perm);
        Self {
            slot_device: perm.clone(),
            perm,
            prior: vec![0.0; n],
            cost,
        }
    }

    /// Re-derives permutation, inverse and cost from the priority vector:
    /// devices ranked by ascending priority, ties broken by index.
    pub fn rederive(&mut self, sep: &SeparableCost) {
        let n = self.prior.len();
        for (s, d) in self.slot_device.iter_mut().enumerate() {
            *d = s;
        }
        let prior = &self.prior;
        self.slot_device.sort_by(|&i, &j| {
            prior[i]
                .partial_cmp(&prior[j])
                .unwrap_or(Ordering::Equal)
                .then_with(|| i.cmp(&j))
        });
        for rank in 0..n {
            self.perm[self.slot_device[rank]] = rank;
        }
        self.cost = sep.cost(&self.perm);
    }

    /// Samples a fresh priority vector and re-derives the placement.
    pub fn randomize(&mut self, sep: &SeparableCost, rng: &mut StdRng) {
        for p in self.prior.iter_mut() {
            *p = rng.gen::<f64>();
        }
        self.rederive(sep);
    }

    /// Exchanges the slots of devices `i` and `j`, applying the precomputed
    /// cost delta and keeping the inverse mapping aligned.
    pub fn apply_swap(&mut self, i: usize, j: usize, delta: i64) {
        self.cost += delta;
        self.slot_device.swap(self.perm[i], self.perm[j]);
        self.perm.swap(i, j);
    }

    /// Copies another placement into this one without reallocating.
    pub fn assign_from(&mut self, other: &Placement) {
        self.perm.copy_from_slice(&other.perm);
        self.slot_device.copy_from_slice(&other.slot_device);
        self.prior.copy_from_slice(&other.prior);
        self.cost = other.cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::separable::tests::random_instance;
    use place_core::rng::seeded_rng;

    #[test]
    fn test_identity() {
        let sep = random_instance(2, 2, 1);
        let sol = Placement::identity(&sep);
        assert_eq!(sol.perm, vec![0, 1, 2, 3]);
        assert_eq!(sol.slot_device, vec![0, 1, 2, 3]);
        assert_eq!(sol.cost, sep.cost(&sol.perm));
    }

    #[test]
    fn test_rederive_ranking() {
        let sep = random_instance(1, 4, 2);
        let mut sol = Placement::identity(&sep);
        sol.prior = vec![0.9, 0.1, 0.5, 0.5];
        sol.rederive(&sep);

        // device 1 ranks first, ties between 2 and 3 break by index
        assert_eq!(sol.perm, vec![3, 0, 1, 2]);
        assert_eq!(sol.slot_device, vec![1, 2, 3, 0]);
        assert_eq!(sol.cost, sep.cost(&sol.perm));
    }

    #[test]
    fn test_apply_swap_consistency() {
        let sep = random_instance(2, 3, 3);
        let mut rng = seeded_rng(5);
        let mut sol = Placement::identity(&sep);
        sol.randomize(&sep, &mut rng);

        let delta = sep.swap_delta(&sol.perm, 1, 4);
        sol.apply_swap(1, 4, delta);

        assert_eq!(sol.cost, sep.cost(&sol.perm));
        for s in 0..sep.device_count() {
            assert_eq!(sol.perm[sol.slot_device[s]], s);
        }
    }
}
