//! SORG: stochastic greedy construction.
//!
//! Devices are placed one by one in decreasing "interest" order (IOC, the
//! accumulated connection weight toward already placed devices), with a coin
//! flip between the two most interesting candidates, each landing on the slot
//! of minimal incremental cost.

use rand::rngs::StdRng;
use rand::Rng;

use crate::placement::Placement;
use crate::separable::SeparableCost;

/// Builds an initial placement greedily with a stochastic tie-break.
pub fn construct(sep: &SeparableCost, rng: &mut StdRng) -> Placement {
    let n = sep.device_count();

    let mut placed = vec![false; n];
    let mut taken = vec![false; n];

    // IOC starts at minus the total connectivity and gains back the weight
    // toward each device as it is placed.
    let mut ioc = vec![0i64; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                ioc[i] -= sep.weight_at(i, j);
            }
        }
    }

    let mut sol = Placement::identity(sep);

    for _ in 0..n {
        // Top two unplaced devices by IOC. The promotion inequalities bias
        // ties toward higher indices.
        let mut dev1: Option<usize> = None;
        let mut dev2: Option<usize> = None;
        for j in 0..n {
            if placed[j] {
                continue;
            }
            let Some(d1) = dev1 else {
                dev1 = Some(j);
                continue;
            };
            if ioc[j] >= ioc[d1] {
                dev2 = dev1;
                dev1 = Some(j);
            } else if dev2.map_or(true, |d2| ioc[j] > ioc[d2]) {
                dev2 = Some(j);
            }
        }

        let mut dev = dev1.expect("an unplaced device remains");
        if let Some(d2) = dev2 {
            if rng.gen::<bool>() {
                dev = d2;
            }
        }

        // Cheapest untaken slot against everything already placed; ties go
        // to the lowest slot index.
        let mut best_slot: Option<usize> = None;
        let mut best_cost = 0i64;
        for slot in 0..n {
            if taken[slot] {
                continue;
            }
            let mut cost = 0;
            for d in 0..n {
                if placed[d] {
                    cost += sep.contrib(d, dev, sol.perm[d], slot);
                }
            }
            if best_slot.is_none() || cost < best_cost {
                best_slot = Some(slot);
                best_cost = cost;
            }
        }
        let slot = best_slot.expect("an untaken slot remains");

        placed[dev] = true;
        taken[slot] = true;
        sol.perm[dev] = slot;
        sol.slot_device[slot] = dev;

        for j in 0..n {
            if j != dev {
                ioc[j] += sep.weight_at(dev, j);
            }
        }
    }

    sol.cost = sep.cost(&sol.perm);
    sol
}
