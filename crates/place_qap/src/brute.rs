//! Exhaustive reference solver.
//!
//! Scans every permutation; only feasible for small instances, but exact.
//! The metaheuristic tests use it as the ground truth.

use place_core::perm::identity;

use crate::tensor::CostTensor;

/// Returns the optimal permutation and its cost by full enumeration.
///
/// Runs in O(n! * n^2); keep `n` small (the tests stay at n <= 9).
pub fn brute_force(tensor: &CostTensor) -> (Vec<usize>, i64) {
    let n = tensor.n();
    let mut perm = identity(n);
    let mut best = perm.clone();
    let mut best_cost = tensor.cost(&perm);

    // Heap's algorithm, iterative form.
    let mut c = vec![0usize; n];
    let mut i = 0;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(c[i], i);
            }
            let cost = tensor.cost(&perm);
            if cost < best_cost {
                best_cost = cost;
                best.copy_from_slice(&perm);
            }
            c[i] += 1;
            i = 0;
        } else {
            c[i] = 0;
            i += 1;
        }
    }

    (best, best_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::tests::random_tensor;
    use place_core::perm::is_permutation;

    #[test]
    fn test_trivial_zero_tensor() {
        let c = vec![vec![vec![vec![0i64; 3]; 3]; 3]; 3];
        let tensor = CostTensor::from_nested(&c).unwrap();
        let (perm, cost) = brute_force(&tensor);
        assert!(is_permutation(&perm));
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_forced_adjacency() {
        // Only pair (0, 1) costs anything: |k - l| over a 3-slot line.
        let n = 3;
        let mut c = vec![vec![vec![vec![0i64; n]; n]; n]; n];
        for k in 0..n {
            for l in 0..n {
                let d = (k as i64 - l as i64).abs();
                c[0][1][k][l] = d;
                c[1][0][l][k] = d;
            }
        }
        let tensor = CostTensor::from_nested(&c).unwrap();
        let (perm, cost) = brute_force(&tensor);
        assert_eq!(cost, 1);
        assert_eq!((perm[0] as i64 - perm[1] as i64).abs(), 1);
    }

    #[test]
    fn test_matches_exhaustive_scan() {
        // Cross-check Heap's enumeration against a straightforward recursion.
        let tensor = random_tensor(5, 77);
        let (_, best) = brute_force(&tensor);

        let mut min = i64::MAX;
        let mut perm: Vec<usize> = (0..5).collect();
        fn rec(tensor: &CostTensor, perm: &mut Vec<usize>, k: usize, min: &mut i64) {
            if k == perm.len() {
                *min = (*min).min(tensor.cost(perm));
                return;
            }
            for i in k..perm.len() {
                perm.swap(k, i);
                rec(tensor, perm, k + 1, min);
                perm.swap(k, i);
            }
        }
        rec(&tensor, &mut perm, 0, &mut min);
        assert_eq!(best, min);
    }
}
