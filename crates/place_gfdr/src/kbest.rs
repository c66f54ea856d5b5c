//! k smallest pairwise sums of two sorted arrays.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Returns `k` index pairs `(i, j)` with the smallest `x[i] + y[j]`, in
/// non-decreasing sum order. Both inputs must be sorted ascending and
/// `k <= x.len() * y.len()` must hold.
///
/// A min-heap is seeded with every `(i, 0)` pair; popping `(i, j)` pushes
/// `(i, j + 1)`, so the whole run costs O((x.len() + k) log x.len()).
pub fn k_best_sums(x: &[i64], y: &[i64], k: usize) -> Vec<(usize, usize)> {
    debug_assert!(k <= x.len() * y.len());

    let mut heap: BinaryHeap<Reverse<(i64, usize, usize)>> = x
        .iter()
        .enumerate()
        .map(|(i, &v)| Reverse((v + y[0], i, 0)))
        .collect();

    let mut out = Vec::with_capacity(k);
    while out.len() < k {
        let Reverse((_, i, j)) = heap.pop().expect("k exceeds the number of pairs");
        out.push((i, j));
        if j + 1 < y.len() {
            heap.push(Reverse((x[i] + y[j + 1], i, j + 1)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use place_core::rng::seeded_rng;
    use rand::Rng;

    #[test]
    fn test_small_case() {
        let x = vec![0, 2, 5];
        let y = vec![1, 3];
        let pairs = k_best_sums(&x, &y, 4);
        let sums: Vec<i64> = pairs.iter().map(|&(i, j)| x[i] + y[j]).collect();
        assert_eq!(sums, vec![1, 3, 3, 5]);
    }

    #[test]
    fn test_full_enumeration_matches_sorted_cartesian() {
        let mut rng = seeded_rng(123);
        let mut x: Vec<i64> = (0..50).map(|_| rng.gen_range(-1000..1000)).collect();
        let mut y: Vec<i64> = (0..100).map(|_| rng.gen_range(-1000..1000)).collect();
        x.sort_unstable();
        y.sort_unstable();

        let k = 200;
        let pairs = k_best_sums(&x, &y, k);
        let sums: Vec<i64> = pairs.iter().map(|&(i, j)| x[i] + y[j]).collect();

        // non-decreasing
        assert!(sums.windows(2).all(|w| w[0] <= w[1]));

        // equal to the first k of the sorted Cartesian sums
        let mut all: Vec<i64> = x
            .iter()
            .flat_map(|&a| y.iter().map(move |&b| a + b))
            .collect();
        all.sort_unstable();
        assert_eq!(sums, all[..k].to_vec());
    }

    #[test]
    fn test_k_equals_total() {
        let x = vec![1, 2];
        let y = vec![10, 20];
        let pairs = k_best_sums(&x, &y, 4);
        assert_eq!(pairs.len(), 4);
        let sums: Vec<i64> = pairs.iter().map(|&(i, j)| x[i] + y[j]).collect();
        assert_eq!(sums, vec![11, 12, 21, 22]);
    }
}
