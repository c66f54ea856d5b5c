//! Permutation primitives.
//!
//! A placement is a permutation `perm` of `{0, .., n-1}` where device `i`
//! occupies slot `perm[i]`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The identity permutation of length `n`.
pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// A uniformly random permutation of length `n`.
pub fn random_perm(n: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut p = identity(n);
    p.shuffle(rng);
    p
}

/// The inverse permutation: `inverse(p)[p[i]] == i`.
pub fn inverse(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (i, &s) in perm.iter().enumerate() {
        inv[s] = i;
    }
    inv
}

/// Checks that `perm` is a bijection on `{0, .., n-1}`.
pub fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &s in perm {
        if s >= perm.len() || seen[s] {
            return false;
        }
        seen[s] = true;
    }
    true
}

/// Number of indices where `a` and `b` differ.
pub fn hamming(a: &[usize], b: &[usize]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Change of `hamming(perm, reference)` induced by swapping `perm[r]` and
/// `perm[s]`, without forming the swapped permutation. Always in `-2..=2`.
pub fn hamming_delta(perm: &[usize], reference: &[usize], r: usize, s: usize) -> i32 {
    let mut ret = 0;

    if perm[r] == reference[r] {
        ret += 1;
    } else if perm[s] == reference[r] {
        ret -= 1;
    }

    if perm[s] == reference[s] {
        ret += 1;
    } else if perm[r] == reference[s] {
        ret -= 1;
    }

    ret
}
