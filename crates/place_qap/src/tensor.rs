//! Rank-4 QAP cost tensor.
//!
//! `C[i][j][k][l]` is the pairwise wire-length contribution of placing device
//! `i` at slot `k` and device `j` at slot `l`. The tensor is flat-indexed and
//! immutable after construction; every constructor establishes the two
//! invariants the solvers rely on:
//!
//! - zero diagonals: `C[i][i][..][..] == 0` and `C[..][..][k][k] == 0`
//! - joint symmetry: `C[i][j][k][l] == C[j][i][l][k]`

use std::collections::HashMap;

use num_integer::Integer;
use rayon::prelude::*;

use place_core::prelude::*;

/// Cap on the net weight scale factor.
pub const MAX_NET_LCM: i64 = 1_000_000_000;

/// One pin-level interaction between two devices sharing a net.
struct PinPair {
    rel_a: Point,
    rel_b: Point,
    weight: i64,
}

/// Immutable rank-4 cost tensor over `n` devices and `n` slots.
#[derive(Debug, Clone)]
pub struct CostTensor {
    n: usize,
    c: Vec<i64>,
}

impl CostTensor {
    /// Builds the tensor from a layout and a slot grid.
    ///
    /// Each net of size `s >= 2` gets the integer weight `LCM / (s - 1)`
    /// where `LCM` runs over all such nets, so that per-net averaging stays
    /// exact in integers. Fails with [`PlaceError::OverscaledNet`] when the
    /// LCM exceeds [`MAX_NET_LCM`].
    pub fn from_layout(layout: &Layout, grid: &Grid) -> Result<Self> {
        let n = layout.device_count();
        if grid.slot_count() != n {
            return Err(PlaceError::shape(format!(
                "{} devices for {} slots",
                n,
                grid.slot_count()
            )));
        }

        let lcm = net_scale(layout)?;

        // Bucket pin-level interactions by ordered device pair.
        let mut pairs: HashMap<(usize, usize), Vec<PinPair>> = HashMap::new();
        for net in &layout.nets {
            let size = net.pins.len();
            if size <= 1 {
                continue;
            }
            let weight = lcm / (size as i64 - 1);
            for &pa in &net.pins {
                for &pb in &net.pins {
                    if pa == pb {
                        continue;
                    }
                    let a = &layout.pins[pa];
                    let b = &layout.pins[pb];
                    if a.device == b.device {
                        continue;
                    }
                    pairs.entry((a.device, b.device)).or_default().push(PinPair {
                        rel_a: a.relative,
                        rel_b: b.relative,
                        weight,
                    });
                }
            }
        }

        let positions = grid.slot_positions();
        let mut c = vec![0i64; n * n * n * n];

        // Each (i, j) block of the tensor is written by exactly one task.
        c.par_chunks_mut(n * n).enumerate().for_each(|(q, block)| {
            let pair = (q / n, q % n);
            let Some(interactions) = pairs.get(&pair) else {
                return;
            };
            for pp in interactions {
                for (p1, pos1) in positions.iter().enumerate() {
                    let ax = pos1.x + pp.rel_a.x;
                    let ay = pos1.y + pp.rel_a.y;
                    for (p2, pos2) in positions.iter().enumerate() {
                        if p1 == p2 {
                            continue;
                        }
                        let dx = (ax - pos2.x - pp.rel_b.x).abs();
                        let dy = (ay - pos2.y - pp.rel_b.y).abs();
                        block[p1 * n + p2] += pp.weight * (dx + dy);
                    }
                }
            }
        });

        Ok(Self { n, c })
    }

    /// Builds the tensor from nested arrays, validating shape and the
    /// zero-diagonal/symmetry invariants.
    pub fn from_nested(cost: &[Vec<Vec<Vec<i64>>>]) -> Result<Self> {
        let n = cost.len();

        for (i, ci) in cost.iter().enumerate() {
            if ci.len() != n {
                return Err(PlaceError::shape(format!("cost[{i}] has length {}", ci.len())));
            }
            for (j, cij) in ci.iter().enumerate() {
                if cij.len() != n {
                    return Err(PlaceError::shape(format!(
                        "cost[{i}][{j}] has length {}",
                        cij.len()
                    )));
                }
                for (k, cijk) in cij.iter().enumerate() {
                    if cijk.len() != n {
                        return Err(PlaceError::shape(format!(
                            "cost[{i}][{j}][{k}] has length {}",
                            cijk.len()
                        )));
                    }
                }
            }
        }

        let mut c = vec![0i64; n * n * n * n];
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    for l in 0..n {
                        let v = cost[i][j][k][l];
                        if (i == j || k == l) && v != 0 {
                            return Err(PlaceError::CostNotZeroDiagonal { i, j, k, l });
                        }
                        if v != cost[j][i][l][k] {
                            return Err(PlaceError::CostNotSymmetric { i, j, k, l });
                        }
                        c[((i * n + j) * n + k) * n + l] = v;
                    }
                }
            }
        }
        Ok(Self { n, c })
    }

    /// Builds the Koopmans-Beckmann form `C[i][j][k][l] = flow[i][j] *
    /// dist[k][l]` from two symmetric zero-diagonal matrices.
    pub fn from_flow_distance(flow: &[Vec<i64>], dist: &[Vec<i64>]) -> Result<Self> {
        let n = flow.len();
        if dist.len() != n {
            return Err(PlaceError::shape(format!(
                "flow is {n}x{n} but dist has {} rows",
                dist.len()
            )));
        }
        check_square_symmetric(flow, n)?;
        check_square_symmetric(dist, n)?;

        let mut c = vec![0i64; n * n * n * n];
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    for l in 0..n {
                        c[((i * n + j) * n + k) * n + l] = flow[i][j] * dist[k][l];
                    }
                }
            }
        }
        Ok(Self { n, c })
    }

    /// Number of devices (equal to the number of slots).
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    fn at(&self, i: usize, j: usize, k: usize, l: usize) -> i64 {
        self.c[((i * self.n + j) * self.n + k) * self.n + l]
    }

    /// Full cost of a permutation: sum over unordered device pairs.
    pub fn cost(&self, perm: &[usize]) -> i64 {
        debug_assert_eq!(perm.len(), self.n);
        let mut ret = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                ret += self.at(i, j, perm[i], perm[j]);
            }
        }
        ret
    }

    /// Exact cost change of exchanging `perm[r]` and `perm[s]`, in O(n).
    pub fn swap_delta(&self, perm: &[usize], r: usize, s: usize) -> i64 {
        let mut ret = 0;
        for i in 0..self.n {
            if i != r && i != s {
                ret += self.at(r, i, perm[s], perm[i]) - self.at(r, i, perm[r], perm[i])
                    + self.at(s, i, perm[r], perm[i])
                    - self.at(s, i, perm[s], perm[i]);
            }
        }
        ret += self.at(s, r, perm[r], perm[s]) - self.at(s, r, perm[s], perm[r]);
        ret
    }

    /// Re-checks the zero-diagonal and symmetry invariants over every entry.
    pub fn validate(&self) -> Result<()> {
        let n = self.n;
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    for l in 0..n {
                        let v = self.at(i, j, k, l);
                        if (i == j || k == l) && v != 0 {
                            return Err(PlaceError::CostNotZeroDiagonal { i, j, k, l });
                        }
                        if v != self.at(j, i, l, k) {
                            return Err(PlaceError::CostNotSymmetric { i, j, k, l });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// LCM of `(net size - 1)` over all nets of size at least 2.
fn net_scale(layout: &Layout) -> Result<i64> {
    let mut lcm: i64 = 1;
    for net in &layout.nets {
        let size = net.pins.len() as i64;
        if size <= 1 {
            continue;
        }
        lcm = lcm.lcm(&(size - 1));
        if lcm > MAX_NET_LCM {
            return Err(PlaceError::OverscaledNet {
                lcm,
                cap: MAX_NET_LCM,
            });
        }
    }
    Ok(lcm)
}

fn check_square_symmetric(m: &[Vec<i64>], n: usize) -> Result<()> {
    for (i, row) in m.iter().enumerate() {
        if row.len() != n {
            return Err(PlaceError::shape(format!("row {i} has length {}", row.len())));
        }
        if row[i] != 0 {
            return Err(PlaceError::CostNotZeroDiagonal { i, j: i, k: i, l: i });
        }
        for (j, &v) in row.iter().enumerate() {
            if v != m[j][i] {
                return Err(PlaceError::CostNotSymmetric { i, j, k: i, l: j });
            }
        }
    }
    Ok(())
}
