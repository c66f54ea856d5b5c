//! Separable cost representation.
//!
//! Instead of a rank-4 tensor, the wire length decomposes per ordered device
//! pair into an x-only and a y-only term: a center-distance part weighted by
//! the pair weight, plus a pin term selected by the ordering of the two slot
//! coordinates (strictly left / same column / strictly right, and likewise
//! vertically). This is what makes O(n log n) per-device scoring possible.

use num_integer::Integer;

use place_core::prelude::*;

/// Cap on the net weight scale factor.
pub const MAX_NET_LCM: i64 = 1_000_000_000;

/// Pairwise separable cost data over `n` devices on a slot grid.
#[derive(Debug, Clone)]
pub struct SeparableCost {
    devices: usize,
    rows: usize,
    cols: usize,
    step_x: i64,
    step_y: i64,
    left_x: Vec<i64>,
    same_x: Vec<i64>,
    right_x: Vec<i64>,
    up_y: Vec<i64>,
    same_y: Vec<i64>,
    down_y: Vec<i64>,
    weight: Vec<i64>,
    loc_x: Vec<i64>,
    loc_y: Vec<i64>,
}

impl SeparableCost {
    /// Builds the separable matrices from a layout and a slot grid, with the
    /// same LCM net scaling as the tensor form.
    pub fn from_layout(layout: &Layout, grid: &Grid) -> Result<Self> {
        let n = layout.device_count();
        if grid.slot_count() != n {
            return Err(PlaceError::shape(format!(
                "{} devices for {} slots",
                n,
                grid.slot_count()
            )));
        }

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

        let mut left_x = vec![0i64; n * n];
        let mut same_x = vec![0i64; n * n];
        let mut up_y = vec![0i64; n * n];
        let mut same_y = vec![0i64; n * n];
        let mut weight = vec![0i64; n * n];

        for net in &layout.nets {
            let size = net.pins.len();
            if size <= 1 {
                continue;
            }
            let coef = lcm / (size as i64 - 1);
            for &pa in &net.pins {
                for &pb in &net.pins {
                    let a = &layout.pins[pa];
                    let b = &layout.pins[pb];
                    if pa == pb || a.device == b.device {
                        continue;
                    }
                    let q = a.device * n + b.device;

                    weight[q] += coef;

                    same_x[q] += coef * (a.relative.x - b.relative.x).abs();
                    same_y[q] += coef * (a.relative.y - b.relative.y).abs();

                    left_x[q] += coef * (-a.relative.x + b.relative.x);
                    up_y[q] += coef * (a.relative.y - b.relative.y);
                }
            }
        }

        Self::assemble(grid, left_x, same_x, up_y, same_y, weight)
    }

    /// Builds the representation from explicit matrices. `right_x` and
    /// `down_y` are derived as the transposes of `left_x` and `up_y`; the
    /// weight matrix must be symmetric with a zero diagonal.
    pub fn from_matrices(
        grid: &Grid,
        left_x: &[Vec<i64>],
        same_x: &[Vec<i64>],
        up_y: &[Vec<i64>],
        same_y: &[Vec<i64>],
        weight: &[Vec<i64>],
    ) -> Result<Self> {
        let n = grid.slot_count();
        for (name, m) in [
            ("left_x", left_x),
            ("same_x", same_x),
            ("up_y", up_y),
            ("same_y", same_y),
            ("weight", weight),
        ] {
            if m.len() != n || m.iter().any(|row| row.len() != n) {
                return Err(PlaceError::shape(format!("{name} matrix is not {n}x{n}")));
            }
        }
        for i in 0..n {
            if weight[i][i] != 0 {
                return Err(PlaceError::CostNotZeroDiagonal { i, j: i, k: i, l: i });
            }
            for j in 0..n {
                if weight[i][j] != weight[j][i] {
                    return Err(PlaceError::CostNotSymmetric { i, j, k: i, l: j });
                }
            }
        }

        let flat = |m: &[Vec<i64>]| -> Vec<i64> {
            let mut out = vec![0i64; n * n];
            for i in 0..n {
                out[i * n..(i + 1) * n].copy_from_slice(&m[i]);
            }
            out
        };

        Self::assemble(grid, flat(left_x), flat(same_x), flat(up_y), flat(same_y), flat(weight))
    }

    fn assemble(
        grid: &Grid,
        left_x: Vec<i64>,
        same_x: Vec<i64>,
        up_y: Vec<i64>,
        same_y: Vec<i64>,
        weight: Vec<i64>,
    ) -> Result<Self> {
        let n = grid.slot_count();

        let mut right_x = vec![0i64; n * n];
        let mut down_y = vec![0i64; n * n];
        for i in 0..n {
            for j in 0..n {
                right_x[i * n + j] = left_x[j * n + i];
                down_y[i * n + j] = up_y[j * n + i];
            }
        }

        let loc_x = (0..n).map(|s| grid.slot_x(s)).collect();
        let loc_y = (0..n).map(|s| grid.slot_y(s)).collect();

        Ok(Self {
            devices: n,
            rows: grid.rows,
            cols: grid.cols,
            step_x: grid.step_x,
            step_y: grid.step_y,
            left_x,
            same_x,
            right_x,
            up_y,
            same_y,
            down_y,
            weight,
            loc_x,
            loc_y,
        })
    }

    /// Number of devices (equal to the number of slots).
    pub fn device_count(&self) -> usize {
        self.devices
    }

    /// Grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Horizontal slot pitch.
    pub fn step_x(&self) -> i64 {
        self.step_x
    }

    /// Vertical slot pitch.
    pub fn step_y(&self) -> i64 {
        self.step_y
    }

    #[inline]
    pub(crate) fn pair(&self, i: usize, j: usize) -> usize {
        i * self.devices + j
    }

    #[inline]
    pub(crate) fn weight_at(&self, i: usize, j: usize) -> i64 {
        self.weight[self.pair(i, j)]
    }

    #[inline]
    pub(crate) fn left_x_at(&self, pair: usize) -> i64 {
        self.left_x[pair]
    }

    #[inline]
    pub(crate) fn same_x_at(&self, pair: usize) -> i64 {
        self.same_x[pair]
    }

    #[inline]
    pub(crate) fn right_x_at(&self, pair: usize) -> i64 {
        self.right_x[pair]
    }

    #[inline]
    pub(crate) fn up_y_at(&self, pair: usize) -> i64 {
        self.up_y[pair]
    }

    #[inline]
    pub(crate) fn same_y_at(&self, pair: usize) -> i64 {
        self.same_y[pair]
    }

    #[inline]
    pub(crate) fn down_y_at(&self, pair: usize) -> i64 {
        self.down_y[pair]
    }

    /// Horizontal contribution of the ordered pair (i, j) at x coordinates
    /// `xi`, `xj`.
    #[inline]
    pub fn contrib_x(&self, i: usize, j: usize, xi: i64, xj: i64) -> i64 {
        let pair = self.pair(i, j);
        let pin = if xi == xj {
            self.same_x[pair]
        } else if xi < xj {
            self.left_x[pair]
        } else {
            self.right_x[pair]
        };
        self.weight[pair] * (xi - xj).abs() + pin
    }

    /// Vertical contribution of the ordered pair (i, j) at y coordinates
    /// `yi`, `yj`.
    #[inline]
    pub fn contrib_y(&self, i: usize, j: usize, yi: i64, yj: i64) -> i64 {
        let pair = self.pair(i, j);
        let pin = if yi == yj {
            self.same_y[pair]
        } else if yi < yj {
            self.down_y[pair]
        } else {
            self.up_y[pair]
        };
        self.weight[pair] * (yi - yj).abs() + pin
    }

    /// Contribution of the ordered pair (i, j) with device `i` at slot
    /// `pos_i` and device `j` at slot `pos_j`.
    pub fn contrib(&self, i: usize, j: usize, pos_i: usize, pos_j: usize) -> i64 {
        if i == j {
            return 0;
        }
        self.contrib_x(i, j, self.loc_x[pos_i], self.loc_x[pos_j])
            + self.contrib_y(i, j, self.loc_y[pos_i], self.loc_y[pos_j])
    }

    /// Total wire length of a permutation.
    pub fn cost(&self, perm: &[usize]) -> i64 {
        debug_assert_eq!(perm.len(), self.devices);
        let mut ret = 0;
        for i in 0..self.devices {
            for j in (i + 1)..self.devices {
                ret += self.contrib(i, j, perm[i], perm[j]);
            }
        }
        ret
    }

    /// Exact cost change of exchanging the slots of devices `i` and `j`.
    pub fn swap_delta(&self, perm: &[usize], i: usize, j: usize) -> i64 {
        if i == j {
            return 0;
        }
        let pos_i = perm[i];
        let pos_j = perm[j];
        let mut ret = 0;
        for q in 0..self.devices {
            if q == i || q == j {
                continue;
            }
            let pos_q = perm[q];
            ret += self.contrib(i, q, pos_j, pos_q) - self.contrib(i, q, pos_i, pos_q)
                + self.contrib(j, q, pos_i, pos_q)
                - self.contrib(j, q, pos_j, pos_q);
        }
        ret += self.contrib(i, j, pos_j, pos_i) - self.contrib(i, j, pos_i, pos_j);
        ret
    }
}
