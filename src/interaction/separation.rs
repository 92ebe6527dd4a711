//! Pairwise separation tensors
//!
//! `dx[[i, j, k]] = x_i[k] - x_j[k]` for every ordered pair, together with
//! the distance matrix `r[[i, j]] = |dx[i, j]|`. Both are built once per
//! evaluation and shared by the tensor formulations of gravity and the
//! smoothing kernel.

use ndarray::{Array2, Array3, Axis, Zip};

use crate::interaction::states::NVec3;

/// Outer difference of a list of 3-vectors, shape `(N, N, 3)`
/// - antisymmetric in (i, j), exactly zero on the diagonal
pub fn outer_difference(v: &[NVec3]) -> Array3<f64> {
    let n = v.len();
    let mut d = Array3::<f64>::zeros((n, n, 3));
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue; // diagonal stays exactly 0
            }
            let diff = v[i] - v[j];
            for k in 0..3 {
                d[[i, j, k]] = diff[k];
            }
        }
    }
    d
}

/// Euclidean norm over the last axis of an `(N, N, 3)` tensor
pub fn lane_norms(d: &Array3<f64>) -> Array2<f64> {
    let (n, m, _) = d.dim();
    let mut r = Array2::<f64>::zeros((n, m));
    Zip::from(&mut r)
        .and(d.lanes(Axis(2)))
        .for_each(|r, lane| *r = lane.dot(&lane).sqrt());
    r
}

#[derive(Debug, Clone)]
pub struct Separations {
    pub dx: Array3<f64>, // separation vectors, (N, N, 3)
    pub r: Array2<f64>, // distances, (N, N)
}

impl Separations {
    pub fn from_positions(x: &[NVec3]) -> Self {
        let dx = outer_difference(x);
        let r = lane_norms(&dx);
        Self { dx, r }
    }

    pub fn len(&self) -> usize {
        self.r.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Separation vector of pair (i, j) as an `NVec3`
    pub fn dx_at(&self, i: usize, j: usize) -> NVec3 {
        NVec3::new(self.dx[[i, j, 0]], self.dx[[i, j, 1]], self.dx[[i, j, 2]])
    }

    /// First distinct pair (i < j) at zero distance, if any
    pub fn first_coincident(&self) -> Option<(usize, usize)> {
        let n = self.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.r[[i, j]] == 0.0 {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
