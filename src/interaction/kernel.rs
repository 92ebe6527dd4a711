//! Cubic-spline smoothing kernel (SPH)
//!
//! With `q = r / h` the radial profile is
//!
//! ```text
//! W(q) = alpha * (2/3 - q^2 + q^3/2)     0 <= q < 1
//!      = alpha * (2 - q)^3 / 6           1 <= q < 2
//!      = 0                               q >= 2
//! ```
//!
//! and the gradient is `dW = alpha * f(q) * dx` with
//! `f = (-2 + 1.5 q) / h^2` on the inner branch and
//! `f = -0.5 (2 - q)^2 / (h r)` on the outer one. Support ends at `q = 2`,
//! which is also the neighbor criterion.

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::error::{PairwiseError, Result};
use crate::interaction::params::{validate_smoothing, Parameters};
use crate::interaction::separation::Separations;
use crate::interaction::states::ParticleSet;

/// Normalized distance at which the kernel support ends
pub const SUPPORT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSpline {
    pub h: f64, // smoothing length
    pub alpha: f64, // normalization
}

impl CubicSpline {
    pub fn new(h: f64, alpha: f64) -> Result<Self> {
        validate_smoothing(h, alpha)?;
        Ok(Self { h, alpha })
    }

    pub fn from_params(p: &Parameters) -> Result<Self> {
        Self::new(p.h, p.alpha)
    }

    /// Kernel value at normalized distance `q`
    pub fn w(&self, q: f64) -> f64 {
        if q < 1.0 {
            self.alpha * w_inner(q)
        } else if q < SUPPORT {
            self.alpha * w_outer(q)
        } else {
            0.0
        }
    }

    /// Scalar `s` such that `dW = s * dx` for a pair at distance `r = q h`.
    /// Only meaningful for distinct particles; the outer branch divides by `r`
    pub fn dw_factor(&self, q: f64, r: f64) -> f64 {
        let h = self.h;
        if q < 1.0 {
            self.alpha * (-2.0 + 1.5 * q) / (h * h)
        } else if q < SUPPORT {
            let t = SUPPORT - q;
            self.alpha * (-0.5 * t * t) / (h * r)
        } else {
            0.0
        }
    }

    /// Evaluate W and dW for every pair of `set`
    pub fn evaluate(&self, set: &ParticleSet) -> Result<KernelField> {
        set.validate_positions()?;
        debug!(n = set.len(), h = self.h, "cubic spline kernel");
        let sep = Separations::from_positions(&set.positions());
        Ok(self.field_from(&sep))
    }

    /// Evaluate W and dW from precomputed separations
    pub fn field_from(&self, sep: &Separations) -> KernelField {
        let n = sep.len();
        let q = &sep.r / self.h;

        let mut w = Array2::<f64>::zeros((n, n));
        let mut dw = Array3::<f64>::zeros((n, n, 3));

        for i in 0..n {
            // self weight; the gradient entry stays the zero vector
            w[[i, i]] = self.w(0.0);

            for j in 0..n {
                if i == j {
                    continue;
                }
                let qij = q[[i, j]];
                w[[i, j]] = self.w(qij);

                let s = self.dw_factor(qij, sep.r[[i, j]]);
                for k in 0..3 {
                    dw[[i, j, k]] = s * sep.dx[[i, j, k]];
                }
            }
        }

        KernelField { w, dw, q }
    }
}

fn w_inner(q: f64) -> f64 {
    2.0 / 3.0 - q * q + 0.5 * q * q * q
}

fn w_outer(q: f64) -> f64 {
    let t = SUPPORT - q;
    t * t * t / 6.0
}

/// Kernel values and gradients over all pairs of a particle set
#[derive(Debug, Clone)]
pub struct KernelField {
    pub w: Array2<f64>, // W[i, j], symmetric
    pub dw: Array3<f64>, // dW[i, j, :], antisymmetric, zero on the diagonal
    pub q: Array2<f64>, // normalized distances r / h
}

impl KernelField {
    pub fn len(&self) -> usize {
        self.w.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.w.is_empty()
    }

    /// Number of particles j != i with `q[i, j] < 2`, for every i
    pub fn neighbor_counts(&self) -> Vec<usize> {
        (0..self.len()).map(|i| self.neighbors_iter(i).count()).collect()
    }

    /// Indices of the neighbors of particle `i`
    pub fn neighbors(&self, i: usize) -> Result<Vec<usize>> {
        if i >= self.len() {
            return Err(PairwiseError::ShapeMismatch(format!(
                "particle {i} out of range for {} particles",
                self.len()
            )));
        }
        Ok(self.neighbors_iter(i).collect())
    }

    fn neighbors_iter(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.q
            .row(i)
            .into_iter()
            .enumerate()
            .filter(move |&(j, &q)| j != i && q < SUPPORT)
            .map(|(j, _)| j)
    }
}

/// Kernel field for `set` using `params.h` and `params.alpha`
pub fn smoothing_kernel(set: &ParticleSet, params: &Parameters) -> Result<KernelField> {
    CubicSpline::from_params(params)?.evaluate(set)
}
