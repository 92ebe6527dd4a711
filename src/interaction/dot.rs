//! Pairwise dot products `dot[i, j] = dx[i, j] . dv[i, j]`
//!
//! Three formulations of the same reduction over the component axis of two
//! `(N, N, 3)` tensors. They differ only in how the work is laid out and are
//! compared in [`crate::benchmark`].

use ndarray::{Array2, ArrayView3, Axis, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PairwiseError, Result};
use crate::interaction::separation::outer_difference;
use crate::interaction::states::ParticleSet;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotMethod {
    /// Multiply elementwise, then sum the last axis
    #[default]
    #[serde(rename = "elementwise")]
    Elementwise,

    /// Contract the component axis lane by lane (`ijk,ijk->ij`)
    #[serde(rename = "contraction")]
    Contraction,

    /// N*N batches of (1x3) . (3x1) matrix products
    #[serde(rename = "batched_matmul")]
    BatchedMatmul,
}

impl DotMethod {
    pub const ALL: [DotMethod; 3] = [
        DotMethod::Elementwise,
        DotMethod::Contraction,
        DotMethod::BatchedMatmul,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DotMethod::Elementwise => "elementwise",
            DotMethod::Contraction => "contraction",
            DotMethod::BatchedMatmul => "batched_matmul",
        }
    }
}

/// Pairwise dot product of two `(N, N, 3)` tensors
pub fn pairwise_dot(dx: ArrayView3<f64>, dv: ArrayView3<f64>, method: DotMethod) -> Result<Array2<f64>> {
    let (n, m, c) = dx.dim();
    if dx.dim() != dv.dim() {
        return Err(PairwiseError::ShapeMismatch(format!(
            "dx has shape {:?} but dv has shape {:?}",
            dx.dim(),
            dv.dim()
        )));
    }
    if n != m || c != 3 {
        return Err(PairwiseError::ShapeMismatch(format!(
            "expected (N, N, 3) tensors, got {:?}",
            dx.dim()
        )));
    }
    debug!(n, method = method.name(), "pairwise dot");

    match method {
        DotMethod::Elementwise => Ok(elementwise(dx, dv)),
        DotMethod::Contraction => Ok(contraction(dx, dv)),
        DotMethod::BatchedMatmul => batched_matmul(dx, dv),
    }
}

/// `dx[i, j] . dv[i, j]` where `dx` are separations and `dv` relative
/// velocities of `set`
pub fn relative_velocity_dot(set: &ParticleSet, method: DotMethod) -> Result<Array2<f64>> {
    let v = set.velocities()?;
    let dx = outer_difference(&set.positions());
    let dv = outer_difference(&v);
    pairwise_dot(dx.view(), dv.view(), method)
}

fn elementwise(dx: ArrayView3<f64>, dv: ArrayView3<f64>) -> Array2<f64> {
    (&dx * &dv).sum_axis(Axis(2))
}

fn contraction(dx: ArrayView3<f64>, dv: ArrayView3<f64>) -> Array2<f64> {
    let (n, m, _) = dx.dim();
    let mut out = Array2::<f64>::zeros((n, m));
    Zip::from(&mut out)
        .and(dx.lanes(Axis(2)))
        .and(dv.lanes(Axis(2)))
        .for_each(|o, a, b| *o = a.dot(&b));
    out
}

fn batched_matmul(dx: ArrayView3<f64>, dv: ArrayView3<f64>) -> Result<Array2<f64>> {
    let (n, m, _) = dx.dim();
    let batch = n * m;

    let lhs = dx
        .as_standard_layout()
        .into_owned()
        .into_shape((batch, 1, 3))
        .map_err(|e| PairwiseError::ShapeMismatch(e.to_string()))?;
    let rhs = dv
        .as_standard_layout()
        .into_owned()
        .into_shape((batch, 3, 1))
        .map_err(|e| PairwiseError::ShapeMismatch(e.to_string()))?;

    let mut flat = Vec::with_capacity(batch);
    for (a, b) in lhs.outer_iter().zip(rhs.outer_iter()) {
        let p = a.dot(&b); // (1, 1)
        flat.push(p[[0, 0]]);
    }

    Array2::from_shape_vec((n, m), flat).map_err(|e| PairwiseError::ShapeMismatch(e.to_string()))
}
