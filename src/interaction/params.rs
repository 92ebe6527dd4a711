//! Numerical and physical parameters for pairwise evaluation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and softening (`G`, `eps2`),
//! - smoothing length and kernel normalization (`h`, `alpha`),
//! - what to do with coincident distinct particles

use serde::{Deserialize, Serialize};

use crate::error::{PairwiseError, Result};

/// Handling of two distinct particles at the same position when the
/// gravity formula would divide by zero
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoincidencePolicy {
    #[default]
    #[serde(rename = "reject")] // fail with `DegenerateInput`
    Reject,

    #[serde(rename = "propagate")] // let the division produce inf / NaN
    Propagate,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening, 0 for the bare inverse-square law
    pub h: f64, // smoothing length
    pub alpha: f64, // kernel normalization
    pub coincident: CoincidencePolicy, // coincident-pair handling
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 1.0,
            eps2: 0.0,
            h: 1.0,
            alpha: 1.0,
            coincident: CoincidencePolicy::Reject,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<()> {
        if !self.G.is_finite() {
            return Err(PairwiseError::Domain(format!("G must be finite, got {}", self.G)));
        }
        if !self.eps2.is_finite() || self.eps2 < 0.0 {
            return Err(PairwiseError::Domain(format!(
                "softening eps2 must be >= 0, got {}",
                self.eps2
            )));
        }
        validate_smoothing(self.h, self.alpha)
    }
}

/// Smoothing length must be strictly positive, alpha any finite value
pub fn validate_smoothing(h: f64, alpha: f64) -> Result<()> {
    if !h.is_finite() || h <= 0.0 {
        return Err(PairwiseError::Domain(format!(
            "smoothing length h must be > 0, got {h}"
        )));
    }
    if !alpha.is_finite() {
        return Err(PairwiseError::Domain(format!(
            "kernel normalization alpha must be finite, got {alpha}"
        )));
    }
    Ok(())
}
