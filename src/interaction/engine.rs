//! High-level runtime engine settings
//!
//! Selects the gravity formulation, the dot-product formulation and the
//! list of evaluations a `Scenario` run performs

use crate::configuration::config::{EngineConfig, EvaluationConfig, GravityConfig};
use crate::interaction::dot::DotMethod;

#[derive(Debug, Clone)]
pub struct Engine {
    pub gravity: GravityConfig, // direct or tensor
    pub dot_method: DotMethod, // elementwise, contraction or batched matmul
    pub evaluations: Vec<EvaluationConfig>, // what a run computes
}

impl From<EngineConfig> for Engine {
    fn from(cfg: EngineConfig) -> Self {
        Self {
            gravity: cfg.gravity,
            dot_method: cfg.dot_method,
            evaluations: cfg.evaluations,
        }
    }
}

impl Engine {
    pub fn runs(&self, e: EvaluationConfig) -> bool {
        self.evaluations.contains(&e)
    }
}
