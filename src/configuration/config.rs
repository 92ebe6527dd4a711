//! Configuration types for loading pairwise-evaluation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – which evaluations run and which formulation each uses
//! - [`ParametersConfig`] – physical constants and kernel parameters
//! - [`ParticleConfig`]   – mass, position and optional velocity per particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   gravity: direct              # or "tensor"
//!   dot_method: elementwise      # or "contraction", "batched_matmul"
//!   evaluations: [gravity, kernel, dot]
//!
//! parameters:
//!   G: 1.0                       # gravitational constant
//!   eps2: 0.0                    # softening epsilon^2
//!   h: 1.0                       # smoothing length
//!   alpha: 1.0                   # kernel normalization
//!   coincident: reject           # or "propagate"
//!
//! particles:
//!   - m: 1.0
//!     x: [ 0.0, 0.0, 0.0 ]
//!     v: [ 0.0, 0.0, 0.0 ]
//!   - m: 2.0
//!     x: [ 1.0, 0.0, 0.0 ]
//!     v: [ 0.0, 1.0, 0.0 ]
//! ```
//!
//! Velocities are all-or-none: either every particle lists `v` or none does.

use serde::Deserialize;

use crate::interaction::dot::DotMethod;
use crate::interaction::params::CoincidencePolicy;

/// Which gravity formulation the engine uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityConfig {
    #[default]
    #[serde(rename = "direct")] // pair loop over i < j
    Direct,

    #[serde(rename = "tensor")] // broadcast over the full separation tensor
    Tensor,
}

/// One evaluation a scenario run performs
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationConfig {
    #[serde(rename = "gravity")]
    Gravity,

    #[serde(rename = "kernel")]
    Kernel,

    #[serde(rename = "dot")]
    Dot,
}

fn all_evaluations() -> Vec<EvaluationConfig> {
    vec![
        EvaluationConfig::Gravity,
        EvaluationConfig::Kernel,
        EvaluationConfig::Dot,
    ]
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub gravity: GravityConfig, // gravity formulation
    #[serde(default)]
    pub dot_method: DotMethod, // dot-product formulation
    #[serde(default = "all_evaluations")]
    pub evaluations: Vec<EvaluationConfig>, // evaluations to run, in order
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: GravityConfig::default(),
            dot_method: DotMethod::default(),
            evaluations: all_evaluations(),
        }
    }
}

fn one() -> f64 {
    1.0
}

/// Physical constants and kernel parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "one")]
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub eps2: f64, // softening
    #[serde(default = "one")]
    pub h: f64, // smoothing length
    #[serde(default = "one")]
    pub alpha: f64, // kernel normalization
    #[serde(default)]
    pub coincident: CoincidencePolicy, // coincident-pair handling
}

/// Configuration for a single particle
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub m: f64, // mass
    pub x: Vec<f64>, // position, 3 components
    #[serde(default)]
    pub v: Option<Vec<f64>>, // velocity, 3 components
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub particles: Vec<ParticleConfig>,
}
