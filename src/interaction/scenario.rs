//! Build fully-initialized scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - validated parameters (`Parameters`)
//! - the particle set (`ParticleSet`)
//! - the active gravity terms (`AccelSet`)
//!
//! `Scenario::run` performs every configured evaluation and collects the
//! results into a serializable `Report`.

use ndarray::{Array2, Array3};
use serde::Serialize;
use tracing::info;

use crate::configuration::config::{EvaluationConfig, GravityConfig, ParticleConfig, ScenarioConfig};
use crate::error::{PairwiseError, Result};
use crate::interaction::dot::relative_velocity_dot;
use crate::interaction::engine::Engine;
use crate::interaction::forces::{AccelSet, DirectGravity, TensorGravity};
use crate::interaction::kernel::CubicSpline;
use crate::interaction::params::Parameters;
use crate::interaction::states::ParticleSet;

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub particles: ParticleSet,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let particles = particle_set(&cfg.particles)?;

        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            eps2: p_cfg.eps2,
            h: p_cfg.h,
            alpha: p_cfg.alpha,
            coincident: p_cfg.coincident,
        };
        parameters.validate()?;

        let engine = Engine::from(cfg.engine);

        let forces = match engine.gravity {
            GravityConfig::Direct => AccelSet::new().with(DirectGravity::from_params(&parameters)),
            GravityConfig::Tensor => AccelSet::new().with(TensorGravity::from_params(&parameters)),
        };

        Ok(Self {
            engine,
            parameters,
            particles,
            forces,
        })
    }

    /// Run every configured evaluation
    pub fn run(&self) -> Result<Report> {
        info!(
            n = self.particles.len(),
            evaluations = ?self.engine.evaluations,
            "running scenario"
        );
        let mut report = Report::default();

        for &e in &self.engine.evaluations {
            match e {
                EvaluationConfig::Gravity => {
                    let acc = self.forces.evaluate(&self.particles)?;
                    report.accelerations = Some(acc.iter().map(|a| [a.x, a.y, a.z]).collect());
                }
                EvaluationConfig::Kernel => {
                    let field = CubicSpline::from_params(&self.parameters)?.evaluate(&self.particles)?;
                    report.kernel = Some(KernelReport {
                        neighbor_counts: field.neighbor_counts(),
                        w: rows(&field.w),
                        dw: vector_rows(&field.dw),
                    });
                }
                EvaluationConfig::Dot => {
                    let dot = relative_velocity_dot(&self.particles, self.engine.dot_method)?;
                    report.dot = Some(rows(&dot));
                }
            }
        }
        Ok(report)
    }
}

/// Results of a scenario run; sections absent when not evaluated
#[derive(Serialize, Debug, Default)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerations: Option<Vec<[f64; 3]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<KernelReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot: Option<Vec<Vec<f64>>>,
}

#[derive(Serialize, Debug)]
pub struct KernelReport {
    pub neighbor_counts: Vec<usize>,
    pub w: Vec<Vec<f64>>,
    pub dw: Vec<Vec<[f64; 3]>>,
}

fn particle_set(cfg: &[ParticleConfig]) -> Result<ParticleSet> {
    let masses: Vec<f64> = cfg.iter().map(|p| p.m).collect();
    let positions: Vec<Vec<f64>> = cfg.iter().map(|p| p.x.clone()).collect();

    let with_v = cfg.iter().filter(|p| p.v.is_some()).count();
    let velocities: Option<Vec<Vec<f64>>> = if with_v == 0 {
        None
    } else if with_v == cfg.len() {
        Some(cfg.iter().filter_map(|p| p.v.clone()).collect())
    } else {
        return Err(PairwiseError::ShapeMismatch(format!(
            "{with_v} of {} particles carry a velocity",
            cfg.len()
        )));
    };

    ParticleSet::from_arrays(&masses, &positions, velocities.as_deref())
}

fn rows(a: &Array2<f64>) -> Vec<Vec<f64>> {
    a.outer_iter().map(|r| r.to_vec()).collect()
}

fn vector_rows(a: &Array3<f64>) -> Vec<Vec<[f64; 3]>> {
    a.outer_iter()
        .map(|plane| plane.outer_iter().map(|v| [v[0], v[1], v[2]]).collect())
        .collect()
}
