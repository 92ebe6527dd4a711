//! Core state types for pairwise evaluation.
//!
//! Defines the particle and particle-set structs:
//! - `Particle`    position / velocity using `NVec3`, plus mass
//! - `ParticleSet` ordered, validated collection of particles
//!
//! A set is an immutable input: every evaluator borrows it and returns
//! freshly allocated results.

use nalgebra::Vector3;
use ndarray::{ArrayView1, ArrayView2};

use crate::error::{PairwiseError, Result};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec3, // position
    pub v: NVec3, // velocity (zero when the set carries none)
    pub m: f64, // mass
}

impl Particle {
    pub fn new(x: NVec3, v: NVec3, m: f64) -> Self {
        Self { x, v, m }
    }

    /// Particle at rest
    pub fn at_rest(x: NVec3, m: f64) -> Self {
        Self { x, v: NVec3::zeros(), m }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSet {
    particles: Vec<Particle>, // ordered collection of particles
    has_velocities: bool, // false when built without a velocity array
}

impl ParticleSet {
    /// Build a set whose particles all carry a velocity
    pub fn new(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            has_velocities: true,
        }
    }

    /// Build a set from positions and masses only; velocities are absent
    pub fn without_velocities(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            has_velocities: false,
        }
    }

    /// Build a set from per-particle component vectors
    /// - `positions[i]` and `velocities[i]` must each have exactly 3 components
    /// - all arrays must agree on the particle count
    pub fn from_arrays(
        masses: &[f64],
        positions: &[Vec<f64>],
        velocities: Option<&[Vec<f64>]>,
    ) -> Result<Self> {
        let n = masses.len();
        if positions.len() != n {
            return Err(PairwiseError::ShapeMismatch(format!(
                "{n} masses but {} positions",
                positions.len()
            )));
        }
        if let Some(vs) = velocities {
            if vs.len() != n {
                return Err(PairwiseError::ShapeMismatch(format!(
                    "{n} masses but {} velocities",
                    vs.len()
                )));
            }
        }

        let mut particles = Vec::with_capacity(n);
        for i in 0..n {
            let x = to_vec3("position", i, &positions[i])?;
            let v = match velocities {
                Some(vs) => to_vec3("velocity", i, &vs[i])?,
                None => NVec3::zeros(),
            };
            particles.push(Particle::new(x, v, masses[i]));
        }

        Ok(Self {
            particles,
            has_velocities: velocities.is_some(),
        })
    }

    /// Build a set from dense arrays: masses `(N,)`, positions `(N, 3)` and
    /// optionally velocities `(N, 3)`
    pub fn from_ndarray(
        masses: ArrayView1<f64>,
        positions: ArrayView2<f64>,
        velocities: Option<ArrayView2<f64>>,
    ) -> Result<Self> {
        let n = masses.len();
        check_rows("positions", n, &positions)?;
        if let Some(vs) = &velocities {
            check_rows("velocities", n, vs)?;
        }

        let particles = (0..n)
            .map(|i| {
                let x = NVec3::new(positions[[i, 0]], positions[[i, 1]], positions[[i, 2]]);
                let v = match &velocities {
                    Some(vs) => NVec3::new(vs[[i, 0]], vs[[i, 1]], vs[[i, 2]]),
                    None => NVec3::zeros(),
                };
                Particle::new(x, v, masses[i])
            })
            .collect();

        Ok(Self {
            particles,
            has_velocities: velocities.is_some(),
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn has_velocities(&self) -> bool {
        self.has_velocities
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn positions(&self) -> Vec<NVec3> {
        self.particles.iter().map(|p| p.x).collect()
    }

    /// Velocities, or `ShapeMismatch` if the set was built without them
    pub fn velocities(&self) -> Result<Vec<NVec3>> {
        if !self.has_velocities {
            return Err(PairwiseError::ShapeMismatch(
                "particle set carries no velocity array".into(),
            ));
        }
        Ok(self.particles.iter().map(|p| p.v).collect())
    }

    pub fn masses(&self) -> Vec<f64> {
        self.particles.iter().map(|p| p.m).collect()
    }

    /// Copy of the set with particle `k` removed
    pub fn without(&self, k: usize) -> Self {
        let particles = self
            .particles
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != k)
            .map(|(_, p)| p.clone())
            .collect();
        Self {
            particles,
            has_velocities: self.has_velocities,
        }
    }

    /// Reject negative masses and non-finite positions
    pub fn validate_physical(&self) -> Result<()> {
        for (i, p) in self.particles.iter().enumerate() {
            if !p.m.is_finite() || p.m < 0.0 {
                return Err(PairwiseError::Domain(format!(
                    "particle {i} has invalid mass {}",
                    p.m
                )));
            }
        }
        self.validate_positions()
    }

    /// Reject non-finite positions
    pub fn validate_positions(&self) -> Result<()> {
        for (i, p) in self.particles.iter().enumerate() {
            if !p.x.iter().all(|c| c.is_finite()) {
                return Err(PairwiseError::Domain(format!(
                    "particle {i} has non-finite position"
                )));
            }
        }
        Ok(())
    }
}

fn to_vec3(what: &str, i: usize, c: &[f64]) -> Result<NVec3> {
    if c.len() != 3 {
        return Err(PairwiseError::ShapeMismatch(format!(
            "{what} of particle {i} has {} components, expected 3",
            c.len()
        )));
    }
    Ok(NVec3::new(c[0], c[1], c[2]))
}

fn check_rows(what: &str, n: usize, a: &ArrayView2<f64>) -> Result<()> {
    if a.dim() != (n, 3) {
        return Err(PairwiseError::ShapeMismatch(format!(
            "{what} has shape {:?}, expected ({n}, 3)",
            a.dim()
        )));
    }
    Ok(())
}
