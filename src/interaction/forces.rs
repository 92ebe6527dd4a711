//! Acceleration contributors for pairwise evaluation
//!
//! Defines the acceleration trait and two formulations of Newtonian
//! gravity over a [`ParticleSet`]: a direct pair loop and a broadcast over
//! the precomputed separation tensor. Both skip i = j structurally.

use ndarray::{Array2, Axis};
use tracing::{debug, warn};

use crate::error::{PairwiseError, Result};
use crate::interaction::params::{CoincidencePolicy, Parameters};
use crate::interaction::separation::Separations;
use crate::interaction::states::{NVec3, ParticleSet};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per particle
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations for all particles in `set`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - on error `out` is left as it was
    pub fn accumulate_accels(&self, set: &ParticleSet, out: &mut [NVec3]) -> Result<()> {
        if out.len() != set.len() {
            return Err(PairwiseError::ShapeMismatch(format!(
                "output buffer holds {} vectors for {} particles",
                out.len(),
                set.len()
            )));
        }
        // Accumulate into scratch; `out` is only written once every term succeeds
        let mut acc = vec![NVec3::zeros(); set.len()];
        for term in &self.terms {
            term.acceleration(set, &mut acc)?;
        }
        out.copy_from_slice(&acc);
        Ok(())
    }

    /// Allocate and fill a fresh acceleration vector
    pub fn evaluate(&self, set: &ParticleSet) -> Result<Vec<NVec3>> {
        let mut out = vec![NVec3::zeros(); set.len()];
        self.accumulate_accels(set, &mut out)?;
        Ok(out)
    }
}

/// Acceleration source operating on a [`ParticleSet`].
/// Implementations add their contribution into `out[i]` for each particle
pub trait Acceleration {
    fn acceleration(&self, set: &ParticleSet, out: &mut [NVec3]) -> Result<()>;
}

/// Newtonian gravity, direct n^2 sum over unordered pairs
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct DirectGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
    pub coincident: CoincidencePolicy,
}

impl DirectGravity {
    pub fn from_params(p: &Parameters) -> Self {
        Self {
            G: p.G,
            eps2: p.eps2,
            coincident: p.coincident,
        }
    }

    /// First distinct pair (i < j) whose softened distance is zero
    fn first_coincident(&self, set: &ParticleSet) -> Option<(usize, usize)> {
        if self.eps2 > 0.0 {
            return None;
        }
        let bodies = set.particles();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if (bodies[j].x - bodies[i].x).norm_squared() == 0.0 {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl Acceleration for DirectGravity {
    fn acceleration(&self, set: &ParticleSet, out: &mut [NVec3]) -> Result<()> {
        validate_gravity(self.G, self.eps2)?;
        set.validate_physical()?;
        screen_coincident(self.first_coincident(set), self.coincident)?;

        let bodies = set.particles();
        let n = bodies.len();
        debug!(n, "direct gravity");

        // Loop over each unordered pair (i, j) with i < j; i == j never visited
        for i in 0..n {
            let xi = bodies[i].x;
            let mi = bodies[i].m;

            for j in (i + 1)..n {
                let xj = bodies[j].x;
                let mj = bodies[j].m;

                // r points from i to j, i.e. r = -dx[i, j]
                let r = xj - xi;
                let d2 = r.dot(&r) + self.eps2;
                let inv_r = d2.sqrt().recip();
                let coef = self.G * inv_r * inv_r * inv_r;

                // a_i +=  G m_j r / |r|^3
                // a_j += -G m_i r / |r|^3
                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
        Ok(())
    }
}

/// Newtonian gravity evaluated by broadcasting over the full separation
/// tensor `dx` with the diagonal masked out
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct TensorGravity {
    pub G: f64,
    pub eps2: f64,
    pub coincident: CoincidencePolicy,
}

impl TensorGravity {
    pub fn from_params(p: &Parameters) -> Self {
        Self {
            G: p.G,
            eps2: p.eps2,
            coincident: p.coincident,
        }
    }

    /// `-sum_j G m_j dx[i, j] / (r^2 + eps2)^{3/2}` from precomputed separations
    pub fn accelerations_from(&self, sep: &Separations, masses: &[f64]) -> Result<Vec<NVec3>> {
        let n = sep.len();
        if masses.len() != n {
            return Err(PairwiseError::ShapeMismatch(format!(
                "{} masses for {n} separations",
                masses.len()
            )));
        }

        validate_gravity(self.G, self.eps2)?;
        if let Some(j) = masses.iter().position(|m| !m.is_finite() || *m < 0.0) {
            return Err(PairwiseError::Domain(format!(
                "particle {j} has invalid mass {}",
                masses[j]
            )));
        }
        if self.eps2 == 0.0 {
            screen_coincident(sep.first_coincident(), self.coincident)?;
        }

        // weights[i, j] = G m_j / d^3 off the diagonal; diagonal never written
        let mut weights = Array2::<f64>::zeros((n, n));
        for ((i, j), w) in weights.indexed_iter_mut() {
            if i == j {
                continue;
            }
            let d2 = sep.r[[i, j]] * sep.r[[i, j]] + self.eps2;
            let inv_r = d2.sqrt().recip();
            *w = self.G * masses[j] * inv_r * inv_r * inv_r;
        }

        let weighted = &sep.dx * &weights.insert_axis(Axis(2));
        let summed = weighted.sum_axis(Axis(1));

        Ok(summed
            .outer_iter()
            .map(|row| -NVec3::new(row[0], row[1], row[2]))
            .collect())
    }
}

impl Acceleration for TensorGravity {
    fn acceleration(&self, set: &ParticleSet, out: &mut [NVec3]) -> Result<()> {
        set.validate_physical()?;
        debug!(n = set.len(), "tensor gravity");
        let sep = Separations::from_positions(&set.positions());
        let acc = self.accelerations_from(&sep, &set.masses())?;
        for (o, a) in out.iter_mut().zip(acc) {
            *o += a;
        }
        Ok(())
    }
}

fn validate_gravity(g: f64, eps2: f64) -> Result<()> {
    if !g.is_finite() {
        return Err(PairwiseError::Domain(format!("G must be finite, got {g}")));
    }
    if !eps2.is_finite() || eps2 < 0.0 {
        return Err(PairwiseError::Domain(format!(
            "softening eps2 must be >= 0, got {eps2}"
        )));
    }
    Ok(())
}

/// Apply the coincidence policy to the first degenerate pair, if any
fn screen_coincident(pair: Option<(usize, usize)>, policy: CoincidencePolicy) -> Result<()> {
    if let Some((i, j)) = pair {
        match policy {
            CoincidencePolicy::Reject => return Err(PairwiseError::DegenerateInput { i, j }),
            CoincidencePolicy::Propagate => {
                warn!(i, j, "coincident particles, result will be non-finite");
            }
        }
    }
    Ok(())
}

/// Direct-sum gravitational accelerations for `set` under `params`
pub fn gravitational_accelerations(set: &ParticleSet, params: &Parameters) -> Result<Vec<NVec3>> {
    params.validate()?;
    AccelSet::new()
        .with(DirectGravity::from_params(params))
        .evaluate(set)
}
