pub mod error;
pub mod interaction;
pub mod configuration;
pub mod benchmark;

pub use error::{PairwiseError, Result};

pub use interaction::states::{Particle, ParticleSet, NVec3};
pub use interaction::params::{Parameters, CoincidencePolicy};
pub use interaction::separation::{Separations, outer_difference};
pub use interaction::forces::{Acceleration, AccelSet, DirectGravity, TensorGravity, gravitational_accelerations};
pub use interaction::kernel::{CubicSpline, KernelField, smoothing_kernel};
pub use interaction::dot::{DotMethod, pairwise_dot, relative_velocity_dot};
pub use interaction::scenario::{Scenario, Report};

pub use configuration::config::{EngineConfig, ParametersConfig, ParticleConfig, ScenarioConfig, GravityConfig, EvaluationConfig};

pub use benchmark::benchmark::{bench_gravity, bench_dot_products};
