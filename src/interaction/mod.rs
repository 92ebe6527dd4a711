pub mod states;
pub mod params;
pub mod separation;
pub mod forces;
pub mod kernel;
pub mod dot;
pub mod engine;
pub mod scenario;
