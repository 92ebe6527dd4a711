//! Error types for pairwise evaluation.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PairwiseError {
    /// Input arrays disagree in particle count or dimensionality.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Two distinct particles occupy the same position, so 1/r is undefined.
    #[error("degenerate input: particles {i} and {j} share a position")]
    DegenerateInput { i: usize, j: usize },

    /// A parameter or particle attribute lies outside its physical domain.
    #[error("domain error: {0}")]
    Domain(String),
}

pub type Result<T> = std::result::Result<T, PairwiseError>;
