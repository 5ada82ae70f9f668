use shape_cloud::ShapeError;
use thiserror::Error;

/// Errors raised by the morph step and engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MorphError {
    #[error("live buffer has {live} floats but target has {target}")]
    LengthMismatch { live: usize, target: usize },

    #[error("buffer of length {0} is not a whole number of xyz triplets")]
    NotTriplets(usize),

    #[error("invalid morph config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
