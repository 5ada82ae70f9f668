use thiserror::Error;

/// Errors raised while building or parsing point clouds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("particle count must be positive")]
    ZeroCount,

    #[error("flat buffer of length {0} is not a whole number of xyz triplets")]
    NotTriplets(usize),

    #[error("unknown template: {0:?}")]
    UnknownTemplate(String),
}
