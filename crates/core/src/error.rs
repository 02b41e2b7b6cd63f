//! Error types for tomoseg

use thiserror::Error;

/// Main error type for tomoseg operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid volume dimensions: {dims:?}")]
    InvalidDimensions { dims: Vec<usize> },

    #[error("Volume size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Index out of bounds: {coords:?} in volume of size {dims:?}")]
    IndexOutOfBounds { coords: Vec<usize>, dims: Vec<usize> },

    #[error("Linear index out of bounds: {index} in volume of {len} samples")]
    LinearIndexOutOfBounds { index: usize, len: usize },

    #[error("Mask geometry {mask:?} is incompatible with image geometry {image:?}")]
    MaskGeometry { mask: Vec<usize>, image: Vec<usize> },

    #[error("Connectivity {connectivity} is not supported for {ndim}-dimensional volumes")]
    UnsupportedConnectivity { connectivity: String, ndim: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl From<ndarray::ShapeError> for Error {
    fn from(e: ndarray::ShapeError) -> Self {
        Error::Other(e.to_string())
    }
}

/// Result type alias for tomoseg operations
pub type Result<T> = std::result::Result<T, Error>;
