//! # tomoseg Core
//!
//! Core types and traits for the tomoseg segmentation library.
//!
//! This crate provides:
//! - `Volume<T>`: Generic N-dimensional sample volume
//! - `Neighborhood`: Precomputed neighbor lookup for a volume geometry
//! - `MaskScope`: ROI mask geometry resolution
//! - Algorithm traits for consistent API

pub mod error;
pub mod volume;

pub use error::{Error, Result};
pub use volume::{Connectivity, MaskScope, Neighborhood, Volume, VoxelElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::volume::{Connectivity, MaskScope, Neighborhood, Volume, VoxelElement};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in tomoseg.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
