//! # tomoseg Algorithms
//!
//! Segmentation algorithms for neutron and X-ray tomography volumes.
//!
//! ## Available Algorithm Categories
//!
//! - **segmentation**: Hysteresis (double) threshold, single threshold,
//!   dynamics limiting

mod maybe_rayon;
pub mod segmentation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::segmentation::{
        hysteresis, limit_dynamics, limit_dynamics_in_place, threshold, Comparison, Hysteresis,
        HysteresisParams, LimitDynamics, LimitDynamicsParams, Polarity, Threshold,
        ThresholdParams,
    };
    pub use tomoseg_core::prelude::*;
}
