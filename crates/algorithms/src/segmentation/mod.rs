//! Threshold segmentation algorithms for tomography volumes
//!
//! - **Hysteresis**: double threshold, region growing from strict seeds
//! - **Threshold**: single level with a configurable comparison
//! - **Limit dynamics**: clamp or normalize to an intensity interval
//!
//! All operators accept an optional ROI mask with the image's geometry, or a
//! single slice over the two innermost axes that is reused for every slice.

mod gate;
mod hysteresis;
mod limit_dynamics;
mod threshold;

pub use hysteresis::{hysteresis, Hysteresis, HysteresisParams, Polarity};
pub use limit_dynamics::{
    limit_dynamics, limit_dynamics_in_place, LimitDynamics, LimitDynamicsParams,
};
pub use threshold::{threshold, Comparison, Threshold, ThresholdParams};
