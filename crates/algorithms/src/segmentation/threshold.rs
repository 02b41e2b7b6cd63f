//! Single-level threshold
//!
//! Elementwise comparison against one level, with the same ROI mask rules as
//! the hysteresis threshold.

use serde::{Deserialize, Serialize};

use crate::maybe_rayon::*;
use tomoseg_core::{Algorithm, Error, Result, Volume, VoxelElement};

use super::gate::MaskGate;

/// Comparison applied between a voxel and the threshold level.
///
/// The default, `GreaterOrEqual`, keeps voxels at the level. `Less` is its
/// exact complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Comparison {
    /// `value < level`
    Less,
    /// `value > level`
    Greater,
    /// `value <= level`
    LessOrEqual,
    /// `value >= level`
    #[default]
    GreaterOrEqual,
    /// `value != level`
    NotEqual,
    /// `value == level`
    Equal,
}

impl Comparison {
    /// Whether `value` compares true against `level`
    #[inline]
    pub fn holds<T: PartialOrd>(&self, value: T, level: T) -> bool {
        match self {
            Comparison::Less => value < level,
            Comparison::Greater => value > level,
            Comparison::LessOrEqual => value <= level,
            Comparison::GreaterOrEqual => value >= level,
            Comparison::NotEqual => value != level,
            Comparison::Equal => value == level,
        }
    }
}

/// Parameters for single-level thresholding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams<T> {
    /// Threshold level
    pub level: T,
    /// Comparison selecting the foreground
    pub comparison: Comparison,
}

impl<T: VoxelElement> Default for ThresholdParams<T> {
    fn default() -> Self {
        Self {
            level: T::zero(),
            comparison: Comparison::default(),
        }
    }
}

/// Single threshold algorithm
#[derive(Debug, Clone, Default)]
pub struct Threshold;

impl Algorithm for Threshold {
    type Input = (Volume<f32>, Option<Volume<bool>>);
    type Output = Volume<bool>;
    type Params = ThresholdParams<f32>;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Threshold"
    }

    fn description(&self) -> &'static str {
        "Single-level threshold with optional ROI mask"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (image, mask) = input;
        threshold(&image, &params, mask.as_ref())
    }
}

/// Threshold `image` against a single level.
///
/// Voxels outside the mask are `false`. The mask follows the same geometry
/// rules as [`hysteresis`](super::hysteresis()).
pub fn threshold<T: VoxelElement>(
    image: &Volume<T>,
    params: &ThresholdParams<T>,
    mask: Option<&Volume<bool>>,
) -> Result<Volume<bool>> {
    let gate = MaskGate::new(image, mask)?;
    let samples = image.as_slice();
    let level = params.level;
    let comparison = params.comparison;

    let labels: Vec<bool> = (0..samples.len())
        .into_par_iter()
        .map(|i| gate.admits(i) && comparison.holds(samples[i], level))
        .collect();

    Volume::from_vec(labels, image.dims())
}
