//! Hysteresis (double threshold) segmentation
//!
//! Regions are seeded by voxels passing a strict level and grown through
//! neighbors that pass a looser level. Under [`Polarity::Greater`] seeds are
//! `> hi` and growth is `> lo`; under [`Polarity::Less`] seeds are `< lo` and
//! growth is `< hi`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::maybe_rayon::*;
use tomoseg_core::{Algorithm, Connectivity, Error, Neighborhood, Result, Volume, VoxelElement};

use super::gate::MaskGate;

/// Which side of the thresholds counts as foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Polarity {
    /// Bright objects: seed `> hi`, grow `> lo`
    #[default]
    Greater,
    /// Dark objects: seed `< lo`, grow `< hi`
    Less,
}

/// Parameters for hysteresis segmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HysteresisParams<T> {
    /// Lower threshold level
    pub lo: T,
    /// Upper threshold level
    pub hi: T,
    /// Foreground side of the thresholds
    pub polarity: Polarity,
    /// Neighbor definition; `None` selects face connectivity for the
    /// image's dimensionality (conn4 in 2-D, conn6 in 3-D)
    pub connectivity: Option<Connectivity>,
}

impl<T: VoxelElement> Default for HysteresisParams<T> {
    fn default() -> Self {
        Self {
            lo: T::zero(),
            hi: T::zero(),
            polarity: Polarity::Greater,
            connectivity: None,
        }
    }
}

/// Hysteresis segmentation algorithm
#[derive(Debug, Clone, Default)]
pub struct Hysteresis;

impl Algorithm for Hysteresis {
    type Input = (Volume<f32>, Option<Volume<bool>>);
    type Output = Volume<bool>;
    type Params = HysteresisParams<f32>;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Hysteresis"
    }

    fn description(&self) -> &'static str {
        "Double threshold segmentation by region growing from strict seeds"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (image, mask) = input;
        hysteresis(&image, &params, mask.as_ref())
    }
}

/// Per-voxel state during region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    /// Passes the growth test but has not been reached yet
    Unvisited,
    /// Reached, waiting in the FIFO for its neighbors to be examined
    Queued,
    /// Part of the segmented region
    Accepted,
    /// Fails the growth test or lies outside the mask
    Rejected,
}

/// Seed and growth tests, fixed once per call
#[derive(Debug, Clone, Copy)]
struct Criteria<T> {
    seed_level: T,
    grow_level: T,
    polarity: Polarity,
}

impl<T: VoxelElement> Criteria<T> {
    fn new(lo: T, hi: T, polarity: Polarity) -> Self {
        let (seed_level, grow_level) = match polarity {
            Polarity::Greater => (hi, lo),
            Polarity::Less => (lo, hi),
        };
        Self {
            seed_level,
            grow_level,
            polarity,
        }
    }

    #[inline]
    fn beyond(&self, value: T, level: T) -> bool {
        match self.polarity {
            Polarity::Greater => value > level,
            Polarity::Less => value < level,
        }
    }

    #[inline]
    fn classify(&self, value: T, admitted: bool) -> Label {
        if !admitted {
            Label::Rejected
        } else if self.beyond(value, self.seed_level) {
            Label::Accepted
        } else if self.beyond(value, self.grow_level) {
            Label::Unvisited
        } else {
            Label::Rejected
        }
    }
}

/// Breadth-first region growth over a label arena
struct RegionGrower<'a> {
    neighborhood: &'a Neighborhood,
    labels: Vec<Label>,
    queue: VecDeque<usize>,
}

impl<'a> RegionGrower<'a> {
    fn new(neighborhood: &'a Neighborhood, labels: Vec<Label>) -> Self {
        Self {
            neighborhood,
            labels,
            queue: VecDeque::new(),
        }
    }

    /// Queue every unvisited neighbor of `center`
    fn expand(&mut self, center: usize) {
        let neighborhood = self.neighborhood;
        for n in neighborhood.neighbors(center) {
            if self.labels[n] == Label::Unvisited {
                self.labels[n] = Label::Queued;
                self.queue.push_back(n);
            }
        }
    }

    /// Expand every seed, returning the number of seeds
    fn seed(&mut self) -> usize {
        let mut seeds = 0;
        for index in 0..self.labels.len() {
            if self.labels[index] == Label::Accepted {
                seeds += 1;
                self.expand(index);
            }
        }
        seeds
    }

    fn propagate(&mut self) {
        while let Some(index) = self.queue.pop_front() {
            self.labels[index] = Label::Accepted;
            self.expand(index);
        }
    }

    fn into_labels(self) -> Vec<bool> {
        self.labels
            .into_iter()
            .map(|label| label == Label::Accepted)
            .collect()
    }
}

/// Segment `image` by hysteresis thresholding.
///
/// A voxel is `true` in the result iff it is connected, through voxels that
/// pass the growth test and the mask, to at least one voxel that passes the
/// seed test and the mask.
///
/// The mask may have the image's geometry or be a single slice over the two
/// innermost axes, which is then applied to every slice. `lo > hi` is not
/// rejected; such a pair usually yields an empty result.
///
/// # Arguments
/// * `image` - Input volume
/// * `params` - Threshold levels, polarity and connectivity
/// * `mask` - Optional ROI mask
///
/// # Errors
/// * `Error::MaskGeometry` if the mask shape does not fit the image
/// * `Error::UnsupportedConnectivity` if the connectivity does not apply to
///   the image's dimensionality
pub fn hysteresis<T: VoxelElement>(
    image: &Volume<T>,
    params: &HysteresisParams<T>,
    mask: Option<&Volume<bool>>,
) -> Result<Volume<bool>> {
    let neighborhood = Neighborhood::new(
        image.dims(),
        params
            .connectivity
            .unwrap_or_else(|| Connectivity::faces_for(image.ndim())),
    )?;
    let gate = MaskGate::new(image, mask)?;
    let criteria = Criteria::new(params.lo, params.hi, params.polarity);

    debug!(
        lo = ?params.lo,
        hi = ?params.hi,
        polarity = ?params.polarity,
        connectivity = %neighborhood.connectivity(),
        neighbors = neighborhood.n(),
        dims = ?image.dims(),
        masked = !gate.is_open(),
        "starting hysteresis threshold"
    );

    let samples = image.as_slice();
    let labels: Vec<Label> = (0..samples.len())
        .into_par_iter()
        .map(|i| criteria.classify(samples[i], gate.admits(i)))
        .collect();

    let mut grower = RegionGrower::new(&neighborhood, labels);
    let seeds = grower.seed();
    debug!(seeds, queued = grower.queue.len(), "seed pass done");

    grower.propagate();

    let output = Volume::from_vec(grower.into_labels(), image.dims())?;
    debug!(accepted = output.count_true(), "hysteresis threshold done");
    Ok(output)
}
