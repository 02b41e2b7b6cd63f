//! Intensity dynamics limiting
//!
//! Restricts a volume to `[lo, hi]`, either by clamping or by mapping the
//! interval onto `[0, 1]`. Used as a pre-segmentation step.

use serde::{Deserialize, Serialize};

use crate::maybe_rayon::*;
use tomoseg_core::{Algorithm, Error, Result, Volume, VoxelElement};

/// Parameters for dynamics limiting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitDynamicsParams<T> {
    /// Lower limit
    pub lo: T,
    /// Upper limit
    pub hi: T,
    /// Map `[lo, hi]` linearly onto `[0, 1]` instead of clamping
    pub normalize: bool,
}

impl<T: VoxelElement> Default for LimitDynamicsParams<T> {
    fn default() -> Self {
        Self {
            lo: T::zero(),
            hi: T::max_value(),
            normalize: false,
        }
    }
}

/// Dynamics limiting algorithm
#[derive(Debug, Clone, Default)]
pub struct LimitDynamics;

impl Algorithm for LimitDynamics {
    type Input = Volume<f32>;
    type Output = Volume<f32>;
    type Params = LimitDynamicsParams<f32>;
    type Error = Error;

    fn name(&self) -> &'static str {
        "LimitDynamics"
    }

    fn description(&self) -> &'static str {
        "Clamp or normalize intensities to an interval"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut volume = input;
        limit_dynamics_in_place(&mut volume, &params)?;
        Ok(volume)
    }
}

/// Return a copy of `image` limited to `[lo, hi]`
pub fn limit_dynamics<T: VoxelElement>(
    image: &Volume<T>,
    params: &LimitDynamicsParams<T>,
) -> Result<Volume<T>> {
    let mut output = image.clone();
    limit_dynamics_in_place(&mut output, params)?;
    Ok(output)
}

/// Limit `image` to `[lo, hi]` in place.
///
/// Clamp mode moves values below `lo` to `lo` and above `hi` to `hi`.
/// Normalize mode maps values below `lo` to 0, above `hi` to 1 and the rest
/// to `(v - lo) / (hi - lo)`, computed in `f64`; for integer volumes the
/// interior therefore truncates to 0.
///
/// # Errors
/// `Error::InvalidParameter` when normalizing with `hi <= lo`.
pub fn limit_dynamics_in_place<T: VoxelElement>(
    image: &mut Volume<T>,
    params: &LimitDynamicsParams<T>,
) -> Result<()> {
    let lo = params.lo;
    let hi = params.hi;

    if !params.normalize {
        image.as_slice_mut().par_iter_mut().for_each(|v| {
            if *v < lo {
                *v = lo;
            } else if *v > hi {
                *v = hi;
            }
        });
        return Ok(());
    }

    let lo_f = lo.to_f64().unwrap_or(0.0);
    let hi_f = hi.to_f64().unwrap_or(0.0);
    if hi_f <= lo_f {
        return Err(Error::InvalidParameter {
            name: "hi",
            value: format!("{:?}", hi),
            reason: format!("normalization needs hi > lo ({:?})", lo),
        });
    }

    let scale = 1.0 / (hi_f - lo_f);
    image.as_slice_mut().par_iter_mut().for_each(|v| {
        *v = if *v < lo {
            T::zero()
        } else if *v > hi {
            T::from_f64(1.0)
        } else {
            T::from_f64((v.to_f64().unwrap_or(lo_f) - lo_f) * scale)
        };
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp() -> Volume<f32> {
        Volume::from_vec((0..10).map(|v| v as f32).collect(), &[2, 5]).unwrap()
    }

    #[test]
    fn test_clamp() {
        let params = LimitDynamicsParams {
            lo: 2.0,
            hi: 6.0,
            normalize: false,
        };
        let result = limit_dynamics(&ramp(), &params).unwrap();
        assert_eq!(
            result.as_slice(),
            &[2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 6.0, 6.0, 6.0]
        );
    }

    #[test]
    fn test_normalize() {
        let params = LimitDynamicsParams {
            lo: 2.0,
            hi: 6.0,
            normalize: true,
        };
        let result = limit_dynamics(&ramp(), &params).unwrap();
        assert_eq!(result.get_linear(0).unwrap(), 0.0);
        assert_relative_eq!(result.get_linear(3).unwrap(), 0.25, epsilon = 1e-6);
        assert_relative_eq!(result.get_linear(4).unwrap(), 0.5, epsilon = 1e-6);
        assert_relative_eq!(result.get_linear(6).unwrap(), 1.0, epsilon = 1e-6);
        assert_eq!(result.get_linear(9).unwrap(), 1.0);
    }

    #[test]
    fn test_normalize_needs_interval() {
        let params = LimitDynamicsParams {
            lo: 4.0,
            hi: 4.0,
            normalize: true,
        };
        assert!(matches!(
            limit_dynamics(&ramp(), &params),
            Err(Error::InvalidParameter { name: "hi", .. })
        ));
    }

    #[test]
    fn test_in_place_integer_clamp() {
        let mut volume = Volume::from_vec(vec![0u16, 100, 5000, 65535], &[4]).unwrap();
        let params = LimitDynamicsParams {
            lo: 50,
            hi: 6000,
            normalize: false,
        };
        limit_dynamics_in_place(&mut volume, &params).unwrap();
        assert_eq!(volume.as_slice(), &[50, 100, 5000, 6000]);
    }

    #[test]
    fn test_algorithm_trait() {
        let result = LimitDynamics
            .execute(
                ramp(),
                LimitDynamicsParams {
                    lo: 1.0,
                    hi: 3.0,
                    normalize: false,
                },
            )
            .unwrap();
        assert_eq!(result.get_linear(9).unwrap(), 3.0);
    }
}
