//! Voxel element trait for generic sample values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a volume voxel.
///
/// Detector counts arrive as unsigned integers, reconstructed slices as
/// floats, so both families are supported.
pub trait VoxelElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Minimum value representable by this type
    fn min_value() -> Self;

    /// Maximum value representable by this type
    fn max_value() -> Self;

    /// Convert self to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }

    /// Convert from f64, saturating at the type's range
    fn from_f64(value: f64) -> Self {
        match NumCast::from(value) {
            Some(v) => v,
            None if value.is_nan() => Self::zero(),
            None if value < 0.0 => Self::min_value(),
            None => Self::max_value(),
        }
    }
}

macro_rules! impl_voxel_element {
    ($t:ty) => {
        impl VoxelElement for $t {
            fn min_value() -> Self {
                <$t>::MIN
            }

            fn max_value() -> Self {
                <$t>::MAX
            }
        }
    };
}

impl_voxel_element!(i8);
impl_voxel_element!(i16);
impl_voxel_element!(i32);
impl_voxel_element!(i64);
impl_voxel_element!(u8);
impl_voxel_element!(u16);
impl_voxel_element!(u32);
impl_voxel_element!(u64);
impl_voxel_element!(f32);
impl_voxel_element!(f64);
