//! ROI mask test shared by the threshold operators

use tomoseg_core::{MaskScope, Result, Volume};

/// Answers whether a voxel may take part in a segmentation.
///
/// Without a mask every voxel is admitted and no mask memory is touched.
#[derive(Debug, Clone, Copy)]
pub(crate) enum MaskGate<'a> {
    Open,
    Masked { mask: &'a [bool], scope: MaskScope },
}

impl<'a> MaskGate<'a> {
    /// Resolve `mask` against the geometry of `image`.
    ///
    /// Fails with `Error::MaskGeometry` if the mask is neither full-size nor a
    /// slice over the two innermost axes.
    pub(crate) fn new<T>(image: &Volume<T>, mask: Option<&'a Volume<bool>>) -> Result<Self> {
        match mask {
            None => Ok(MaskGate::Open),
            Some(mask) => {
                let scope = MaskScope::of(image, mask)?;
                Ok(MaskGate::Masked {
                    mask: mask.as_slice(),
                    scope,
                })
            }
        }
    }

    #[inline]
    pub(crate) fn admits(&self, index: usize) -> bool {
        match self {
            MaskGate::Open => true,
            MaskGate::Masked { mask, scope } => mask[scope.mask_index(index)],
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        matches!(self, MaskGate::Open)
    }
}
