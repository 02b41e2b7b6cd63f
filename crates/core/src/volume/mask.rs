//! ROI mask geometry
//!
//! A mask either covers the whole image, or is a single slice over the two
//! innermost axes that is repeated along every outer axis. A slice may be
//! given as a 2-D volume or with the image's rank and unit outer axes.

use crate::error::{Error, Result};
use crate::volume::Volume;

/// How a mask maps onto an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskScope {
    /// Mask has the image's geometry and is indexed 1:1
    Full(usize),
    /// Mask is one innermost slice of `len` voxels, indexed by `i % len`
    Slice(usize),
}

impl MaskScope {
    /// Resolve the scope of a mask with `mask_dims` against `image_dims`
    pub fn resolve(image_dims: &[usize], mask_dims: &[usize]) -> Result<Self> {
        if image_dims == mask_dims {
            return Ok(MaskScope::Full(image_dims.iter().product()));
        }

        let ndim = image_dims.len();
        if ndim > 2 {
            let slice = &image_dims[ndim - 2..];
            let is_slice = match mask_dims.len() {
                2 => mask_dims == slice,
                n if n == ndim => {
                    mask_dims[..ndim - 2].iter().all(|&d| d == 1) && &mask_dims[ndim - 2..] == slice
                }
                _ => false,
            };
            if is_slice {
                return Ok(MaskScope::Slice(slice.iter().product()));
            }
        }

        Err(Error::MaskGeometry {
            mask: mask_dims.to_vec(),
            image: image_dims.to_vec(),
        })
    }

    /// Resolve the scope of `mask` against `image`
    pub fn of<T, M>(image: &Volume<T>, mask: &Volume<M>) -> Result<Self> {
        if image.same_geometry(mask) {
            return Ok(MaskScope::Full(image.len()));
        }
        Self::resolve(image.dims(), mask.dims())
    }

    /// Number of mask elements
    pub fn len(&self) -> usize {
        match self {
            MaskScope::Full(n) | MaskScope::Slice(n) => *n,
        }
    }

    /// Always false: a resolved mask has at least one element
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mask element index for image voxel `index`
    #[inline]
    pub fn mask_index(&self, index: usize) -> usize {
        match self {
            MaskScope::Full(_) => index,
            MaskScope::Slice(n) => index % n,
        }
    }
}
