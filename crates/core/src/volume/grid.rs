//! Main Volume type

use crate::error::{Error, Result};
use crate::volume::VoxelElement;
use ndarray::{ArrayD, IxDyn};

/// An N-dimensional sample volume.
///
/// `Volume<T>` stores values of type `T` in one contiguous buffer in
/// row-major order: the last axis varies fastest. For a 3-D tomography
/// volume the dims are `[slices, rows, cols]`.
///
/// A linear index and a coordinate vector are related by
/// `index = Σ coords[d] * strides[d]` with `strides[ndim - 1] = 1`.
///
/// # Example
///
/// ```ignore
/// use tomoseg_core::Volume;
///
/// let mut volume: Volume<f32> = Volume::new(&[4, 64, 64])?;
/// volume.set(&[2, 10, 20], 42.0)?;
/// assert_eq!(volume.get(&[2, 10, 20])?, 42.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    /// Samples, always in standard (C) layout
    data: ArrayD<T>,
    /// Element strides in linear-index units
    strides: Vec<usize>,
}

/// Validate a geometry and compute its row-major strides
fn strides_for(dims: &[usize]) -> Result<Vec<usize>> {
    if dims.is_empty() || dims.contains(&0) {
        return Err(Error::InvalidDimensions {
            dims: dims.to_vec(),
        });
    }

    let mut strides = vec![1usize; dims.len()];
    for d in (0..dims.len() - 1).rev() {
        strides[d] = strides[d + 1] * dims[d + 1];
    }
    Ok(strides)
}

impl<T: Clone> Volume<T> {
    /// Create a volume filled with a specific value
    pub fn filled(dims: &[usize], value: T) -> Result<Self> {
        let strides = strides_for(dims)?;
        Ok(Self {
            data: ArrayD::from_elem(IxDyn(dims), value),
            strides,
        })
    }

    /// Create a volume from existing samples in row-major order
    pub fn from_vec(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        let strides = strides_for(dims)?;
        let expected: usize = dims.iter().product();
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let array = ArrayD::from_shape_vec(IxDyn(dims), data)?;
        Ok(Self {
            data: array,
            strides,
        })
    }

    /// Create a volume from an ndarray.
    ///
    /// Arrays in non-standard layout are copied into row-major order.
    pub fn from_array(data: ArrayD<T>) -> Result<Self> {
        let strides = strides_for(data.shape())?;
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self { data, strides })
    }

    /// Create a volume with the same geometry, filled with a value
    pub fn like<U: Clone>(&self, fill_value: U) -> Volume<U> {
        Volume {
            data: ArrayD::from_elem(self.data.raw_dim(), fill_value),
            strides: self.strides.clone(),
        }
    }

    /// Apply `f` to every sample, keeping the geometry
    pub fn map<U, F>(&self, f: F) -> Volume<U>
    where
        F: FnMut(&T) -> U,
    {
        Volume {
            data: self.data.map(f),
            strides: self.strides.clone(),
        }
    }
}

impl<T: VoxelElement> Volume<T> {
    /// Create a new volume filled with zeros
    pub fn new(dims: &[usize]) -> Result<Self> {
        Self::filled(dims, T::zero())
    }
}

impl<T> Volume<T> {
    // Geometry

    /// Extent of every axis, outermost first
    pub fn dims(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Row-major strides in linear-index units
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of voxels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the volume is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether another volume has exactly the same geometry
    pub fn same_geometry<U>(&self, other: &Volume<U>) -> bool {
        self.dims() == other.dims()
    }

    /// Linear index of a coordinate vector
    pub fn index_of(&self, coords: &[usize]) -> Result<usize> {
        if coords.len() != self.ndim() || coords.iter().zip(self.dims()).any(|(&c, &d)| c >= d) {
            return Err(Error::IndexOutOfBounds {
                coords: coords.to_vec(),
                dims: self.dims().to_vec(),
            });
        }
        Ok(coords.iter().zip(&self.strides).map(|(c, s)| c * s).sum())
    }

    /// Coordinate vector of a linear index
    pub fn coords_of(&self, index: usize) -> Result<Vec<usize>> {
        if index >= self.len() {
            return Err(Error::LinearIndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self
            .strides
            .iter()
            .zip(self.dims())
            .map(|(&s, &d)| (index / s) % d)
            .collect())
    }

    // Data access

    /// Flat samples in linear-index order
    pub fn as_slice(&self) -> &[T] {
        // Standard layout is an invariant of every constructor
        debug_assert!(self.data.is_standard_layout());
        self.data.as_slice().unwrap_or_default()
    }

    /// Mutable flat samples in linear-index order
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        debug_assert!(self.data.is_standard_layout());
        self.data.as_slice_mut().unwrap_or_default()
    }
}

impl<T: Copy> Volume<T> {
    /// Get value at a coordinate vector
    pub fn get(&self, coords: &[usize]) -> Result<T> {
        let index = self.index_of(coords)?;
        Ok(self.as_slice()[index])
    }

    /// Get value at a linear index
    pub fn get_linear(&self, index: usize) -> Result<T> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(Error::LinearIndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Set value at a coordinate vector
    pub fn set(&mut self, coords: &[usize], value: T) -> Result<()> {
        let index = self.index_of(coords)?;
        self.as_slice_mut()[index] = value;
        Ok(())
    }
}

impl Volume<bool> {
    /// Number of voxels set to `true`
    pub fn count_true(&self) -> usize {
        self.as_slice().iter().filter(|&&v| v).count()
    }
}
