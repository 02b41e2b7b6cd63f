//! Neighborhood lookup for region growing on N-dimensional grids
//!
//! A [`Neighborhood`] is built once per `(dims, connectivity)` pair and then
//! answers "what is the k-th grid neighbor of voxel i" in constant time per
//! axis, returning `None` when the step would leave the volume.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Defines which grid offsets count as adjacent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connectivity {
    /// 2-D, edge-sharing pixels (4 neighbors)
    Conn4,
    /// 2-D, edge- or corner-sharing pixels (8 neighbors)
    Conn8,
    /// 3-D, face-sharing voxels (6 neighbors)
    Conn6,
    /// 3-D, face- or edge-sharing voxels (18 neighbors)
    Conn18,
    /// 3-D, every touching voxel (26 neighbors)
    Conn26,
    /// Any dimensionality, unit steps along a single axis (2·ndim neighbors)
    Faces,
    /// Any dimensionality, every touching voxel (3^ndim − 1 neighbors)
    Full,
}

impl Connectivity {
    /// Face connectivity for a dimensionality: conn4 in 2-D, conn6 in 3-D
    pub fn faces_for(ndim: usize) -> Self {
        match ndim {
            2 => Connectivity::Conn4,
            3 => Connectivity::Conn6,
            _ => Connectivity::Faces,
        }
    }

    /// Full connectivity for a dimensionality: conn8 in 2-D, conn26 in 3-D
    pub fn full_for(ndim: usize) -> Self {
        match ndim {
            2 => Connectivity::Conn8,
            3 => Connectivity::Conn26,
            _ => Connectivity::Full,
        }
    }

    /// Whether this connectivity is defined for `ndim` axes
    pub fn supports(&self, ndim: usize) -> bool {
        match self {
            Connectivity::Conn4 | Connectivity::Conn8 => ndim == 2,
            Connectivity::Conn6 | Connectivity::Conn18 | Connectivity::Conn26 => ndim == 3,
            Connectivity::Faces => ndim >= 1,
            Connectivity::Full => (1..=MAX_FULL_NDIM).contains(&ndim),
        }
    }

    /// Largest number of axes a single neighbor step may change
    pub fn reach(&self, ndim: usize) -> usize {
        match self {
            Connectivity::Conn4 | Connectivity::Conn6 | Connectivity::Faces => 1,
            Connectivity::Conn8 | Connectivity::Conn18 => 2,
            Connectivity::Conn26 => 3,
            Connectivity::Full => ndim,
        }
    }

    /// Relative coordinate steps, excluding the center, in lexicographic order.
    ///
    /// Empty when the connectivity does not support `ndim`.
    pub fn offsets(&self, ndim: usize) -> Vec<Vec<isize>> {
        let mut offsets = Vec::new();
        if self.supports(ndim) {
            let mut prefix = Vec::with_capacity(ndim);
            push_offsets(&mut prefix, ndim, self.reach(ndim), &mut offsets);
        }
        offsets
    }
}

/// Largest dimensionality accepted by [`Connectivity::Full`] (3^10 − 1 slots)
const MAX_FULL_NDIM: usize = 10;

/// Depth-first walk over per-axis steps `-1, 0, 1`, outermost axis first.
///
/// `budget` is the number of axes the rest of the offset may still change,
/// so face connectivity only visits O(ndim²) prefixes.
fn push_offsets(
    prefix: &mut Vec<isize>,
    ndim: usize,
    budget: usize,
    out: &mut Vec<Vec<isize>>,
) {
    if prefix.len() == ndim {
        if prefix.iter().any(|&s| s != 0) {
            out.push(prefix.clone());
        }
        return;
    }
    for step in [-1isize, 0, 1] {
        let cost = usize::from(step != 0);
        if cost > budget {
            continue;
        }
        prefix.push(step);
        push_offsets(prefix, ndim, budget - cost, out);
        prefix.pop();
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Connectivity::Conn4 => "conn4",
            Connectivity::Conn8 => "conn8",
            Connectivity::Conn6 => "conn6",
            Connectivity::Conn18 => "conn18",
            Connectivity::Conn26 => "conn26",
            Connectivity::Faces => "faces",
            Connectivity::Full => "full",
        };
        f.write_str(name)
    }
}

/// One relative connection
#[derive(Debug, Clone)]
struct Slot {
    /// Signed linear-index offset
    offset: isize,
    /// Axes changed by this slot and the direction of the step
    steps: Vec<(usize, isize)>,
}

/// Precomputed neighbor table for a fixed volume geometry
#[derive(Debug, Clone)]
pub struct Neighborhood {
    dims: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
    connectivity: Connectivity,
    slots: Vec<Slot>,
}

impl Neighborhood {
    /// Build the table for `dims` (outermost axis first) and `connectivity`
    pub fn new(dims: &[usize], connectivity: Connectivity) -> Result<Self> {
        if dims.is_empty() || dims.contains(&0) {
            return Err(Error::InvalidDimensions {
                dims: dims.to_vec(),
            });
        }

        let ndim = dims.len();
        if !connectivity.supports(ndim) {
            return Err(Error::UnsupportedConnectivity {
                connectivity: connectivity.to_string(),
                ndim,
            });
        }

        let mut strides = vec![1usize; ndim];
        for d in (0..ndim - 1).rev() {
            strides[d] = strides[d + 1] * dims[d + 1];
        }

        let slots: Vec<Slot> = connectivity
            .offsets(ndim)
            .into_iter()
            .map(|offset| {
                let steps: Vec<(usize, isize)> = offset
                    .iter()
                    .enumerate()
                    .filter(|&(_, &s)| s != 0)
                    .map(|(axis, &s)| (axis, s))
                    .collect();
                let offset: isize = steps
                    .iter()
                    .map(|&(axis, s)| s * strides[axis] as isize)
                    .sum();
                Slot { offset, steps }
            })
            .collect();

        Ok(Self {
            dims: dims.to_vec(),
            len: dims.iter().product(),
            strides,
            connectivity,
            slots,
        })
    }

    /// Number of neighbor slots, identical for every voxel
    pub fn n(&self) -> usize {
        self.slots.len()
    }

    /// Connectivity the table was built for
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Linear index of the neighbor of `center` in `slot`.
    ///
    /// Returns `None` when the step leaves the volume, when `center` is not
    /// a voxel of the volume, or when `slot >= n()`.
    #[inline]
    pub fn neighbor(&self, center: usize, slot: usize) -> Option<usize> {
        if center >= self.len {
            return None;
        }
        let slot = self.slots.get(slot)?;

        for &(axis, step) in &slot.steps {
            let coord = (center / self.strides[axis]) % self.dims[axis];
            if (step < 0 && coord == 0) || (step > 0 && coord + 1 == self.dims[axis]) {
                return None;
            }
        }

        Some(center.wrapping_add_signed(slot.offset))
    }

    /// Iterate over the valid neighbors of `center` in slot order
    pub fn neighbors(&self, center: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.slots.len()).filter_map(move |slot| self.neighbor(center, slot))
    }

    /// Relative coordinate step of every slot
    pub fn offsets(&self) -> Vec<Vec<isize>> {
        self.connectivity.offsets(self.dims.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_counts() {
        let cases = [
            (vec![5, 5], Connectivity::Conn4, 4),
            (vec![5, 5], Connectivity::Conn8, 8),
            (vec![4, 5, 5], Connectivity::Conn6, 6),
            (vec![4, 5, 5], Connectivity::Conn18, 18),
            (vec![4, 5, 5], Connectivity::Conn26, 26),
            (vec![7], Connectivity::Faces, 2),
            (vec![3, 3, 3, 3], Connectivity::Faces, 8),
            (vec![3, 3, 3, 3], Connectivity::Full, 80),
        ];
        for (dims, conn, expected) in cases {
            let ng = Neighborhood::new(&dims, conn).unwrap();
            assert_eq!(ng.n(), expected, "{} on {:?}", conn, dims);
        }
    }

    #[test]
    fn test_unsupported_connectivity() {
        assert!(matches!(
            Neighborhood::new(&[4, 4, 4], Connectivity::Conn8),
            Err(Error::UnsupportedConnectivity { ndim: 3, .. })
        ));
        assert!(matches!(
            Neighborhood::new(&[4, 4], Connectivity::Conn26),
            Err(Error::UnsupportedConnectivity { ndim: 2, .. })
        ));
    }

    #[test]
    fn test_zero_dims_rejected() {
        assert!(matches!(
            Neighborhood::new(&[4, 0], Connectivity::Conn4),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_interior_neighbors_conn4() {
        // 5x5, center (2,2) = 12
        let ng = Neighborhood::new(&[5, 5], Connectivity::Conn4).unwrap();
        let mut found: Vec<usize> = ng.neighbors(12).collect();
        found.sort_unstable();
        assert_eq!(found, vec![7, 11, 13, 17]);
    }

    #[test]
    fn test_edges_return_none() {
        let ng = Neighborhood::new(&[3, 4], Connectivity::Conn8).unwrap();
        // Corner (0,0): only 3 neighbors
        let corner: Vec<usize> = ng.neighbors(0).collect();
        assert_eq!(corner.len(), 3);
        // End of first row (0,3) must not wrap onto (1,0)
        let row_end: Vec<usize> = ng.neighbors(3).collect();
        assert!(!row_end.contains(&4));
        assert_eq!(row_end.len(), 3);
        // Out-of-volume center
        assert_eq!(ng.neighbor(12, 0), None);
        assert_eq!(ng.neighbor(0, ng.n()), None);
    }

    #[test]
    fn test_no_index_escapes_volume() {
        let dims = [3, 4, 5];
        let ng = Neighborhood::new(&dims, Connectivity::Conn26).unwrap();
        let len: usize = dims.iter().product();
        for center in 0..len {
            for slot in 0..ng.n() {
                if let Some(n) = ng.neighbor(center, slot) {
                    assert!(n < len);
                    assert_ne!(n, center);
                }
            }
        }
        // Interior voxel (1,1,1) sees all 26
        assert_eq!(ng.neighbors(20 + 5 + 1).count(), 26);
    }

    #[test]
    fn test_neighbor_symmetry() {
        let ng = Neighborhood::new(&[4, 6], Connectivity::Conn8).unwrap();
        for center in 0..24 {
            for n in ng.neighbors(center) {
                assert!(ng.neighbors(n).any(|back| back == center));
            }
        }
    }

    #[test]
    fn test_offsets_exclude_center() {
        let offsets = Connectivity::Conn4.offsets(2);
        assert_eq!(
            offsets,
            vec![vec![-1, 0], vec![0, -1], vec![0, 1], vec![1, 0]]
        );
    }

    #[test]
    fn test_slot_order_follows_offsets() {
        let dims = [4, 5, 6];
        let ng = Neighborhood::new(&dims, Connectivity::Conn18).unwrap();
        let offsets = ng.offsets();
        assert_eq!(offsets.len(), ng.n());

        // Interior voxel (2,2,2)
        let center = 2 * 30 + 2 * 6 + 2;
        for (slot, offset) in offsets.iter().enumerate() {
            let delta = offset[0] * 30 + offset[1] * 6 + offset[2];
            assert_eq!(
                ng.neighbor(center, slot),
                Some(center.wrapping_add_signed(delta)),
                "slot {} {:?}",
                slot,
                offset
            );
        }
    }

    #[test]
    fn test_faces_on_many_axes() {
        let dims = vec![1; 40];
        let ng = Neighborhood::new(&dims, Connectivity::Faces).unwrap();
        assert_eq!(ng.n(), 80);
        assert_eq!(ng.neighbors(0).count(), 0);

        let offsets = Connectivity::Faces.offsets(40);
        assert!(offsets
            .iter()
            .all(|o| o.iter().filter(|&&s| s != 0).count() == 1));
    }

    #[test]
    fn test_full_rejects_too_many_axes() {
        let dims = vec![1; 41];
        assert!(matches!(
            Neighborhood::new(&dims, Connectivity::Full),
            Err(Error::UnsupportedConnectivity { ndim: 41, .. })
        ));
        assert!(Connectivity::Full.offsets(41).is_empty());
        assert!(Connectivity::Full.supports(MAX_FULL_NDIM));
    }

    #[test]
    fn test_default_connectivity() {
        assert_eq!(Connectivity::faces_for(2), Connectivity::Conn4);
        assert_eq!(Connectivity::faces_for(3), Connectivity::Conn6);
        assert_eq!(Connectivity::full_for(3), Connectivity::Conn26);
        assert_eq!(Connectivity::faces_for(4), Connectivity::Faces);
    }
}
