//! Volume data structures and geometry helpers

mod element;
mod grid;
mod mask;
mod neighborhood;

pub use element::VoxelElement;
pub use grid::Volume;
pub use mask::MaskScope;
pub use neighborhood::{Connectivity, Neighborhood};
