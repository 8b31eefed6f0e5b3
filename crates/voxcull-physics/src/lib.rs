//! Voxel ray traversal and line-of-sight queries for the voxcull engine.
//!
//! Everything here walks the grid with the same bounded DDA, so a query
//! always finishes after at most `max_steps` cell advances no matter how the
//! endpoints are placed.

pub mod line_of_sight;
pub mod traversal;

pub use line_of_sight::{line_of_sight, raycast, RaycastHit};
pub use traversal::{TraversalCell, VoxelTraversal, DEFAULT_MAX_STEPS};
