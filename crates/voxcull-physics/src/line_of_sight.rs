//! Line-of-sight and first-hit queries against the voxel grid.

use glam::Vec3;
use voxcull_core::coords::WorldPos;
use voxcull_core::types::BlockId;
use voxcull_world::BlockAccess;

use crate::traversal::VoxelTraversal;

/// First opaque cell found along a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Point where the segment entered the hit cell.
    pub position: Vec3,
    /// Outward normal of the entered face, zero if the segment starts inside.
    pub normal: Vec3,
    /// Distance from the segment start to `position`.
    pub distance: f32,
    /// Cell that stopped the ray.
    pub block_position: WorldPos,
    /// Block found in that cell.
    pub block: BlockId,
}

/// Walk `from -> to` and report the first cell whose block blocks sight.
///
/// Air, water, and glass are passed through. Returns `None` when the end cell
/// is reached, or when the step budget runs out first.
pub fn raycast<G>(grid: &G, from: Vec3, to: Vec3, max_steps: u32) -> Option<RaycastHit>
where
    G: BlockAccess + ?Sized,
{
    let dir = (to - from).normalize_or_zero();

    VoxelTraversal::new(from, to, max_steps).find_map(|cell| {
        let block = grid.get_block(cell.pos);
        block.is_opaque().then(|| RaycastHit {
            position: from + dir * cell.distance,
            normal: cell.entry_normal.as_vec3(),
            distance: cell.distance,
            block_position: cell.pos,
            block,
        })
    })
}

/// True when no opaque block lies on the segment `from -> to`.
#[inline]
pub fn line_of_sight<G>(grid: &G, from: Vec3, to: Vec3, max_steps: u32) -> bool
where
    G: BlockAccess + ?Sized,
{
    raycast(grid, from, to, max_steps).is_none()
}
