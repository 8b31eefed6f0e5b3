//! Voxel cells, chunks, and positions inside a chunk.
//!
//! A [`WorldPos`] names one unit cell of the grid. Cells are grouped into
//! cubic chunks of [`CHUNK_SIZE`] per side; a cell splits into the
//! [`ChunkPos`] that owns it and its [`LocalPos`] inside that chunk.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::CHUNK_SIZE;

const SIDE: i64 = CHUNK_SIZE as i64;

/// Cell offset inside a chunk, each axis in `0..CHUNK_SIZE`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct LocalPos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl LocalPos {
    #[inline]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(
            (x as usize) < CHUNK_SIZE && (y as usize) < CHUNK_SIZE && (z as usize) < CHUNK_SIZE
        );
        Self { x, y, z }
    }

    /// Slot in x-major flat chunk storage.
    #[inline]
    pub const fn index(self) -> usize {
        (self.z as usize * CHUNK_SIZE + self.y as usize) * CHUNK_SIZE + self.x as usize
    }
}

/// Chunk coordinates, one unit per chunk.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Lowest-corner cell of the chunk.
    #[inline]
    pub const fn origin(self) -> WorldPos {
        WorldPos::new(
            self.x as i64 * SIDE,
            self.y as i64 * SIDE,
            self.z as i64 * SIDE,
        )
    }
}

/// Integer cell of the world grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Chunk owning this cell. Negative cells round toward negative infinity.
    #[inline]
    pub const fn chunk_pos(self) -> ChunkPos {
        self.split().0
    }

    /// Owning chunk and offset inside it.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn split(self) -> (ChunkPos, LocalPos) {
        (
            ChunkPos::new(
                self.x.div_euclid(SIDE) as i32,
                self.y.div_euclid(SIDE) as i32,
                self.z.div_euclid(SIDE) as i32,
            ),
            LocalPos::new(
                self.x.rem_euclid(SIDE) as u8,
                self.y.rem_euclid(SIDE) as u8,
                self.z.rem_euclid(SIDE) as u8,
            ),
        )
    }

    /// Neighbor one cell away along `axis` (0 = x, 1 = y, 2 = z).
    #[inline]
    #[must_use]
    pub const fn offset_axis(self, axis: usize, step: i64) -> Self {
        let mut next = self;
        match axis {
            0 => next.x += step,
            1 => next.y += step,
            _ => next.z += step,
        }
        next
    }

    /// Minimum corner in world space.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Cell containing a point: each component is floored, so `(-0.5, 1.9, 2.0)`
/// lands in `(-1, 1, 2)`.
impl From<Vec3> for WorldPos {
    #[allow(clippy::cast_possible_truncation)]
    fn from(point: Vec3) -> Self {
        let cell = point.floor();
        Self::new(cell.x as i64, cell.y as i64, cell.z as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_positive_and_negative() {
        let (chunk, local) = WorldPos::new(100, 5, 64).split();
        assert_eq!(chunk, ChunkPos::new(3, 0, 2));
        assert_eq!(local, LocalPos::new(4, 5, 0));

        let (chunk, local) = WorldPos::new(-1, -32, -33).split();
        assert_eq!(chunk, ChunkPos::new(-1, -1, -2));
        assert_eq!(local, LocalPos::new(31, 0, 31));
    }

    #[test]
    fn origin_plus_local_is_the_cell() {
        let cell = WorldPos::new(-70, 12, 33);
        let (chunk, local) = cell.split();
        let origin = chunk.origin();
        assert_eq!(
            WorldPos::new(
                origin.x + i64::from(local.x),
                origin.y + i64::from(local.y),
                origin.z + i64::from(local.z),
            ),
            cell
        );
    }

    #[test]
    fn local_index_covers_chunk() {
        assert_eq!(LocalPos::new(0, 0, 0).index(), 0);
        assert_eq!(LocalPos::new(1, 0, 0).index(), 1);
        assert_eq!(LocalPos::new(0, 1, 0).index(), CHUNK_SIZE);
        assert_eq!(LocalPos::new(31, 31, 31).index(), crate::constants::CHUNK_VOLUME - 1);
    }

    #[test]
    fn points_floor_into_cells() {
        assert_eq!(WorldPos::from(Vec3::new(-0.5, 1.9, 2.0)), WorldPos::new(-1, 1, 2));
        assert_eq!(WorldPos::from(Vec3::new(0.0, -0.0, -1.0)), WorldPos::new(0, 0, -1));
    }

    #[test]
    fn offset_axis_moves_one_cell() {
        let p = WorldPos::default();
        assert_eq!(p.offset_axis(0, 1), WorldPos::new(1, 0, 0));
        assert_eq!(p.offset_axis(1, -1), WorldPos::new(0, -1, 0));
        assert_eq!(p.offset_axis(2, -1), WorldPos::new(0, 0, -1));
    }
}
