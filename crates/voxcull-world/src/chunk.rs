//! Dense cubic block storage.

use glam::Vec3;
use voxcull_core::constants::{CHUNK_SIZE, CHUNK_VOLUME};
use voxcull_core::coords::{ChunkPos, LocalPos};
use voxcull_core::math::Aabb;
use voxcull_core::types::BlockId;

/// `CHUNK_SIZE`^3 cells of block data.
pub struct Chunk {
    pub pos: ChunkPos,
    /// Dense block storage, indexed by [`LocalPos::index`].
    blocks: Box<[BlockId]>,
    /// Number of non-air blocks.
    solid_count: usize,
    /// Result of the last frustum pass.
    pub visible: bool,
}

impl Chunk {
    /// All-air chunk, visible until the first frustum pass says otherwise.
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: vec![BlockId::AIR; CHUNK_VOLUME].into_boxed_slice(),
            solid_count: 0,
            visible: true,
        }
    }

    #[inline]
    pub fn get(&self, local: LocalPos) -> BlockId {
        self.blocks[local.index()]
    }

    /// Store `block`, returning the previous occupant.
    pub fn set(&mut self, local: LocalPos, block: BlockId) -> BlockId {
        let previous = std::mem::replace(&mut self.blocks[local.index()], block);
        match (previous.is_air(), block.is_air()) {
            (true, false) => self.solid_count += 1,
            (false, true) => self.solid_count -= 1,
            _ => {}
        }
        previous
    }

    /// Only air.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    /// Number of non-air blocks.
    #[inline]
    pub const fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// World-space bounds of the chunk.
    pub fn aabb(&self) -> Aabb {
        let min = self.pos.origin().as_vec3();
        Aabb::new(min, min + Vec3::splat(CHUNK_SIZE as f32))
    }

    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + std::mem::size_of_val(&*self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_air() {
        let chunk = Chunk::new(ChunkPos::new(0, 0, 0));
        assert!(chunk.is_empty());
        assert!(chunk.visible);
        assert_eq!(chunk.get(LocalPos::new(3, 4, 5)), BlockId::AIR);
    }

    #[test]
    fn set_tracks_solid_count() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0, 0));
        let local = LocalPos::new(1, 2, 3);

        assert_eq!(chunk.set(local, BlockId::STONE), BlockId::AIR);
        assert_eq!(chunk.solid_count(), 1);

        // Replacing solid with solid keeps the count.
        assert_eq!(chunk.set(local, BlockId::GLASS), BlockId::STONE);
        assert_eq!(chunk.solid_count(), 1);

        chunk.set(local, BlockId::AIR);
        assert!(chunk.is_empty());
    }

    #[test]
    fn aabb_covers_chunk_extent() {
        let chunk = Chunk::new(ChunkPos::new(-1, 0, 2));
        let aabb = chunk.aabb();
        assert_eq!(aabb.min, Vec3::new(-32.0, 0.0, 64.0));
        assert_eq!(aabb.max, Vec3::new(0.0, 32.0, 96.0));
    }
}
