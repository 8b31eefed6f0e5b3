//! Sparse chunk map backing the world grid.

use hashbrown::HashMap;
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::trace;
use voxcull_core::coords::{ChunkPos, WorldPos};
use voxcull_core::math::Frustum;
use voxcull_core::types::BlockId;

use crate::access::BlockAccess;
use crate::chunk::Chunk;

/// Loaded chunks keyed by chunk coordinate.
///
/// Writers (world edits, generation) take the lock between frames; during a
/// frame the culler only reads. Cells in chunks that were never written read
/// as air.
pub struct ChunkManager {
    chunks: RwLock<HashMap<ChunkPos, Chunk>>,
}

impl Default for ChunkManager {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

impl ChunkManager {
    pub fn with_capacity(chunks: usize) -> Self {
        Self {
            chunks: RwLock::new(HashMap::with_capacity(chunks)),
        }
    }

    /// Hold the read lock for a batch of lookups.
    ///
    /// Writers block until the view is dropped, so take one per frame for the
    /// culling pass rather than locking on every cell.
    pub fn read(&self) -> ChunkView<'_> {
        ChunkView {
            chunks: self.chunks.read(),
        }
    }

    /// Loaded chunk count.
    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.read().is_empty()
    }

    pub fn is_loaded(&self, pos: ChunkPos) -> bool {
        self.chunks.read().contains_key(&pos)
    }

    /// Drop a chunk; its cells read as air afterwards.
    pub fn unload(&self, pos: ChunkPos) -> Option<Chunk> {
        self.chunks.write().remove(&pos)
    }

    /// Write one cell and return what it held.
    ///
    /// Loads the owning chunk on first write. Writing air into unloaded space
    /// is a no-op.
    pub fn set_block(&self, pos: WorldPos, block: BlockId) -> BlockId {
        let (chunk_pos, local) = pos.split();
        let mut chunks = self.chunks.write();

        if block.is_air() && !chunks.contains_key(&chunk_pos) {
            return BlockId::AIR;
        }
        chunks
            .entry(chunk_pos)
            .or_insert_with(|| Chunk::new(chunk_pos))
            .set(local, block)
    }

    /// Write `block` into every cell of the inclusive box `min..=max`.
    pub fn fill(&self, min: WorldPos, max: WorldPos, block: BlockId) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    self.set_block(WorldPos::new(x, y, z), block);
                }
            }
        }
    }

    /// Non-air cells in a loaded chunk.
    pub fn solid_count(&self, pos: ChunkPos) -> Option<usize> {
        self.chunks.read().get(&pos).map(Chunk::solid_count)
    }

    /// Terrain culling pass: flag each chunk by a box-vs-frustum test and
    /// return how many are visible.
    pub fn update_visibility(&self, frustum: &Frustum) -> usize {
        let mut chunks = self.chunks.write();
        let visible = chunks
            .values_mut()
            .map(|chunk| {
                chunk.visible = frustum.test_aabb(&chunk.aabb());
                usize::from(chunk.visible)
            })
            .sum();
        trace!(visible, loaded = chunks.len(), "chunk frustum pass");
        visible
    }

    /// Chunks flagged visible by the last [`Self::update_visibility`].
    pub fn visible_chunks(&self) -> Vec<ChunkPos> {
        let mut visible: Vec<_> = self
            .chunks
            .read()
            .values()
            .filter(|chunk| chunk.visible)
            .map(|chunk| chunk.pos)
            .collect();
        visible.sort_unstable_by_key(|pos| (pos.x, pos.y, pos.z));
        visible
    }

    /// Heap and inline bytes held by loaded chunks.
    pub fn memory_usage(&self) -> usize {
        self.chunks.read().values().map(Chunk::memory_usage).sum()
    }
}

/// Single-cell lookups take the lock each time; prefer [`ChunkManager::read`]
/// for sight lines.
impl BlockAccess for ChunkManager {
    fn get_block(&self, pos: WorldPos) -> BlockId {
        block_at(&self.chunks.read(), pos)
    }
}

/// Read-locked view of a [`ChunkManager`].
pub struct ChunkView<'a> {
    chunks: RwLockReadGuard<'a, HashMap<ChunkPos, Chunk>>,
}

impl ChunkView<'_> {
    /// Loaded chunk count.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl BlockAccess for ChunkView<'_> {
    #[inline]
    fn get_block(&self, pos: WorldPos) -> BlockId {
        block_at(&self.chunks, pos)
    }
}

fn block_at(chunks: &HashMap<ChunkPos, Chunk>, pos: WorldPos) -> BlockId {
    let (chunk_pos, local) = pos.split();
    chunks
        .get(&chunk_pos)
        .map_or(BlockId::AIR, |chunk| chunk.get(local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    #[test]
    fn writes_load_chunks_on_demand() {
        let grid = ChunkManager::default();
        let pos = WorldPos::new(-3, 40, 7);

        assert_eq!(grid.set_block(pos, BlockId::STONE), BlockId::AIR);
        assert_eq!(grid.get_block(pos), BlockId::STONE);
        assert!(grid.is_loaded(pos.chunk_pos()));
        assert_eq!(grid.solid_count(pos.chunk_pos()), Some(1));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn air_in_unloaded_space_is_a_no_op() {
        let grid = ChunkManager::default();
        grid.set_block(WorldPos::new(500, 0, 0), BlockId::AIR);
        assert!(grid.is_empty());
        assert_eq!(grid.get_block(WorldPos::new(1_000_000, -5, 3)), BlockId::AIR);
    }

    #[test]
    fn unload_reverts_to_air() {
        let grid = ChunkManager::default();
        let pos = WorldPos::new(1, 1, 1);
        grid.set_block(pos, BlockId::DIRT);

        assert!(grid.unload(pos.chunk_pos()).is_some());
        assert_eq!(grid.get_block(pos), BlockId::AIR);
        assert!(grid.is_empty());
    }

    #[test]
    fn fill_is_inclusive() {
        let grid = ChunkManager::default();
        grid.fill(WorldPos::new(0, 0, 0), WorldPos::new(1, 1, 1), BlockId::BRICK);
        assert_eq!(grid.solid_count(ChunkPos::new(0, 0, 0)), Some(8));
    }

    #[test]
    fn fill_spans_chunk_borders() {
        let grid = ChunkManager::default();
        grid.fill(WorldPos::new(-1, 0, 0), WorldPos::new(0, 0, 0), BlockId::STONE);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn view_reads_like_the_manager() {
        let grid = ChunkManager::default();
        grid.set_block(WorldPos::new(-40, 3, 9), BlockId::GLASS);

        let view = grid.read();
        assert_eq!(view.len(), 1);
        assert_eq!(view.get_block(WorldPos::new(-40, 3, 9)), BlockId::GLASS);
        assert_eq!(view.get_block(WorldPos::new(0, 0, 0)), BlockId::AIR);
        // Other readers are not blocked.
        assert_eq!(grid.get_block(WorldPos::new(-40, 3, 9)), BlockId::GLASS);
        drop(view);

        grid.set_block(WorldPos::new(-40, 3, 9), BlockId::AIR);
        assert!(grid.read().get_block(WorldPos::new(-40, 3, 9)).is_air());
    }

    #[test]
    fn chunks_behind_the_camera_are_hidden() {
        let grid = ChunkManager::default();
        grid.set_block(WorldPos::new(0, 0, -40), BlockId::STONE); // chunk z = -2
        grid.set_block(WorldPos::new(0, 0, 80), BlockId::STONE); // chunk z = 2

        let view = Mat4::look_to_rh(Vec3::new(16.0, 16.0, 0.0), Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 500.0);
        let frustum = Frustum::from_view_projection(proj * view);

        assert_eq!(grid.update_visibility(&frustum), 1);
        assert_eq!(grid.visible_chunks(), vec![ChunkPos::new(0, 0, -2)]);
    }
}
