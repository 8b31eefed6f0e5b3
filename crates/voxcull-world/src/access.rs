//! Read access to block data.

use hashbrown::HashMap;
use voxcull_core::coords::WorldPos;
use voxcull_core::types::BlockId;

/// Synchronous, side-effect free block lookup.
///
/// Implementations return [`BlockId::AIR`] for anything they do not hold,
/// including unloaded or out-of-range cells.
pub trait BlockAccess {
    /// Block at the given cell.
    fn get_block(&self, pos: WorldPos) -> BlockId;
}

impl<T: BlockAccess + ?Sized> BlockAccess for &T {
    #[inline]
    fn get_block(&self, pos: WorldPos) -> BlockId {
        (**self).get_block(pos)
    }
}

/// Sparse map of individual cells, handy for small hand-built scenes.
impl BlockAccess for HashMap<WorldPos, BlockId> {
    #[inline]
    fn get_block(&self, pos: WorldPos) -> BlockId {
        self.get(&pos).copied().unwrap_or(BlockId::AIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_map_defaults_to_air() {
        let mut map = HashMap::new();
        map.insert(WorldPos::new(1, 2, 3), BlockId::STONE);

        assert_eq!(map.get_block(WorldPos::new(1, 2, 3)), BlockId::STONE);
        assert_eq!(map.get_block(WorldPos::new(0, 0, 0)), BlockId::AIR);
    }
}
