//! Shared primitives for the voxcull engine: block ids and their opacity,
//! grid coordinates, bounding volumes with frustum tests, and the engine
//! error type.

pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use coords::{ChunkPos, LocalPos, WorldPos};
pub use error::{Error, Result};
pub use math::{Aabb, Frustum, Sphere};
pub use types::{BlockId, Opacity};

/// Grid dimensions.
pub mod constants {
    /// Cells per chunk side.
    pub const CHUNK_SIZE: usize = 32;
    /// Cells per chunk.
    pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;
}
