//! Chunked voxel grid storage for the voxcull engine.
//!
//! The grid is the read-only world the entity culler marches sight lines
//! through. Unloaded space always reads as air.

pub mod access;
pub mod chunk;
pub mod chunk_manager;

pub use access::BlockAccess;
pub use chunk::Chunk;
pub use chunk_manager::{ChunkManager, ChunkView};
