//! Per-frame entity culling and update scheduling for the voxcull engine.
//!
//! Each frame, every live entity gets exactly one decision with two
//! independent halves: whether to advance its simulation and whether to
//! draw it. The decision combines
//! - a frustum test of a small bounding sphere at the entity,
//! - a squared-distance test against the near radius,
//! - a voxel line-of-sight march from the camera (only for in-frustum
//!   entities),
//! - the entity's grounded flag,
//! - and finally the player's per-kind visibility settings.
//!
//! Nothing is cached between frames.

pub mod classify;
pub mod config;
pub mod culler;
mod guard;
pub mod policy;
pub mod view;

pub use classify::Classification;
pub use config::CullingConfig;
pub use culler::{EntityCuller, EntityDecision, FrameStats};
pub use policy::{schedule, Schedule, Sighting};
pub use view::FrameView;
