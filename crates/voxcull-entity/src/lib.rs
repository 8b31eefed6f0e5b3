//! Entity system for the voxcull engine.
//!
//! Uses hecs as the ECS backend. Every simulated creature carries a
//! [`Transform`], a [`Body`], a [`CreatureKind`], an optional
//! [`RenderHandle`], and usually a [`Brain`] that advances it.

pub mod behavior;
pub mod components;
pub mod kind;
pub mod registry;
pub mod visibility;

pub use behavior::{Behavior, BehaviorContext, Brain};
pub use components::{Body, RenderHandle, Transform};
pub use hecs::{Entity, World};
pub use kind::{Category, CreatureKind};
pub use registry::{CreatureSpawn, EntityRegistry};
pub use visibility::VisibilitySettings;
