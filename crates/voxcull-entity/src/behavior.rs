//! Per-entity simulation step.

use crate::components::{Body, Transform};

/// Mutable view of an entity handed to its behavior each update.
#[derive(Debug)]
pub struct BehaviorContext<'a> {
    pub transform: &'a mut Transform,
    pub body: &'a mut Body,
}

/// Simulation step for one entity (AI, physics, animation).
///
/// Returns `false` when the entity should be removed from the registry.
pub trait Behavior: Send + Sync {
    fn update(&mut self, ctx: &mut BehaviorContext<'_>, dt: f32) -> bool;
}

impl<F> Behavior for F
where
    F: FnMut(&mut BehaviorContext<'_>, f32) -> bool + Send + Sync,
{
    fn update(&mut self, ctx: &mut BehaviorContext<'_>, dt: f32) -> bool {
        self(ctx, dt)
    }
}

/// Component holding an entity's behavior.
pub struct Brain(pub Box<dyn Behavior>);

impl Brain {
    pub fn new(behavior: impl Behavior + 'static) -> Self {
        Self(Box::new(behavior))
    }

    #[inline]
    pub fn update(&mut self, ctx: &mut BehaviorContext<'_>, dt: f32) -> bool {
        self.0.update(ctx, dt)
    }
}

impl std::fmt::Debug for Brain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Brain").field(&"<dyn Behavior>").finish()
    }
}
