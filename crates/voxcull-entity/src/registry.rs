//! Live set of simulated entities.

use glam::Vec3;
use hecs::{Entity, EntityBuilder, World};
use voxcull_core::{Error, Result};

use crate::behavior::{Behavior, Brain};
use crate::components::{Body, RenderHandle, Transform};
use crate::kind::CreatureKind;

/// Description of a creature to spawn.
///
/// ```
/// use glam::Vec3;
/// use voxcull_entity::{CreatureKind, CreatureSpawn, EntityRegistry};
///
/// let mut registry = EntityRegistry::new();
/// let pig = registry.spawn(
///     CreatureSpawn::new(CreatureKind::Pig, Vec3::new(0.0, 1.6, -5.0)).height(0.9),
/// );
/// assert_eq!(registry.is_visible(pig), Some(true));
/// ```
pub struct CreatureSpawn {
    kind: CreatureKind,
    transform: Transform,
    body: Body,
    render: bool,
    brain: Option<Brain>,
}

impl CreatureSpawn {
    /// Grounded creature of height 1 with a visible render handle.
    pub fn new(kind: CreatureKind, position: Vec3) -> Self {
        Self {
            kind,
            transform: Transform::from_position(position),
            body: Body::default(),
            render: true,
            brain: None,
        }
    }

    /// Set the vertical extent.
    #[must_use]
    pub fn height(mut self, height: f32) -> Self {
        self.body.height = height;
        self
    }

    /// Start falling or flying instead of resting on the ground.
    #[must_use]
    pub fn airborne(mut self) -> Self {
        self.body.on_ground = false;
        self
    }

    /// Spawn without a render handle, for logic-only entities.
    #[must_use]
    pub fn without_render_handle(mut self) -> Self {
        self.render = false;
        self
    }

    /// Attach the behavior that advances this creature.
    #[must_use]
    pub fn behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.brain = Some(Brain::new(behavior));
        self
    }
}

/// Owns every live entity.
///
/// Handles stay valid until the entity is despawned, so a frame can snapshot
/// them up front and tolerate removals while it walks the snapshot.
#[derive(Default)]
pub struct EntityRegistry {
    world: World,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a creature and return its handle.
    pub fn spawn(&mut self, spawn: CreatureSpawn) -> Entity {
        let mut builder = EntityBuilder::new();
        builder.add(spawn.transform).add(spawn.body).add(spawn.kind);
        if spawn.render {
            builder.add(RenderHandle::default());
        }
        if let Some(brain) = spawn.brain {
            builder.add(brain);
        }
        self.world.spawn(builder.build())
    }

    /// Remove an entity.
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        self.world
            .despawn(entity)
            .map_err(|e| Error::Entity(format!("{entity:?}: {e}")))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Replace the contents of `out` with every live handle.
    ///
    /// Reuses `out`'s allocation, so a buffer kept across frames stops
    /// growing once it has seen the peak population.
    pub fn collect_handles(&self, out: &mut Vec<Entity>) {
        out.clear();
        out.extend(self.world.iter().map(|entity| entity.entity()));
    }

    /// Current render flag, `None` if the entity is gone or has no handle.
    pub fn is_visible(&self, entity: Entity) -> Option<bool> {
        self.world
            .get::<&RenderHandle>(entity)
            .ok()
            .map(|handle| handle.visible)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.world
            .get::<&Transform>(entity)
            .ok()
            .map(|transform| transform.position)
    }

    pub fn kind(&self, entity: Entity) -> Option<CreatureKind> {
        self.world.get::<&CreatureKind>(entity).ok().map(|kind| *kind)
    }

    /// Move an entity, keeping everything else.
    pub fn set_position(&mut self, entity: Entity, position: Vec3) -> Result<()> {
        let mut transform = self
            .world
            .get::<&mut Transform>(entity)
            .map_err(|e| Error::Entity(format!("{entity:?}: {e}")))?;
        transform.position = position;
        Ok(())
    }

    /// Set the grounded flag.
    pub fn set_on_ground(&mut self, entity: Entity, on_ground: bool) -> Result<()> {
        let mut body = self
            .world
            .get::<&mut Body>(entity)
            .map_err(|e| Error::Entity(format!("{entity:?}: {e}")))?;
        body.on_ground = on_ground;
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
