//! Scene builder and counters for culling scenarios.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use glam::Vec3;
use voxcull_core::{BlockId, WorldPos};
use voxcull_culling::{CullingConfig, EntityCuller, FrameStats, FrameView};
use voxcull_entity::{
    BehaviorContext, CreatureKind, CreatureSpawn, Entity, EntityRegistry, VisibilitySettings,
};
use voxcull_render::Camera;
use voxcull_world::ChunkManager;

use crate::{Result, TestError};

/// Eye height of the test camera.
pub const EYE_HEIGHT: f32 = 1.6;

/// Camera at `(0, 1.6, 0)` looking down -Z with a 75 degree vertical field
/// of view and a square aspect.
pub fn create_test_camera() -> Camera {
    Camera {
        position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
        direction: Vec3::NEG_Z,
        up: Vec3::Y,
        fov: 75f32.to_radians(),
        aspect: 1.0,
        near: 0.1,
        far: 1000.0,
    }
}

/// Counts how many times a behavior ran.
#[derive(Debug, Clone, Default)]
pub struct UpdateCounter {
    count: Arc<AtomicU32>,
}

impl UpdateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Behavior that records each call and keeps the entity alive.
    pub fn behavior(&self) -> impl FnMut(&mut BehaviorContext<'_>, f32) -> bool + Send + Sync {
        let count = Arc::clone(&self.count);
        move |_: &mut BehaviorContext<'_>, _: f32| {
            count.fetch_add(1, Ordering::Relaxed);
            true
        }
    }

    /// Behavior that records each call and asks for removal on call `n`.
    pub fn retiring_after(
        &self,
        n: u32,
    ) -> impl FnMut(&mut BehaviorContext<'_>, f32) -> bool + Send + Sync {
        let count = Arc::clone(&self.count);
        move |_: &mut BehaviorContext<'_>, _: f32| count.fetch_add(1, Ordering::Relaxed) + 1 < n
    }

    /// Behavior that records each call and then panics.
    pub fn crashing(&self) -> impl FnMut(&mut BehaviorContext<'_>, f32) -> bool + Send + Sync {
        let count = Arc::clone(&self.count);
        move |_: &mut BehaviorContext<'_>, _: f32| -> bool {
            count.fetch_add(1, Ordering::Relaxed);
            panic!("creature update failed");
        }
    }
}

/// A world, an entity registry, and a culler wired to the test camera.
pub struct TestScene {
    pub camera: Camera,
    pub grid: ChunkManager,
    pub registry: EntityRegistry,
    pub culler: EntityCuller,
    pub visibility: VisibilitySettings,
    /// Distance origin, `None` to use the camera.
    pub observer: Option<Vec3>,
}

impl Default for TestScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScene {
    pub fn new() -> Self {
        Self::with_config(CullingConfig::default())
    }

    pub fn with_config(config: CullingConfig) -> Self {
        Self {
            camera: create_test_camera(),
            grid: ChunkManager::default(),
            registry: EntityRegistry::new(),
            culler: EntityCuller::new(config),
            visibility: VisibilitySettings::default(),
            observer: None,
        }
    }

    /// Load the culler config from TOML.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(Self::with_config(CullingConfig::from_toml_str(source)?))
    }

    /// Stack `block` in the two cells straight ahead at z = -6, covering
    /// eye height.
    pub fn wall_ahead(&mut self, block: BlockId) -> &mut Self {
        self.grid.set_block(WorldPos::new(0, 1, -6), block);
        self.grid.set_block(WorldPos::new(0, 2, -6), block);
        self
    }

    /// Spawn a grounded creature with a counting behavior.
    pub fn spawn(&mut self, kind: CreatureKind, position: Vec3) -> (Entity, UpdateCounter) {
        self.spawn_with(CreatureSpawn::new(kind, position))
    }

    /// Spawn an airborne creature with a counting behavior.
    pub fn spawn_airborne(&mut self, kind: CreatureKind, position: Vec3) -> (Entity, UpdateCounter) {
        self.spawn_with(CreatureSpawn::new(kind, position).airborne())
    }

    /// Spawn from a prepared description, attaching a counting behavior.
    pub fn spawn_with(&mut self, spawn: CreatureSpawn) -> (Entity, UpdateCounter) {
        let counter = UpdateCounter::new();
        let entity = self.registry.spawn(spawn.behavior(counter.behavior()));
        (entity, counter)
    }

    pub fn view(&self) -> FrameView {
        let view = FrameView::from_camera(&self.camera);
        match self.observer {
            Some(observer) => view.with_observer(observer),
            None => view,
        }
    }

    /// Run one frame at 60 Hz.
    pub fn run_frame(&mut self) -> FrameStats {
        let view = self.view();
        let grid = self.grid.read();
        self.culler
            .run_frame(&mut self.registry, &grid, &view, &self.visibility, 1.0 / 60.0)
    }

    /// Render flag of a live entity with a render handle.
    pub fn visible(&self, entity: Entity) -> Result<bool> {
        self.registry
            .is_visible(entity)
            .ok_or_else(|| TestError::Scenario(format!("{entity:?} has no render handle")))
    }
}
