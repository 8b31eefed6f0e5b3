//! Arena, creature ring and camera orbit for the headless simulation.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use glam::Vec3;
use serde::Deserialize;
use tracing::{debug, info};
use voxcull_core::{BlockId, WorldPos};
use voxcull_culling::{CullingConfig, EntityCuller, FrameStats, FrameView};
use voxcull_entity::{
    BehaviorContext, CreatureKind, CreatureSpawn, EntityRegistry, VisibilitySettings,
};
use voxcull_render::Camera;
use voxcull_world::ChunkManager;

const DT: f32 = 1.0 / 60.0;
const ARENA_HALF_EXTENT: i64 = 48;
const FLOOR_TOP: f32 = 1.0;
const GRAVITY: f32 = 9.8;
const WANDER_SPEED: f32 = 0.8;
const ORBIT_RADIUS: f32 = 30.0;
const ORBIT_HEIGHT: f32 = 6.0;
/// Radians per second.
const ORBIT_SPEED: f32 = 0.3;
/// Far clip distance; the arena never needs more.
const VIEW_DISTANCE: f32 = 256.0;
/// Golden angle, spreads creatures evenly around the rings.
const RING_ANGLE: f32 = 2.399_963;

/// Command line parameters.
#[derive(Debug, Clone)]
pub struct SimParams {
    pub frames: u32,
    pub entities: usize,
    pub config: Option<PathBuf>,
    /// Kinds never drawn, on top of the settings file.
    pub hidden: Vec<CreatureKind>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            frames: 600,
            entities: 300,
            config: None,
            hidden: Vec::new(),
        }
    }
}

impl SimParams {
    /// Parse simulation parameters from command line arguments.
    pub fn from_args() -> anyhow::Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut params = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    let value = args.next().context("--frames needs a value")?;
                    params.frames = value
                        .parse()
                        .with_context(|| format!("invalid frame count `{value}`"))?;
                }
                "--entities" => {
                    let value = args.next().context("--entities needs a value")?;
                    params.entities = value
                        .parse()
                        .with_context(|| format!("invalid entity count `{value}`"))?;
                }
                "--config" => {
                    params.config = Some(args.next().context("--config needs a path")?.into());
                }
                "--hide" => {
                    let value = args.next().context("--hide needs a creature kind")?;
                    params.hidden.push(value.parse()?);
                }
                other => bail!("unknown option `{other}` (see --help)"),
            }
        }

        Ok(params)
    }
}

/// Settings file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub culling: CullingConfig,
    pub visibility: VisibilitySettings,
}

impl SimSettings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("invalid settings in {}", path.display()))
    }

    fn parse(source: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(source)?;
        settings.culling.validate()?;
        Ok(settings)
    }
}

/// World, creatures and culler driven by an orbiting camera.
pub struct Simulation {
    grid: ChunkManager,
    registry: EntityRegistry,
    culler: EntityCuller,
    visibility: VisibilitySettings,
    camera: Camera,
    time: f32,
}

impl Simulation {
    pub fn new(params: &SimParams, settings: SimSettings) -> Self {
        let grid = ChunkManager::default();
        build_arena(&grid);
        info!(
            "Arena ready: {} chunks, {} KiB",
            grid.len(),
            grid.memory_usage() / 1024
        );

        let mut registry = EntityRegistry::new();
        spawn_ring(&mut registry, params.entities);

        let mut visibility = settings.visibility;
        for &kind in &params.hidden {
            visibility.set_kind_visible(kind, false);
        }

        let mut sim = Self {
            grid,
            registry,
            culler: EntityCuller::new(settings.culling),
            visibility,
            camera: Camera::default().with_clip(0.1, VIEW_DISTANCE),
            time: 0.0,
        };
        sim.orbit();
        sim
    }

    pub fn population(&self) -> usize {
        self.registry.len()
    }

    /// Run `frames` frames and return the summed statistics.
    pub fn run(&mut self, frames: u32) -> FrameStats {
        let mut totals = FrameStats::default();

        for frame in 0..frames {
            self.orbit();
            let chunks = self.grid.update_visibility(&self.camera.frustum());

            // Third-person: the player stands on the floor below the camera.
            let player = Vec3::new(
                self.camera.position.x,
                FLOOR_TOP,
                self.camera.position.z,
            );
            let view = FrameView::from_camera(&self.camera).with_observer(player);
            let grid = self.grid.read();
            let stats = self.culler.run_frame(
                &mut self.registry,
                &grid,
                &view,
                &self.visibility,
                DT,
            );
            accumulate(&mut totals, &stats);

            if frame % 60 == 0 {
                info!(
                    frame,
                    creatures = stats.processed,
                    drawn = stats.rendered,
                    updated = stats.updated,
                    occluded = stats.occluded,
                    chunks,
                    "culling summary"
                );
            }
            self.time += DT;
        }

        totals
    }

    fn orbit(&mut self) {
        let angle = self.time * ORBIT_SPEED;
        self.camera.set_position(Vec3::new(
            angle.cos() * ORBIT_RADIUS,
            ORBIT_HEIGHT,
            angle.sin() * ORBIT_RADIUS,
        ));
        self.camera.look_at(Vec3::new(0.0, FLOOR_TOP, 0.0));
    }
}

fn accumulate(totals: &mut FrameStats, frame: &FrameStats) {
    totals.processed += frame.processed;
    totals.updated += frame.updated;
    totals.rendered += frame.rendered;
    totals.occluded += frame.occluded;
    totals.frozen += frame.frozen;
    totals.removed += frame.removed;
    totals.crashed += frame.crashed;
    totals.los_tests += frame.los_tests;
}

/// Grass floor with a stone wall, a glass wall and a pond.
fn build_arena(grid: &ChunkManager) {
    let e = ARENA_HALF_EXTENT;
    grid.fill(WorldPos::new(-e, 0, -e), WorldPos::new(e, 0, e), BlockId::GRASS);
    grid.fill(WorldPos::new(-12, 1, -16), WorldPos::new(12, 4, -16), BlockId::STONE);
    grid.fill(WorldPos::new(16, 1, -12), WorldPos::new(16, 4, 12), BlockId::GLASS);
    grid.fill(WorldPos::new(-20, 0, 8), WorldPos::new(-12, 0, 16), BlockId::WATER);
    grid.fill(WorldPos::new(-4, 1, -4), WorldPos::new(4, 6, 4), BlockId::BRICK);
    debug!("arena built");
}

/// Spawn `count` creatures on concentric rings around the origin.
fn spawn_ring(registry: &mut EntityRegistry, count: usize) {
    for i in 0..count {
        let kind = CreatureKind::ALL[i % CreatureKind::ALL.len()];
        let ring = (i % 6) as f32;
        let angle = i as f32 * RING_ANGLE;
        let radius = 8.0 + ring * 6.0;
        let flies = matches!(
            kind,
            CreatureKind::Owl
                | CreatureKind::Eagle
                | CreatureKind::Bat
                | CreatureKind::Dragon
                | CreatureKind::Pegasus
                | CreatureKind::Spaceship
        );
        let height = if flies { FLOOR_TOP + 10.0 } else { FLOOR_TOP };
        let position = Vec3::new(angle.cos() * radius, height, angle.sin() * radius);

        let mut spawn = CreatureSpawn::new(kind, position);
        if flies {
            spawn = spawn.airborne();
        }
        spawn = if kind == CreatureKind::Chicken {
            spawn.behavior(short_lived(angle, 240 + (i % 120) as u32))
        } else {
            spawn.behavior(wanderer(angle))
        };
        registry.spawn(spawn);
    }
}

/// Fall until landing, then stroll in a slow circle.
fn wanderer(phase: f32) -> impl FnMut(&mut BehaviorContext<'_>, f32) -> bool + Send + Sync {
    let mut phase = phase;
    move |ctx: &mut BehaviorContext<'_>, dt: f32| {
        phase += dt;
        step(ctx, phase, dt);
        true
    }
}

/// Like [`wanderer`], but leaves after `updates` simulated steps.
fn short_lived(
    phase: f32,
    updates: u32,
) -> impl FnMut(&mut BehaviorContext<'_>, f32) -> bool + Send + Sync {
    let mut phase = phase;
    let mut left = updates;
    move |ctx: &mut BehaviorContext<'_>, dt: f32| {
        phase += dt;
        step(ctx, phase, dt);
        left = left.saturating_sub(1);
        left > 0
    }
}

fn step(ctx: &mut BehaviorContext<'_>, phase: f32, dt: f32) {
    let position = &mut ctx.transform.position;
    if ctx.body.on_ground {
        *position += Vec3::new(phase.cos(), 0.0, phase.sin()) * (WANDER_SPEED * dt);
    } else {
        position.y -= GRAVITY * dt;
        if position.y <= FLOOR_TOP {
            position.y = FLOOR_TOP;
            ctx.body.on_ground = true;
        }
    }
}
