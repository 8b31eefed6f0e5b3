//! Per-frame orchestration of culling, scheduling and updates.

use std::time::Duration;

use glam::Vec3;
use tracing::{debug, trace, warn};
use voxcull_core::Sphere;
use voxcull_entity::{
    BehaviorContext, Body, Brain, CreatureKind, Entity, EntityRegistry, RenderHandle, Transform,
    VisibilitySettings,
};
use voxcull_physics::line_of_sight;
use voxcull_world::BlockAccess;

use crate::classify::Classification;
use crate::config::CullingConfig;
use crate::guard::{self, Outcome};
use crate::policy::{schedule, Schedule, Sighting};
use crate::view::FrameView;

/// Counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Entities that received a decision.
    pub processed: u32,
    /// Entities scheduled to simulate.
    pub updated: u32,
    /// Entities drawn after the visibility filter.
    pub rendered: u32,
    /// In view but blocked by an opaque voxel.
    pub occluded: u32,
    /// Not simulated this frame.
    pub frozen: u32,
    /// Removed after their update, including crashes.
    pub removed: u32,
    /// Removed because their update panicked.
    pub crashed: u32,
    /// Line-of-sight marches performed.
    pub los_tests: u32,
}

/// Decision for one entity before the visibility filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDecision {
    pub classification: Classification,
    pub sighting: Sighting,
    pub schedule: Schedule,
}

/// Decides, once per frame, which entities simulate and which are drawn.
///
/// The culling sphere and the handle snapshot are reused across frames;
/// nothing else survives from one frame to the next.
#[derive(Debug)]
pub struct EntityCuller {
    config: CullingConfig,
    sphere: Sphere,
    budget: Duration,
    handles: Vec<Entity>,
    frame: u64,
}

impl Default for EntityCuller {
    fn default() -> Self {
        Self::new(CullingConfig::default())
    }
}

impl EntityCuller {
    pub fn new(config: CullingConfig) -> Self {
        Self {
            sphere: Sphere::new(Vec3::ZERO, config.cull_sphere_radius),
            budget: config.slow_update_budget(),
            config,
            handles: Vec::new(),
            frame: 0,
        }
    }

    pub const fn config(&self) -> &CullingConfig {
        &self.config
    }

    /// Frames run so far.
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Classify one entity and look up its schedule without touching it.
    ///
    /// Same inputs always give the same decision.
    pub fn evaluate<G>(
        &mut self,
        grid: &G,
        view: &FrameView,
        position: Vec3,
        body: &Body,
    ) -> EntityDecision
    where
        G: BlockAccess + ?Sized,
    {
        decide(&self.config, &mut self.sphere, grid, view, position, body)
    }

    /// Run one frame over every live entity.
    ///
    /// Each entity gets its render flag written (if it has a render handle)
    /// and its behavior run (if scheduled). Entities whose behavior returns
    /// `false` or panics are despawned. Entities missing a transform, body
    /// or kind are not culled.
    #[tracing::instrument(level = "trace", skip_all, fields(frame = self.frame))]
    pub fn run_frame<G>(
        &mut self,
        registry: &mut EntityRegistry,
        grid: &G,
        view: &FrameView,
        visibility: &VisibilitySettings,
        dt: f32,
    ) -> FrameStats
    where
        G: BlockAccess + ?Sized,
    {
        let interval = u64::from(self.config.profile_interval);
        let timed = interval != 0 && self.frame % interval == 0;
        let mut stats = FrameStats::default();

        registry.collect_handles(&mut self.handles);

        for &entity in self.handles.iter().rev() {
            let Ok((transform, body, kind, render, brain)) =
                registry.world_mut().query_one_mut::<(
                    &mut Transform,
                    &mut Body,
                    &CreatureKind,
                    Option<&mut RenderHandle>,
                    Option<&mut Brain>,
                )>(entity)
            else {
                trace!(?entity, "not a creature, skipped");
                continue;
            };
            let kind = *kind;

            let decision = decide(
                &self.config,
                &mut self.sphere,
                grid,
                view,
                transform.position,
                body,
            );
            stats.processed += 1;
            if decision.classification.in_frustum {
                stats.los_tests += 1;
            }
            if decision.sighting.is_occluded() {
                stats.occluded += 1;
            }

            let mut plan = decision.schedule;
            if plan.render {
                plan = plan.filtered(visibility.allows(kind));
            }
            if let Some(handle) = render {
                handle.visible = plan.render;
            }
            if plan.render {
                stats.rendered += 1;
            }
            trace!(?entity, %kind, sighting = ?decision.sighting, ?plan, "scheduled");

            if !plan.update {
                stats.frozen += 1;
                continue;
            }
            stats.updated += 1;

            let Some(brain) = brain else {
                continue;
            };
            let mut ctx = BehaviorContext { transform, body };
            let (outcome, elapsed) = guard::run(brain, &mut ctx, dt, timed);

            if let Some(elapsed) = elapsed.filter(|e| *e > self.budget) {
                warn!(
                    ?entity,
                    %kind,
                    "slow entity update: {:.2}ms",
                    elapsed.as_secs_f64() * 1000.0
                );
            }
            if outcome.removes() {
                if outcome == Outcome::Crashed {
                    stats.crashed += 1;
                }
                match registry.despawn(entity) {
                    Ok(()) => stats.removed += 1,
                    Err(e) => warn!("failed to remove entity: {e}"),
                }
            }
        }

        debug!(frame = self.frame, ?stats, "entity culling");
        self.frame += 1;
        stats
    }
}

fn decide<G>(
    config: &CullingConfig,
    sphere: &mut Sphere,
    grid: &G,
    view: &FrameView,
    position: Vec3,
    body: &Body,
) -> EntityDecision
where
    G: BlockAccess + ?Sized,
{
    let classification = Classification::compute(
        &view.frustum,
        sphere,
        view.observer_position,
        position,
        config.near_radius_sq(),
    );

    let sighting = if classification.in_frustum {
        let target = body.visual_center(position, config.default_height);
        if line_of_sight(grid, view.camera_position, target, config.max_los_steps) {
            Sighting::Clear
        } else {
            Sighting::Occluded
        }
    } else {
        Sighting::Outside {
            near: classification.is_near,
        }
    };

    EntityDecision {
        classification,
        sighting,
        schedule: schedule(sighting, body.on_ground),
    }
}
