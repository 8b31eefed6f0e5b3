//! Frustum and distance classification.

use glam::Vec3;
use voxcull_core::{Frustum, Sphere};

/// Where an entity sits relative to the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// The culling sphere at the entity touches the view volume.
    pub in_frustum: bool,
    /// Strictly inside the near radius.
    pub is_near: bool,
    /// Squared distance to the observer.
    pub distance_sq: f32,
}

impl Classification {
    /// Classify `position`.
    ///
    /// `sphere` is caller-owned scratch; only its center is overwritten, so
    /// its radius carries over between calls.
    #[inline]
    pub fn compute(
        frustum: &Frustum,
        sphere: &mut Sphere,
        observer: Vec3,
        position: Vec3,
        near_radius_sq: f32,
    ) -> Self {
        let distance_sq = position.distance_squared(observer);
        let in_frustum = frustum.intersects_sphere(sphere.recenter(position));
        Self {
            in_frustum,
            is_near: distance_sq < near_radius_sq,
            distance_sq,
        }
    }
}
