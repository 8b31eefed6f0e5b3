//! Perspective camera that produces the per-frame culling frustum.

use glam::{Mat4, Vec3};
use voxcull_core::math::Frustum;

/// Right-handed perspective camera with a vertical field of view.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Unit forward vector.
    pub direction: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Default lens at `position`, facing `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            ..Self::default()
        };
        camera.look_at(target);
        camera
    }

    #[must_use]
    pub const fn with_lens(mut self, fov: f32, aspect: f32) -> Self {
        self.fov = fov;
        self.aspect = aspect;
        self
    }

    #[must_use]
    pub const fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Turn toward `target`. A target on top of the camera leaves the
    /// direction unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = (target - self.position).normalize_or_zero();
        if direction != Vec3::ZERO {
            self.direction = direction;
        }
    }

    /// Projection times view, mapping depth to `[0, 1]`.
    pub fn view_projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
            * Mat4::look_to_rh(self.position, self.direction, self.up)
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(self.view_projection())
    }
}
