//! Read-only camera state for one frame.

use glam::Vec3;
use voxcull_core::Frustum;
use voxcull_render::Camera;

/// Everything the culler needs to know about the viewer this frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView {
    /// Line-of-sight rays start here.
    pub camera_position: Vec3,
    /// Near-radius distances are measured from here.
    pub observer_position: Vec3,
    pub frustum: Frustum,
}

impl FrameView {
    /// Snapshot a camera. The observer starts at the camera.
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            camera_position: camera.position,
            observer_position: camera.position,
            frustum: camera.frustum(),
        }
    }

    /// Measure distances from a separate point, e.g. the player behind a
    /// third-person camera.
    #[must_use]
    pub const fn with_observer(mut self, observer: Vec3) -> Self {
        self.observer_position = observer;
        self
    }
}
