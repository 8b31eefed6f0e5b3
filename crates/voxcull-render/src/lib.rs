//! Camera and view management for the voxcull engine.
//!
//! The camera is the only render-side state the entity culler needs: a
//! world-space eye position and the view-projection it derives its frustum
//! from once per frame.

pub mod camera;

pub use camera::Camera;
