//! Plain-data components attached to every creature.

use glam::Vec3;

/// Transform component.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: glam::Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: glam::Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform placed at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// Physical state the scheduler reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Resting on a surface rather than falling or flying.
    pub on_ground: bool,
    /// Vertical extent in world units.
    pub height: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            on_ground: true,
            height: 1.0,
        }
    }
}

impl Body {
    /// Middle of the body, given the feet position.
    ///
    /// Non-positive or non-finite heights fall back to `default_height`.
    #[inline]
    pub fn visual_center(&self, feet: Vec3, default_height: f32) -> Vec3 {
        let height = if self.height.is_finite() && self.height > 0.0 {
            self.height
        } else {
            default_height
        };
        feet + Vec3::Y * (height * 0.5)
    }
}

/// Handle the renderer reads to decide whether to draw the creature's mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHandle {
    pub visible: bool,
}

impl Default for RenderHandle {
    fn default() -> Self {
        Self { visible: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_center_is_half_height_above_feet() {
        let body = Body {
            on_ground: true,
            height: 2.0,
        };
        assert_eq!(body.visual_center(Vec3::new(1.0, 3.0, -2.0), 1.0), Vec3::new(1.0, 4.0, -2.0));
    }

    #[test]
    fn invalid_height_uses_default() {
        for height in [0.0, -1.0, f32::NAN] {
            let body = Body {
                on_ground: false,
                height,
            };
            assert_eq!(body.visual_center(Vec3::ZERO, 1.0), Vec3::new(0.0, 0.5, 0.0));
        }
    }
}
