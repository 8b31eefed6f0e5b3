//! Bounding volumes and view-frustum tests.

use glam::{Mat4, Vec3, Vec4};

/// Box spanning `min..=max` on every axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of one voxel cell whose lowest corner is `corner`.
    #[inline]
    pub fn cell(corner: Vec3) -> Self {
        Self::new(corner, corner + Vec3::ONE)
    }
}

/// Bounding sphere.
///
/// The entity culler keeps one of these as scratch and moves its center onto
/// each entity in turn, so the radius is fixed for a whole frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    #[inline]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Move the sphere without touching its radius.
    #[inline]
    pub fn recenter(&mut self, center: Vec3) -> &Self {
        self.center = center;
        self
    }
}

/// View volume bounded by six inward-facing planes, ordered left, right,
/// bottom, top, near, far.
///
/// Each plane is stored as `(nx, ny, nz, d)` with a unit normal, so
/// `n . p + d` is the signed distance of `p` in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Planes of a glam right-handed view-projection (depth in `[0, 1]`).
    pub fn from_view_projection(view_projection: Mat4) -> Self {
        let [x, y, z, w] = [0, 1, 2, 3].map(|i| view_projection.row(i));
        Self {
            planes: [w + x, w - x, w + y, w - y, z, w - z].map(unit_plane),
        }
    }

    /// True unless the sphere lies entirely outside some plane.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.planes
            .iter()
            .all(|&plane| plane_distance(plane, sphere.center) >= -sphere.radius)
    }

    /// True unless the box lies entirely outside some plane.
    pub fn test_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|&plane| {
            // Corner furthest along the plane normal.
            let corner = Vec3::select(plane.truncate().cmpge(Vec3::ZERO), aabb.max, aabb.min);
            plane_distance(plane, corner) >= 0.0
        })
    }
}

#[inline]
fn plane_distance(plane: Vec4, point: Vec3) -> f32 {
    plane.truncate().dot(point) + plane.w
}

fn unit_plane(plane: Vec4) -> Vec4 {
    let len = plane.truncate().length();
    if len > f32::EPSILON {
        plane / len
    } else {
        plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn looking_down_neg_z() -> Frustum {
        let eye = Vec3::new(0.0, 1.6, 0.0);
        let view = Mat4::look_to_rh(eye, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(75f32.to_radians(), 1.0, 0.1, 1000.0);
        Frustum::from_view_projection(proj * view)
    }

    #[test]
    fn cell_box_bounds() {
        let cell = Aabb::cell(Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(cell.min, Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(cell.max, Vec3::new(0.0, 1.0, 3.0));
    }

    #[test]
    fn planes_have_unit_normals() {
        for plane in looking_down_neg_z().planes {
            assert_relative_eq!(plane.truncate().length(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn near_plane_sits_at_near_distance() {
        let [.., near, far] = looking_down_neg_z().planes;
        let d = plane_distance(near, Vec3::new(0.0, 1.6, -0.1));
        assert_relative_eq!(d, 0.0, epsilon = 1e-3);
        assert!(plane_distance(far, Vec3::new(0.0, 1.6, -900.0)) > 0.0);
        assert!(plane_distance(far, Vec3::new(0.0, 1.6, -1100.0)) < 0.0);
    }

    #[test]
    fn sphere_ahead_is_inside_and_behind_is_outside() {
        let frustum = looking_down_neg_z();
        let mut sphere = Sphere::new(Vec3::ZERO, 2.0);

        assert!(frustum.intersects_sphere(sphere.recenter(Vec3::new(0.0, 1.6, -5.0))));
        assert!(!frustum.intersects_sphere(sphere.recenter(Vec3::new(0.0, 1.6, 5.0))));
        assert!(!frustum.intersects_sphere(sphere.recenter(Vec3::new(0.0, 1.6, -2000.0))));
    }

    #[test]
    fn sphere_radius_reaches_across_a_plane() {
        let frustum = looking_down_neg_z();
        assert!(frustum.intersects_sphere(&Sphere::new(Vec3::new(0.0, 1.6, 0.5), 2.0)));
        assert!(!frustum.intersects_sphere(&Sphere::new(Vec3::new(0.0, 1.6, 0.5), 0.01)));
    }

    #[test]
    fn box_test() {
        let frustum = looking_down_neg_z();
        assert!(frustum.test_aabb(&Aabb::cell(Vec3::new(0.0, 1.0, -10.0))));
        assert!(!frustum.test_aabb(&Aabb::cell(Vec3::new(0.0, 1.0, 10.0))));
        // Straddles the left plane.
        assert!(frustum.test_aabb(&Aabb::new(
            Vec3::new(-100.0, 0.0, -20.0),
            Vec3::new(0.0, 2.0, -19.0)
        )));
    }
}
