//! Ground-plane math helpers
//!
//! Gameplay distances and directions are measured on the XZ plane; height
//! only matters for hit spheres and spawn offsets.

use glam::Vec3;

/// Directions shorter than this are treated as zero.
pub const DIRECTION_EPSILON: f32 = 0.0001;

/// Distance on the XZ plane, ignoring height.
pub fn distance_2d(a: Vec3, b: Vec3) -> f32 {
    distance_sq_2d(a, b).sqrt()
}

/// Squared distance on the XZ plane.
pub fn distance_sq_2d(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Normalized XZ direction from `from` to `to`, with `y = 0`.
///
/// Returns `Vec3::ZERO` when the points coincide on the plane.
pub fn direction_2d(from: Vec3, to: Vec3) -> Vec3 {
    normalize_2d(to.x - from.x, to.z - from.z)
}

/// Normalize an XZ vector, returning zero for degenerate input.
pub fn normalize_2d(dx: f32, dz: f32) -> Vec3 {
    let length = (dx * dx + dz * dz).sqrt();
    if length < DIRECTION_EPSILON {
        return Vec3::ZERO;
    }
    Vec3::new(dx / length, 0.0, dz / length)
}

/// Yaw in degrees that turns +Z towards `to` when standing at `from`.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f32> {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx * dx + dz * dz < DIRECTION_EPSILON * DIRECTION_EPSILON {
        return None;
    }
    Some(dx.atan2(dz).to_degrees())
}

/// Unit forward vector on the XZ plane for a yaw in degrees.
pub fn forward_from_yaw(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the ground plane `y = 0`.
    ///
    /// `None` when the ray is parallel to the plane or points away from it.
    pub fn intersect_ground(&self) -> Option<Vec3> {
        if self.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = -self.origin.y / self.direction.y;
        if t < 0.0 {
            return None;
        }
        let mut hit = self.at(t);
        hit.y = 0.0;
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_2d_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -4.0, 4.0);
        assert!((distance_2d(a, b) - 5.0).abs() < 1e-5);
        assert!((distance_sq_2d(a, b) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn direction_2d_is_flat_and_unit() {
        let d = direction_2d(Vec3::ZERO, Vec3::new(2.0, 7.0, 2.0));
        assert_eq!(d.y, 0.0);
        assert!((d.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn direction_2d_degenerate_is_zero() {
        let d = direction_2d(Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 5.0, 1.0));
        assert_eq!(d, Vec3::ZERO);
    }

    #[test]
    fn yaw_points_forward_along_target() {
        let yaw = yaw_towards(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((yaw - 90.0).abs() < 1e-4);

        let forward = forward_from_yaw(yaw);
        assert!((forward.x - 1.0).abs() < 1e-5);
        assert!(forward.z.abs() < 1e-5);
    }

    #[test]
    fn ray_hits_ground_below() {
        let ray = Ray::new(Vec3::new(2.0, 10.0, 3.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = ray.intersect_ground().unwrap();
        assert!((hit - Vec3::new(2.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn parallel_ray_misses_ground() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(ray.intersect_ground().is_none());

        let upward = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(upward.intersect_ground().is_none());
    }
}
