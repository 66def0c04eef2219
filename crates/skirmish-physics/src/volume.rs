//! Bounding volumes and intersection tests

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const SAT_EPSILON: f32 = 1e-6;

/// Axis-aligned box, used for room bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Inclusive on every face
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }

    pub fn intersects_obb(&self, obb: &Obb) -> bool {
        obb.closest_point(self.center).distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Oriented box: centre, unit axes and half extents along each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    pub center: Vec3,
    pub axes: [Vec3; 3],
    pub half_extents: Vec3,
}

impl Obb {
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
            half_extents,
        }
    }

    /// Transform a local axis-aligned box by a world matrix.
    /// Scale along each basis column stretches the matching extent.
    pub fn from_local(center: Vec3, half_extents: Vec3, world: &Mat4) -> Self {
        let cols = [world.x_axis.truncate(), world.y_axis.truncate(), world.z_axis.truncate()];
        let mut axes = [Vec3::X, Vec3::Y, Vec3::Z];
        let mut extents = half_extents;
        for i in 0..3 {
            let len = cols[i].length();
            if len > SAT_EPSILON {
                axes[i] = cols[i] / len;
            }
            extents[i] *= len;
        }
        Self {
            center: world.transform_point3(center),
            axes,
            half_extents: extents,
        }
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let d = point - self.center;
        let mut result = self.center;
        for i in 0..3 {
            let dist = d.dot(self.axes[i]).clamp(-self.half_extents[i], self.half_extents[i]);
            result += self.axes[i] * dist;
        }
        result
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let d = point - self.center;
        (0..3).all(|i| d.dot(self.axes[i]).abs() <= self.half_extents[i] + SAT_EPSILON)
    }

    /// Separating-axis test over the 15 candidate axes
    pub fn intersects(&self, other: &Obb) -> bool {
        let a = self;
        let b = other;

        // Rotation of b expressed in a's frame
        let mut r = [[0.0f32; 3]; 3];
        let mut abs_r = [[0.0f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                r[i][j] = a.axes[i].dot(b.axes[j]);
                abs_r[i][j] = r[i][j].abs() + SAT_EPSILON;
            }
        }

        let d = b.center - a.center;
        let t = [d.dot(a.axes[0]), d.dot(a.axes[1]), d.dot(a.axes[2])];
        let ea = a.half_extents;
        let eb = b.half_extents;

        for i in 0..3 {
            let ra = ea[i];
            let rb = eb[0] * abs_r[i][0] + eb[1] * abs_r[i][1] + eb[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        for j in 0..3 {
            let ra = ea[0] * abs_r[0][j] + ea[1] * abs_r[1][j] + ea[2] * abs_r[2][j];
            let rb = eb[j];
            let proj = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
            if proj.abs() > ra + rb {
                return false;
            }
        }

        // Cross products a_i x b_j
        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;
            for j in 0..3 {
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;
                let ra = ea[i1] * abs_r[i2][j] + ea[i2] * abs_r[i1][j];
                let rb = eb[j1] * abs_r[i][j2] + eb[j2] * abs_r[i][j1];
                let proj = t[i2] * r[i1][j] - t[i1] * r[i2][j];
                if proj.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn aabb_contains_is_inclusive() {
        let room = Aabb::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 5.0, 10.0));
        assert!(room.contains(Vec3::new(10.0, 0.0, -10.0)));
        assert!(!room.contains(Vec3::new(10.01, 1.0, 0.0)));
        assert_eq!(room.center(), Vec3::new(0.0, 2.5, 0.0));
    }

    #[test]
    fn aabb_new_orders_corners() {
        let b = Aabb::new(Vec3::splat(1.0), Vec3::splat(-1.0));
        assert_eq!(b.min, Vec3::splat(-1.0));
        assert!(b.intersects(&Aabb::new(Vec3::ZERO, Vec3::splat(3.0))));
    }

    #[test]
    fn spheres_touching_intersect() {
        let a = BoundingSphere::new(Vec3::ZERO, 1.0);
        let b = BoundingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let c = BoundingSphere::new(Vec3::new(2.1, 0.0, 0.0), 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn aligned_boxes_separate_on_face_axis() {
        let a = Obb::axis_aligned(Vec3::ZERO, Vec3::splat(0.5));
        let b = Obb::axis_aligned(Vec3::new(0.9, 0.0, 0.0), Vec3::splat(0.5));
        let c = Obb::axis_aligned(Vec3::new(1.1, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn rotated_box_reaches_further_on_diagonal() {
        let a = Obb::axis_aligned(Vec3::ZERO, Vec3::splat(0.5));
        // Unit cube rotated 45 degrees about Y reaches ~0.707 along X
        let world = Mat4::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
            Vec3::new(1.15, 0.0, 0.0),
        );
        let b = Obb::from_local(Vec3::ZERO, Vec3::splat(0.5), &world);
        assert!(a.intersects(&b));

        let world_far = Mat4::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
            Vec3::new(1.25, 0.0, 0.0),
        );
        let c = Obb::from_local(Vec3::ZERO, Vec3::splat(0.5), &world_far);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn tilted_bar_above_bar_is_separate() {
        let a = Obb {
            center: Vec3::ZERO,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
            half_extents: Vec3::new(2.0, 0.1, 0.1),
        };
        let rot = Quat::from_rotation_x(std::f32::consts::FRAC_PI_4);
        let b = Obb {
            center: Vec3::new(0.0, 0.3, 0.3),
            axes: [rot * Vec3::X, rot * Vec3::Y, rot * Vec3::Z],
            half_extents: Vec3::new(2.0, 0.1, 0.1),
        };
        assert!(!a.intersects(&b));
    }

    #[test]
    fn from_local_applies_scale_and_centre() {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 1.0),
            Quat::IDENTITY,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let obb = Obb::from_local(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.5), &world);
        assert!((obb.center - Vec3::new(10.0, 3.0, 0.0)).length() < 1e-5);
        assert!((obb.half_extents - Vec3::new(1.0, 1.5, 0.5)).length() < 1e-5);
        assert!(obb.contains(Vec3::new(10.9, 4.4, 0.0)));
    }

    #[test]
    fn sphere_against_box() {
        let obb = Obb::axis_aligned(Vec3::ZERO, Vec3::splat(1.0));
        assert!(BoundingSphere::new(Vec3::new(1.4, 0.0, 0.0), 0.5).intersects_obb(&obb));
        assert!(!BoundingSphere::new(Vec3::new(1.6, 1.6, 0.0), 0.5).intersects_obb(&obb));
    }
}
