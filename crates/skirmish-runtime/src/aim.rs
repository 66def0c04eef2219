//! Cursor unprojection onto the ground plane

use glam::{Mat4, Vec2, Vec3};
use skirmish_core::math::Ray;

/// Camera matrices and viewport needed to turn the cursor into a world ray.
///
/// Projection follows glam's `perspective_rh` convention (depth 0 at the near
/// plane, 1 at the far plane).
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    pub view: Mat4,
    pub projection: Mat4,
    /// Window size in pixels
    pub viewport: Vec2,
}

impl CameraView {
    pub fn new(view: Mat4, projection: Mat4, viewport: Vec2) -> Self {
        Self {
            view,
            projection,
            viewport,
        }
    }

    /// Cursor position in pixels to normalized device coordinates
    pub fn cursor_to_ndc(&self, cursor: (f64, f64)) -> Vec2 {
        let w = self.viewport.x.max(1.0);
        let h = self.viewport.y.max(1.0);
        Vec2::new(
            2.0 * cursor.0 as f32 / w - 1.0,
            1.0 - 2.0 * cursor.1 as f32 / h,
        )
    }

    /// Ray from the near plane through the cursor towards the far plane
    pub fn cursor_ray(&self, cursor: (f64, f64)) -> Ray {
        let ndc = self.cursor_to_ndc(cursor);
        let inverse = (self.projection * self.view).inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// Ground point under the cursor.
    ///
    /// When the ray never reaches `y = 0`, falls back to the point `max_range`
    /// away from `origin` along the ray's flattened direction, or to the
    /// origin's ground position if that direction is degenerate.
    pub fn ground_target(&self, cursor: (f64, f64), origin: Vec3, max_range: f32) -> Vec3 {
        let ray = self.cursor_ray(cursor);
        if let Some(hit) = ray.intersect_ground() {
            return hit;
        }
        let flat = Vec3::new(ray.direction.x, 0.0, ray.direction.z).normalize_or_zero();
        let ground_origin = Vec3::new(origin.x, 0.0, origin.z);
        ground_origin + flat * max_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_down_camera() -> CameraView {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 20.0, 0.01), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.1, 500.0);
        CameraView::new(view, projection, Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn center_of_screen_hits_look_target() {
        let camera = top_down_camera();
        let hit = camera.ground_target((640.0, 360.0), Vec3::ZERO, 50.0);
        assert!(hit.x.abs() < 1e-2, "x = {}", hit.x);
        assert!(hit.z.abs() < 1e-2, "z = {}", hit.z);
        assert_eq!(hit.y, 0.0);
    }

    #[test]
    fn ndc_corners() {
        let camera = top_down_camera();
        let tl = camera.cursor_to_ndc((0.0, 0.0));
        assert!((tl.x + 1.0).abs() < 1e-6 && (tl.y - 1.0).abs() < 1e-6);
        let br = camera.cursor_to_ndc((1280.0, 720.0));
        assert!((br.x - 1.0).abs() < 1e-6 && (br.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn horizon_cursor_falls_back_to_max_range() {
        // Camera looking straight along +Z at ground height never meets y = 0 above the horizon
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 10.0), Vec3::Y);
        let projection = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 500.0);
        let camera = CameraView::new(view, projection, Vec2::new(800.0, 800.0));

        let origin = Vec3::new(2.0, 0.0, 3.0);
        let target = camera.ground_target((400.0, 100.0), origin, 50.0);
        assert!((target - Vec3::new(2.0, 0.0, 53.0)).length() < 1e-2, "{:?}", target);
    }
}
