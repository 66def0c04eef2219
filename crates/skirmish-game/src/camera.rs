//! Third-person orbit camera that follows the player

use glam::{Mat4, Vec2, Vec3};
use skirmish_runtime::CameraView;

const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 20.0;

/// Orbit camera around a followed point.
///
/// Yaw 0 puts the eye on the +Z side of the target, so the camera looks
/// toward -Z and "forward" for movement is -Z.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Point being followed, before the look-at offset
    pub target: Vec3,
    pub look_at_offset: Vec3,
    pub distance: f32,
    /// Horizontal angle in radians
    pub yaw: f32,
    /// Elevation in radians
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            look_at_offset: Vec3::Y,
            distance: 10.0,
            yaw: 0.0,
            pitch: 20f32.to_radians(),
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Move closer for positive `delta`, clamped to the orbit limits
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn look_at(&self) -> Vec3 {
        self.target + self.look_at_offset
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.look_at()
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.look_at(), Vec3::Y)
    }

    pub fn projection(&self, viewport: Vec2) -> Mat4 {
        let aspect = viewport.x.max(1.0) / viewport.y.max(1.0);
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far)
    }

    pub fn camera_view(&self, viewport: Vec2) -> CameraView {
        CameraView::new(self.view(), self.projection(viewport), viewport)
    }

    /// Viewing direction flattened onto the ground
    pub fn forward_flat(&self) -> Vec3 {
        let forward = self.look_at() - self.eye();
        Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero()
    }

    pub fn right_flat(&self) -> Vec3 {
        self.forward_flat().cross(Vec3::Y).normalize_or_zero()
    }

    /// Pixel position at which `world` appears on screen
    pub fn cursor_for(&self, world: Vec3, viewport: Vec2) -> (f64, f64) {
        let ndc = (self.projection(viewport) * self.view()).project_point3(world);
        (
            ((ndc.x + 1.0) * 0.5 * viewport.x) as f64,
            ((1.0 - ndc.y) * 0.5 * viewport.y) as f64,
        )
    }
}
