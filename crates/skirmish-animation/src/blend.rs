//! Bone pose blending

use crate::clip::Keyframe;
use glam::{Quat, Vec3};

/// A bone's local translation, rotation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl BonePose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_keyframe(kf: &Keyframe) -> Self {
        Self {
            translation: kf.position,
            rotation: kf.rotation,
            scale: kf.scale,
        }
    }

    /// Blend toward `other` by `weight` (0 = self, 1 = other).
    /// Rotation uses shortest-path slerp.
    pub fn blend(&self, other: &BonePose, weight: f32) -> BonePose {
        let w = weight.clamp(0.0, 1.0);
        BonePose {
            translation: self.translation.lerp(other.translation, w),
            rotation: self.rotation.slerp(other.rotation, w).normalize(),
            scale: self.scale.lerp(other.scale, w),
        }
    }
}

impl Default for BonePose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        let a = BonePose::IDENTITY;
        let b = BonePose {
            translation: Vec3::new(2.0, 0.0, 0.0),
            rotation: Quat::from_rotation_y(1.0),
            scale: Vec3::splat(3.0),
        };
        let at0 = a.blend(&b, 0.0);
        let at1 = a.blend(&b, 1.0);
        assert!((at0.translation - a.translation).length() < 1e-5);
        assert!((at1.translation - b.translation).length() < 1e-5);
        assert!(at1.rotation.dot(b.rotation).abs() > 0.9999);
    }

    #[test]
    fn blend_halfway_translation_and_scale() {
        let a = BonePose::IDENTITY;
        let b = BonePose {
            translation: Vec3::new(4.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(3.0),
        };
        let mid = a.blend(&b, 0.5);
        assert!((mid.translation.x - 2.0).abs() < 1e-5);
        assert!((mid.scale.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn blend_takes_shortest_arc() {
        let a = BonePose::IDENTITY;
        // Same orientation with flipped sign
        let b = BonePose {
            rotation: -Quat::IDENTITY,
            ..BonePose::IDENTITY
        };
        let mid = a.blend(&b, 0.5);
        assert!(mid.rotation.dot(Quat::IDENTITY).abs() > 0.9999);
    }
}
