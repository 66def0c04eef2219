//! Box collider attached to a game object

use crate::layer::CollisionLayer;
use crate::volume::Obb;
use glam::{Mat4, Vec3};
use skirmish_core::EntityId;

/// A box collider in the owner's local space, plus its world-space OBB as
/// of the last `sync`.
#[derive(Debug, Clone)]
pub struct Collider {
    pub owner: EntityId,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub layer: CollisionLayer,
    pub mask: CollisionLayer,
    pub enabled: bool,
    world_box: Obb,
}

impl Collider {
    /// Unit box (half extents 0.5) at the owner's origin, default mask for the layer
    pub fn new(owner: EntityId, layer: CollisionLayer) -> Self {
        let center = Vec3::ZERO;
        let half_extents = Vec3::splat(0.5);
        Self {
            owner,
            center,
            half_extents,
            layer,
            mask: layer.default_mask(),
            enabled: true,
            world_box: Obb::axis_aligned(center, half_extents),
        }
    }

    pub fn with_box(mut self, center: Vec3, half_extents: Vec3) -> Self {
        self.center = center;
        self.half_extents = half_extents;
        self.world_box = Obb::axis_aligned(center, half_extents);
        self
    }

    pub fn with_mask(mut self, mask: CollisionLayer) -> Self {
        self.mask = mask;
        self
    }

    /// Recompute the world box from the owner's world matrix
    pub fn sync(&mut self, world: &Mat4) {
        self.world_box = Obb::from_local(self.center, self.half_extents, world);
    }

    pub fn world_box(&self) -> &Obb {
        &self.world_box
    }

    /// Both sides must accept the other's layer
    pub fn should_collide_with(&self, other: &Collider) -> bool {
        self.mask.intersects(other.layer) && other.mask.intersects(self.layer)
    }

    pub fn intersects(&self, other: &Collider) -> bool {
        self.world_box.intersects(&other.world_box)
    }
}
