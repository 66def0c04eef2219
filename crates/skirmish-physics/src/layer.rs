//! Collision layer bit set and default masks

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        const PLAYER = 1 << 0;
        const ENEMY = 1 << 1;
        const PLAYER_BULLET = 1 << 2;
        const ENEMY_BULLET = 1 << 3;
        const WALL = 1 << 4;
        const PICKUP = 1 << 5;
        const TRIGGER = 1 << 6;
    }
}

impl CollisionLayer {
    /// Layers this layer collides with when no explicit mask is given
    pub fn default_mask(self) -> CollisionLayer {
        let mut mask = CollisionLayer::empty();
        if self.contains(Self::PLAYER) {
            mask |= Self::ENEMY | Self::ENEMY_BULLET | Self::WALL | Self::PICKUP | Self::TRIGGER;
        }
        if self.contains(Self::ENEMY) {
            // Enemy-enemy contact is kept for pushing apart
            mask |= Self::PLAYER | Self::PLAYER_BULLET | Self::WALL | Self::ENEMY;
        }
        if self.contains(Self::PLAYER_BULLET) {
            mask |= Self::ENEMY | Self::WALL;
        }
        if self.contains(Self::ENEMY_BULLET) {
            mask |= Self::PLAYER | Self::WALL;
        }
        if self.contains(Self::WALL) {
            mask |= Self::PLAYER | Self::ENEMY | Self::PLAYER_BULLET | Self::ENEMY_BULLET;
        }
        if self.intersects(Self::PICKUP | Self::TRIGGER) {
            mask |= Self::PLAYER;
        }
        mask
    }
}
