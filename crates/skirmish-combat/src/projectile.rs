//! Single projectile state

use crate::element::Element;
use glam::Vec3;
use skirmish_core::EntityId;
use skirmish_physics::BoundingSphere;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    /// Unit vector, fixed at spawn
    pub direction: Vec3,
    pub speed: f32,
    pub damage: f32,
    /// Collision radius
    pub radius: f32,
    /// Area damage radius; 0 means single target
    pub explosion_radius: f32,
    pub element: Element,
    pub owner: Option<EntityId>,
    /// Player projectiles hit enemies, the rest hit the player
    pub is_player_projectile: bool,
    pub max_distance: f32,
    pub distance_traveled: f32,
    pub active: bool,
    pub scale: f32,
    /// Seconds left before expiry, for stationary traps
    pub lifetime: Option<f32>,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::Z,
            speed: 30.0,
            damage: 10.0,
            radius: 0.5,
            explosion_radius: 0.0,
            element: Element::None,
            owner: None,
            is_player_projectile: true,
            max_distance: 100.0,
            distance_traveled: 0.0,
            active: true,
            scale: 1.0,
            lifetime: None,
        }
    }
}

impl Projectile {
    /// Projectile at `start` heading toward `target`. The direction is
    /// normalized once here; a zero-length aim leaves it at rest.
    pub fn aimed(start: Vec3, target: Vec3) -> Self {
        Self {
            position: start,
            direction: (target - start).normalize_or_zero(),
            ..Self::default()
        }
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_explosion(mut self, radius: f32) -> Self {
        self.explosion_radius = radius;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_owner(mut self, owner: Option<EntityId>, is_player_projectile: bool) -> Self {
        self.owner = owner;
        self.is_player_projectile = is_player_projectile;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.lifetime = Some(seconds);
        self
    }

    /// Move along the fixed direction and expire on range or lifetime
    pub fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let step = self.speed * dt;
        self.position += self.direction * step;
        self.distance_traveled += step;
        if self.distance_traveled >= self.max_distance {
            self.active = false;
        }
        if let Some(left) = self.lifetime.as_mut() {
            *left -= dt;
            if *left <= 0.0 {
                self.active = false;
            }
        }
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.radius)
    }
}
