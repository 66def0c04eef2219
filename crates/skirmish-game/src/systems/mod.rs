//! The per-frame game systems, in the order the scene runs them

mod animation;
mod collision;
mod enemy;
mod player;
mod projectile;
mod room;
mod router;
mod transform;

pub use animation::{AnimationSystem, Skin};
pub use collision::CollisionSystem;
pub use enemy::EnemySystem;
pub use player::{PlayerSystem, AIM_RANGE};
pub use projectile::ProjectileSystem;
pub use room::{RoomSystem, DROP_HEIGHT};
pub use router::EventRouter;
pub use transform::TransformSystem;

use crate::world::GameWorld;
use skirmish_runtime::RuntimeSystem;

/// Player, enemies, projectiles, animation, transforms, collision, event
/// routing, then rooms
pub fn default_systems() -> Vec<Box<dyn RuntimeSystem<GameWorld>>> {
    vec![
        Box::new(PlayerSystem::new()),
        Box::new(EnemySystem::new()),
        Box::new(ProjectileSystem::new()),
        Box::new(AnimationSystem::new()),
        Box::new(TransformSystem::new()),
        Box::new(CollisionSystem::new()),
        Box::new(EventRouter::new()),
        Box::new(RoomSystem::new()),
    ]
}
