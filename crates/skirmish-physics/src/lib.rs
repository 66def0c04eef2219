//! Skirmish Physics - collision detection without a dynamics solver
//!
//! Colliders are oriented boxes tracked by the owning object's id. The
//! `CollisionManager` tests every unique pair each tick and reports
//! Enter/Stay/Exit transitions by diffing against the previous tick.

mod collider;
mod layer;
mod manager;
mod volume;

pub use collider::Collider;
pub use layer::CollisionLayer;
pub use manager::{ColliderScope, CollisionEvent, CollisionManager, CollisionPhase};
pub use volume::{Aabb, BoundingSphere, Obb};
