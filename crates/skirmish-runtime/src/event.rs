//! Game events exchanged between systems

use glam::Vec3;
use skirmish_core::EntityId;

/// Events pushed by systems during a tick and routed by the scene afterwards
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A bound input action was pressed this frame
    ActionPressed(String),
    /// Two colliders started overlapping (emitted once per direction)
    CollisionStarted { entity_a: EntityId, entity_b: EntityId },
    /// Two colliders kept overlapping
    CollisionStay { entity_a: EntityId, entity_b: EntityId },
    /// Two colliders stopped overlapping
    CollisionEnded { entity_a: EntityId, entity_b: EntityId },
    /// An enemy attack or enemy projectile connected with the player
    PlayerDamaged { source: Option<EntityId>, amount: f32 },
    /// An enemy lost health but survived
    EnemyDamaged { enemy: EntityId, amount: f32 },
    /// An enemy entered its Dead state
    EnemyKilled { enemy: EntityId },
    /// A skill fired a damage-free visual burst
    SkillBurst { caster: Option<EntityId>, position: Vec3 },
    /// A room started its encounter
    RoomActivated { room: usize },
    /// Every enemy in a room is dead
    RoomCleared { room: usize },
    /// A reward drop appeared in a cleared room
    DropSpawned { room: usize, drop: EntityId },
}
