//! Enemy attack behaviours
//!
//! Each behaviour is a small timed state machine driven by the enemy's AI.
//! `execute` starts a cycle, `update` advances it, and a behaviour deals
//! its damage at most once per cycle no matter how ticks fall across the
//! hit window.

mod melee;
mod ranged;
mod rush;
mod rush_aoe;
mod rush_front;

pub use melee::MeleeAttack;
pub use ranged::RangedAttack;
pub use rush_aoe::RushAoEAttack;
pub use rush_front::RushFrontAttack;

use crate::projectile_manager::ProjectileManager;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use skirmish_core::math::{direction_2d, distance_2d, yaw_towards};
use skirmish_core::{EntityId, NodeId, TransformGraph};
use skirmish_runtime::{EventBus, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    Rush,
    Windup,
    Hit,
    Shoot,
    Recovery,
}

/// Telegraph shape drawn while an attack is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Circle,
    RushCircle,
    RushCone,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub kind: IndicatorKind,
    pub hit_radius: f32,
    #[serde(default)]
    pub rush_distance: f32,
    /// Full cone angle in degrees
    #[serde(default)]
    pub cone_angle: f32,
}

impl IndicatorConfig {
    pub fn circle(hit_radius: f32) -> Self {
        Self {
            kind: IndicatorKind::Circle,
            hit_radius,
            rush_distance: 0.0,
            cone_angle: 0.0,
        }
    }
}

/// The attacker's view of the world for one tick.
///
/// The attacker is a root node, so its local position is its world position.
pub struct AttackContext<'a> {
    pub graph: &'a mut TransformGraph,
    pub node: NodeId,
    pub owner: EntityId,
    /// Target root position, if the attacker has one
    pub target: Option<Vec3>,
    pub projectiles: &'a mut ProjectileManager,
    pub events: &'a mut EventBus,
}

impl AttackContext<'_> {
    pub fn position(&self) -> Vec3 {
        self.graph.position(self.node).unwrap_or(Vec3::ZERO)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.graph.set_position(self.node, position);
    }

    /// XZ-plane distance to the target
    pub fn distance_to_target(&self) -> Option<f32> {
        self.target.map(|t| distance_2d(self.position(), t))
    }

    /// Unit XZ direction to the target, zero when on top of it
    pub fn direction_to_target(&self) -> Option<Vec3> {
        self.target.map(|t| direction_2d(self.position(), t))
    }

    /// Turn to face the target on the XZ plane
    pub fn face_target(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        if let Some(yaw) = yaw_towards(self.position(), target) {
            self.graph.set_yaw(self.node, yaw);
        }
    }

    /// Current forward direction flattened onto the XZ plane
    pub fn facing(&self) -> Vec3 {
        let look = self.graph.local_look(self.node).unwrap_or(Vec3::Z);
        Vec3::new(look.x, 0.0, look.z).normalize_or_zero()
    }

    /// Report damage to the player
    pub fn damage_player(&mut self, amount: f32) {
        self.events.push(GameEvent::PlayerDamaged {
            source: Some(self.owner),
            amount,
        });
    }
}

pub trait AttackBehavior: Send + Sync {
    /// Start a new cycle from the first phase
    fn execute(&mut self, ctx: &mut AttackContext<'_>);

    fn update(&mut self, dt: f32, ctx: &mut AttackContext<'_>);

    fn is_finished(&self) -> bool;

    /// Return to the initial phase for reuse
    fn reset(&mut self);

    fn phase(&self) -> AttackPhase;

    /// Telegraph to show while attacking, if any
    fn indicator(&self) -> Option<IndicatorConfig> {
        None
    }

    fn name(&self) -> &'static str;
}
