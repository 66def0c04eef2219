use super::data::SkillData;
use crate::projectile_manager::ProjectileManager;
use glam::Vec3;
use skirmish_core::EntityId;
use skirmish_runtime::EventBus;

/// What a skill can touch when it fires
pub struct SkillContext<'a> {
    pub caster: Option<EntityId>,
    pub caster_position: Vec3,
    pub projectiles: &'a mut ProjectileManager,
    pub events: &'a mut EventBus,
}

/// A castable skill.
///
/// `multiplier` carries both magnitude and mode: negative places a
/// stationary trap, zero is a damage-free visual burst, and larger positive
/// values select stronger tiers.
pub trait SkillBehavior: Send + Sync {
    fn execute(&mut self, ctx: &mut SkillContext<'_>, target: Vec3, multiplier: f32);

    fn update(&mut self, dt: f32);

    fn is_finished(&self) -> bool;

    fn reset(&mut self);

    fn data(&self) -> &SkillData;
}
