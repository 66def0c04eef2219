//! Skirmish Combat
//!
//! - `ProjectileManager`: pooled projectile simulation with single-target
//!   and area damage
//! - `attack`: timed multi-phase enemy attack behaviours
//! - `skill`: player skill slots, activation runes and skill behaviours

pub mod attack;
mod element;
mod projectile;
mod projectile_manager;
pub mod skill;

pub use attack::{
    AttackBehavior, AttackContext, AttackPhase, IndicatorConfig, IndicatorKind, MeleeAttack,
    RangedAttack, RushAoEAttack, RushFrontAttack,
};
pub use element::Element;
pub use projectile::Projectile;
pub use projectile_manager::{
    aoe_falloff, ProjectileConfig, ProjectileImpact, ProjectileManager, ProjectileTargets,
    RenderInstance, TargetInfo, HIT_SPHERE_HEIGHT, HIT_SPHERE_RADIUS,
};
pub use skill::{
    ActivationRune, FireballBehavior, RuneCombo, SkillBehavior, SkillComponent, SkillContext,
    SkillData, SkillInput, SkillSettings, SkillSlot, SkillState,
};
