use super::behavior::{SkillBehavior, SkillContext};
use super::data::SkillData;
use crate::projectile::Projectile;
use glam::Vec3;
use skirmish_runtime::GameEvent;

/// Launch height above the caster's root
const LAUNCH_HEIGHT: f32 = 1.5;
/// Seconds a placed trap stays armed
const TRAP_LIFETIME: f32 = 8.0;

/// Fires one projectile per cast, shaped by the multiplier tier
#[derive(Debug, Clone)]
pub struct FireballBehavior {
    data: SkillData,
    finished: bool,
}

impl Default for FireballBehavior {
    fn default() -> Self {
        Self::new(SkillData::fireball())
    }
}

impl FireballBehavior {
    pub fn new(data: SkillData) -> Self {
        Self {
            data,
            finished: true,
        }
    }

    /// Build the projectile for a multiplier, or `None` for the visual-only cast
    pub fn projectile_for(&self, origin: Vec3, target: Vec3, multiplier: f32) -> Option<Projectile> {
        let base = self.data.damage;
        let r = self.data.radius;

        if multiplier < 0.0 {
            return Some(
                Projectile::aimed(target, target)
                    .with_speed(0.0)
                    .with_radius(1.5)
                    .with_explosion(r)
                    .with_damage(base * multiplier.abs())
                    .with_lifetime(TRAP_LIFETIME),
            );
        }
        if multiplier == 0.0 {
            return None;
        }

        let (speed, radius, explosion, scale) = if multiplier < 0.5 {
            (45.0, 0.3, 0.0, 0.5)
        } else if multiplier < 1.5 {
            (30.0, 0.5, r, 1.0)
        } else if multiplier < 2.5 {
            (24.0, 0.8, r * 1.5, 1.6)
        } else {
            (18.0, 1.2, r * 2.0, 2.2)
        };
        Some(
            Projectile::aimed(origin + Vec3::Y * LAUNCH_HEIGHT, target)
                .with_speed(speed)
                .with_radius(radius)
                .with_explosion(explosion)
                .with_scale(scale)
                .with_damage(base * multiplier),
        )
    }
}

impl SkillBehavior for FireballBehavior {
    fn execute(&mut self, ctx: &mut SkillContext<'_>, target: Vec3, multiplier: f32) {
        self.finished = false;

        match self.projectile_for(ctx.caster_position, target, multiplier) {
            Some(projectile) => {
                let projectile = projectile
                    .with_element(self.data.element)
                    .with_owner(ctx.caster, true);
                tracing::debug!(
                    skill = %self.data.name,
                    multiplier,
                    damage = projectile.damage,
                    "skill cast"
                );
                ctx.projectiles.spawn(projectile);
            }
            None => ctx.events.push(GameEvent::SkillBurst {
                caster: ctx.caster,
                position: target,
            }),
        }

        // The projectile carries the rest of the effect
        self.finished = true;
    }

    fn update(&mut self, _dt: f32) {}

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn reset(&mut self) {
        self.finished = true;
    }

    fn data(&self) -> &SkillData {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile_manager::{ProjectileConfig, ProjectileManager};
    use skirmish_runtime::EventBus;

    fn cast(multiplier: f32) -> (ProjectileManager, EventBus) {
        let mut projectiles = ProjectileManager::new(ProjectileConfig::default());
        let mut events = EventBus::new();
        let mut fireball = FireballBehavior::default();
        let mut ctx = SkillContext {
            caster: None,
            caster_position: Vec3::ZERO,
            projectiles: &mut projectiles,
            events: &mut events,
        };
        fireball.execute(&mut ctx, Vec3::new(0.0, 0.0, 10.0), multiplier);
        assert!(fireball.is_finished());
        (projectiles, events)
    }

    #[test]
    fn tiers_by_multiplier() {
        let table = [
            (0.3, 45.0, 0.3, 0.0, 0.5),
            (1.0, 30.0, 0.5, 3.0, 1.0),
            (2.0, 24.0, 0.8, 4.5, 1.6),
            (3.0, 18.0, 1.2, 6.0, 2.2),
        ];
        for (m, speed, radius, explosion, scale) in table {
            let (projectiles, _) = cast(m);
            let p = projectiles.iter().next().unwrap();
            assert_eq!(p.speed, speed, "m = {m}");
            assert_eq!(p.radius, radius);
            assert!((p.explosion_radius - explosion).abs() < 1e-5);
            assert_eq!(p.scale, scale);
            assert!((p.damage - 30.0 * m).abs() < 1e-4);
            assert_eq!(p.position, Vec3::new(0.0, 1.5, 0.0));
            assert!(p.is_player_projectile);
        }
    }

    #[test]
    fn negative_multiplier_places_trap_at_target() {
        let (projectiles, _) = cast(-1.5);
        let p = projectiles.iter().next().unwrap();
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.position, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(p.radius, 1.5);
        assert_eq!(p.explosion_radius, 3.0);
        assert_eq!(p.lifetime, Some(8.0));
        assert!((p.damage - 45.0).abs() < 1e-4);
    }

    #[test]
    fn zero_multiplier_is_visual_only() {
        let (projectiles, events) = cast(0.0);
        assert!(projectiles.is_empty());
        assert!(matches!(events.pending(), [GameEvent::SkillBurst { .. }]));
    }
}
