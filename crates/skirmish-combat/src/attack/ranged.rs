use super::{AttackBehavior, AttackContext, AttackPhase};
use crate::element::Element;
use crate::projectile::Projectile;
use glam::Vec3;

/// Muzzle height above the attacker's root
const MUZZLE_HEIGHT: f32 = 2.0;
/// Aim height above the target's root
const AIM_HEIGHT: f32 = 1.0;

/// Windup while tracking the target, fire one projectile, recover
#[derive(Debug, Clone)]
pub struct RangedAttack {
    pub damage: f32,
    pub projectile_speed: f32,
    pub windup: f32,
    pub shoot_time: f32,
    pub recovery: f32,
    phase: AttackPhase,
    timer: f32,
    shot_fired: bool,
    finished: bool,
}

impl Default for RangedAttack {
    fn default() -> Self {
        Self::new(10.0, 20.0, 0.5, 0.1, 0.5)
    }
}

impl RangedAttack {
    pub fn new(damage: f32, projectile_speed: f32, windup: f32, shoot_time: f32, recovery: f32) -> Self {
        Self {
            damage,
            projectile_speed,
            windup,
            shoot_time,
            recovery,
            phase: AttackPhase::Windup,
            timer: 0.0,
            shot_fired: false,
            finished: false,
        }
    }

    fn shoot(&self, ctx: &mut AttackContext<'_>) {
        let Some(target) = ctx.target else {
            return;
        };
        let start = ctx.position() + Vec3::Y * MUZZLE_HEIGHT;
        let aim = target + Vec3::Y * AIM_HEIGHT;
        let projectile = Projectile::aimed(start, aim)
            .with_damage(self.damage)
            .with_speed(self.projectile_speed)
            .with_radius(0.5)
            .with_element(Element::None)
            .with_owner(Some(ctx.owner), false)
            .with_scale(0.8);
        if ctx.projectiles.spawn(projectile) {
            tracing::debug!(owner = %ctx.owner, "ranged attack fired");
        }
    }
}

impl AttackBehavior for RangedAttack {
    fn execute(&mut self, ctx: &mut AttackContext<'_>) {
        self.reset();
        ctx.face_target();
    }

    fn update(&mut self, dt: f32, ctx: &mut AttackContext<'_>) {
        if self.finished {
            return;
        }
        self.timer += dt;

        match self.phase {
            AttackPhase::Windup => {
                ctx.face_target();
                if self.timer >= self.windup {
                    self.phase = AttackPhase::Shoot;
                    self.timer = 0.0;
                }
            }
            AttackPhase::Shoot => {
                if !self.shot_fired {
                    self.shot_fired = true;
                    self.shoot(ctx);
                }
                if self.timer >= self.shoot_time {
                    self.phase = AttackPhase::Recovery;
                    self.timer = 0.0;
                }
            }
            _ => {
                if self.timer >= self.recovery {
                    self.finished = true;
                }
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn reset(&mut self) {
        self.phase = AttackPhase::Windup;
        self.timer = 0.0;
        self.shot_fired = false;
        self.finished = false;
    }

    fn phase(&self) -> AttackPhase {
        self.phase
    }

    fn name(&self) -> &'static str {
        "ranged"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::testing::Arena;

    #[test]
    fn fires_exactly_one_enemy_projectile() {
        let mut arena = Arena::new(Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 10.0)));
        let mut ranged = RangedAttack::default();
        arena.run(&mut ranged, 0.05, 1000);

        assert!(ranged.is_finished());
        assert_eq!(arena.projectiles.len(), 1);
        let p = arena.projectiles.iter().next().unwrap();
        assert!(!p.is_player_projectile);
        assert_eq!(p.owner, Some(arena.owner));
        assert_eq!(p.position, Vec3::new(0.0, 2.0, 0.0));
        let expected = (Vec3::new(0.0, 1.0, 10.0) - p.position).normalize();
        assert!((p.direction - expected).length() < 1e-5);
        assert!((p.scale - 0.8).abs() < 1e-6);
    }

    #[test]
    fn no_target_fires_nothing() {
        let mut arena = Arena::new(Vec3::ZERO, None);
        let mut ranged = RangedAttack::default();
        arena.run(&mut ranged, 0.05, 1000);
        assert!(ranged.is_finished());
        assert!(arena.projectiles.is_empty());
    }
}
