use super::rush::RushCycle;
use super::{AttackBehavior, AttackContext, AttackPhase, IndicatorConfig, IndicatorKind};

/// Charge forward, then strike a cone in front
#[derive(Debug, Clone)]
pub struct RushFrontAttack {
    pub damage: f32,
    pub hit_range: f32,
    /// Full cone angle in degrees
    pub cone_angle: f32,
    cos_half_cone: f32,
    cycle: RushCycle,
}

impl Default for RushFrontAttack {
    fn default() -> Self {
        Self::new(20.0, 18.0, 1.0, 0.2, 0.2, 0.3, 4.0, 90.0)
    }
}

impl RushFrontAttack {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        damage: f32,
        rush_speed: f32,
        rush_duration: f32,
        windup: f32,
        hit_time: f32,
        recovery: f32,
        hit_range: f32,
        cone_angle: f32,
    ) -> Self {
        Self {
            damage,
            hit_range,
            cone_angle,
            cos_half_cone: (cone_angle * 0.5).to_radians().cos(),
            cycle: RushCycle::new(rush_speed, rush_duration, windup, hit_time, recovery),
        }
    }

    /// Target within reach and inside the cone around the current facing
    fn in_cone(&self, ctx: &AttackContext<'_>) -> bool {
        let (Some(distance), Some(to_target)) = (ctx.distance_to_target(), ctx.direction_to_target())
        else {
            return false;
        };
        if distance > self.hit_range {
            tracing::debug!(distance, "rush cone missed: out of range");
            return false;
        }
        let dot = ctx.facing().dot(to_target);
        if dot < self.cos_half_cone {
            tracing::debug!(dot, "rush cone missed: outside cone");
            return false;
        }
        true
    }
}

impl AttackBehavior for RushFrontAttack {
    fn execute(&mut self, ctx: &mut AttackContext<'_>) {
        self.cycle.start(ctx);
    }

    fn update(&mut self, dt: f32, ctx: &mut AttackContext<'_>) {
        if self.cycle.advance(dt, ctx) && self.in_cone(ctx) {
            tracing::debug!(damage = self.damage, "rush cone hit");
            ctx.damage_player(self.damage);
        }
    }

    fn is_finished(&self) -> bool {
        self.cycle.is_finished()
    }

    fn reset(&mut self) {
        self.cycle.reset();
    }

    fn phase(&self) -> AttackPhase {
        self.cycle.phase()
    }

    fn indicator(&self) -> Option<IndicatorConfig> {
        Some(IndicatorConfig {
            kind: IndicatorKind::RushCone,
            hit_radius: self.hit_range,
            rush_distance: self.cycle.rush_distance(),
            cone_angle: self.cone_angle,
        })
    }

    fn name(&self) -> &'static str {
        "rush_front"
    }
}
