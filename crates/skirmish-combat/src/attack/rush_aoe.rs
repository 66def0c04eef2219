use super::rush::RushCycle;
use super::{AttackBehavior, AttackContext, AttackPhase, IndicatorConfig, IndicatorKind};

/// Charge forward, then strike everything within a radius
#[derive(Debug, Clone)]
pub struct RushAoEAttack {
    pub damage: f32,
    pub aoe_radius: f32,
    cycle: RushCycle,
}

impl Default for RushAoEAttack {
    fn default() -> Self {
        Self::new(15.0, 15.0, 0.5, 0.3, 0.2, 0.3, 5.0)
    }
}

impl RushAoEAttack {
    pub fn new(
        damage: f32,
        rush_speed: f32,
        rush_duration: f32,
        windup: f32,
        hit_time: f32,
        recovery: f32,
        aoe_radius: f32,
    ) -> Self {
        Self {
            damage,
            aoe_radius,
            cycle: RushCycle::new(rush_speed, rush_duration, windup, hit_time, recovery),
        }
    }
}

impl AttackBehavior for RushAoEAttack {
    fn execute(&mut self, ctx: &mut AttackContext<'_>) {
        self.cycle.start(ctx);
    }

    fn update(&mut self, dt: f32, ctx: &mut AttackContext<'_>) {
        if !self.cycle.advance(dt, ctx) {
            return;
        }
        match ctx.distance_to_target() {
            Some(d) if d <= self.aoe_radius => {
                tracing::debug!(damage = self.damage, distance = d, "rush aoe hit");
                ctx.damage_player(self.damage);
            }
            Some(d) => tracing::debug!(distance = d, "rush aoe missed"),
            None => {}
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
            kind: IndicatorKind::RushCircle,
            hit_radius: self.aoe_radius,
            rush_distance: self.cycle.rush_distance(),
            cone_angle: 0.0,
        })
    }

    fn name(&self) -> &'static str {
        "rush_aoe"
    }
}
