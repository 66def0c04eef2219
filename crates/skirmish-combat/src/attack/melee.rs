use super::{AttackBehavior, AttackContext, AttackPhase, IndicatorConfig};

/// Windup, then a single range-checked strike, then recovery.
///
/// Phases are measured from one timer. The strike lands on the first tick
/// at or past the end of windup, even if that tick also overshoots the hit
/// window, so every cycle resolves its strike exactly once.
#[derive(Debug, Clone)]
pub struct MeleeAttack {
    pub damage: f32,
    pub windup: f32,
    pub hit_time: f32,
    pub recovery: f32,
    /// Reach checked when the strike lands
    pub hit_range: f32,
    indicator: Option<IndicatorConfig>,
    timer: f32,
    hit_dealt: bool,
    finished: bool,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self::new(10.0, 0.3, 0.5, 0.2)
    }
}

impl MeleeAttack {
    pub fn new(damage: f32, windup: f32, hit_time: f32, recovery: f32) -> Self {
        Self {
            damage,
            windup,
            hit_time,
            recovery,
            hit_range: 3.0,
            indicator: None,
            timer: 0.0,
            hit_dealt: false,
            finished: false,
        }
    }

    pub fn with_hit_range(mut self, range: f32) -> Self {
        self.hit_range = range;
        self
    }

    pub fn with_indicator(mut self, indicator: IndicatorConfig) -> Self {
        self.indicator = Some(indicator);
        self
    }

    fn total(&self) -> f32 {
        self.windup + self.hit_time + self.recovery
    }

    fn strike(&self, ctx: &mut AttackContext<'_>) {
        let Some(distance) = ctx.distance_to_target() else {
            return;
        };
        if distance > self.hit_range {
            tracing::debug!(distance, range = self.hit_range, "melee strike missed");
            return;
        }
        tracing::debug!(damage = self.damage, "melee strike hit");
        ctx.damage_player(self.damage);
    }
}

impl AttackBehavior for MeleeAttack {
    fn execute(&mut self, ctx: &mut AttackContext<'_>) {
        self.reset();
        ctx.face_target();
    }

    fn update(&mut self, dt: f32, ctx: &mut AttackContext<'_>) {
        if self.finished {
            return;
        }
        self.timer += dt;

        if !self.hit_dealt && self.timer >= self.windup {
            self.hit_dealt = true;
            self.strike(ctx);
        }
        if self.timer >= self.total() {
            self.finished = true;
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn reset(&mut self) {
        self.timer = 0.0;
        self.hit_dealt = false;
        self.finished = false;
    }

    fn phase(&self) -> AttackPhase {
        if self.timer < self.windup {
            AttackPhase::Windup
        } else if self.timer < self.windup + self.hit_time {
            AttackPhase::Hit
        } else {
            AttackPhase::Recovery
        }
    }

    fn indicator(&self) -> Option<IndicatorConfig> {
        self.indicator
    }

    fn name(&self) -> &'static str {
        "melee"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::testing::Arena;
    use glam::Vec3;

    #[test]
    fn damage_applied_once_per_cycle() {
        for dt in [0.001, 0.016, 0.05, 0.25, 2.0] {
            let mut arena = Arena::new(Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 2.0)));
            let mut melee = MeleeAttack::default();
            arena.run(&mut melee, dt, 10_000);
            assert!(melee.is_finished());
            assert_eq!(arena.player_damage(), vec![10.0], "dt = {dt}");
        }
    }

    #[test]
    fn second_cycle_strikes_again() {
        let mut arena = Arena::new(Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 2.0)));
        let mut melee = MeleeAttack::default();
        arena.run(&mut melee, 0.1, 100);
        arena.run(&mut melee, 0.1, 100);
        assert_eq!(arena.player_damage().len(), 2);
    }

    #[test]
    fn range_checked_at_strike_time() {
        let mut arena = Arena::new(Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 2.0)));
        let mut melee = MeleeAttack::default();
        melee.execute(&mut arena.ctx());
        // Target steps out of reach during windup
        arena.target = Some(Vec3::new(0.0, 0.0, 8.0));
        for _ in 0..20 {
            melee.update(0.1, &mut arena.ctx());
        }
        assert!(melee.is_finished());
        assert!(arena.player_damage().is_empty());
    }

    #[test]
    fn phases_follow_timer() {
        let mut arena = Arena::new(Vec3::ZERO, None);
        let mut melee = MeleeAttack::default();
        melee.execute(&mut arena.ctx());
        assert_eq!(melee.phase(), AttackPhase::Windup);
        melee.update(0.35, &mut arena.ctx());
        assert_eq!(melee.phase(), AttackPhase::Hit);
        melee.update(0.5, &mut arena.ctx());
        assert_eq!(melee.phase(), AttackPhase::Recovery);
        assert!(!melee.is_finished());
        melee.update(0.2, &mut arena.ctx());
        assert!(melee.is_finished());
    }
}
