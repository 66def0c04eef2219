use crate::stats::{EnemyAnimationConfig, EnemyStats, DEAD_LINGER_TIME, STAGGER_DURATION};
use glam::Vec3;
use skirmish_combat::{AttackBehavior, AttackContext, AttackPhase, IndicatorConfig, IndicatorKind};
use skirmish_core::EntityId;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EnemyState {
    #[default]
    Idle,
    Chase,
    Attack,
    Stagger,
    Dead,
}

impl fmt::Display for EnemyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A cross-fade the enemy wants its animation player to perform
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub clip: String,
    pub fade: f32,
    pub looping: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead, nothing changed
    Ignored,
    Staggered,
    Killed,
}

/// Where an attack telegraph sits, fixed when the attack starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPlacement {
    pub config: IndicatorConfig,
    /// Enemy position when the attack began
    pub origin: Vec3,
    /// Unit XZ direction toward the target
    pub direction: Vec3,
    /// Centre of the hit zone; the rush end point for rush attacks
    pub hit_center: Vec3,
}

impl IndicatorPlacement {
    /// Yaw in degrees of the rush line and cone
    pub fn yaw(&self) -> f32 {
        self.direction.x.atan2(self.direction.z).to_degrees()
    }
}

/// Enemy AI state machine.
///
/// The enemy reads and writes its root node through an [`AttackContext`]
/// each tick. It never calls out to rooms or animation players; instead it
/// leaves a death notice and animation requests for the game systems to
/// collect.
pub struct Enemy {
    state: EnemyState,
    stats: EnemyStats,
    attack: Option<Box<dyn AttackBehavior>>,
    indicator_override: Option<IndicatorConfig>,
    target: Option<EntityId>,
    animation: EnemyAnimationConfig,
    cooldown_timer: f32,
    stagger_timer: f32,
    dead_timer: f32,
    indicator: Option<IndicatorPlacement>,
    pending_animation: Option<AnimationRequest>,
    death_notice: bool,
}

impl Default for Enemy {
    fn default() -> Self {
        Self::new(EnemyStats::default())
    }
}

impl Enemy {
    pub fn new(stats: EnemyStats) -> Self {
        Self {
            state: EnemyState::Idle,
            stats,
            attack: None,
            indicator_override: None,
            target: None,
            animation: EnemyAnimationConfig::default(),
            cooldown_timer: 0.0,
            stagger_timer: 0.0,
            dead_timer: 0.0,
            indicator: None,
            pending_animation: None,
            death_notice: false,
        }
    }

    pub fn with_attack(mut self, attack: Box<dyn AttackBehavior>) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_animation(mut self, config: EnemyAnimationConfig) -> Self {
        self.animation = config;
        self
    }

    /// Telegraph to draw instead of the one the attack reports
    pub fn with_indicator(mut self, config: IndicatorConfig) -> Self {
        self.indicator_override = Some(config);
        self
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut EnemyStats {
        &mut self.stats
    }

    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn set_attack(&mut self, attack: Box<dyn AttackBehavior>) {
        self.attack = Some(attack);
    }

    pub fn attack(&self) -> Option<&dyn AttackBehavior> {
        self.attack.as_deref()
    }

    pub fn attack_phase(&self) -> Option<AttackPhase> {
        match self.state {
            EnemyState::Attack => self.attack.as_ref().map(|a| a.phase()),
            _ => None,
        }
    }

    pub fn animation_config(&self) -> &EnemyAnimationConfig {
        &self.animation
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_timer.max(0.0)
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn is_ready_for_removal(&self) -> bool {
        self.is_dead() && self.dead_timer <= 0.0
    }

    pub fn indicator(&self) -> Option<&IndicatorPlacement> {
        self.indicator.as_ref()
    }

    pub fn indicator_active(&self) -> bool {
        self.indicator.is_some()
    }

    /// Next cross-fade to apply, if a state was entered since the last call
    pub fn take_animation_request(&mut self) -> Option<AnimationRequest> {
        self.pending_animation.take()
    }

    /// True exactly once after the enemy dies
    pub fn take_death_notice(&mut self) -> bool {
        std::mem::take(&mut self.death_notice)
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }
        if !amount.is_finite() {
            tracing::debug!(damage = amount, "ignoring non-finite damage");
            return DamageOutcome::Ignored;
        }

        self.stats.current_hp = (self.stats.current_hp - amount).clamp(0.0, self.stats.max_hp);
        tracing::debug!(
            damage = amount,
            hp = self.stats.current_hp,
            max_hp = self.stats.max_hp,
            "enemy took damage"
        );

        if self.stats.current_hp <= 0.0 {
            self.stats.current_hp = 0.0;
            self.enter_state(EnemyState::Dead, None);
            DamageOutcome::Killed
        } else {
            self.enter_state(EnemyState::Stagger, None);
            DamageOutcome::Staggered
        }
    }

    /// Switch state and run its entry actions. Same-state changes and any
    /// change out of Dead are ignored.
    pub fn change_state(&mut self, state: EnemyState, ctx: &mut AttackContext<'_>) {
        self.enter_state(state, Some(ctx));
    }

    fn enter_state(&mut self, state: EnemyState, ctx: Option<&mut AttackContext<'_>>) {
        if self.state == state || self.state == EnemyState::Dead {
            return;
        }

        let previous = self.state;
        self.state = state;
        if previous == EnemyState::Attack {
            self.indicator = None;
        }
        tracing::debug!(from = %previous, to = %state, "enemy state changed");

        let a = &self.animation;
        let (clip, fade, looping) = match state {
            EnemyState::Idle => (&a.idle_clip, 0.2, a.loop_idle),
            EnemyState::Chase => (&a.chase_clip, 0.2, a.loop_chase),
            EnemyState::Attack => (&a.attack_clip, 0.15, a.loop_attack),
            EnemyState::Stagger => (&a.stagger_clip, 0.1, a.loop_stagger),
            EnemyState::Dead => (&a.death_clip, 0.1, a.loop_death),
        };
        self.pending_animation = Some(AnimationRequest {
            clip: clip.clone(),
            fade,
            looping,
        });

        match state {
            EnemyState::Stagger => self.stagger_timer = STAGGER_DURATION,
            EnemyState::Dead => {
                self.dead_timer = DEAD_LINGER_TIME;
                self.indicator = None;
                self.death_notice = true;
                tracing::debug!("enemy died");
            }
            EnemyState::Attack => {
                if let Some(ctx) = ctx {
                    if let Some(attack) = self.attack.as_mut() {
                        attack.execute(ctx);
                    }
                    self.indicator = self.place_indicator(ctx);
                }
            }
            EnemyState::Idle | EnemyState::Chase => {}
        }
    }

    fn place_indicator(&self, ctx: &AttackContext<'_>) -> Option<IndicatorPlacement> {
        let config = self
            .indicator_override
            .or_else(|| self.attack.as_ref().and_then(|a| a.indicator()))?;
        let direction = ctx.direction_to_target()?;
        if direction == Vec3::ZERO {
            return None;
        }

        let origin = ctx.position();
        let hit_center = match config.kind {
            IndicatorKind::Circle => origin,
            IndicatorKind::RushCircle | IndicatorKind::RushCone => {
                origin + direction * config.rush_distance
            }
        };
        Some(IndicatorPlacement {
            config,
            origin,
            direction,
            hit_center,
        })
    }

    pub fn update(&mut self, dt: f32, ctx: &mut AttackContext<'_>) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }

        match self.state {
            EnemyState::Idle => self.update_idle(ctx),
            EnemyState::Chase => self.update_chase(dt, ctx),
            EnemyState::Attack => self.update_attack(dt, ctx),
            EnemyState::Stagger => {
                self.stagger_timer -= dt;
                if self.stagger_timer <= 0.0 {
                    self.change_state(EnemyState::Chase, ctx);
                }
            }
            EnemyState::Dead => self.dead_timer -= dt,
        }
    }

    fn update_idle(&mut self, ctx: &mut AttackContext<'_>) {
        let in_range = ctx
            .distance_to_target()
            .is_some_and(|d| d <= self.stats.detection_range);
        if in_range {
            self.change_state(EnemyState::Chase, ctx);
        }
    }

    fn update_chase(&mut self, dt: f32, ctx: &mut AttackContext<'_>) {
        let Some(distance) = ctx.distance_to_target() else {
            self.change_state(EnemyState::Idle, ctx);
            return;
        };

        if distance <= self.stats.attack_range {
            if self.cooldown_timer <= 0.0 {
                self.change_state(EnemyState::Attack, ctx);
            } else {
                ctx.face_target();
            }
            return;
        }

        ctx.face_target();
        if let Some(direction) = ctx.direction_to_target() {
            let position = ctx.position() + direction * self.stats.move_speed * dt;
            ctx.set_position(position);
        }
    }

    fn update_attack(&mut self, dt: f32, ctx: &mut AttackContext<'_>) {
        let finished = match self.attack.as_mut() {
            Some(attack) => {
                attack.update(dt, ctx);
                attack.is_finished()
            }
            None => true,
        };
        if finished {
            self.cooldown_timer = self.stats.attack_cooldown;
            self.change_state(EnemyState::Chase, ctx);
        }
    }
}

impl fmt::Debug for Enemy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enemy")
            .field("state", &self.state)
            .field("stats", &self.stats)
            .field("attack", &self.attack.as_ref().map(|a| a.name()))
            .field("cooldown_timer", &self.cooldown_timer)
            .finish_non_exhaustive()
    }
}
