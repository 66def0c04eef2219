//! Shared timeline for the rush-then-strike attacks

use super::{AttackContext, AttackPhase};
use glam::Vec3;

/// Rush along a locked direction, wind up, strike once, recover.
/// Each phase restarts the timer.
#[derive(Debug, Clone)]
pub(crate) struct RushCycle {
    pub rush_speed: f32,
    pub rush_duration: f32,
    pub windup: f32,
    pub hit_time: f32,
    pub recovery: f32,
    phase: AttackPhase,
    timer: f32,
    hit_dealt: bool,
    finished: bool,
    direction: Vec3,
}

impl RushCycle {
    pub fn new(rush_speed: f32, rush_duration: f32, windup: f32, hit_time: f32, recovery: f32) -> Self {
        Self {
            rush_speed,
            rush_duration,
            windup,
            hit_time,
            recovery,
            phase: AttackPhase::Rush,
            timer: 0.0,
            hit_dealt: false,
            finished: false,
            direction: Vec3::ZERO,
        }
    }

    pub fn rush_distance(&self) -> f32 {
        self.rush_speed * self.rush_duration
    }

    /// Face the target and lock the rush direction from the new facing
    pub fn start(&mut self, ctx: &mut AttackContext<'_>) {
        self.reset();
        ctx.face_target();
        self.direction = ctx.facing();
    }

    /// Advance one tick. Returns true on the single tick the strike lands.
    pub fn advance(&mut self, dt: f32, ctx: &mut AttackContext<'_>) -> bool {
        if self.finished {
            return false;
        }
        self.timer += dt;
        let mut strike = false;

        match self.phase {
            AttackPhase::Rush => {
                let pos = ctx.position() + self.direction * self.rush_speed * dt;
                ctx.set_position(pos);
                if self.timer >= self.rush_duration {
                    self.enter(AttackPhase::Windup);
                }
            }
            AttackPhase::Windup => {
                if self.timer >= self.windup {
                    self.enter(AttackPhase::Hit);
                }
            }
            AttackPhase::Hit => {
                if !self.hit_dealt {
                    self.hit_dealt = true;
                    strike = true;
                }
                if self.timer >= self.hit_time {
                    self.enter(AttackPhase::Recovery);
                }
            }
            _ => {
                if self.timer >= self.recovery {
                    self.finished = true;
                }
            }
        }
        strike
    }

    fn enter(&mut self, phase: AttackPhase) {
        self.phase = phase;
        self.timer = 0.0;
    }

    pub fn reset(&mut self) {
        self.phase = AttackPhase::Rush;
        self.timer = 0.0;
        self.hit_dealt = false;
        self.finished = false;
        self.direction = Vec3::ZERO;
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}
