use serde::{Deserialize, Serialize};

/// Seconds an enemy stays staggered after taking damage
pub const STAGGER_DURATION: f32 = 0.5;
/// Seconds a dead enemy remains before it can be removed
pub const DEAD_LINGER_TIME: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStats {
    pub max_hp: f32,
    pub current_hp: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    /// Seconds between attacks
    pub attack_cooldown: f32,
    /// Idle enemies start chasing a target within this distance
    pub detection_range: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            max_hp: 100.0,
            current_hp: 100.0,
            move_speed: 5.0,
            attack_range: 2.0,
            attack_cooldown: 1.0,
            detection_range: 50.0,
        }
    }
}

impl EnemyStats {
    /// Stats at full health
    pub fn with_max_hp(mut self, hp: f32) -> Self {
        self.max_hp = hp;
        self.current_hp = hp;
        self
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            self.current_hp / self.max_hp
        }
    }
}

/// Clip names and loop flags used for each enemy state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyAnimationConfig {
    pub idle_clip: String,
    pub chase_clip: String,
    pub attack_clip: String,
    pub stagger_clip: String,
    pub death_clip: String,
    pub loop_idle: bool,
    pub loop_chase: bool,
    pub loop_attack: bool,
    pub loop_stagger: bool,
    pub loop_death: bool,
}

impl Default for EnemyAnimationConfig {
    fn default() -> Self {
        Self {
            idle_clip: "idle".into(),
            chase_clip: "run".into(),
            attack_clip: "attack".into(),
            stagger_clip: "hit".into(),
            death_clip: "death".into(),
            loop_idle: true,
            loop_chase: true,
            loop_attack: false,
            loop_stagger: false,
            loop_death: false,
        }
    }
}
