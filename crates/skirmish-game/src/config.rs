//! Game configuration
//!
//! Loaded from a TOML file where every table is optional:
//!
//! ```toml
//! seed = 7
//!
//! [player]
//! move_speed = 25.0
//!
//! [[rooms]]
//! name = "Entry"
//! min = [-20.0, -1.0, -50.0]
//! max = [20.0, 10.0, -10.0]
//! spawns = [{ preset = "TestEnemy", position = [0.0, 0.0, -30.0] }]
//! ```
//!
//! `SKIRMISH_SEED` in the environment overrides the file's seed.

use crate::spawner::EnemySpawnData;
use glam::Vec3;
use serde::Deserialize;
use skirmish_combat::{ProjectileConfig, SkillSettings};
use skirmish_core::{Result, SkirmishError};
use skirmish_runtime::{ClockConfig, LoggingConfig};
use std::path::Path;

const SEED_ENV: &str = "SKIRMISH_SEED";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_hp: f32,
    /// Units per second
    pub move_speed: f32,
    /// How close the player must be to use a drop
    pub interaction_distance: f32,
    pub spawn_position: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_hp: 100.0,
            move_speed: 20.0,
            interaction_distance: 5.0,
            spawn_position: Vec3::ZERO,
        }
    }
}

/// One enemy placed in a room
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnEntry {
    pub preset: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    #[serde(default)]
    pub name: String,
    pub min: Vec3,
    pub max: Vec3,
    #[serde(default)]
    pub spawns: Vec<SpawnEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for drop rolls; entropy when absent
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub clock: ClockConfig,
    pub player: PlayerConfig,
    pub projectiles: ProjectileConfig,
    pub skills: SkillSettings,
    pub logging: LoggingConfig,
    /// Extra presets, replacing built-ins of the same name
    pub enemy_presets: Vec<EnemySpawnData>,
    pub rooms: Vec<RoomConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            window: WindowConfig::default(),
            clock: ClockConfig::default(),
            player: PlayerConfig::default(),
            projectiles: ProjectileConfig::default(),
            skills: SkillSettings::default(),
            logging: LoggingConfig::default(),
            enemy_presets: Vec::new(),
            rooms: default_rooms(),
        }
    }
}

/// Two rooms laid out along -Z in front of the player's start
fn default_rooms() -> Vec<RoomConfig> {
    let spawn = |preset: &str, x: f32, z: f32| SpawnEntry {
        preset: preset.to_string(),
        position: Vec3::new(x, 0.0, z),
    };
    vec![
        RoomConfig {
            name: "Entry".into(),
            min: Vec3::new(-20.0, -1.0, -50.0),
            max: Vec3::new(20.0, 10.0, -10.0),
            spawns: vec![
                spawn("TestEnemy", -6.0, -35.0),
                spawn("TestEnemy", 6.0, -35.0),
                spawn("RangedEnemy", 0.0, -45.0),
            ],
        },
        RoomConfig {
            name: "Arena".into(),
            min: Vec3::new(-30.0, -1.0, -110.0),
            max: Vec3::new(30.0, 10.0, -55.0),
            spawns: vec![
                spawn("RushAoEEnemy", -10.0, -90.0),
                spawn("RushFrontEnemy", 10.0, -90.0),
                spawn("AirElemental", 0.0, -100.0),
            ],
        },
    ]
}

impl GameConfig {
    /// Read and validate a config file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        tracing::info!(path = %path.display(), rooms = config.rooms.len(), "loaded game config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(SEED_ENV) {
            match value.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!(value = %value, "ignoring non-numeric {SEED_ENV}"),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.clock.max_frame_time <= 0.0 {
            return Err(SkirmishError::ConfigError(
                "clock.max_frame_time must be positive".into(),
            ));
        }
        if self.projectiles.capacity == 0 {
            return Err(SkirmishError::ConfigError(
                "projectiles.capacity must be at least 1".into(),
            ));
        }
        if self.player.max_hp <= 0.0 {
            return Err(SkirmishError::ConfigError(
                "player.max_hp must be positive".into(),
            ));
        }
        for (index, room) in self.rooms.iter().enumerate() {
            if room.min.cmpgt(room.max).any() {
                return Err(SkirmishError::ConfigError(format!(
                    "room {index} ({}) has min greater than max",
                    room.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config.window.width, 1280);
        assert!((config.player.move_speed - 20.0).abs() < 1e-6);
        assert!((config.player.interaction_distance - 5.0).abs() < 1e-6);
        assert_eq!(config.projectiles.capacity, 256);
        assert!((config.skills.max_charge_time - 1.5).abs() < 1e-6);
        assert_eq!(config.rooms.len(), 2);
        assert!(config.enemy_presets.is_empty());
    }

    #[test]
    fn rooms_and_presets_parse() {
        let config = GameConfig::from_toml_str(
            r#"
seed = 42

[player]
max_hp = 150.0

[[enemy_presets]]
name = "Brute"
scale = [2.0, 2.0, 2.0]
attack = { kind = "melee", damage = 30.0, windup = 0.6, hit_time = 0.2, recovery = 0.6 }

[enemy_presets.stats]
max_hp = 300.0
attack_range = 3.5

[[rooms]]
name = "Pit"
min = [-5.0, -1.0, -5.0]
max = [5.0, 5.0, 5.0]
spawns = [{ preset = "Brute", position = [1.0, 0.0, 2.0] }]
"#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert!((config.player.max_hp - 150.0).abs() < 1e-6);
        assert_eq!(config.rooms.len(), 1);
        assert_eq!(config.rooms[0].spawns[0].preset, "Brute");
        assert_eq!(config.rooms[0].spawns[0].position, Vec3::new(1.0, 0.0, 2.0));

        let brute = &config.enemy_presets[0];
        assert_eq!(brute.name, "Brute");
        assert!((brute.stats.max_hp - 300.0).abs() < 1e-6);
        assert!((brute.stats.move_speed - 5.0).abs() < 1e-6);
        assert!(brute.attack.is_some());
    }

    #[test]
    fn inverted_room_bounds_are_rejected() {
        let err = GameConfig::from_toml_str(
            r#"
[[rooms]]
min = [5.0, 0.0, 0.0]
max = [-5.0, 1.0, 1.0]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SkirmishError::ConfigError(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("seed = [").unwrap_err();
        assert!(matches!(err, SkirmishError::TomlParseError(_)));
    }

    #[test]
    fn zero_frame_time_is_rejected() {
        let err = GameConfig::from_toml_str("[clock]\nmax_frame_time = 0.0\n").unwrap_err();
        assert!(matches!(err, SkirmishError::ConfigError(_)));
    }
}
