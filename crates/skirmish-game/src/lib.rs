//! Skirmish Game
//!
//! Ties the simulation crates together into a playable encounter:
//! - `GameConfig` - TOML configuration with defaults for every section
//! - `GameWorld` - objects, colliders, projectiles, rooms and the player
//! - `EnemySpawner` - named enemy presets and the spawn procedure
//! - `Room` / `DropItem` - encounter lifecycle and rune rewards
//! - `Scene` - runs the systems in their fixed per-frame order

pub mod camera;
pub mod config;
pub mod drop_item;
pub mod player;
pub mod room;
pub mod scene;
pub mod spawner;
pub mod systems;
pub mod world;

pub use camera::CameraRig;
pub use config::{GameConfig, PlayerConfig, RoomConfig, SpawnEntry, WindowConfig};
pub use drop_item::{DropItem, Interactable, INTERACT_PROMPT};
pub use player::Player;
pub use room::{Room, RoomState, RoomTransition};
pub use scene::Scene;
pub use spawner::{AttackSpec, EnemySpawnData, EnemySpawner, RoomMember, SpawnContext};
pub use world::{EncounterStats, GameWorld, Interaction};
