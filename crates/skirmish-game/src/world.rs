//! Everything the game systems share

use crate::camera::CameraRig;
use crate::config::GameConfig;
use crate::drop_item::{DropItem, Interactable};
use crate::player::Player;
use crate::room::Room;
use crate::spawner::EnemySpawner;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use skirmish_ai::Enemy;
use skirmish_animation::ClipLibrary;
use skirmish_combat::{FireballBehavior, ProjectileManager, SkillComponent, SkillData, SkillSlot};
use skirmish_core::math::distance_2d;
use skirmish_core::{EntityId, Result};
use skirmish_ecs::ObjectWorld;
use skirmish_physics::{Collider, ColliderScope, CollisionLayer, CollisionManager};
use skirmish_runtime::{CameraView, EventBus, GameEvent, InputState};

/// Drop the player stands next to, and the one whose options are on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub nearby: Option<EntityId>,
    pub open: Option<EntityId>,
}

/// Running totals for one encounter
#[derive(Debug, Clone, Default, Serialize)]
pub struct EncounterStats {
    pub frames: u64,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub rooms_cleared: u32,
    pub drops_collected: u32,
    pub collisions_started: u32,
}

pub struct GameWorld {
    pub config: GameConfig,
    pub objects: ObjectWorld,
    pub collisions: CollisionManager,
    pub projectiles: ProjectileManager,
    pub events: EventBus,
    pub input: InputState,
    pub camera: CameraRig,
    /// Window size in pixels, for cursor aiming
    pub viewport: Vec2,
    pub clips: ClipLibrary,
    pub spawner: EnemySpawner,
    pub rooms: Vec<Room>,
    pub current_room: Option<usize>,
    pub player: EntityId,
    pub interaction: Interaction,
    pub stats: EncounterStats,
    /// Events routed during the last tick
    pub frame_events: Vec<GameEvent>,
    pub rng: StdRng,
    /// Simulated seconds
    pub time: f64,
}

impl GameWorld {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut spawner = EnemySpawner::new();
        for preset in &config.enemy_presets {
            spawner.register(preset.clone());
        }

        let rooms = config
            .rooms
            .iter()
            .enumerate()
            .map(|(index, room)| Room::from_config(index, room))
            .collect();

        let mut objects = ObjectWorld::new();
        let mut collisions = CollisionManager::new();
        let player = objects.spawn("Player")?;
        objects.set_position(player, config.player.spawn_position);
        objects.insert(player, Player::new(&config.player))?;
        objects.insert(player, starting_skills(&config))?;
        collisions.register(
            Collider::new(player, CollisionLayer::PLAYER).with_box(Vec3::Y, Vec3::new(0.5, 1.0, 0.5)),
            ColliderScope::Global,
        );

        let mut camera = CameraRig::new();
        camera.follow(config.player.spawn_position);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            rooms = config.rooms.len(),
            presets = spawner.preset_names().count(),
            "game world ready"
        );

        Ok(Self {
            viewport: Vec2::new(config.window.width as f32, config.window.height as f32),
            projectiles: ProjectileManager::new(config.projectiles),
            config,
            objects,
            collisions,
            events: EventBus::new(),
            input: InputState::new(),
            camera,
            clips: ClipLibrary::new(),
            spawner,
            rooms,
            current_room: None,
            player,
            interaction: Interaction::default(),
            stats: EncounterStats::default(),
            frame_events: Vec::new(),
            rng,
            time: 0.0,
        })
    }

    pub fn player_position(&self) -> Vec3 {
        self.objects.position(self.player).unwrap_or(Vec3::ZERO)
    }

    pub fn player_hp(&self) -> f32 {
        self.objects.get::<Player>(self.player).map_or(0.0, |p| p.hp)
    }

    pub fn is_player_alive(&self) -> bool {
        self.objects
            .get::<Player>(self.player)
            .is_some_and(|p| !p.is_dead())
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current_room.and_then(|index| self.rooms.get(index))
    }

    pub fn camera_view(&self) -> CameraView {
        self.camera.camera_view(self.viewport)
    }

    /// Move the cursor to where `point` appears on screen
    pub fn aim_at(&mut self, point: Vec3) {
        let (x, y) = self.camera.cursor_for(point, self.viewport);
        self.input.process_mouse_move(x, y);
    }

    /// Every living enemy with its position
    pub fn living_enemies(&self) -> Vec<(EntityId, Vec3)> {
        let mut enemies: Vec<(EntityId, Vec3)> = self
            .objects
            .ecs()
            .query::<(&EntityId, &Enemy)>()
            .iter()
            .filter(|(_, (_, enemy))| !enemy.is_dead())
            .map(|(_, (id, _))| *id)
            .collect::<Vec<_>>()
            .into_iter()
            .filter_map(|id| self.objects.position(id).map(|pos| (id, pos)))
            .collect();
        enemies.sort_by_key(|(id, _)| *id);
        enemies
    }

    /// Closest living enemy on the ground plane
    pub fn nearest_enemy(&self, from: Vec3) -> Option<(EntityId, Vec3)> {
        self.living_enemies()
            .into_iter()
            .min_by(|a, b| distance_2d(from, a.1).total_cmp(&distance_2d(from, b.1)))
    }

    /// Active drops with their positions
    pub fn drops(&self) -> Vec<(EntityId, Vec3)> {
        let ids: Vec<EntityId> = self
            .objects
            .ecs()
            .query::<(&EntityId, &DropItem, &Interactable)>()
            .iter()
            .filter(|(_, (_, drop, interactable))| drop.is_active() && interactable.active)
            .map(|(_, (id, _, _))| *id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.objects.position(id).map(|pos| (id, pos)))
            .collect()
    }
}

/// Fireball on Q, Flame Wave on E, Meteor on R
fn starting_skills(config: &GameConfig) -> SkillComponent {
    let mut skills = SkillComponent::new(config.skills.clone());
    skills.equip(SkillSlot::Q, Box::new(FireballBehavior::new(SkillData::fireball())));
    skills.equip(SkillSlot::E, Box::new(FireballBehavior::new(SkillData::flame_wave())));
    skills.equip(SkillSlot::R, Box::new(FireballBehavior::new(SkillData::meteor())));
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> GameWorld {
        GameWorld::new(GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn player_starts_armed_at_spawn() {
        let world = world();
        assert_eq!(world.player_position(), Vec3::ZERO);
        assert!(world.is_player_alive());
        assert!((world.player_hp() - 100.0).abs() < 1e-6);

        let skills = world.objects.get::<SkillComponent>(world.player).unwrap();
        assert!(skills.is_ready(SkillSlot::Q));
        assert!(skills.is_ready(SkillSlot::R));
        assert!(!skills.is_ready(SkillSlot::RightClick));

        let collider = world.collisions.get(world.player).unwrap();
        assert_eq!(collider.layer, CollisionLayer::PLAYER);
    }

    #[test]
    fn rooms_come_from_config() {
        let world = world();
        assert_eq!(world.rooms.len(), 2);
        assert_eq!(world.rooms[0].name(), "Entry");
        assert!(world.current_room().is_none());
        assert!(world.living_enemies().is_empty());
        assert!(world.nearest_enemy(Vec3::ZERO).is_none());
    }

    #[test]
    fn config_presets_extend_the_spawner() {
        let mut config = GameConfig::default();
        config.enemy_presets.push(crate::spawner::EnemySpawnData {
            name: "Brute".into(),
            ..Default::default()
        });
        let world = GameWorld::new(config).unwrap();
        assert!(world.spawner.has_preset("Brute"));
        assert!(world.spawner.has_preset("TestEnemy"));
    }
}
