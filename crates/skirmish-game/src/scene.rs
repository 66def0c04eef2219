//! The game scene: one world, one clock and the ordered systems

use crate::config::GameConfig;
use crate::systems::default_systems;
use crate::world::GameWorld;
use skirmish_core::Result;
use skirmish_runtime::{GameClock, RuntimeSystem};

pub struct Scene {
    world: GameWorld,
    clock: GameClock,
    systems: Vec<Box<dyn RuntimeSystem<GameWorld>>>,
    initialized: bool,
}

impl Scene {
    pub fn new(config: GameConfig) -> Result<Self> {
        let clock = GameClock::from_config(&config.clock);
        let world = GameWorld::new(config)?;
        Ok(Self {
            world,
            clock,
            systems: default_systems(),
            initialized: false,
        })
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        for system in &mut self.systems {
            system.initialize(&mut self.world)?;
            tracing::debug!(system = system.name(), "system initialized");
        }
        self.initialized = true;
        Ok(())
    }

    /// Advance one frame. `raw_dt` is clamped to the configured maximum
    /// frame time; the clamped delta is returned.
    pub fn tick(&mut self, raw_dt: f64) -> Result<f64> {
        self.initialize()?;
        let dt = self.clock.advance(raw_dt);

        for system in &mut self.systems {
            system.update(&mut self.world, dt)?;
        }

        self.world.time += dt;
        self.world.stats.frames += 1;
        self.world.input.end_frame();
        Ok(dt)
    }

    pub fn shutdown(&mut self) -> Result<()> {
        for system in &mut self.systems {
            system.shutdown()?;
        }
        tracing::info!(frames = self.world.stats.frames, "scene shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoomConfig, SpawnEntry};
    use crate::drop_item::DropItem;
    use crate::room::RoomState;
    use crate::spawner::EnemySpawnData;
    use glam::Vec3;
    use skirmish_ai::EnemyStats;
    use skirmish_combat::{SkillComponent, SkillSlot};
    use skirmish_runtime::GameEvent;
    use winit::keyboard::KeyCode;

    const DT: f64 = 0.05;

    fn trial_room(spawns: Vec<SpawnEntry>) -> RoomConfig {
        RoomConfig {
            name: "Trial".into(),
            min: Vec3::new(-10.0, -1.0, -30.0),
            max: Vec3::new(10.0, 10.0, -5.0),
            spawns,
        }
    }

    fn spawn(preset: &str, z: f32) -> SpawnEntry {
        SpawnEntry {
            preset: preset.into(),
            position: Vec3::new(0.0, 0.0, z),
        }
    }

    /// A target that never notices the player
    fn dummy() -> EnemySpawnData {
        EnemySpawnData {
            name: "Dummy".into(),
            stats: EnemyStats {
                detection_range: 0.0,
                ..EnemyStats::default()
            }
            .with_max_hp(10.0),
            ..EnemySpawnData::default()
        }
    }

    fn scene(rooms: Vec<RoomConfig>) -> Scene {
        let config = GameConfig {
            seed: Some(11),
            enemy_presets: vec![dummy()],
            rooms,
            ..GameConfig::default()
        };
        let mut scene = Scene::new(config).unwrap();
        scene.initialize().unwrap();
        scene
    }

    /// Tick until `done` holds, failing after `limit` frames
    fn run_until(scene: &mut Scene, limit: usize, done: impl Fn(&GameWorld) -> bool) {
        for _ in 0..limit {
            if done(scene.world()) {
                return;
            }
            scene.tick(DT).unwrap();
        }
        assert!(done(scene.world()), "condition not reached in {limit} frames");
    }

    fn press(scene: &mut Scene, key: KeyCode) {
        scene.world_mut().input.process_key_down(key);
        scene.tick(DT).unwrap();
        scene.world_mut().input.process_key_up(key);
    }

    #[test]
    fn systems_run_in_frame_order() {
        let scene = scene(Vec::new());
        assert_eq!(
            scene.system_names(),
            vec![
                "player",
                "enemy",
                "projectile",
                "animation",
                "transform",
                "collision",
                "event_router",
                "room"
            ]
        );
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut scene = scene(Vec::new());
        let dt = scene.tick(5.0).unwrap();
        assert!((dt - 0.1).abs() < 1e-9);
        assert!((scene.world().time - 0.1).abs() < 1e-9);
        assert_eq!(scene.world().stats.frames, 1);
    }

    #[test]
    fn every_frame_runs_once_on_the_clamped_delta() {
        let mut scene = scene(Vec::new());
        assert_eq!(scene.tick(-1.0).unwrap(), 0.0);
        assert_eq!(scene.tick(0.0).unwrap(), 0.0);
        assert!((scene.tick(0.03).unwrap() - 0.03).abs() < 1e-9);
        assert_eq!(scene.world().stats.frames, 3);
        assert!((scene.world().time - 0.03).abs() < 1e-9);
        assert!((scene.clock().total_time - 0.03).abs() < 1e-9);
    }

    #[test]
    fn encounter_from_activation_to_reward() {
        let mut scene = scene(vec![trial_room(vec![spawn("Dummy", -20.0)])]);

        // Walk into the room
        scene.world_mut().input.process_key_down(KeyCode::KeyW);
        run_until(&mut scene, 40, |w| w.current_room == Some(0));
        scene.world_mut().input.process_key_up(KeyCode::KeyW);
        assert_eq!(scene.world().stats.enemies_spawned, 1);
        assert_eq!(scene.world().rooms[0].state(), RoomState::Active);

        scene.tick(DT).unwrap();
        assert!(scene
            .world()
            .frame_events
            .contains(&GameEvent::RoomActivated { room: 0 }));

        // Aim at the dummy and cast Fireball
        let (enemy, at) = scene.world().nearest_enemy(Vec3::ZERO).unwrap();
        scene.world_mut().aim_at(at);
        scene.world_mut().input.process_key_down(KeyCode::KeyQ);
        run_until(&mut scene, 40, |w| w.stats.enemies_killed == 1);
        scene.world_mut().input.process_key_up(KeyCode::KeyQ);

        let world = scene.world();
        assert!(world.stats.damage_dealt >= 10.0);
        assert_eq!(world.rooms[0].state(), RoomState::Cleared);
        assert_eq!(world.stats.rooms_cleared, 1);
        assert!(world.living_enemies().iter().all(|(id, _)| *id != enemy));
        let drops = world.drops();
        assert_eq!(drops.len(), 1);
        let reward = drops[0].0;
        assert_eq!(world.rooms[0].drop_item(), Some(reward));
        let offered = world.objects.get::<DropItem>(reward).unwrap().option(0);

        // Walk up to the reward and take the first rune
        scene.world_mut().input.process_key_down(KeyCode::KeyW);
        run_until(&mut scene, 40, |w| w.interaction.nearby == Some(reward));
        scene.world_mut().input.process_key_up(KeyCode::KeyW);
        scene.tick(DT).unwrap();

        press(&mut scene, KeyCode::KeyF);
        assert_eq!(scene.world().interaction.open, Some(reward));
        press(&mut scene, KeyCode::Digit1);

        let world = scene.world();
        assert_eq!(world.stats.drops_collected, 1);
        let skills = world.objects.get::<SkillComponent>(world.player).unwrap();
        assert_eq!(skills.rune(SkillSlot::Q, 0), offered);
        drop(skills);

        scene.tick(DT).unwrap();
        assert!(!scene.world().objects.contains(reward));
        assert!(scene.world().drops().is_empty());
        assert_eq!(scene.world().rooms[0].drop_item(), None);
    }

    #[test]
    fn empty_room_rewards_on_entry() {
        let mut scene = scene(vec![trial_room(Vec::new())]);
        scene.world_mut().input.process_key_down(KeyCode::KeyW);
        run_until(&mut scene, 40, |w| w.rooms[0].state() == RoomState::Cleared);
        assert_eq!(scene.world().stats.enemies_spawned, 0);
        assert_eq!(scene.world().drops().len(), 1);
    }

    #[test]
    fn enemies_hurt_a_player_who_stands_still() {
        let mut scene = scene(vec![trial_room(vec![spawn("TestEnemy", -16.0)])]);
        scene.world_mut().input.process_key_down(KeyCode::KeyW);
        run_until(&mut scene, 40, |w| w.current_room == Some(0));
        scene.world_mut().input.process_key_up(KeyCode::KeyW);

        run_until(&mut scene, 200, |w| w.stats.damage_taken > 0.0);
        assert!(scene.world().player_hp() < 100.0);
    }

    #[test]
    fn dead_enemies_are_removed_after_lingering() {
        let mut scene = scene(vec![trial_room(vec![spawn("Dummy", -20.0)])]);
        scene.world_mut().input.process_key_down(KeyCode::KeyW);
        run_until(&mut scene, 40, |w| w.current_room == Some(0));
        scene.world_mut().input.process_key_up(KeyCode::KeyW);

        let (enemy, _) = scene.world().nearest_enemy(Vec3::ZERO).unwrap();
        scene
            .world()
            .objects
            .get_mut::<skirmish_ai::Enemy>(enemy)
            .unwrap()
            .take_damage(100.0);

        scene.tick(DT).unwrap();
        assert!(scene.world().objects.contains(enemy));
        run_until(&mut scene, 60, |w| !w.objects.contains(enemy));
        assert!(scene.world().collisions.get(enemy).is_none());
    }
}
