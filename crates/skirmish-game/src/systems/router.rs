use crate::player::Player;
use crate::spawner::RoomMember;
use crate::world::GameWorld;
use skirmish_ai::Enemy;
use skirmish_core::{EntityId, Result};
use skirmish_runtime::{GameEvent, RuntimeSystem};

/// Turns death notices into events, then drains the event bus and applies
/// each event's consequences
pub struct EventRouter;

impl EventRouter {
    pub fn new() -> Self {
        Self
    }

    fn collect_deaths(world: &mut GameWorld) {
        let killed: Vec<EntityId> = world
            .objects
            .ecs_mut()
            .query_mut::<(&EntityId, &mut Enemy)>()
            .into_iter()
            .filter_map(|(_, (id, enemy))| enemy.take_death_notice().then_some(*id))
            .collect();
        for enemy in killed {
            world.events.push(GameEvent::EnemyKilled { enemy });
        }
    }

    fn route(world: &mut GameWorld, event: &GameEvent) {
        match *event {
            GameEvent::PlayerDamaged { source, amount } => {
                let Some(mut player) = world.objects.get_mut::<Player>(world.player) else {
                    return;
                };
                if player.is_dead() {
                    return;
                }
                player.take_damage(amount);
                world.stats.damage_taken += amount;
                if player.is_dead() {
                    tracing::info!(killer = ?source, "player died");
                }
            }
            GameEvent::EnemyKilled { enemy } => {
                world.stats.enemies_killed += 1;
                world.collisions.set_enabled(enemy, false);
                let room = world.objects.get::<RoomMember>(enemy).map(|member| member.0);
                match room.and_then(|index| world.rooms.get_mut(index)) {
                    Some(room) => room.notify_death(enemy),
                    None => tracing::debug!(enemy = %enemy, "killed enemy belongs to no room"),
                }
            }
            GameEvent::CollisionStarted { .. } => world.stats.collisions_started += 1,
            _ => {}
        }
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<GameWorld> for EventRouter {
    fn initialize(&mut self, _world: &mut GameWorld) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, _dt: f64) -> Result<()> {
        Self::collect_deaths(world);
        let events = world.events.drain();
        for event in &events {
            Self::route(world, event);
        }
        world.frame_events = events;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "event_router"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::spawner::SpawnContext;
    use glam::Vec3;

    fn world() -> GameWorld {
        GameWorld::new(GameConfig {
            seed: Some(8),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn player_damage_is_applied_until_death() {
        let mut world = world();
        let mut router = EventRouter::new();
        for _ in 0..3 {
            world.events.push(GameEvent::PlayerDamaged {
                source: None,
                amount: 40.0,
            });
        }
        router.update(&mut world, 0.016).unwrap();
        assert_eq!(world.player_hp(), 0.0);
        assert!((world.stats.damage_taken - 80.0).abs() < 1e-4);
        assert_eq!(world.frame_events.len(), 3);
        assert!(world.events.is_empty());
    }

    #[test]
    fn death_notice_reaches_the_room_once() {
        let mut world = world();
        let player = world.player;
        let mut ctx = SpawnContext {
            objects: &mut world.objects,
            collisions: &mut world.collisions,
            clips: &mut world.clips,
        };
        let enemy = world
            .spawner
            .spawn(&mut ctx, 0, "TestEnemy", Vec3::new(0.0, 0.0, -30.0), Some(player))
            .unwrap();
        world.rooms[0].register_enemy(enemy);

        world
            .objects
            .get_mut::<Enemy>(enemy)
            .unwrap()
            .take_damage(1000.0);

        let mut router = EventRouter::new();
        router.update(&mut world, 0.016).unwrap();
        router.update(&mut world, 0.016).unwrap();

        assert_eq!(world.stats.enemies_killed, 1);
        assert!(!world.collisions.get(enemy).unwrap().enabled);
        assert!(world.frame_events.is_empty());
    }
}
