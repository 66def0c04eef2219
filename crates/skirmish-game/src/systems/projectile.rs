use crate::spawner::RoomMember;
use crate::world::GameWorld;
use glam::Vec3;
use skirmish_ai::{DamageOutcome, Enemy};
use skirmish_combat::{Element, ProjectileTargets, TargetInfo};
use skirmish_core::{EntityId, Result};
use skirmish_runtime::{GameEvent, RuntimeSystem};

/// Snapshot of the current room's living enemies that records damage
/// instead of applying it
struct EnemyTargets {
    ids: Vec<EntityId>,
    targets: Vec<TargetInfo>,
    hp: Vec<f32>,
    hits: Vec<(usize, f32)>,
}

impl EnemyTargets {
    fn collect(world: &GameWorld) -> Self {
        let living: Vec<(EntityId, f32)> = match world.current_room {
            Some(room) => world
                .objects
                .ecs()
                .query::<(&EntityId, &Enemy, &RoomMember)>()
                .iter()
                .filter(|(_, (_, enemy, member))| member.0 == room && !enemy.is_dead())
                .map(|(_, (id, enemy, _))| (*id, enemy.stats().current_hp))
                .collect(),
            None => Vec::new(),
        };

        let mut snapshot = Self {
            ids: Vec::with_capacity(living.len()),
            targets: Vec::with_capacity(living.len()),
            hp: Vec::with_capacity(living.len()),
            hits: Vec::new(),
        };
        for (id, hp) in living {
            if let Some(position) = world.objects.position(id) {
                snapshot.ids.push(id);
                snapshot.targets.push(TargetInfo { position, alive: true });
                snapshot.hp.push(hp);
            }
        }
        snapshot
    }
}

impl ProjectileTargets for EnemyTargets {
    fn target_count(&self) -> usize {
        self.ids.len()
    }

    fn target(&self, index: usize) -> Option<TargetInfo> {
        self.targets.get(index).copied()
    }

    fn apply_damage(&mut self, index: usize, amount: f32, _element: Element) {
        let (Some(hp), Some(target)) = (self.hp.get_mut(index), self.targets.get_mut(index)) else {
            return;
        };
        *hp -= amount;
        if *hp <= 0.0 {
            target.alive = false;
        }
        self.hits.push((index, amount));
    }
}

/// The player as a single projectile target. Damage reaches the player
/// through `PlayerDamaged` events built from the impacts.
struct PlayerTarget {
    position: Vec3,
    alive: bool,
}

impl ProjectileTargets for PlayerTarget {
    fn target_count(&self) -> usize {
        1
    }

    fn target(&self, index: usize) -> Option<TargetInfo> {
        (index == 0).then_some(TargetInfo {
            position: self.position,
            alive: self.alive,
        })
    }

    fn apply_damage(&mut self, _index: usize, _amount: f32, _element: Element) {}
}

/// Moves projectiles and settles their hits
pub struct ProjectileSystem;

impl ProjectileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProjectileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<GameWorld> for ProjectileSystem {
    fn initialize(&mut self, _world: &mut GameWorld) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, dt: f64) -> Result<()> {
        if world.projectiles.active_count() == 0 {
            return Ok(());
        }

        let mut enemies = EnemyTargets::collect(world);
        let mut player = PlayerTarget {
            position: world.player_position(),
            alive: world.is_player_alive(),
        };
        let impacts = world
            .projectiles
            .update(dt as f32, &mut enemies, &mut player);

        for (index, amount) in enemies.hits {
            let enemy_id = enemies.ids[index];
            let outcome = world
                .objects
                .get_mut::<Enemy>(enemy_id)
                .map(|mut enemy| enemy.take_damage(amount));
            if matches!(
                outcome,
                Some(DamageOutcome::Staggered | DamageOutcome::Killed)
            ) {
                world.stats.damage_dealt += amount;
                world.events.push(GameEvent::EnemyDamaged {
                    enemy: enemy_id,
                    amount,
                });
            }
        }

        for impact in impacts.iter().filter(|i| !i.is_player_projectile) {
            world.events.push(GameEvent::PlayerDamaged {
                source: impact.owner,
                amount: impact.total_damage,
            });
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "projectile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::spawner::SpawnContext;
    use skirmish_ai::EnemyState;
    use skirmish_combat::Projectile;

    fn world() -> GameWorld {
        let mut world = GameWorld::new(GameConfig {
            seed: Some(9),
            rooms: Vec::new(),
            ..GameConfig::default()
        })
        .unwrap();
        world.current_room = Some(0);
        world
    }

    fn spawn(world: &mut GameWorld, at: Vec3) -> EntityId {
        let mut ctx = SpawnContext {
            objects: &mut world.objects,
            collisions: &mut world.collisions,
            clips: &mut world.clips,
        };
        world.spawner.spawn(&mut ctx, 0, "TestEnemy", at, None).unwrap()
    }

    fn fire_at_enemy(world: &mut GameWorld, damage: f32) {
        let player = world.player;
        world.projectiles.spawn(
            Projectile::aimed(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -5.0))
                .with_damage(damage)
                .with_owner(Some(player), true),
        );
    }

    #[test]
    fn player_projectile_damages_enemy() {
        let mut world = world();
        let enemy = spawn(&mut world, Vec3::new(0.0, 0.0, -5.0));
        fire_at_enemy(&mut world, 20.0);

        let mut system = ProjectileSystem::new();
        for _ in 0..10 {
            system.update(&mut world, 0.05).unwrap();
        }

        let state = world.objects.get::<Enemy>(enemy).unwrap().stats().current_hp;
        assert!((state - 30.0).abs() < 1e-4);
        assert!((world.stats.damage_dealt - 20.0).abs() < 1e-4);
        assert!(world
            .events
            .pending()
            .contains(&GameEvent::EnemyDamaged { enemy, amount: 20.0 }));
    }

    #[test]
    fn enemies_outside_the_current_room_are_not_hit() {
        let mut world = world();
        let enemy = spawn(&mut world, Vec3::new(0.0, 0.0, -5.0));
        world.current_room = Some(1);
        fire_at_enemy(&mut world, 20.0);

        let mut system = ProjectileSystem::new();
        for _ in 0..10 {
            system.update(&mut world, 0.05).unwrap();
        }

        let hp = world.objects.get::<Enemy>(enemy).unwrap().stats().current_hp;
        assert!((hp - 50.0).abs() < 1e-4);
        assert_eq!(world.stats.damage_dealt, 0.0);
        assert!(world.events.pending().is_empty());
    }

    #[test]
    fn nothing_is_hit_before_any_room_is_entered() {
        let mut world = world();
        let enemy = spawn(&mut world, Vec3::new(0.0, 0.0, -5.0));
        world.current_room = None;
        fire_at_enemy(&mut world, 20.0);

        let mut system = ProjectileSystem::new();
        for _ in 0..10 {
            system.update(&mut world, 0.05).unwrap();
        }

        let hp = world.objects.get::<Enemy>(enemy).unwrap().stats().current_hp;
        assert!((hp - 50.0).abs() < 1e-4);
    }

    #[test]
    fn overkill_in_one_update_does_not_hit_a_corpse() {
        let mut world = world();
        let enemy = spawn(&mut world, Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..2 {
            world.projectiles.spawn(
                Projectile::aimed(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -1.0))
                    .with_damage(60.0)
                    .with_owner(Some(world.player), true),
            );
        }
        ProjectileSystem::new().update(&mut world, 0.01).unwrap();

        let enemy_ref = world.objects.get::<Enemy>(enemy).unwrap();
        assert_eq!(enemy_ref.state(), EnemyState::Dead);
        drop(enemy_ref);
        assert_eq!(world.projectiles.active_count(), 1);
    }

    #[test]
    fn enemy_projectile_reports_player_damage() {
        let mut world = world();
        let shooter = spawn(&mut world, Vec3::new(0.0, 0.0, -5.0));
        world.projectiles.spawn(
            Projectile::aimed(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, 1.0, 0.0))
                .with_damage(10.0)
                .with_owner(Some(shooter), false),
        );
        ProjectileSystem::new().update(&mut world, 0.01).unwrap();
        assert_eq!(
            world.events.pending(),
            &[GameEvent::PlayerDamaged {
                source: Some(shooter),
                amount: 10.0
            }]
        );
    }
}
