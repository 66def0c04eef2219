use crate::world::GameWorld;
use skirmish_ai::Enemy;
use skirmish_combat::AttackContext;
use skirmish_core::{EntityId, Result};
use skirmish_ecs::SceneNode;
use skirmish_runtime::RuntimeSystem;

/// Ticks every enemy's state machine against the player
pub struct EnemySystem;

impl EnemySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnemySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<GameWorld> for EnemySystem {
    fn initialize(&mut self, _world: &mut GameWorld) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, dt: f64) -> Result<()> {
        let dt = dt as f32;
        let player = world.player;
        // A dead player is no longer a target
        let player_position = world
            .is_player_alive()
            .then(|| world.player_position());

        let (ecs, graph) = world.objects.split_mut();
        for (_, (id, node, enemy)) in ecs.query_mut::<(&EntityId, &SceneNode, &mut Enemy)>() {
            let target = match enemy.target() {
                Some(target) if target == player => player_position,
                _ => None,
            };
            let mut ctx = AttackContext {
                graph: &mut *graph,
                node: node.0,
                owner: *id,
                target,
                projectiles: &mut world.projectiles,
                events: &mut world.events,
            };
            enemy.update(dt, &mut ctx);
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "enemy"
    }
}
