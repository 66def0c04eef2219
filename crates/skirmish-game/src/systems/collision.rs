use crate::world::GameWorld;
use skirmish_core::{EntityId, Result};
use skirmish_physics::CollisionPhase;
use skirmish_runtime::{GameEvent, RuntimeSystem};

/// Moves colliders to their owners' world transforms and reports contacts
pub struct CollisionSystem;

impl CollisionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<GameWorld> for CollisionSystem {
    fn initialize(&mut self, _world: &mut GameWorld) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, _dt: f64) -> Result<()> {
        let owners: Vec<EntityId> = world.collisions.iter().map(|c| c.owner).collect();
        for owner in owners {
            let matrix = world
                .objects
                .node(owner)
                .and_then(|node| world.objects.graph().world_matrix(node));
            match matrix {
                Some(matrix) => world.collisions.sync_transform(owner, &matrix),
                None => {
                    tracing::debug!(owner = %owner, "dropping collider of a removed object");
                    world.collisions.unregister(owner);
                }
            }
        }

        for event in world.collisions.update() {
            let (entity_a, entity_b) = (event.collider, event.other);
            world.events.push(match event.phase {
                CollisionPhase::Enter => GameEvent::CollisionStarted { entity_a, entity_b },
                CollisionPhase::Stay => GameEvent::CollisionStay { entity_a, entity_b },
                CollisionPhase::Exit => GameEvent::CollisionEnded { entity_a, entity_b },
            });
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "collision"
    }
}
