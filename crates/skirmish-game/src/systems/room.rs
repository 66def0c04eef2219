use crate::drop_item::{DropItem, Interactable};
use crate::room::{Room, RoomState, RoomTransition};
use crate::spawner::SpawnContext;
use crate::world::GameWorld;
use glam::Vec3;
use skirmish_ai::Enemy;
use skirmish_core::{EntityId, Result};
use skirmish_ecs::SceneNode;
use skirmish_physics::{Collider, ColliderScope, CollisionLayer};
use skirmish_runtime::{GameEvent, RuntimeSystem};

/// Height drops float at above the room floor
pub const DROP_HEIGHT: f32 = 1.0;

/// Activates rooms, spawns their enemies, hands out rewards and removes
/// finished objects
pub struct RoomSystem;

impl RoomSystem {
    pub fn new() -> Self {
        Self
    }

    fn update_rooms(world: &mut GameWorld) {
        let player_position = world.player_position();
        let player = world.player;
        let GameWorld {
            rooms,
            spawner,
            objects,
            collisions,
            clips,
            events,
            stats,
            current_room,
            ..
        } = world;

        let mut cleared = Vec::new();
        for room in rooms.iter_mut() {
            if room.state() == RoomState::Inactive && room.contains(player_position) {
                // Leftovers from the previous room stop colliding
                collisions.clear_room_colliders();
                collisions.clear_collision_state();
            }

            let transitions = room.update(player_position, |index, entry| {
                let mut ctx = SpawnContext {
                    objects: &mut *objects,
                    collisions: &mut *collisions,
                    clips: &mut *clips,
                };
                match spawner.spawn(&mut ctx, index, &entry.preset, entry.position, Some(player)) {
                    Ok(id) => {
                        stats.enemies_spawned += 1;
                        Some(id)
                    }
                    Err(err) => {
                        tracing::warn!(room = index, preset = %entry.preset, error = %err, "spawn failed");
                        None
                    }
                }
            });

            for transition in transitions {
                match transition {
                    RoomTransition::Activated => {
                        *current_room = Some(room.index());
                        events.push(GameEvent::RoomActivated { room: room.index() });
                    }
                    RoomTransition::Cleared => {
                        stats.rooms_cleared += 1;
                        events.push(GameEvent::RoomCleared { room: room.index() });
                        cleared.push(room.index());
                    }
                }
            }
        }

        for index in cleared {
            Self::spawn_drop(world, index);
        }
    }

    fn spawn_drop(world: &mut GameWorld, index: usize) {
        let Some(room) = world.rooms.get(index) else {
            return;
        };
        let center = room.center();
        let base_y = room.bounds().min.y.max(0.0) + DROP_HEIGHT;
        let name = format!("Drop_{}_{}", room.name(), index);

        let id = match world.objects.spawn(name) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(room = index, error = %err, "could not create room reward");
                return;
            }
        };
        world
            .objects
            .set_position(id, Vec3::new(center.x, base_y, center.z));
        let item = DropItem::new(&mut world.rng, index, base_y);
        let interactable = Interactable::new(world.config.player.interaction_distance);
        if let Err(err) = world
            .objects
            .insert(id, item)
            .and_then(|_| world.objects.insert(id, interactable))
        {
            tracing::warn!(room = index, error = %err, "could not equip room reward");
            return;
        }
        world.collisions.register(
            Collider::new(id, CollisionLayer::PICKUP),
            ColliderScope::Room,
        );
        if let Some(room) = world.rooms.get_mut(index) {
            room.set_drop_item(Some(id));
        }
        world.events.push(GameEvent::DropSpawned { room: index, drop: id });
        tracing::info!(room = index, drop = %id, "reward dropped");
    }

    /// Bob active drops and collect the ones that were used
    fn animate_drops(world: &mut GameWorld, dt: f32) -> Vec<EntityId> {
        let (ecs, graph) = world.objects.split_mut();
        let mut used = Vec::new();
        for (_, (id, node, item)) in ecs.query_mut::<(&EntityId, &SceneNode, &mut DropItem)>() {
            if !item.is_active() {
                used.push(*id);
                continue;
            }
            let y = item.bob(dt);
            if let Some(mut position) = graph.position(node.0) {
                position.y = y;
                graph.set_position(node.0, position);
            }
        }
        used
    }

    fn remove(world: &mut GameWorld, id: EntityId) {
        world.collisions.unregister(id);
        if let Err(err) = world.objects.despawn(id) {
            tracing::debug!(object = %id, error = %err, "already removed");
        }
        for room in world.rooms.iter_mut() {
            if room.drop_item() == Some(id) {
                room.set_drop_item(None);
            }
        }
        if world.interaction.nearby == Some(id) {
            world.interaction.nearby = None;
        }
        if world.interaction.open == Some(id) {
            world.interaction.open = None;
        }
    }
}

impl Default for RoomSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<GameWorld> for RoomSystem {
    fn initialize(&mut self, world: &mut GameWorld) -> Result<()> {
        tracing::info!(
            rooms = world.rooms.len(),
            names = ?world.rooms.iter().map(Room::name).collect::<Vec<_>>(),
            "rooms ready"
        );
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, dt: f64) -> Result<()> {
        Self::update_rooms(world);

        let mut finished = Self::animate_drops(world, dt as f32);
        finished.extend(
            world
                .objects
                .ecs()
                .query::<(&EntityId, &Enemy)>()
                .iter()
                .filter(|(_, (_, enemy))| enemy.is_ready_for_removal())
                .map(|(_, (id, _))| *id),
        );
        for id in finished {
            Self::remove(world, id);
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "room"
    }
}
