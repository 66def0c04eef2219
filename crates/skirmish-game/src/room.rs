//! Room encounter lifecycle

use crate::config::{RoomConfig, SpawnEntry};
use glam::Vec3;
use skirmish_core::EntityId;
use skirmish_physics::Aabb;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomState {
    #[default]
    Inactive,
    Active,
    Cleared,
}

/// State changes reported by [`Room::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomTransition {
    Activated,
    Cleared,
}

/// An encounter area. Entering the bounds spawns the room's enemies once;
/// the room clears when every registered enemy has died.
///
/// Deaths arrive through [`Room::notify_death`] and are only counted during
/// `update`, so nothing reaches back into the room from enemy code.
#[derive(Debug, Clone)]
pub struct Room {
    index: usize,
    name: String,
    bounds: Aabb,
    spawns: Vec<SpawnEntry>,
    state: RoomState,
    enemies: Vec<EntityId>,
    dead: HashSet<EntityId>,
    death_queue: Vec<EntityId>,
    drop: Option<EntityId>,
}

impl Room {
    pub fn new(index: usize, name: impl Into<String>, bounds: Aabb, spawns: Vec<SpawnEntry>) -> Self {
        Self {
            index,
            name: name.into(),
            bounds,
            spawns,
            state: RoomState::Inactive,
            enemies: Vec::new(),
            dead: HashSet::new(),
            death_queue: Vec::new(),
            drop: None,
        }
    }

    pub fn from_config(index: usize, config: &RoomConfig) -> Self {
        let name = if config.name.is_empty() {
            format!("Room{index}")
        } else {
            config.name.clone()
        };
        Self::new(index, name, Aabb::new(config.min, config.max), config.spawns.clone())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn center(&self) -> Vec3 {
        self.bounds.center()
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn spawns(&self) -> &[SpawnEntry] {
        &self.spawns
    }

    pub fn enemies(&self) -> &[EntityId] {
        &self.enemies
    }

    pub fn alive_count(&self) -> usize {
        self.enemies.len() - self.dead.len()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.bounds.contains(point)
    }

    pub fn register_enemy(&mut self, enemy: EntityId) {
        if !self.enemies.contains(&enemy) {
            self.enemies.push(enemy);
        }
    }

    /// Queue a death; it is counted on the next update
    pub fn notify_death(&mut self, enemy: EntityId) {
        self.death_queue.push(enemy);
    }

    pub fn drop_item(&self) -> Option<EntityId> {
        self.drop
    }

    pub fn set_drop_item(&mut self, drop: Option<EntityId>) {
        self.drop = drop;
    }

    /// Run one tick of the encounter.
    ///
    /// `spawn` is called once per spawn entry when the room activates and
    /// returns the new enemy's id, or `None` if the spawn failed.
    pub fn update<F>(&mut self, player_position: Vec3, mut spawn: F) -> Vec<RoomTransition>
    where
        F: FnMut(usize, &SpawnEntry) -> Option<EntityId>,
    {
        let mut transitions = Vec::new();

        if self.state == RoomState::Inactive && self.bounds.contains(player_position) {
            self.state = RoomState::Active;
            for entry in &self.spawns {
                if let Some(enemy) = spawn(self.index, entry) {
                    if !self.enemies.contains(&enemy) {
                        self.enemies.push(enemy);
                    }
                }
            }
            tracing::info!(
                room = self.index,
                name = %self.name,
                enemies = self.enemies.len(),
                "room activated"
            );
            transitions.push(RoomTransition::Activated);
        }

        if self.state != RoomState::Active {
            self.death_queue.clear();
            return transitions;
        }

        for enemy in self.death_queue.drain(..) {
            if self.enemies.contains(&enemy) {
                self.dead.insert(enemy);
            }
        }

        if self.dead.len() >= self.enemies.len() {
            self.state = RoomState::Cleared;
            tracing::info!(room = self.index, name = %self.name, "room cleared");
            transitions.push(RoomTransition::Cleared);
        }

        transitions
    }
}
