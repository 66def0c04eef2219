//! Pairwise collision detection with Enter/Stay/Exit tracking

use crate::collider::Collider;
use glam::Mat4;
use skirmish_core::EntityId;
use std::collections::HashSet;

/// Which list a collider lives in. Room colliders are dropped together on
/// room transitions; global ones persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderScope {
    Global,
    Room,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPhase {
    Enter,
    Stay,
    Exit,
}

/// One side of a collision notification. Every contact yields two events,
/// one addressed to each participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub phase: CollisionPhase,
    pub collider: EntityId,
    pub other: EntityId,
}

/// Unordered collider pair, smaller id first
type Pair = (EntityId, EntityId);

fn pair(a: EntityId, b: EntityId) -> Pair {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Default)]
pub struct CollisionManager {
    global: Vec<Collider>,
    room: Vec<Collider>,
    previous: HashSet<Pair>,
    current: HashSet<Pair>,
}

impl CollisionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider. A collider already registered for the same owner is replaced.
    pub fn register(&mut self, collider: Collider, scope: ColliderScope) {
        if self.unregister(collider.owner).is_some() {
            tracing::debug!(owner = %collider.owner, ?scope, "collider replaced");
        }
        match scope {
            ColliderScope::Global => self.global.push(collider),
            ColliderScope::Room => self.room.push(collider),
        }
    }

    pub fn unregister(&mut self, owner: EntityId) -> Option<Collider> {
        for list in [&mut self.global, &mut self.room] {
            if let Some(i) = list.iter().position(|c| c.owner == owner) {
                return Some(list.remove(i));
            }
        }
        None
    }

    /// Drop every room-scoped collider
    pub fn clear_room_colliders(&mut self) {
        tracing::debug!(count = self.room.len(), "room colliders cleared");
        self.room.clear();
    }

    /// Forget all contacts so nothing is reported as Stay or Exit next tick
    pub fn clear_collision_state(&mut self) {
        self.previous.clear();
        self.current.clear();
    }

    pub fn get(&self, owner: EntityId) -> Option<&Collider> {
        self.iter().find(|c| c.owner == owner)
    }

    pub fn get_mut(&mut self, owner: EntityId) -> Option<&mut Collider> {
        self.global
            .iter_mut()
            .chain(self.room.iter_mut())
            .find(|c| c.owner == owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.global.iter().chain(self.room.iter())
    }

    pub fn len(&self) -> usize {
        self.global.len() + self.room.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_enabled(&mut self, owner: EntityId, enabled: bool) {
        if let Some(c) = self.get_mut(owner) {
            c.enabled = enabled;
        }
    }

    /// Refresh a collider's world box from its owner's world matrix
    pub fn sync_transform(&mut self, owner: EntityId, world: &Mat4) {
        if let Some(c) = self.get_mut(owner) {
            c.sync(world);
        }
    }

    /// Whether two owners were touching at the end of the last update
    pub fn is_touching(&self, a: EntityId, b: EntityId) -> bool {
        self.current.contains(&pair(a, b))
    }

    /// Test all unique pairs and report transitions since the last update.
    ///
    /// Exit is reported only while both colliders are still registered.
    pub fn update(&mut self) -> Vec<CollisionEvent> {
        self.previous = std::mem::take(&mut self.current);
        let mut events = Vec::new();

        let all: Vec<&Collider> = self.global.iter().chain(self.room.iter()).collect();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                let (a, b) = (all[i], all[j]);
                if !a.enabled || !b.enabled {
                    continue;
                }
                if !a.should_collide_with(b) || !a.intersects(b) {
                    continue;
                }
                let key = pair(a.owner, b.owner);
                self.current.insert(key);
                let phase = if self.previous.contains(&key) {
                    CollisionPhase::Stay
                } else {
                    CollisionPhase::Enter
                };
                push_both(&mut events, phase, a.owner, b.owner);
            }
        }

        let mut exits: Vec<Pair> = self.previous.difference(&self.current).copied().collect();
        exits.sort();
        for (a, b) in exits {
            let present = |id: EntityId| all.iter().any(|c| c.owner == id);
            if present(a) && present(b) {
                push_both(&mut events, CollisionPhase::Exit, a, b);
            } else {
                tracing::trace!(a = %a, b = %b, "exit dropped, collider unregistered");
            }
        }

        events
    }
}

fn push_both(events: &mut Vec<CollisionEvent>, phase: CollisionPhase, a: EntityId, b: EntityId) {
    events.push(CollisionEvent {
        phase,
        collider: a,
        other: b,
    });
    events.push(CollisionEvent {
        phase,
        collider: b,
        other: a,
    });
}
