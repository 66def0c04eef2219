//! ObjectWorld - hecs storage plus the transform graph

use bimap::BiMap;
use glam::Vec3;
use skirmish_core::{EntityId, NodeId, Result, SkirmishError, TransformGraph};
use std::collections::{HashMap, HashSet};

/// Component linking a game object to its transform node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneNode(pub NodeId);

/// The game object world
///
/// Wraps hecs::World with:
/// - Stable EntityId mapping
/// - Named object lookup
/// - One transform node per object
pub struct ObjectWorld {
    /// The underlying hecs world
    ecs: hecs::World,
    /// Bidirectional mapping: EntityId <-> hecs::Entity
    id_map: BiMap<EntityId, hecs::Entity>,
    /// Object name -> EntityId mapping
    name_map: HashMap<String, EntityId>,
    /// Transform nodes of every object (and any unowned bone nodes)
    graph: TransformGraph,
}

impl Default for ObjectWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectWorld {
    pub fn new() -> Self {
        Self {
            ecs: hecs::World::new(),
            id_map: BiMap::new(),
            name_map: HashMap::new(),
            graph: TransformGraph::new(),
        }
    }

    /// Spawn a root game object with a unique name
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();
        if self.name_map.contains_key(&name) {
            return Err(SkirmishError::DuplicateEntityName(name));
        }

        let id = EntityId::new();
        let node = self.graph.create(name.clone());
        let entity = self.ecs.spawn((id, SceneNode(node)));

        self.id_map.insert(id, entity);
        self.name_map.insert(name, id);
        Ok(id)
    }

    /// Spawn a game object whose node is parented under another object's node
    pub fn spawn_child(&mut self, name: impl Into<String>, parent: EntityId) -> Result<EntityId> {
        let parent_node = self
            .node(parent)
            .ok_or_else(|| SkirmishError::EntityNotFound(parent.to_string()))?;
        let id = self.spawn(name)?;
        if let Some(node) = self.node(id) {
            self.graph.attach(parent_node, node)?;
        }
        Ok(id)
    }

    /// Despawn an object, its transform subtree, and any objects bound to that subtree
    pub fn despawn(&mut self, id: EntityId) -> Result<()> {
        let node = self
            .node(id)
            .ok_or_else(|| SkirmishError::EntityNotFound(id.to_string()))?;

        let doomed_nodes: HashSet<NodeId> = self.graph.subtree(node).into_iter().collect();
        let doomed: Vec<EntityId> = self
            .ecs
            .query::<(&EntityId, &SceneNode)>()
            .iter()
            .filter(|(_, (_, n))| doomed_nodes.contains(&n.0))
            .map(|(_, (eid, _))| *eid)
            .collect();

        for eid in doomed {
            if let Some((_, entity)) = self.id_map.remove_by_left(&eid) {
                let _ = self.ecs.despawn(entity);
            }
            self.name_map.retain(|_, v| *v != eid);
        }
        self.graph.remove(node);
        Ok(())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.id_map.contains_left(&id)
    }

    /// Number of live game objects
    pub fn len(&self) -> usize {
        self.id_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_map.is_empty()
    }

    pub fn entity(&self, id: EntityId) -> Option<hecs::Entity> {
        self.id_map.get_by_left(&id).copied()
    }

    pub fn id_of(&self, entity: hecs::Entity) -> Option<EntityId> {
        self.id_map.get_by_right(&entity).copied()
    }

    pub fn get_id(&self, name: &str) -> Option<EntityId> {
        self.name_map.get(name).copied()
    }

    pub fn get_name(&self, id: EntityId) -> Option<&str> {
        self.name_map
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }

    /// Transform node of an object
    pub fn node(&self, id: EntityId) -> Option<NodeId> {
        let entity = self.entity(id)?;
        self.ecs.get::<&SceneNode>(entity).ok().map(|n| n.0)
    }

    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.node(id).and_then(|n| self.graph.position(n))
    }

    pub fn set_position(&mut self, id: EntityId, position: Vec3) {
        if let Some(node) = self.node(id) {
            self.graph.set_position(node, position);
        }
    }

    /// Attach a component to an object
    pub fn insert<C: hecs::Component>(&mut self, id: EntityId, component: C) -> Result<()> {
        let entity = self
            .entity(id)
            .ok_or_else(|| SkirmishError::EntityNotFound(id.to_string()))?;
        self.ecs
            .insert_one(entity, component)
            .map_err(|_| SkirmishError::EntityNotFound(id.to_string()))
    }

    pub fn has<C: hecs::Component>(&self, id: EntityId) -> bool {
        self.entity(id)
            .map(|e| self.ecs.get::<&C>(e).is_ok())
            .unwrap_or(false)
    }

    pub fn get<C: hecs::Component>(&self, id: EntityId) -> Option<hecs::Ref<'_, C>> {
        let entity = self.entity(id)?;
        self.ecs.get::<&C>(entity).ok()
    }

    pub fn get_mut<C: hecs::Component>(&self, id: EntityId) -> Option<hecs::RefMut<'_, C>> {
        let entity = self.entity(id)?;
        self.ecs.get::<&mut C>(entity).ok()
    }

    pub fn ecs(&self) -> &hecs::World {
        &self.ecs
    }

    pub fn ecs_mut(&mut self) -> &mut hecs::World {
        &mut self.ecs
    }

    pub fn graph(&self) -> &TransformGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut TransformGraph {
        &mut self.graph
    }

    /// Borrow component storage and the transform graph at the same time
    pub fn split_mut(&mut self) -> (&mut hecs::World, &mut TransformGraph) {
        (&mut self.ecs, &mut self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(f32);

    #[test]
    fn spawn_binds_node_and_name() {
        let mut world = ObjectWorld::new();
        let id = world.spawn("player").unwrap();
        assert!(world.contains(id));
        assert_eq!(world.get_id("player"), Some(id));
        assert_eq!(world.get_name(id), Some("player"));

        let node = world.node(id).unwrap();
        assert_eq!(world.graph().get(node).unwrap().name, "player");
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut world = ObjectWorld::new();
        world.spawn("enemy").unwrap();
        assert!(matches!(
            world.spawn("enemy"),
            Err(SkirmishError::DuplicateEntityName(_))
        ));
    }

    #[test]
    fn components_round_trip() {
        let mut world = ObjectWorld::new();
        let id = world.spawn("enemy").unwrap();
        world.insert(id, Health(50.0)).unwrap();
        assert!(world.has::<Health>(id));

        world.get_mut::<Health>(id).unwrap().0 -= 20.0;
        assert_eq!(*world.get::<Health>(id).unwrap(), Health(30.0));
    }

    #[test]
    fn despawn_removes_child_objects() {
        let mut world = ObjectWorld::new();
        let parent = world.spawn("parent").unwrap();
        let child = world.spawn_child("child", parent).unwrap();
        let other = world.spawn("other").unwrap();

        world.despawn(parent).unwrap();
        assert!(!world.contains(parent));
        assert!(!world.contains(child));
        assert!(world.contains(other));
        assert_eq!(world.len(), 1);
        assert!(world.get_id("child").is_none());
    }

    #[test]
    fn position_reads_through_graph() {
        let mut world = ObjectWorld::new();
        let id = world.spawn("crate").unwrap();
        world.set_position(id, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(world.position(id), Some(Vec3::new(1.0, 2.0, 3.0)));
    }
}
