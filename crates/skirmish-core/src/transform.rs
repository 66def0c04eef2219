//! Hierarchical transform graph
//!
//! Nodes live in an arena and are addressed by `NodeId`. Children are linked
//! first-child/next-sibling, so attaching appends to the end of the sibling
//! chain and traversal order matches insertion order.

use crate::error::{Result, SkirmishError};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::collections::HashMap;

/// Index of a node inside a `TransformGraph`
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node rotation. Euler angles and quaternions are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    /// Degrees (pitch, yaw, roll), applied roll, then pitch, then yaw
    Euler(Vec3),
    /// Unit quaternion, written by animation
    Quat(Quat),
}

impl Rotation {
    pub fn to_quat(&self) -> Quat {
        match *self {
            Rotation::Euler(deg) => Quat::from_euler(
                EulerRot::YXZ,
                deg.y.to_radians(),
                deg.x.to_radians(),
                deg.z.to_radians(),
            ),
            Rotation::Quat(q) => q,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Euler(Vec3::ZERO)
    }
}

/// One node of the graph: local TRS, optional local matrix, cached world matrix
#[derive(Debug, Clone)]
pub struct TransformNode {
    pub name: String,
    pub position: Vec3,
    pub rotation: Rotation,
    pub scale: Vec3,
    /// Extra local matrix applied between the parent and this node's TRS
    pub local_override: Mat4,
    world: Mat4,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
    alive: bool,
}

impl TransformNode {
    fn new(name: String) -> Self {
        Self {
            name,
            position: Vec3::ZERO,
            rotation: Rotation::default(),
            scale: Vec3::ONE,
            local_override: Mat4::IDENTITY,
            world: Mat4::IDENTITY,
            parent: None,
            first_child: None,
            next_sibling: None,
            alive: true,
        }
    }

    /// Translation * rotation * scale
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation.to_quat(), self.position)
    }

    /// World matrix as of the last update pass
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena of transform nodes forming a forest
#[derive(Default)]
pub struct TransformGraph {
    nodes: Vec<TransformNode>,
    free: Vec<u32>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached root node
    pub fn create(&mut self, name: impl Into<String>) -> NodeId {
        let node = TransformNode::new(name.into());
        if let Some(slot) = self.free.pop() {
            self.nodes[slot as usize] = node;
            NodeId(slot)
        } else {
            self.nodes.push(node);
            NodeId(self.nodes.len() as u32 - 1)
        }
    }

    /// Create a node and attach it as the last child of `parent`
    pub fn create_child(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        let child = self.create(name);
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&TransformNode> {
        self.nodes.get(id.index()).filter(|n| n.alive)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TransformNode> {
        self.nodes.get_mut(id.index()).filter(|n| n.alive)
    }

    fn require(&self, id: NodeId) -> Result<&TransformNode> {
        self.get(id).ok_or(SkirmishError::NodeNotFound(id.0))
    }

    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|n| n.position)
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) {
        if let Some(node) = self.get_mut(id) {
            node.position = position;
        }
    }

    pub fn set_scale(&mut self, id: NodeId, scale: Vec3) {
        if let Some(node) = self.get_mut(id) {
            node.scale = scale;
        }
    }

    /// Set Euler rotation in degrees, switching the node to Euler mode
    pub fn set_euler(&mut self, id: NodeId, degrees: Vec3) {
        if let Some(node) = self.get_mut(id) {
            node.rotation = Rotation::Euler(degrees);
        }
    }

    /// Set quaternion rotation, switching the node to quaternion mode
    pub fn set_rotation_quat(&mut self, id: NodeId, rotation: Quat) {
        if let Some(node) = self.get_mut(id) {
            node.rotation = Rotation::Quat(rotation);
        }
    }

    /// Overwrite only the yaw, keeping pitch and roll of an Euler rotation
    pub fn set_yaw(&mut self, id: NodeId, yaw_degrees: f32) {
        if let Some(node) = self.get_mut(id) {
            let (pitch, roll) = match node.rotation {
                Rotation::Euler(deg) => (deg.x, deg.z),
                Rotation::Quat(_) => (0.0, 0.0),
            };
            node.rotation = Rotation::Euler(Vec3::new(pitch, yaw_degrees, roll));
        }
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.get(id).map(|n| n.world)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|n| n.world.w_axis.truncate())
    }

    /// World-space forward (+Z) of a node, from its cached world matrix
    pub fn look(&self, id: NodeId) -> Option<Vec3> {
        self.get(id)
            .map(|n| n.world.transform_vector3(Vec3::Z).normalize_or_zero())
    }

    /// Local forward computed from the current rotation, without an update pass
    pub fn local_look(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|n| n.rotation.to_quat() * Vec3::Z)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Direct children in sibling order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.get(id).and_then(|n| n.first_child);
        while let Some(child) = cursor {
            out.push(child);
            cursor = self.nodes[child.index()].next_sibling;
        }
        out
    }

    /// Whole subtree in pre-order, starting with `root`
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let children = self.children(id);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Attach `child` as the last child of `parent`, detaching it first
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.require(parent)?;
        self.require(child)?;
        if self.is_ancestor(child, parent) {
            return Err(SkirmishError::RuntimeError(format!(
                "attaching node {} under {} would create a cycle",
                child.0, parent.0
            )));
        }
        self.detach(child);

        match self.nodes[parent.index()].first_child {
            None => self.nodes[parent.index()].first_child = Some(child),
            Some(first) => {
                let mut last = first;
                while let Some(next) = self.nodes[last.index()].next_sibling {
                    last = next;
                }
                self.nodes[last.index()].next_sibling = Some(child);
            }
        }
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Unlink a node from its parent, making it a root
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        let next = self.nodes[child.index()].next_sibling;
        if self.nodes[parent.index()].first_child == Some(child) {
            self.nodes[parent.index()].first_child = next;
        } else {
            let mut cursor = self.nodes[parent.index()].first_child;
            while let Some(id) = cursor {
                if self.nodes[id.index()].next_sibling == Some(child) {
                    self.nodes[id.index()].next_sibling = next;
                    break;
                }
                cursor = self.nodes[id.index()].next_sibling;
            }
        }
        let node = &mut self.nodes[child.index()];
        node.parent = None;
        node.next_sibling = None;
    }

    /// Remove a node and its whole subtree, recycling their slots
    pub fn remove(&mut self, root: NodeId) {
        if !self.contains(root) {
            return;
        }
        self.detach(root);
        for id in self.subtree(root) {
            let node = &mut self.nodes[id.index()];
            node.alive = false;
            node.first_child = None;
            node.next_sibling = None;
            node.parent = None;
            self.free.push(id.0);
        }
    }

    /// First node named `name` in the subtree of `root` (pre-order)
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.subtree(root)
            .into_iter()
            .find(|id| self.nodes[id.index()].name == name)
    }

    /// Name -> node map for a subtree; the first node in pre-order wins a name
    pub fn name_map(&self, root: NodeId) -> HashMap<String, NodeId> {
        let mut map = HashMap::new();
        for id in self.subtree(root) {
            map.entry(self.nodes[id.index()].name.clone()).or_insert(id);
        }
        map
    }

    /// Recompute world matrices for `root` and everything below it.
    ///
    /// `world = parent_world * local_override * translation * rotation * scale`
    pub fn update_world(&mut self, root: NodeId) {
        let Some(node) = self.get(root) else {
            return;
        };
        let parent_world = node
            .parent
            .map(|p| self.nodes[p.index()].world)
            .unwrap_or(Mat4::IDENTITY);

        let mut stack = vec![(root, parent_world)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            node.world = parent_world * node.local_override * node.local_matrix();
            let world = node.world;
            let mut child = node.first_child;
            while let Some(c) = child {
                stack.push((c, world));
                child = self.nodes[c.index()].next_sibling;
            }
        }
    }

    /// Recompute every tree in the forest
    pub fn update_all(&mut self) {
        let roots: Vec<NodeId> = (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|id| {
                let n = &self.nodes[id.index()];
                n.alive && n.parent.is_none()
            })
            .collect();
        for root in roots {
            self.update_world(root);
        }
    }
}
