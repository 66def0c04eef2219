//! Skinning matrices for meshes bound to a bone hierarchy

use glam::Mat4;
use skirmish_core::{NodeId, TransformGraph};

/// A skinned mesh: its node, its bones by name, and one inverse bind
/// matrix per bone.
///
/// Each output matrix takes a vertex from mesh space to the posed bone and
/// back into mesh space:
/// `skin[i] = inverse(mesh_world) * bone_world[i] * inverse_bind[i]`.
/// Matrices use glam's column-vector convention, so the product reads right
/// to left in the order applied to a vertex.
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    pub mesh_node: NodeId,
    pub bone_names: Vec<String>,
    pub inverse_bind: Vec<Mat4>,
    bone_nodes: Vec<Option<NodeId>>,
    matrices: Vec<Mat4>,
    bound: bool,
}

impl SkinnedMesh {
    pub fn new(mesh_node: NodeId, bones: Vec<(String, Mat4)>) -> Self {
        let (bone_names, inverse_bind): (Vec<_>, Vec<_>) = bones.into_iter().unzip();
        let count = bone_names.len();
        Self {
            mesh_node,
            bone_names,
            inverse_bind,
            bone_nodes: vec![None; count],
            matrices: vec![Mat4::IDENTITY; count],
            bound: false,
        }
    }

    /// Resolve bone names to nodes under `root`. Returns how many resolved.
    pub fn bind(&mut self, graph: &TransformGraph, root: NodeId) -> usize {
        let names = graph.name_map(root);
        self.bone_nodes = self
            .bone_names
            .iter()
            .map(|n| names.get(n).copied())
            .collect();
        self.bound = true;

        let resolved = self.bone_nodes.iter().flatten().count();
        if resolved < self.bone_names.len() {
            tracing::debug!(
                resolved,
                total = self.bone_names.len(),
                "skinned mesh has unresolved bones"
            );
        }
        resolved
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Recompute skin matrices from current world matrices.
    /// Unresolved bones yield identity.
    pub fn update(&mut self, graph: &TransformGraph) {
        let Some(mesh_world) = graph.world_matrix(self.mesh_node) else {
            return;
        };
        let to_mesh = mesh_world.inverse();
        for (i, node) in self.bone_nodes.iter().enumerate() {
            self.matrices[i] = match node.and_then(|n| graph.world_matrix(n)) {
                Some(bone_world) => to_mesh * bone_world * self.inverse_bind[i],
                None => Mat4::IDENTITY,
            };
        }
    }

    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }
}

/// Refresh world matrices under `root`, then every mesh's skin matrices.
///
/// Bone poses written this frame are not in the world matrices yet, so the
/// subtree is updated here before reading them.
pub fn update_skinning(graph: &mut TransformGraph, root: NodeId, meshes: &mut [SkinnedMesh]) {
    graph.update_world(root);
    for mesh in meshes.iter_mut() {
        if !mesh.is_bound() {
            mesh.bind(graph, root);
        }
        mesh.update(graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn rig() -> (TransformGraph, NodeId, NodeId, NodeId) {
        let mut graph = TransformGraph::new();
        let root = graph.create("Enemy");
        let mesh = graph.create_child(root, "Body").unwrap();
        let hips = graph.create_child(root, "Hips").unwrap();
        graph.set_position(mesh, Vec3::new(5.0, 0.0, 0.0));
        graph.set_position(hips, Vec3::new(0.0, 1.0, 0.0));
        graph.update_all();
        (graph, root, mesh, hips)
    }

    #[test]
    fn bind_pose_yields_mesh_relative_identity() {
        let (mut graph, root, mesh, hips) = rig();
        // Inverse bind expressed in mesh space
        let bind_in_mesh = graph.world_matrix(mesh).unwrap().inverse()
            * graph.world_matrix(hips).unwrap();
        let mut skinned = SkinnedMesh::new(mesh, vec![("Hips".into(), bind_in_mesh.inverse())]);
        let mut meshes = [skinned.clone()];
        update_skinning(&mut graph, root, &mut meshes);
        skinned = meshes[0].clone();

        let m = skinned.matrices()[0];
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn moved_bone_translates_skin() {
        let (mut graph, root, mesh, hips) = rig();
        let bind_in_mesh = graph.world_matrix(mesh).unwrap().inverse()
            * graph.world_matrix(hips).unwrap();
        let mut meshes = [SkinnedMesh::new(mesh, vec![("Hips".into(), bind_in_mesh.inverse())])];

        graph.set_position(hips, Vec3::new(0.0, 3.0, 0.0));
        update_skinning(&mut graph, root, &mut meshes);

        let p = meshes[0].matrices()[0].transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn unresolved_bone_is_identity() {
        let (mut graph, root, mesh, _) = rig();
        let mut meshes = [SkinnedMesh::new(
            mesh,
            vec![("Missing".into(), Mat4::from_translation(Vec3::X))],
        )];
        update_skinning(&mut graph, root, &mut meshes);
        assert_eq!(meshes[0].matrices()[0], Mat4::IDENTITY);
    }
}
