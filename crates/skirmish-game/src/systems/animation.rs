use crate::world::GameWorld;
use skirmish_ai::Enemy;
use skirmish_animation::{update_skinning, AnimationDiagnostic, AnimationPlayer, SkinnedMesh};
use skirmish_core::{EntityId, Result};
use skirmish_ecs::SceneNode;
use skirmish_runtime::RuntimeSystem;

/// Skinned meshes driven by the object's skeleton
#[derive(Debug, Clone, Default)]
pub struct Skin {
    pub meshes: Vec<SkinnedMesh>,
}

/// Applies enemy animation requests, advances every player and refreshes
/// skinning matrices
pub struct AnimationSystem;

impl AnimationSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn report(owner: EntityId, diagnostic: AnimationDiagnostic) {
    match diagnostic {
        AnimationDiagnostic::BoneMapping {
            clip,
            matched,
            missing,
        } => {
            if missing.is_empty() {
                tracing::info!(object = %owner, clip = %clip, matched, "bone mapping complete");
            } else {
                tracing::warn!(
                    object = %owner,
                    clip = %clip,
                    matched,
                    missing = missing.len(),
                    first_missing = %missing[0],
                    "clip tracks without matching bones"
                );
            }
        }
        AnimationDiagnostic::UnknownClip { name } => {
            tracing::warn!(object = %owner, clip = %name, "unknown animation clip");
        }
    }
}

impl RuntimeSystem<GameWorld> for AnimationSystem {
    fn initialize(&mut self, _world: &mut GameWorld) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, dt: f64) -> Result<()> {
        let dt = dt as f32;
        let (ecs, graph) = world.objects.split_mut();

        for (_, (id, node, enemy, player)) in ecs.query_mut::<(
            &EntityId,
            &SceneNode,
            Option<&mut Enemy>,
            &mut AnimationPlayer,
        )>() {
            if let Some(request) = enemy.and_then(|e| e.take_animation_request()) {
                player.cross_fade(&request.clip, request.fade, request.looping);
            }
            player.update(dt, graph, node.0);
            for diagnostic in player.take_diagnostics() {
                report(*id, diagnostic);
            }
        }

        for (_, (node, skin)) in ecs.query_mut::<(&SceneNode, &mut Skin)>() {
            update_skinning(graph, node.0, &mut skin.meshes);
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "animation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::{Mat4, Quat, Vec3};
    use skirmish_ai::EnemyStats;
    use skirmish_animation::{AnimationClip, AnimationSet, BoneTrack, Keyframe};
    use std::sync::Arc;

    fn clip(name: &str, bone: &str, x: f32) -> AnimationClip {
        let key = |frame: i32| Keyframe {
            frame_index: frame,
            position: Vec3::new(x, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        };
        AnimationClip::new(
            name,
            1.0,
            2.0,
            2,
            vec![BoneTrack {
                bone_name: bone.into(),
                keyframes: vec![key(0), key(1)],
            }],
        )
    }

    fn world() -> GameWorld {
        GameWorld::new(GameConfig {
            seed: Some(4),
            rooms: Vec::new(),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn enemy_requests_become_cross_fades() {
        let mut world = world();
        let id = world.objects.spawn("Rigged").unwrap();
        let root = world.objects.node(id).unwrap();
        let arm = world.objects.graph_mut().create_child(root, "Arm").unwrap();

        let set = Arc::new(AnimationSet::from_clips(vec![
            clip("idle", "Arm", 1.0),
            clip("hit", "Arm", 5.0),
        ]));
        let mut player = AnimationPlayer::with_set(set);
        player.play("idle", true);
        world.objects.insert(id, player).unwrap();

        let mut enemy = Enemy::new(EnemyStats::default());
        enemy.take_damage(10.0);
        world.objects.insert(id, enemy).unwrap();

        let mut system = AnimationSystem::new();
        system.update(&mut world, 0.05).unwrap();
        {
            let player = world.objects.get::<AnimationPlayer>(id).unwrap();
            assert_eq!(player.current_clip_name(), Some("hit"));
            assert!(player.is_blending());
        }

        for _ in 0..10 {
            system.update(&mut world, 0.05).unwrap();
        }
        let x = world.objects.graph().position(arm).unwrap().x;
        assert!((x - 5.0).abs() < 1e-3, "x = {x}");
    }

    #[test]
    fn skins_follow_their_bones() {
        let mut world = world();
        let id = world.objects.spawn("Skinned").unwrap();
        let root = world.objects.node(id).unwrap();
        let graph = world.objects.graph_mut();
        let bone = graph.create_child(root, "Bone").unwrap();
        let mesh = graph.create_child(root, "Mesh").unwrap();
        graph.update_all();

        let skinned = SkinnedMesh::new(mesh, vec![("Bone".into(), Mat4::IDENTITY)]);
        world
            .objects
            .insert(id, Skin { meshes: vec![skinned] })
            .unwrap();
        world
            .objects
            .graph_mut()
            .set_position(bone, Vec3::new(0.0, 2.0, 0.0));

        AnimationSystem::new().update(&mut world, 0.016).unwrap();

        let skin = world.objects.get::<Skin>(id).unwrap();
        let matrix = skin.meshes[0].matrices()[0];
        assert!((matrix.w_axis.y - 2.0).abs() < 1e-5);
    }
}
