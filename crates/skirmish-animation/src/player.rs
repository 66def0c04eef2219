//! Per-object clip playback with cross-fading

use crate::blend::BonePose;
use crate::clip::{AnimationClip, AnimationSet};
use crate::sampler::{frame_bracket, sample_track, FrameBracket};
use skirmish_core::{NodeId, TransformGraph};
use std::collections::HashMap;
use std::sync::Arc;

/// Crossfade length used when callers have no preference
pub const DEFAULT_BLEND_DURATION: f32 = 0.2;

/// Reported once per player so callers can log without spamming every frame
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationDiagnostic {
    /// Result of the first pose application against the skeleton
    BoneMapping {
        clip: String,
        matched: usize,
        missing: Vec<String>,
    },
    /// `play` or `cross_fade` named a clip the set does not contain
    UnknownClip { name: String },
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    clip: usize,
    time: f32,
    looping: bool,
}

impl Cursor {
    /// Advance by `dt`. Returns false when a non-looping clip hit its end.
    fn advance(&mut self, duration: f32, dt: f32) -> bool {
        self.time += dt;
        if self.time < duration {
            return true;
        }
        if self.looping && duration > 0.0 {
            self.time %= duration;
            true
        } else {
            self.time = duration;
            false
        }
    }
}

/// Plays clips from a shared `AnimationSet` onto a skeleton in the
/// transform graph. Bones are matched to tracks by node name under the
/// owner's root; the root itself is never posed.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    set: Option<Arc<AnimationSet>>,
    current: Option<Cursor>,
    previous: Option<Cursor>,
    playing: bool,
    blend_timer: f32,
    blend_duration: f32,
    bones: Option<HashMap<String, NodeId>>,
    mapping_reported: bool,
    diagnostics: Vec<AnimationDiagnostic>,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(set: Arc<AnimationSet>) -> Self {
        let mut player = Self::new();
        player.set = Some(set);
        player
    }

    /// Swap the clip set. Playback and the bone binding are reset.
    pub fn set_animation_set(&mut self, set: Arc<AnimationSet>) {
        self.set = Some(set);
        self.current = None;
        self.previous = None;
        self.playing = false;
        self.bones = None;
    }

    pub fn animation_set(&self) -> Option<&Arc<AnimationSet>> {
        self.set.as_ref()
    }

    /// Drop the cached bone binding so the next update rebuilds it
    pub fn rebind(&mut self) {
        self.bones = None;
    }

    fn resolve(&mut self, name: &str) -> Option<usize> {
        let index = self.set.as_ref().and_then(|s| s.index_of(name));
        if index.is_none() {
            tracing::warn!(clip = name, "animation clip not found");
            self.diagnostics.push(AnimationDiagnostic::UnknownClip {
                name: name.to_string(),
            });
        }
        index
    }

    /// Start a clip immediately from time zero, cancelling any blend
    pub fn play(&mut self, name: &str, looping: bool) -> bool {
        let Some(clip) = self.resolve(name) else {
            return false;
        };
        self.current = Some(Cursor {
            clip,
            time: 0.0,
            looping,
        });
        self.previous = None;
        self.blend_timer = 0.0;
        self.playing = true;
        true
    }

    /// Blend from the current clip into `name` over `duration` seconds.
    ///
    /// Requesting the clip that is already current does nothing. With
    /// nothing playing this is the same as `play`.
    pub fn cross_fade(&mut self, name: &str, duration: f32, looping: bool) -> bool {
        let Some(clip) = self.resolve(name) else {
            return false;
        };
        let Some(current) = self.current else {
            return self.play(name, looping);
        };
        if current.clip == clip {
            return true;
        }
        if duration <= 0.0 {
            return self.play(name, looping);
        }

        self.previous = Some(current);
        self.current = Some(Cursor {
            clip,
            time: 0.0,
            looping,
        });
        self.blend_timer = 0.0;
        self.blend_duration = duration;
        self.playing = true;
        true
    }

    /// Freeze playback at the current time
    pub fn stop(&mut self) {
        self.playing = false;
        self.previous = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_blending(&self) -> bool {
        self.previous.is_some()
    }

    /// Weight of the incoming clip: 0 at blend start, 1 once the blend ends
    pub fn blend_weight(&self) -> f32 {
        if self.previous.is_some() && self.blend_duration > 0.0 {
            (self.blend_timer / self.blend_duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn current_time(&self) -> f32 {
        self.current.map(|c| c.time).unwrap_or(0.0)
    }

    pub fn current_clip(&self) -> Option<&AnimationClip> {
        let set = self.set.as_ref()?;
        set.clip(self.current?.clip)
    }

    pub fn current_clip_name(&self) -> Option<&str> {
        self.current_clip().map(|c| c.name.as_str())
    }

    /// Take queued diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<AnimationDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Advance time and write bone poses under `root`
    pub fn update(&mut self, dt: f32, graph: &mut TransformGraph, root: NodeId) {
        let Some(set) = self.set.clone() else {
            return;
        };
        let Some(mut current) = self.current else {
            return;
        };
        let Some(clip) = set.clip(current.clip) else {
            return;
        };

        if self.playing && !current.advance(clip.duration, dt) {
            self.playing = false;
        }
        self.current = Some(current);

        let weight = self.blend_weight();
        let previous = match self.previous.as_mut() {
            Some(prev) => match set.clip(prev.clip) {
                Some(prev_clip) => {
                    prev.advance(prev_clip.duration, dt);
                    Some((prev_clip, frame_bracket(prev_clip, prev.time)))
                }
                None => None,
            },
            None => None,
        };

        if self.bones.is_none() {
            self.bones = Some(graph.name_map(root));
        }
        let missing = match self.bones.as_ref() {
            Some(bones) => apply_clip(
                graph,
                root,
                bones,
                clip,
                frame_bracket(clip, current.time),
                previous,
                weight,
            ),
            None => Vec::new(),
        };

        if !self.mapping_reported {
            self.mapping_reported = true;
            let matched = clip.tracks.len() - missing.len();
            tracing::debug!(
                clip = %clip.name,
                matched,
                missing = missing.len(),
                "animation bone mapping"
            );
            self.diagnostics.push(AnimationDiagnostic::BoneMapping {
                clip: clip.name.clone(),
                matched,
                missing,
            });
        }

        if self.previous.is_some() {
            self.blend_timer += dt;
            if self.blend_timer >= self.blend_duration {
                self.previous = None;
            }
        }
    }
}

/// Write sampled poses for every resolvable track. Returns the bone names
/// that had no matching node.
fn apply_clip(
    graph: &mut TransformGraph,
    root: NodeId,
    bones: &HashMap<String, NodeId>,
    clip: &AnimationClip,
    bracket: FrameBracket,
    previous: Option<(&AnimationClip, FrameBracket)>,
    weight: f32,
) -> Vec<String> {
    let mut missing = Vec::new();
    for track in &clip.tracks {
        let Some(&node) = bones.get(&track.bone_name) else {
            missing.push(track.bone_name.clone());
            continue;
        };
        if node == root {
            continue;
        }
        let Some(pose) = sample_track(track, bracket) else {
            continue;
        };

        let from = previous.and_then(|(prev_clip, prev_bracket)| {
            prev_clip
                .track(&track.bone_name)
                .and_then(|t| sample_track(t, prev_bracket))
        });
        let pose = match from {
            Some(from) => from.blend(&pose, weight),
            None => pose,
        };
        write_pose(graph, node, &pose);
    }
    missing
}

fn write_pose(graph: &mut TransformGraph, node: NodeId, pose: &BonePose) {
    graph.set_position(node, pose.translation);
    graph.set_rotation_quat(node, pose.rotation);
    graph.set_scale(node, pose.scale);
    if let Some(n) = graph.get_mut(node) {
        n.local_override = glam::Mat4::IDENTITY;
    }
}
