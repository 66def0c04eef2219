//! Animation clip data model

use glam::{Quat, Vec3};
use std::collections::HashMap;

/// One sampled bone pose at a frame index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame_index: i32,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// Keyframes of a single bone, joined to the transform graph by name
#[derive(Debug, Clone)]
pub struct BoneTrack {
    pub bone_name: String,
    /// Indexed by frame number
    pub keyframes: Vec<Keyframe>,
}

/// A named clip. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Seconds
    pub duration: f32,
    /// Frames per second
    pub frame_rate: f32,
    pub total_frames: i32,
    pub tracks: Vec<BoneTrack>,
    track_lookup: HashMap<String, usize>,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        frame_rate: f32,
        total_frames: i32,
        tracks: Vec<BoneTrack>,
    ) -> Self {
        let mut track_lookup = HashMap::new();
        for (i, track) in tracks.iter().enumerate() {
            track_lookup.entry(track.bone_name.clone()).or_insert(i);
        }
        Self {
            name: name.into(),
            duration,
            frame_rate,
            total_frames,
            tracks,
            track_lookup,
        }
    }

    /// Track for a bone, if the clip animates it
    pub fn track(&self, bone_name: &str) -> Option<&BoneTrack> {
        self.track_lookup.get(bone_name).map(|&i| &self.tracks[i])
    }
}

/// All clips loaded from one file, addressable by name and by index
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: Vec<AnimationClip>,
    by_name: HashMap<String, usize>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_clips(clips: Vec<AnimationClip>) -> Self {
        let mut set = Self::new();
        for clip in clips {
            set.add_clip(clip);
        }
        set
    }

    /// Append a clip. A later clip with the same name shadows name lookup.
    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.by_name.insert(clip.name.clone(), self.clips.len());
        self.clips.push(clip);
    }

    pub fn clip(&self, index: usize) -> Option<&AnimationClip> {
        self.clips.get(index)
    }

    pub fn clip_by_name(&self, name: &str) -> Option<&AnimationClip> {
        self.index_of(name).and_then(|i| self.clips.get(i))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str) -> AnimationClip {
        AnimationClip::new(
            name,
            1.0,
            30.0,
            30,
            vec![BoneTrack {
                bone_name: "Hips".into(),
                keyframes: vec![],
            }],
        )
    }

    #[test]
    fn set_lookup_by_name_and_index() {
        let set = AnimationSet::from_clips(vec![clip("idle"), clip("run")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of("run"), Some(1));
        assert_eq!(set.clip(0).unwrap().name, "idle");
        assert!(set.clip_by_name("jump").is_none());
    }

    #[test]
    fn track_lookup_by_bone() {
        let c = clip("idle");
        assert!(c.track("Hips").is_some());
        assert!(c.track("Head").is_none());
    }
}
