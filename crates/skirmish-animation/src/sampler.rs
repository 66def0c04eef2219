//! Frame-indexed track sampling
//!
//! Keyframes are stored one per frame, so sampling maps time to a frame
//! position and interpolates between the two bracketing entries.

use crate::blend::BonePose;
use crate::clip::{AnimationClip, BoneTrack};

/// Bracketing frames and interpolation ratio for a time in a clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBracket {
    pub current: usize,
    pub next: usize,
    pub ratio: f32,
}

/// Map clip time to bracketing frame indices.
///
/// At or past the last frame both indices clamp to it with ratio 0.
pub fn frame_bracket(clip: &AnimationClip, time: f32) -> FrameBracket {
    let frame = (time * clip.frame_rate).max(0.0);
    let current = frame.floor() as usize;
    let last = (clip.total_frames.max(1) - 1) as usize;

    if current >= last {
        FrameBracket {
            current: last,
            next: last,
            ratio: 0.0,
        }
    } else {
        FrameBracket {
            current,
            next: current + 1,
            ratio: frame - current as f32,
        }
    }
}

/// Sample one bone track. Returns `None` when the track has no keyframe at
/// either bracketing index, leaving that bone untouched.
pub fn sample_track(track: &BoneTrack, bracket: FrameBracket) -> Option<BonePose> {
    let a = track.keyframes.get(bracket.current)?;
    let b = track.keyframes.get(bracket.next)?;
    let from = BonePose::from_keyframe(a);
    if bracket.ratio == 0.0 {
        return Some(from);
    }
    Some(from.blend(&BonePose::from_keyframe(b), bracket.ratio))
}

/// Sample a bone by name in a clip at a time
pub fn sample_bone(clip: &AnimationClip, bone_name: &str, time: f32) -> Option<BonePose> {
    let track = clip.track(bone_name)?;
    sample_track(track, frame_bracket(clip, time))
}
