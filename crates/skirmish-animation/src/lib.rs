//! Skeletal animation for Skirmish
//!
//! Clips are loaded from the tagged binary format into an immutable
//! `AnimationSet`, shared through `Arc` by every `AnimationPlayer` that plays
//! the same file. Players sample bone tracks at their time cursor, cross-fade
//! from the previous clip, and write poses into the transform graph by bone
//! name. `SkinnedMesh` turns the posed bones into skinning matrices.

pub mod blend;
pub mod clip;
pub mod library;
pub mod loader;
pub mod player;
pub mod sampler;
pub mod skinning;

pub use blend::BonePose;
pub use clip::{AnimationClip, AnimationSet, BoneTrack, Keyframe};
pub use library::ClipLibrary;
pub use loader::{load_clips, load_clips_from_file};
pub use player::{AnimationDiagnostic, AnimationPlayer, DEFAULT_BLEND_DURATION};
pub use skinning::{update_skinning, SkinnedMesh};
