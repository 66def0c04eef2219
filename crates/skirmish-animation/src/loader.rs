//! Binary clip file loading
//!
//! The file is a little-endian stream of tagged fields. Strings are a 7-bit
//! variable-length byte count followed by UTF-8 bytes. Layout:
//!
//! ```text
//! "<ClipCount>:" i32
//! per clip:
//!   "<Clip>:" name
//!   "<Duration>:" f32
//!   "<FrameRate>:" f32
//!   "<TotalFrames>:" i32
//!   "<KeyframeTracks>:" i32
//!   per track:
//!     "<TrackBoneName>:" name
//!     "<Keyframes>:" i32
//!     per keyframe: i32 frame, 3 x f32 position, 4 x f32 rotation (xyzw), 3 x f32 scale
//!   "</Clip>"
//! ```
//!
//! Any tag mismatch or truncation fails the whole load.

use crate::clip::{AnimationClip, AnimationSet, BoneTrack, Keyframe};
use glam::{Quat, Vec3};
use skirmish_core::{Result, SkirmishError};
use std::path::Path;

const TAG_CLIP_COUNT: &str = "<ClipCount>:";
const TAG_CLIP: &str = "<Clip>:";
const TAG_DURATION: &str = "<Duration>:";
const TAG_FRAME_RATE: &str = "<FrameRate>:";
const TAG_TOTAL_FRAMES: &str = "<TotalFrames>:";
const TAG_TRACKS: &str = "<KeyframeTracks>:";
const TAG_BONE_NAME: &str = "<TrackBoneName>:";
const TAG_KEYFRAMES: &str = "<Keyframes>:";
const TAG_CLIP_END: &str = "</Clip>";

/// Bytes per keyframe record: i32 + 10 x f32
const KEYFRAME_BYTES: usize = 44;

/// Load every clip from a file
pub fn load_clips_from_file(path: &Path) -> Result<AnimationSet> {
    let bytes = std::fs::read(path).map_err(|e| {
        SkirmishError::AnimationError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    load_clips(&bytes).map_err(|e| match e {
        SkirmishError::AnimationError(msg) => {
            SkirmishError::AnimationError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse every clip from an in-memory buffer
pub fn load_clips(bytes: &[u8]) -> Result<AnimationSet> {
    let mut reader = Reader::new(bytes);

    reader.expect_tag(TAG_CLIP_COUNT)?;
    let count = reader.read_count("clip count")?;

    let mut set = AnimationSet::new();
    for _ in 0..count {
        set.add_clip(read_clip(&mut reader)?);
    }
    Ok(set)
}

fn read_clip(reader: &mut Reader<'_>) -> Result<AnimationClip> {
    reader.expect_tag(TAG_CLIP)?;
    let name = reader.read_string()?;
    reader.expect_tag(TAG_DURATION)?;
    let duration = reader.read_f32()?;
    reader.expect_tag(TAG_FRAME_RATE)?;
    let frame_rate = reader.read_f32()?;
    reader.expect_tag(TAG_TOTAL_FRAMES)?;
    let total_frames = reader.read_i32()?;
    reader.expect_tag(TAG_TRACKS)?;
    let track_count = reader.read_count("track count")?;

    let mut tracks = Vec::new();
    for _ in 0..track_count {
        reader.expect_tag(TAG_BONE_NAME)?;
        let bone_name = reader.read_string()?;
        reader.expect_tag(TAG_KEYFRAMES)?;
        let key_count = reader.read_count("keyframe count")?;
        if key_count.saturating_mul(KEYFRAME_BYTES) > reader.remaining() {
            return Err(reader.error(format!(
                "track '{}' declares {} keyframes but the file is too short",
                bone_name, key_count
            )));
        }

        let mut keyframes = Vec::with_capacity(key_count);
        for _ in 0..key_count {
            let frame_index = reader.read_i32()?;
            let position = reader.read_vec3()?;
            let rotation = Quat::from_xyzw(
                reader.read_f32()?,
                reader.read_f32()?,
                reader.read_f32()?,
                reader.read_f32()?,
            );
            let scale = reader.read_vec3()?;
            keyframes.push(Keyframe {
                frame_index,
                position,
                rotation,
                scale,
            });
        }
        tracks.push(BoneTrack {
            bone_name,
            keyframes,
        });
    }

    reader.expect_tag(TAG_CLIP_END)?;
    Ok(AnimationClip::new(name, duration, frame_rate, total_frames, tracks))
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn error(&self, msg: impl std::fmt::Display) -> SkirmishError {
        SkirmishError::AnimationError(format!("{} (at byte {})", msg, self.pos))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(self.error(format!("unexpected end of data reading {} bytes", n)));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    fn read_count(&mut self, what: &str) -> Result<usize> {
        let n = self.read_i32()?;
        usize::try_from(n).map_err(|_| self.error(format!("negative {}: {}", what, n)))
    }

    /// 7-bit encoded length, at most five bytes
    fn read_string_len(&mut self) -> Result<usize> {
        let mut value: u32 = 0;
        for shift in (0..35).step_by(7) {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value as usize);
            }
        }
        Err(self.error("malformed string length"))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_string_len()?;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|e| self.error(format!("invalid UTF-8: {}", e)))
    }

    fn expect_tag(&mut self, tag: &str) -> Result<()> {
        let start = self.pos;
        let found = self.read_string()?;
        if found != tag {
            return Err(SkirmishError::AnimationError(format!(
                "expected tag '{}' but found '{}' (at byte {})",
                tag, found, start
            )));
        }
        Ok(())
    }
}
