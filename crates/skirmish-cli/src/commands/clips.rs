//! Animation file inspection

use anyhow::{Context, Result};
use skirmish_animation::load_clips_from_file;
use std::path::Path;

pub fn run(file: &Path, tracks: bool) -> Result<()> {
    let set = load_clips_from_file(file)
        .with_context(|| format!("Failed to load clips from {}", file.display()))?;

    println!("{}: {} clip(s)", file.display(), set.clips().len());
    for clip in set.clips() {
        println!(
            "  {} ({:.2}s, {} frames at {} fps, {} tracks)",
            clip.name,
            clip.duration,
            clip.total_frames,
            clip.frame_rate,
            clip.tracks.len()
        );
        if tracks {
            for track in &clip.tracks {
                println!("    {} [{} keyframes]", track.bone_name, track.keyframes.len());
            }
        }
    }
    Ok(())
}
