//! Enemy preset listing

use super::load_config;
use anyhow::Result;
use skirmish_game::{EnemySpawnData, EnemySpawner};
use std::path::Path;

pub fn run(config: Option<&Path>, format: &str) -> Result<()> {
    let config = load_config(config)?;
    let mut spawner = EnemySpawner::new();
    for preset in &config.enemy_presets {
        spawner.register(preset.clone());
    }
    let presets: Vec<&EnemySpawnData> = spawner.presets().collect();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&presets)?),
        "text" => {
            println!("{} preset(s):", presets.len());
            for preset in presets {
                print_preset(preset);
            }
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
    Ok(())
}

fn print_preset(preset: &EnemySpawnData) {
    let stats = &preset.stats;
    let attack = preset.attack.clone().unwrap_or_default().build();
    println!("  {}", preset.name);
    println!(
        "    hp {}  speed {}  range {}  cooldown {}s  detect {}",
        stats.max_hp, stats.move_speed, stats.attack_range, stats.attack_cooldown, stats.detection_range
    );
    println!("    attack: {}", attack.name());
    match &preset.animation {
        Some(path) => println!("    clips: {}", path.display()),
        None => println!("    clips: (none)"),
    }
}
