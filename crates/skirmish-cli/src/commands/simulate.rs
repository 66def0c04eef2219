//! Headless scripted encounter

use super::load_config;
use anyhow::{Context, Result};
use glam::Vec3;
use serde::Serialize;
use skirmish_game::{EncounterStats, GameWorld, RoomState, Scene};
use skirmish_runtime::init_tracing;
use std::collections::HashSet;
use std::path::PathBuf;
use winit::keyboard::KeyCode;

/// Distance at which the pilot stops walking toward a point
const ARRIVE_DISTANCE: f32 = 0.5;

/// The pilot closes in on enemies further away than this
const ENGAGE_DISTANCE: f32 = 25.0;

pub struct SimulateArgs {
    pub config: Option<PathBuf>,
    pub frames: u64,
    pub dt: f64,
    pub format: String,
}

#[derive(Debug, Serialize)]
struct RoomSummary {
    name: String,
    state: String,
    enemies: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    time: f64,
    player_hp: f32,
    player_alive: bool,
    rooms: Vec<RoomSummary>,
    stats: EncounterStats,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        anyhow::bail!("Unknown format: {}", args.format);
    }
    if args.dt <= 0.0 {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }

    let config = load_config(args.config.as_deref())?;
    init_tracing(&config.logging);

    let mut scene = Scene::new(config).context("Failed to build the scene")?;
    scene.initialize()?;

    let mut pilot = Pilot::default();
    for _ in 0..args.frames {
        let plan = pilot.plan(scene.world_mut());
        if plan.finished {
            tracing::info!("every room cleared");
            break;
        }
        pilot.apply(scene.world_mut(), &plan);
        scene.tick(args.dt)?;
        pilot.release_taps(scene.world_mut(), &plan);

        if !scene.world().is_player_alive() {
            tracing::info!("player died");
            break;
        }
    }
    scene.shutdown()?;

    let summary = summarize(scene.world());
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_summary(&summary),
    }
    Ok(())
}

/// Keys to hold and tap for one frame
#[derive(Debug, Default)]
struct Plan {
    held: HashSet<KeyCode>,
    taps: Vec<KeyCode>,
    finished: bool,
}

/// Scripted player: clear the next room, then pick up its reward
#[derive(Debug, Default)]
struct Pilot {
    held: HashSet<KeyCode>,
}

impl Pilot {
    fn plan(&self, world: &mut GameWorld) -> Plan {
        let mut plan = Plan::default();
        let position = world.player_position();

        if let Some((_, enemy)) = world.nearest_enemy(position) {
            world.aim_at(enemy);
            plan.held.extend([KeyCode::KeyQ, KeyCode::KeyE, KeyCode::KeyR]);
            if position.distance(enemy) > ENGAGE_DISTANCE {
                walk_towards(&mut plan, position, enemy);
            }
            return plan;
        }

        if let Some((drop, at)) = world.drops().first().copied() {
            if world.interaction.nearby == Some(drop) {
                let key = if world.interaction.open == Some(drop) {
                    KeyCode::Digit1
                } else {
                    KeyCode::KeyF
                };
                plan.taps.push(key);
            } else {
                walk_towards(&mut plan, position, at);
            }
            return plan;
        }

        match world.rooms.iter().find(|room| room.state() != RoomState::Cleared) {
            Some(room) => walk_towards(&mut plan, position, room.center()),
            None => plan.finished = true,
        }
        plan
    }

    fn apply(&mut self, world: &mut GameWorld, plan: &Plan) {
        for key in self.held.difference(&plan.held) {
            world.input.process_key_up(*key);
        }
        for key in plan.held.difference(&self.held) {
            world.input.process_key_down(*key);
        }
        for key in &plan.taps {
            world.input.process_key_down(*key);
        }
        self.held = plan.held.clone();
    }

    fn release_taps(&self, world: &mut GameWorld, plan: &Plan) {
        for key in &plan.taps {
            world.input.process_key_up(*key);
        }
    }
}

/// WASD toward `target` on the ground plane, for the default camera yaw
fn walk_towards(plan: &mut Plan, from: Vec3, to: Vec3) {
    let delta = to - from;
    if delta.z < -ARRIVE_DISTANCE {
        plan.held.insert(KeyCode::KeyW);
    } else if delta.z > ARRIVE_DISTANCE {
        plan.held.insert(KeyCode::KeyS);
    }
    if delta.x > ARRIVE_DISTANCE {
        plan.held.insert(KeyCode::KeyD);
    } else if delta.x < -ARRIVE_DISTANCE {
        plan.held.insert(KeyCode::KeyA);
    }
}

fn summarize(world: &GameWorld) -> Summary {
    Summary {
        time: world.time,
        player_hp: world.player_hp(),
        player_alive: world.is_player_alive(),
        rooms: world
            .rooms
            .iter()
            .map(|room| RoomSummary {
                name: room.name().to_string(),
                state: format!("{:?}", room.state()),
                enemies: room.enemies().len(),
            })
            .collect(),
        stats: world.stats.clone(),
    }
}

fn print_summary(summary: &Summary) {
    let stats = &summary.stats;
    println!(
        "Simulated {} frame(s), {:.2}s",
        stats.frames, summary.time
    );
    println!(
        "  player: {:.1} hp{}",
        summary.player_hp,
        if summary.player_alive { "" } else { " (dead)" }
    );
    for room in &summary.rooms {
        println!("  room {}: {} ({} enemies)", room.name, room.state, room.enemies);
    }
    println!(
        "  enemies: {} spawned, {} killed",
        stats.enemies_spawned, stats.enemies_killed
    );
    println!(
        "  damage: {:.1} dealt, {:.1} taken",
        stats.damage_dealt, stats.damage_taken
    );
    println!(
        "  rooms cleared: {}, runes collected: {}",
        stats.rooms_cleared, stats.drops_collected
    );
}
