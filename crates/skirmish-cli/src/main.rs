//! Skirmish CLI - headless driver for the gameplay simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{clips, presets, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Headless room-combat simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted encounter and print a summary
    Simulate {
        /// Game config file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of frames to simulate
        #[arg(long, default_value = "3600")]
        frames: u64,

        /// Frame delta in seconds
        #[arg(long, default_value = "0.016666")]
        dt: f64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the clips and bone tracks in an animation file
    Clips {
        /// Path to a binary clip file
        file: PathBuf,

        /// Also list every bone track
        #[arg(long)]
        tracks: bool,
    },

    /// List enemy presets
    Presets {
        /// Game config file whose presets are added to the built-in ones
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            frames,
            dt,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            dt,
            format,
        }),
        Commands::Clips { file, tracks } => clips::run(&file, tracks),
        Commands::Presets { config, format } => presets::run(config.as_deref(), &format),
    }
}
