//! Pico Player - runs the bundled demo cart
//!
//! Usage:
//!   pico-player [--config <pico.toml>] [--fullscreen] [--no-fps] [--title <title>]

use anyhow::{Context, Result};
use clap::Parser;
use pico_player::demo::{demo_sprites, DemoGame};
use pico_runtime::EngineConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pico-player")]
#[command(about = "Pico player - fixed-timestep 128x128 fantasy console host")]
struct Args {
    /// Config file, instead of ./pico.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Hide the FPS counter
    #[arg(long)]
    no_fps: bool,

    /// Window title
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = EngineConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if args.fullscreen {
        config.window.fullscreen = true;
    }
    if args.no_fps {
        config.game_loop.show_fps = false;
    }
    if let Some(title) = args.title {
        config.window.title = title;
    }

    let sprites = demo_sprites().context("Failed to bake demo sprites")?;

    println!("Controls:");
    println!("  Arrows   - Move");
    println!("  Z / X    - Primary / secondary");
    println!("  Enter    - Pause menu / confirm");
    println!("  Escape   - Exit");
    println!("  F11      - Toggle fullscreen");
    println!("  F12      - Save screenshot");

    pico_player::run(DemoGame::new(), sprites, config)
}
