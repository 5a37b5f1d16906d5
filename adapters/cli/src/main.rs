#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Hero Battle session.

mod autopilot;
mod config;
mod headless;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hero_battle_core::WELCOME_BANNER;
use hero_battle_rendering::{InputSource, RenderingBackend, Scene, SpriteManifest};
use hero_battle_system_analytics::{Analytics, SessionStats};
use hero_battle_world::{self as world, query, World};
use log::info;
use serde::Serialize;

use crate::{autopilot::Autopilot, config::Settings, headless::HeadlessBackend};

/// Frames simulated when neither the flags nor the configuration name a budget.
const DEFAULT_FRAMES: u64 = 3_600;

#[derive(Debug, Parser)]
#[command(name = "hero-battle", about = "Runs a headless Hero Battle session")]
struct Args {
    /// TOML session configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed of the damage variance and the autopilot.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of frames to simulate.
    #[arg(long)]
    frames: Option<u64>,
    /// Log a HUD line every N frames, 0 disables it.
    #[arg(long, value_name = "N", default_value_t = 60)]
    hud_every: u64,
    /// TOML sprite manifest.
    #[arg(long, value_name = "PATH")]
    sprites: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary<'a> {
    sessions: u32,
    session: &'a SessionStats,
}

/// Entry point for the Hero Battle command-line interface.
fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => config::load(path)
            .with_context(|| format!("could not load configuration {}", path.display()))?,
        None => Settings::default(),
    };
    let mut config = settings.world;
    if let Some(seed) = args.seed {
        config = config.with_damage_seed(seed);
    }
    let frames = args.frames.or(settings.frames).unwrap_or(DEFAULT_FRAMES);
    let manifest = match &args.sprites {
        Some(path) => SpriteManifest::load(path)?,
        None => SpriteManifest::default(),
    };

    println!("{WELCOME_BANNER}");
    let mut pilot = Autopilot::new(config.damage_seed(), frames);
    let mut backend = HeadlessBackend::new(manifest, args.hud_every);
    let mut world = World::with_config(config);
    let mut analytics = Analytics::new();
    let mut events = Vec::new();

    loop {
        let scene = Scene::capture(&world);
        backend.present(&scene)?;
        let Some(input) = pilot.poll(&scene) else {
            break;
        };
        events.clear();
        world::step(&mut world, &input, &mut events);
        analytics.handle(&events, &query::hero_ids(&world));
    }

    info!(
        "session ended in {:?} after {} frames ({} presented, {} placeholder draws)",
        query::game_state(&world),
        query::frame(&world),
        backend.presented(),
        backend.placeholders()
    );
    let summary = Summary {
        sessions: analytics.sessions(),
        session: analytics.stats(),
    };
    print!(
        "{}",
        toml::to_string(&summary).context("failed to format session summary")?
    );
    Ok(())
}
