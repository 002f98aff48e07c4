#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Mobile Strike.

mod config;
mod scene;
mod sound;

use std::{path::PathBuf, time::Instant};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use mobile_strike_core::{Intent, LOGICAL_SCREEN};
use mobile_strike_rendering::{
    Color, FrameInput, FrameSimulationBreakdown, Presentation, Renderer, RenderingBackend,
};
use mobile_strike_rendering_macroquad::MacroquadBackend;
use mobile_strike_simulation::{GameLoop, Simulation};
use mobile_strike_system_input::{Config, InputAggregator};
use mobile_strike_world::{query, Layout, World, DEFAULT_NAME_SEED};
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::sound::TracingSoundSink;

#[derive(Debug, Parser)]
#[command(
    name = "mobile-strike",
    about = "Raycast first-person arena shooter",
    version
)]
struct Args {
    /// TOML file overriding gameplay tuning; missing keys keep their defaults.
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Seed for shuffling hostile names.
    #[arg(long, default_value_t = DEFAULT_NAME_SEED)]
    seed: u64,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,

    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,

    /// Run this many idle ticks without opening a window, then print a summary.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Entry point for the Mobile Strike command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let tuning = config::load_tuning(args.tuning.as_deref())?;
    let world = World::new(Layout::city(), tuning, args.seed)
        .context("failed to build the city layout")?;

    match args.headless {
        Some(ticks) => {
            let summary = run_headless(world, ticks);
            println!("{summary}");
            Ok(())
        }
        None => run_window(world, args.vsync, args.show_fps),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level {log_level:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow!(error))
}

fn run_headless(world: World, ticks: u64) -> String {
    let mut simulation = Simulation::new(world, TracingSoundSink::default());
    let idle = Intent::default();
    for _ in 0..ticks {
        simulation.step(&idle);
    }

    let world = simulation.world();
    let player = query::player(world);
    let active = query::entities(world)
        .iter()
        .filter(|entity| entity.as_hostile().is_some_and(|hostile| hostile.is_targetable()))
        .count();
    info!(ticks, "headless run finished");
    format!(
        "tick {} | health {}/{} | score {} | active hostiles {}",
        query::tick(world),
        player.health(),
        player.max_health(),
        player.score(),
        active
    )
}

fn run_window(world: World, vsync: bool, show_fps: bool) -> Result<()> {
    let tuning = query::tuning(&world).clone();
    let simulation = Simulation::new(world, TracingSoundSink::default())
        .with_score_callback(|score| info!(score, "score changed"));
    let input = InputAggregator::new(Config::new(LOGICAL_SCREEN, &tuning));
    let mut game = GameLoop::new(simulation, input);
    let mut renderer = Renderer::new(&tuning);

    let backend = MacroquadBackend::new()
        .with_vsync(vsync)
        .with_show_fps(show_fps);
    let presentation = Presentation::new("Mobile Strike", Color::BLACK, LOGICAL_SCREEN);

    backend
        .run(presentation, move |elapsed, frame_input, frame| {
            let FrameInput {
                events,
                pause_toggled,
                touch_active,
            } = frame_input;

            let simulation_start = Instant::now();
            if pause_toggled {
                game.toggle_pause();
            }
            for event in events {
                game.handle_input(event);
            }
            let _ = game.advance(elapsed);
            let simulation = simulation_start.elapsed();

            let scene_start = Instant::now();
            let scene = scene::populate(&game, touch_active);
            let scene_population = scene_start.elapsed();

            let render_start = Instant::now();
            renderer.render(&scene, frame);
            FrameSimulationBreakdown {
                simulation,
                scene_population,
                render: render_start.elapsed(),
            }
        })
        .context("window backend failed")
}
