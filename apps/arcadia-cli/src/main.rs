use std::path::PathBuf;

use anyhow::Context;
use arcadia_common::REFERENCE_HZ;
use arcadia_input::{Handled, InputEvent, Key, MouseButton};
use arcadia_kernel::{
    ArenaSession, DriveSession, FrameLoop, FrameOutcome, GameConfig, Session,
};
use arcadia_scene::{SceneGraph, TextScene};
use arcadia_tools::{EventTally, SessionInspector};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcadia-cli", about = "Headless driver for arcadia game sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Drive the hover tank with a fixed set of held keys
    Drive {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Comma-separated keys held for the whole run, e.g. "w,a,space"
        #[arg(long, default_value = "")]
        hold: String,
        /// Simulated display rate
        #[arg(long, default_value = "60")]
        fps: f32,
        /// JSON tuning file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run the melee arena with a stationary player
    Arena {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// RNG seed for spawn placement (overrides the config)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Swing every M frames; 0 never swings
        #[arg(long, default_value = "30")]
        attack_every: u64,
        /// Hold block for the whole run
        #[arg(long)]
        block: bool,
        /// JSON tuning file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn parse_keys(list: &str) -> anyhow::Result<Vec<Key>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Key>().with_context(|| format!("bad --hold entry {s:?}")))
        .collect()
}

fn run_drive(frames: u64, hold: &str, fps: f32, config: GameConfig) -> anyhow::Result<()> {
    anyhow::ensure!(fps > 0.0, "--fps must be positive, got {fps}");
    let keys = parse_keys(hold)?;
    let delta = 1.0 / fps;

    let mut frame = FrameLoop::new(DriveSession::new(config.drive, config.max_delta));
    frame.attach(TextScene::new());
    for key in &keys {
        if frame.handle_input(InputEvent::KeyDown(*key)) != Handled::Consumed {
            tracing::warn!(?key, "key has no driving binding");
        }
    }

    let mut tally = EventTally::new();
    for _ in 0..frames {
        if let FrameOutcome::Stepped { events } = frame.step(delta) {
            tally.extend(&events);
        }
    }

    println!("{}", SessionInspector::drive(frame.session()));
    if let Some(scene) = frame.scene() {
        print!("{}", scene.render());
    }
    println!("{tally}");
    Ok(())
}

fn run_arena(frames: u64, attack_every: u64, block: bool, config: GameConfig) -> anyhow::Result<()> {
    let delta = 1.0 / REFERENCE_HZ;
    let mut frame = FrameLoop::new(ArenaSession::new(config.arena, config.max_delta));
    frame.attach(TextScene::new());
    if block {
        frame.handle_input(InputEvent::MouseDown(MouseButton::Right));
    }

    let mut tally = EventTally::new();
    for i in 0..frames {
        // A swing needs a fresh press, so the button is up between swings.
        let swing = attack_every > 0 && i % attack_every == 0;
        frame.handle_input(if swing {
            InputEvent::MouseDown(MouseButton::Left)
        } else {
            InputEvent::MouseUp(MouseButton::Left)
        });
        if let FrameOutcome::Stepped { events } = frame.step(delta) {
            tally.extend(&events);
        }
        if !frame.session().is_game_active() {
            println!("game over at frame {} (t={:.2}s)", i + 1, frame.session().now());
            break;
        }
    }

    println!("{}", SessionInspector::arena(frame.session()));
    for enemy in SessionInspector::list_enemies(frame.session()) {
        println!("  {enemy}");
    }
    println!("score: {}", frame.session().score());
    println!("{tally}");

    if let Some(scene) = frame.detach() {
        tracing::debug!(remaining = scene.len(), "arena torn down");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("arcadia-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", arcadia_common::crate_info());
            println!("input: {}", arcadia_input::crate_info());
            println!("vehicle: {}", arcadia_vehicle::crate_info());
            println!("ai: {}", arcadia_ai::crate_info());
            println!("scene: {}", arcadia_scene::crate_info());
            println!("kernel: {}", arcadia_kernel::crate_info());
            println!("tools: {}", arcadia_tools::crate_info());
            println!("reference rate: {REFERENCE_HZ} Hz");
        }
        Commands::Drive {
            frames,
            hold,
            fps,
            config,
        } => {
            let config = load_config(config.as_ref())?;
            run_drive(frames, &hold, fps, config)?;
        }
        Commands::Arena {
            frames,
            seed,
            attack_every,
            block,
            config,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(seed) = seed {
                config.arena.seed = seed;
            }
            run_arena(frames, attack_every, block, config)?;
        }
    }

    Ok(())
}
