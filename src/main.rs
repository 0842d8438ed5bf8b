//! Headless gesture choreography runner.

use anyhow::{Context, Result};
use clap::Parser;
use gesture_choreography::{
    app::{AppConfig, ChoreographyApp},
    config::Config,
    constants::{DEFAULT_FPS, DEFAULT_HAND_INTERVAL},
    script::GestureScript,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Gesture script (YAML); the built-in demo runs when omitted
    #[arg(short, long)]
    script: Option<String>,

    /// Number of render frames to run
    #[arg(short, long, default_value = "600")]
    frames: u64,

    /// Display refresh rate
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: f64,

    /// Render frames per processed hand frame
    #[arg(long, default_value_t = DEFAULT_HAND_INTERVAL)]
    hand_interval: u32,

    /// Random seed, overrides the configuration file
    #[arg(long)]
    seed: Option<u64>,

    /// Number of decorations, overrides the configuration file
    #[arg(long)]
    decor: Option<usize>,

    /// Pace frames in real time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the final scene snapshot to this YAML file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Gesture Choreography");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(seed) = args.seed {
        config.scene.seed = Some(seed);
    }
    if let Some(decor) = args.decor {
        config.scene.decor_count = decor;
    }
    config.validate().context("Invalid configuration")?;

    let script = match &args.script {
        Some(path) => {
            info!("Loading gesture script from: {}", path);
            GestureScript::from_file(path).with_context(|| format!("Failed to load gesture script {path}"))?
        }
        None => {
            info!("No gesture script given, running the built-in demo");
            GestureScript::demo()
        }
    };

    let app_config = AppConfig {
        frames: args.frames,
        fps: args.fps,
        hand_interval: args.hand_interval,
        realtime: args.realtime,
        dump_path: args.dump,
        script,
    };

    // Create and run application
    let mut app = ChoreographyApp::new(app_config, &config)?;
    let summary = app.run()?;

    info!(
        "Ran {} frames ({} hand frames), {} mode changes, final mode {}",
        summary.frames,
        summary.hand_frames,
        summary.transitions.len(),
        summary.final_snapshot.mode
    );

    Ok(())
}
