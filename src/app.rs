//! Headless application driving the choreography engine from a gesture script.

use crate::{
    config::Config,
    engine::{ChoreographyEngine, SceneSnapshot},
    error::{Error, Result},
    gesture::{HandSample, HandTrackingState},
    mode::Mode,
    script::{GestureScript, ScriptPlayer},
};
use log::{debug, info};
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Runtime settings of the driver, separate from the engine configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Render frames to run
    pub frames: u64,
    /// Display refresh rate, used for realtime pacing and timestamps
    pub fps: f64,
    /// Render frames per hand frame
    pub hand_interval: u32,
    /// Sleep between frames to hold `fps`
    pub realtime: bool,
    /// Where to write the final scene snapshot
    pub dump_path: Option<PathBuf>,
    /// Hand input
    pub script: GestureScript,
}

/// What happened during a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub hand_frames: u64,
    /// Every mode change with the render frame it happened on
    pub transitions: Vec<(u64, Mode)>,
    pub final_snapshot: SceneSnapshot,
}

/// Main application struct
pub struct ChoreographyApp {
    config: AppConfig,
    engine: ChoreographyEngine,
    tracking: HandTrackingState,
    player: ScriptPlayer,
    transitions: Vec<(u64, Mode)>,
}

impl ChoreographyApp {
    /// Create the application from driver settings and engine configuration
    pub fn new(config: AppConfig, engine_config: &Config) -> Result<Self> {
        info!("Initializing gesture choreography application");

        if config.hand_interval == 0 {
            return Err(Error::InvalidInput("Hand interval must be at least 1".to_string()));
        }
        if !(config.fps > 0.0 && config.fps.is_finite()) {
            return Err(Error::InvalidInput("FPS must be positive".to_string()));
        }
        engine_config.validate()?;

        let engine = ChoreographyEngine::from_config(engine_config);
        let player = config.script.player();
        info!(
            "Gesture script: {} steps, {} hand frames",
            config.script.steps.len(),
            config.script.total_frames()
        );

        Ok(Self {
            config,
            engine,
            tracking: HandTrackingState::new(),
            player,
            transitions: Vec::new(),
        })
    }

    /// Engine being driven
    pub fn engine(&self) -> &ChoreographyEngine {
        &self.engine
    }

    /// Run the configured number of frames
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting main application loop");

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.fps);
        let start_time = Instant::now();
        let mut last_fps_update = Instant::now();
        let mut hand_frames = 0;

        for frame in 0..self.config.frames {
            let frame_start = Instant::now();

            if frame % u64::from(self.config.hand_interval) == 0 {
                // An exhausted script reads as an empty frame
                let sample: Option<HandSample> = self.player.next().flatten();
                let outcome = self.engine.process_hand_frame(sample.as_ref(), &mut self.tracking);
                hand_frames += 1;

                if let Some(mode) = outcome.transition {
                    self.transitions.push((frame, mode));
                    debug!(
                        "Frame {} ({:.2}s): mode -> {}",
                        frame,
                        frame as f64 / self.config.fps,
                        mode
                    );
                }
            }

            self.engine.render_frame(&self.tracking);

            if last_fps_update.elapsed() >= Duration::from_secs(1) {
                let fps = (frame + 1) as f64 / start_time.elapsed().as_secs_f64();
                debug!("FPS: {:.1}, mode {}", fps, self.engine.mode());
                last_fps_update = Instant::now();
            }

            if self.config.realtime {
                if let Some(remaining) = frame_duration.checked_sub(frame_start.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
        }

        let final_snapshot = self.engine.snapshot();
        if let Some(path) = &self.config.dump_path {
            write_snapshot(&final_snapshot, path)?;
            info!("Wrote scene snapshot to {}", path.display());
        }

        info!(
            "Application shutting down after {} frames in mode {}",
            self.config.frames,
            self.engine.mode()
        );

        Ok(RunSummary {
            frames: self.config.frames,
            hand_frames,
            transitions: self.transitions.clone(),
            final_snapshot,
        })
    }
}

/// Serialize a snapshot as YAML
pub fn write_snapshot(snapshot: &SceneSnapshot, path: &Path) -> Result<()> {
    let content = serde_yaml::to_string(snapshot)
        .map_err(|e| Error::Serialization(format!("Failed to serialize snapshot: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}
