//! Gesture-driven particle choreography.
//!
//! A fixed population of decorations and photos is arranged into one of three
//! layouts, selected by hand gestures:
//! - TREE: a descending helix, selected by a closed hand
//! - SCATTER: free drift inside a bounding sphere, selected by an open hand
//! - FOCUS: one photo brought close up with the rest in a background ring,
//!   selected by a pinch
//!
//! The pipeline per frame:
//! 1. Hand landmarks are classified into a mode vote (at the video rate)
//! 2. The mode state machine applies the vote, edge-triggered
//! 3. Every particle receives a target pose for the active mode
//! 4. The integrator blends actual poses toward their targets (at the display rate)
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use gesture_choreography::{config::Config, engine::ChoreographyEngine, gesture::HandTrackingState,
//!                            mode::Mode};
//!
//! let mut config = Config::default();
//! config.scene.seed = Some(7);
//! config.scene.decor_count = 50;
//!
//! let mut engine = ChoreographyEngine::from_config(&config);
//! let tracking = HandTrackingState::new();
//!
//! engine.set_mode(Mode::Scatter);
//! for _ in 0..60 {
//!     engine.render_frame(&tracking);
//! }
//! assert_eq!(engine.snapshot().particles.len(), 51);
//! ```
//!
//! ## Feeding Hand Landmarks
//!
//! ```
//! use gesture_choreography::{engine::ChoreographyEngine, config::Config, gesture::{HandSample, HandTrackingState},
//!                            mode::Mode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = ChoreographyEngine::from_config(&Config::default());
//! let mut tracking = HandTrackingState::new();
//!
//! // 21 landmarks as [x, y, z] triples, all at the same point: a pinch
//! let hand = HandSample::from_flat(&[0.5; 63])?;
//! let outcome = engine.process_hand_frame(Some(&hand), &mut tracking);
//! assert_eq!(outcome.transition, Some(Mode::Focus));
//! # Ok(())
//! # }
//! ```
//!
//! ## Observing Mode Changes
//!
//! ```
//! use gesture_choreography::{config::Config, engine::ChoreographyEngine, mode::Mode};
//!
//! let mut engine = ChoreographyEngine::from_config(&Config::default());
//! engine.subscribe(|mode: Mode| println!("mode is now {mode}"));
//! engine.set_mode(Mode::Scatter);
//! ```
//!
//! ## Scripted Input
//!
//! ```no_run
//! use gesture_choreography::{app::{AppConfig, ChoreographyApp}, config::Config, script::GestureScript};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig {
//!     frames: 600,
//!     fps: 60.0,
//!     hand_interval: 2,
//!     realtime: false,
//!     dump_path: None,
//!     script: GestureScript::from_file("gestures.yaml")?,
//! };
//! let summary = ChoreographyApp::new(config, &Config::default())?.run()?;
//! println!("{} mode changes", summary.transitions.len());
//! # Ok(())
//! # }
//! ```

/// Pose representation and blending math
pub mod pose;

/// Hand landmarks and gesture classification
pub mod gesture;

/// Mode state machine and change notification
pub mod mode;

/// Particle registry
pub mod particle;

/// Per-mode target poses
pub mod choreography;

/// Pose smoothing toward targets
pub mod integrator;

/// The engine tying classification, mode and layout together
pub mod engine;

/// Scripted hand input for headless runs
pub mod script;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
