//! Configuration management for the choreography engine

use crate::{
    choreography::{Choreographer, Layout},
    constants::{
        DEFAULT_DECOR_COUNT, DEFAULT_DECOR_SPAWN_EXTENT, DEFAULT_DECOR_VELOCITY_SCALE, DEFAULT_FOCUS_POSITION,
        DEFAULT_FOCUS_SCALE, DEFAULT_HAND_ROTATION_GAIN, DEFAULT_HAND_ROTATION_SMOOTHING, DEFAULT_IDLE_SPIN,
        DEFAULT_PHOTO_SPAWN_EXTENT, DEFAULT_PHOTO_VELOCITY_SCALE, DEFAULT_PINCH_THRESHOLD, DEFAULT_RING_DEPTH,
        DEFAULT_RING_FREQUENCY, DEFAULT_RING_RADIUS, DEFAULT_SCATTER_BOUND, DEFAULT_SCATTER_SPREAD_THRESHOLD,
        DEFAULT_TRANSITION_SPEED, DEFAULT_TREE_ANGULAR_DENSITY, DEFAULT_TREE_HEIGHT, DEFAULT_TREE_MAX_RADIUS,
        DEFAULT_TREE_SPREAD_THRESHOLD, DEFAULT_TUMBLE_GAIN,
    },
    engine::RotationControl,
    gesture::GestureClassifier,
    integrator::PoseIntegrator,
    particle::SpawnSettings,
    pose::Vec3,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture classification thresholds
    pub gesture: GestureConfig,

    /// Layout geometry for the three modes
    pub layout: LayoutConfig,

    /// Pose smoothing
    pub motion: MotionConfig,

    /// Scene population
    pub scene: SceneConfig,

    /// Whole-scene rotation control
    pub rotation: RotationConfig,
}

/// Gesture thresholds, in normalized image units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-to-index distance below which the hand is pinching
    pub pinch_threshold: f64,

    /// Average fingertip spread below which the hand is closed
    pub tree_spread_threshold: f64,

    /// Average fingertip spread above which the hand is open
    pub scatter_spread_threshold: f64,
}

/// Layout geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub tree_max_radius: f64,
    pub tree_height: f64,
    /// Multiplied by pi to get the helix angle at the tip
    pub tree_angular_density: f64,
    pub scatter_bound: f64,
    pub tumble_gain: f64,
    pub focus_position: [f64; 3],
    pub focus_scale: f64,
    pub ring_radius: f64,
    pub ring_frequency: f64,
    pub ring_depth: f64,
}

/// Pose smoothing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fraction of the remaining gap closed per frame
    pub transition_speed: f64,
}

/// Scene population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of decorations spawned at startup
    pub decor_count: usize,

    /// Random seed; drawn from entropy when absent
    pub seed: Option<u64>,

    pub decor_spawn_extent: f64,
    pub photo_spawn_extent: f64,
    pub decor_velocity_scale: f64,
    pub photo_velocity_scale: f64,

    /// Register one placeholder photo at startup
    pub default_photo: bool,
}

/// Whole-scene rotation control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Radians of group rotation per unit of recentred hand offset
    pub hand_gain: f64,

    /// Blend factor toward the hand-driven rotation
    pub hand_smoothing: f64,

    /// Yaw added per frame when no hand is tracked
    pub idle_spin: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            tree_spread_threshold: DEFAULT_TREE_SPREAD_THRESHOLD,
            scatter_spread_threshold: DEFAULT_SCATTER_SPREAD_THRESHOLD,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tree_max_radius: DEFAULT_TREE_MAX_RADIUS,
            tree_height: DEFAULT_TREE_HEIGHT,
            tree_angular_density: DEFAULT_TREE_ANGULAR_DENSITY,
            scatter_bound: DEFAULT_SCATTER_BOUND,
            tumble_gain: DEFAULT_TUMBLE_GAIN,
            focus_position: DEFAULT_FOCUS_POSITION,
            focus_scale: DEFAULT_FOCUS_SCALE,
            ring_radius: DEFAULT_RING_RADIUS,
            ring_frequency: DEFAULT_RING_FREQUENCY,
            ring_depth: DEFAULT_RING_DEPTH,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            transition_speed: DEFAULT_TRANSITION_SPEED,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            decor_count: DEFAULT_DECOR_COUNT,
            seed: None,
            decor_spawn_extent: DEFAULT_DECOR_SPAWN_EXTENT,
            photo_spawn_extent: DEFAULT_PHOTO_SPAWN_EXTENT,
            decor_velocity_scale: DEFAULT_DECOR_VELOCITY_SCALE,
            photo_velocity_scale: DEFAULT_PHOTO_VELOCITY_SCALE,
            default_photo: true,
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            hand_gain: DEFAULT_HAND_ROTATION_GAIN,
            hand_smoothing: DEFAULT_HAND_ROTATION_SMOOTHING,
            idle_spin: DEFAULT_IDLE_SPIN,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create the gesture classifier from configuration
    #[must_use]
    pub fn create_classifier(&self) -> GestureClassifier {
        GestureClassifier::new(
            self.gesture.pinch_threshold,
            self.gesture.tree_spread_threshold,
            self.gesture.scatter_spread_threshold,
        )
    }

    /// Layout geometry
    #[must_use]
    pub fn layout(&self) -> Layout {
        let l = &self.layout;
        Layout {
            tree_max_radius: l.tree_max_radius,
            tree_height: l.tree_height,
            tree_angular_density: l.tree_angular_density,
            scatter_bound: l.scatter_bound,
            tumble_gain: l.tumble_gain,
            focus_position: Vec3::from(l.focus_position),
            focus_scale: l.focus_scale,
            ring_radius: l.ring_radius,
            ring_frequency: l.ring_frequency,
            ring_depth: l.ring_depth,
        }
    }

    /// Create the choreographer from configuration
    #[must_use]
    pub fn create_choreographer(&self) -> Choreographer {
        Choreographer::new(self.layout())
    }

    /// Create the pose integrator from configuration
    #[must_use]
    pub fn create_integrator(&self) -> PoseIntegrator {
        PoseIntegrator::new(self.motion.transition_speed)
    }

    /// Spawn ranges for new particles
    #[must_use]
    pub fn spawn_settings(&self) -> SpawnSettings {
        SpawnSettings {
            decor_extent: self.scene.decor_spawn_extent,
            photo_extent: self.scene.photo_spawn_extent,
            decor_velocity_scale: self.scene.decor_velocity_scale,
            photo_velocity_scale: self.scene.photo_velocity_scale,
        }
    }

    /// Whole-scene rotation control
    #[must_use]
    pub fn rotation_control(&self) -> RotationControl {
        RotationControl::new(self.rotation.hand_gain, self.rotation.hand_smoothing, self.rotation.idle_spin)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // NaN passes every comparison below, so reject non-finite values first
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(Error::ConfigError(format!("{} must be finite, got {}", name, value)));
            }
        }

        // Gesture thresholds
        let g = &self.gesture;
        if g.pinch_threshold <= 0.0 {
            return Err(Error::ConfigError("Pinch threshold must be positive".to_string()));
        }
        if g.tree_spread_threshold <= 0.0 || g.scatter_spread_threshold <= 0.0 {
            return Err(Error::ConfigError("Spread thresholds must be positive".to_string()));
        }
        if g.tree_spread_threshold > g.scatter_spread_threshold {
            return Err(Error::ConfigError(
                "Tree spread threshold must not exceed scatter spread threshold".to_string(),
            ));
        }

        // Layout
        let l = &self.layout;
        if l.tree_max_radius <= 0.0 || l.tree_height <= 0.0 {
            return Err(Error::ConfigError("Tree radius and height must be positive".to_string()));
        }
        if l.scatter_bound <= 0.0 {
            return Err(Error::ConfigError("Scatter bound must be positive".to_string()));
        }
        if l.focus_scale <= 0.0 {
            return Err(Error::ConfigError("Focus scale must be positive".to_string()));
        }

        // Motion
        if self.motion.transition_speed <= 0.0 || self.motion.transition_speed > 1.0 {
            return Err(Error::ConfigError("Transition speed must be in (0, 1]".to_string()));
        }

        // Scene
        let s = &self.scene;
        if s.decor_spawn_extent < 0.0 || s.photo_spawn_extent < 0.0 {
            return Err(Error::ConfigError("Spawn extents must be non-negative".to_string()));
        }
        if s.decor_velocity_scale < 0.0 || s.photo_velocity_scale < 0.0 {
            return Err(Error::ConfigError("Velocity scales must be non-negative".to_string()));
        }

        // Rotation
        if !(0.0..=1.0).contains(&self.rotation.hand_smoothing) {
            return Err(Error::ConfigError("Hand rotation smoothing must be between 0.0 and 1.0".to_string()));
        }

        Ok(())
    }

    /// Every floating point setting with its YAML path
    fn float_fields(&self) -> Vec<(&'static str, f64)> {
        let (g, l, s, r) = (&self.gesture, &self.layout, &self.scene, &self.rotation);
        vec![
            ("gesture.pinch_threshold", g.pinch_threshold),
            ("gesture.tree_spread_threshold", g.tree_spread_threshold),
            ("gesture.scatter_spread_threshold", g.scatter_spread_threshold),
            ("layout.tree_max_radius", l.tree_max_radius),
            ("layout.tree_height", l.tree_height),
            ("layout.tree_angular_density", l.tree_angular_density),
            ("layout.scatter_bound", l.scatter_bound),
            ("layout.tumble_gain", l.tumble_gain),
            ("layout.focus_position[0]", l.focus_position[0]),
            ("layout.focus_position[1]", l.focus_position[1]),
            ("layout.focus_position[2]", l.focus_position[2]),
            ("layout.focus_scale", l.focus_scale),
            ("layout.ring_radius", l.ring_radius),
            ("layout.ring_frequency", l.ring_frequency),
            ("layout.ring_depth", l.ring_depth),
            ("motion.transition_speed", self.motion.transition_speed),
            ("scene.decor_spawn_extent", s.decor_spawn_extent),
            ("scene.photo_spawn_extent", s.photo_spawn_extent),
            ("scene.decor_velocity_scale", s.decor_velocity_scale),
            ("scene.photo_velocity_scale", s.photo_velocity_scale),
            ("rotation.hand_gain", r.hand_gain),
            ("rotation.hand_smoothing", r.hand_smoothing),
            ("rotation.idle_spin", r.idle_spin),
        ]
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture choreography configuration

# Gesture thresholds (normalized image units)
gesture:
  pinch_threshold: 0.05
  tree_spread_threshold: 0.25
  scatter_spread_threshold: 0.4

# Layout geometry
layout:
  tree_max_radius: 12.0
  tree_height: 28.0
  tree_angular_density: 50.0
  scatter_bound: 25.0
  tumble_gain: 2.0
  focus_position: [0.0, 2.0, 35.0]
  focus_scale: 4.5
  ring_radius: 40.0
  ring_frequency: 10.0
  ring_depth: -20.0

# Pose smoothing
motion:
  transition_speed: 0.04

# Scene population
scene:
  decor_count: 300
  seed: 2024
  decor_spawn_extent: 50.0
  photo_spawn_extent: 20.0
  decor_velocity_scale: 0.1
  photo_velocity_scale: 0.05
  default_photo: true

# Whole-scene rotation
rotation:
  hand_gain: 0.5
  hand_smoothing: 0.05
  idle_spin: 0.002
"#;
