//! Constants used throughout the crate

use std::f64::consts::PI;

/// Number of landmarks in a single tracked hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Values per landmark in a flat buffer (x, y, z)
pub const LANDMARK_STRIDE: usize = 3;

/// Gesture thresholds, in normalized image units
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.05;
pub const DEFAULT_TREE_SPREAD_THRESHOLD: f64 = 0.25;
pub const DEFAULT_SCATTER_SPREAD_THRESHOLD: f64 = 0.4;

/// Tree helix layout
pub const DEFAULT_TREE_MAX_RADIUS: f64 = 12.0;
pub const DEFAULT_TREE_HEIGHT: f64 = 28.0;
pub const DEFAULT_TREE_ANGULAR_DENSITY: f64 = 50.0;

/// Scatter drift
pub const DEFAULT_SCATTER_BOUND: f64 = 25.0;
pub const DEFAULT_TUMBLE_GAIN: f64 = 2.0;

/// Focus close-up and background ring
pub const DEFAULT_FOCUS_POSITION: [f64; 3] = [0.0, 2.0, 35.0];
pub const DEFAULT_FOCUS_SCALE: f64 = 4.5;
pub const DEFAULT_RING_RADIUS: f64 = 40.0;
pub const DEFAULT_RING_FREQUENCY: f64 = 10.0;
pub const DEFAULT_RING_DEPTH: f64 = -20.0;

/// Fixed blend factor used by the pose integrator
pub const DEFAULT_TRANSITION_SPEED: f64 = 0.04;

/// Scene bootstrapping
pub const DEFAULT_DECOR_COUNT: usize = 300;
pub const DEFAULT_DECOR_SPAWN_EXTENT: f64 = 50.0;
pub const DEFAULT_PHOTO_SPAWN_EXTENT: f64 = 20.0;
pub const DEFAULT_DECOR_VELOCITY_SCALE: f64 = 0.1;
pub const DEFAULT_PHOTO_VELOCITY_SCALE: f64 = 0.05;

/// Cumulative probabilities for decoration kinds (box, then sphere, rest candy)
pub const DECOR_BOX_PROBABILITY: f64 = 0.4;
pub const DECOR_SPHERE_PROBABILITY: f64 = 0.8;

/// Full turn, the range of the per-particle phase offset
pub const TAU: f64 = 2.0 * PI;

/// Whole-scene rotation control
pub const DEFAULT_HAND_ROTATION_GAIN: f64 = 0.5;
pub const DEFAULT_HAND_ROTATION_SMOOTHING: f64 = 0.05;
pub const DEFAULT_IDLE_SPIN: f64 = 0.002;

/// Default render rate assumption
pub const DEFAULT_FPS: f64 = 60.0;

/// Render frames between two classifier samples in the headless driver
pub const DEFAULT_HAND_INTERVAL: u32 = 2;

/// Below this sine of the half-angle, quaternion slerp falls back to nlerp
pub const SLERP_EPSILON: f64 = 1e-9;
