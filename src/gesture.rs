//! Gesture classification from hand landmarks.
//!
//! One [`HandSample`] arrives per processed video frame. The classifier
//! records the recentred palm position in the caller-owned
//! [`HandTrackingState`] and returns a [`ModeVote`]. Pinch is checked before
//! hand openness, since a pinching hand also reads as a small spread.

use crate::{
    constants::{
        DEFAULT_PINCH_THRESHOLD, DEFAULT_SCATTER_SPREAD_THRESHOLD, DEFAULT_TREE_SPREAD_THRESHOLD, LANDMARK_STRIDE,
        NUM_HAND_LANDMARKS,
    },
    mode::Mode,
    Error, Result,
};

/// Hand landmark indices (MediaPipe hand landmark convention)
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_TIP: usize = 8;
    /// Middle finger knuckle, used as the palm centre reference
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;

    /// Alias for the palm centre reference point
    pub const PALM_CENTER: usize = MIDDLE_FINGER_MCP;

    /// The four non-thumb fingertips
    pub const FINGERTIPS: [usize; 4] = [INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, RING_FINGER_TIP, PINKY_TIP];
}

/// A single hand landmark, normalized to 0..1 per image axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Depth relative to the wrist
    pub z: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 3D Euclidean distance
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y).hypot(self.z - other.z)
    }

    /// Distance in the image plane, ignoring depth
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// All landmarks of one tracked hand for one video frame
#[derive(Clone, Debug, PartialEq)]
pub struct HandSample {
    landmarks: [Landmark; NUM_HAND_LANDMARKS],
}

impl HandSample {
    /// Wrap a full landmark set
    #[must_use]
    pub const fn new(landmarks: [Landmark; NUM_HAND_LANDMARKS]) -> Self {
        Self { landmarks }
    }

    /// Build from a flat `[x0, y0, z0, x1, ...]` buffer as hand trackers emit it
    ///
    /// # Errors
    ///
    /// Returns `Error::LandmarkError` if the buffer does not hold exactly 21
    /// landmarks or contains non-finite values.
    pub fn from_flat(data: &[f64]) -> Result<Self> {
        let expected = NUM_HAND_LANDMARKS * LANDMARK_STRIDE;
        if data.len() != expected {
            return Err(Error::LandmarkError(format!(
                "Expected {expected} values, got {}",
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(Error::LandmarkError(format!("Non-finite value at index {pos}")));
        }

        let mut landmarks = [Landmark::default(); NUM_HAND_LANDMARKS];
        for (landmark, chunk) in landmarks.iter_mut().zip(data.chunks_exact(LANDMARK_STRIDE)) {
            *landmark = Landmark::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(Self { landmarks })
    }

    /// Landmark at an anatomical index, see [`landmarks`]
    ///
    /// # Panics
    ///
    /// Panics if `index` is 21 or more.
    #[must_use]
    pub fn landmark(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }

    /// Mutable landmark access, for synthesising samples
    ///
    /// # Panics
    ///
    /// Panics if `index` is 21 or more.
    pub fn landmark_mut(&mut self, index: usize) -> &mut Landmark {
        &mut self.landmarks[index]
    }

    /// Palm centre reference point
    #[must_use]
    pub fn palm_center(&self) -> &Landmark {
        self.landmark(landmarks::PALM_CENTER)
    }

    /// Thumb tip to index tip, in 3D
    #[must_use]
    pub fn pinch_distance(&self) -> f64 {
        self.landmark(landmarks::THUMB_TIP)
            .distance(self.landmark(landmarks::INDEX_FINGER_TIP))
    }

    /// Mean planar distance from the wrist to the four non-thumb fingertips
    #[must_use]
    pub fn average_finger_spread(&self) -> f64 {
        let wrist = self.landmark(landmarks::WRIST);
        let total: f64 = landmarks::FINGERTIPS
            .iter()
            .map(|&tip| self.landmark(tip).planar_distance(wrist))
            .sum();
        total / landmarks::FINGERTIPS.len() as f64
    }
}

/// Latest hand position signal, shared between the classifier and the render loop.
///
/// The classifier is the only writer; readers see whatever was last written and
/// must tolerate stale values, since the two loops run at different rates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandTrackingState {
    /// Palm x recentred to [-1, 1]
    pub x: f64,
    /// Palm y recentred to [-1, 1]
    pub y: f64,
    /// Whether the last processed frame contained a hand
    pub is_tracking: bool,
}

impl HandTrackingState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recentred palm position, only while a hand is tracked
    #[must_use]
    pub fn hand_position(&self) -> Option<(f64, f64)> {
        self.is_tracking.then_some((self.x, self.y))
    }
}

/// Per-sample mode recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeVote {
    Focus,
    Tree,
    Scatter,
    /// No hand, or an ambiguous pose: the current mode persists
    None,
}

impl ModeVote {
    /// Mode this vote asks for, if any
    #[must_use]
    pub const fn mode(self) -> Option<Mode> {
        match self {
            Self::Focus => Some(Mode::Focus),
            Self::Tree => Some(Mode::Tree),
            Self::Scatter => Some(Mode::Scatter),
            Self::None => None,
        }
    }
}

/// Threshold-based gesture classifier
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    pinch_threshold: f64,
    tree_spread_threshold: f64,
    scatter_spread_threshold: f64,
}

impl GestureClassifier {
    /// Create a classifier with explicit thresholds
    ///
    /// # Panics
    ///
    /// Panics if a threshold is not positive or the tree spread threshold
    /// exceeds the scatter spread threshold.
    #[must_use]
    pub fn new(pinch_threshold: f64, tree_spread_threshold: f64, scatter_spread_threshold: f64) -> Self {
        assert!(pinch_threshold > 0.0, "Pinch threshold must be positive");
        assert!(tree_spread_threshold > 0.0, "Spread thresholds must be positive");
        assert!(
            tree_spread_threshold <= scatter_spread_threshold,
            "Tree spread threshold must not exceed scatter spread threshold"
        );
        Self {
            pinch_threshold,
            tree_spread_threshold,
            scatter_spread_threshold,
        }
    }

    /// Classify one frame. `None` means no hand was detected.
    pub fn classify(&self, sample: Option<&HandSample>, tracking: &mut HandTrackingState) -> ModeVote {
        let Some(sample) = sample else {
            tracking.is_tracking = false;
            return ModeVote::None;
        };

        let palm = sample.palm_center();
        *tracking = HandTrackingState {
            x: (palm.x - 0.5) * 2.0,
            y: (palm.y - 0.5) * 2.0,
            is_tracking: true,
        };

        self.vote(sample.pinch_distance(), sample.average_finger_spread())
    }

    /// Apply the thresholds in priority order: pinch, closed hand, open hand
    #[must_use]
    pub fn vote(&self, pinch_distance: f64, average_finger_spread: f64) -> ModeVote {
        if pinch_distance < self.pinch_threshold {
            ModeVote::Focus
        } else if average_finger_spread < self.tree_spread_threshold {
            ModeVote::Tree
        } else if average_finger_spread > self.scatter_spread_threshold {
            ModeVote::Scatter
        } else {
            ModeVote::None
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_PINCH_THRESHOLD,
            DEFAULT_TREE_SPREAD_THRESHOLD,
            DEFAULT_SCATTER_SPREAD_THRESHOLD,
        )
    }
}
