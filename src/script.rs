//! Scripted hand input.
//!
//! Stands in for the webcam and hand-landmark model: a YAML list of gesture
//! steps is turned into synthetic landmark samples, one per hand frame.
//!
//! ```yaml
//! steps:
//!   - gesture: open
//!     frames: 60
//!     palm: [0.3, 0.5]
//!   - gesture: absent
//!     frames: 30
//! ```

use crate::{
    constants::NUM_HAND_LANDMARKS,
    gesture::{landmarks, HandSample, Landmark},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fingertip spread synthesised for each hand shape
const FIST_SPREAD: f64 = 0.15;
const NEUTRAL_SPREAD: f64 = 0.32;
const OPEN_SPREAD: f64 = 0.5;

/// Fan angles of the four fingertips around straight up, in radians
const FINGER_FAN: [f64; 4] = [-0.5, -0.17, 0.17, 0.5];

/// Thumb tip offset from the index tip when not pinching
const THUMB_OFFSET: (f64, f64) = (-0.12, 0.05);

/// Thumb tip offset from the index tip when pinching
const PINCH_OFFSET: f64 = 0.01;

/// Built-in demo: scatter, regroup, focus, hover in the dead zone, leave
pub const DEMO_SCRIPT: &str = r#"steps:
  - gesture: absent
    frames: 30
  - gesture: open
    frames: 120
    palm: [0.35, 0.5]
  - gesture: fist
    frames: 120
    palm: [0.65, 0.45]
  - gesture: pinch
    frames: 120
  - gesture: neutral
    frames: 60
  - gesture: absent
    frames: 60
"#;

/// Hand shape held during one script step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptedGesture {
    /// Thumb touching the index tip
    Pinch,
    /// Closed hand
    Fist,
    /// Spread hand
    Open,
    /// Half-open hand, between the spread thresholds
    Neutral,
    /// No hand in view
    Absent,
}

fn default_palm() -> [f64; 2] {
    [0.5, 0.5]
}

/// One gesture held for a number of hand frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub gesture: ScriptedGesture,
    pub frames: u32,
    /// Palm centre in normalized image coordinates
    #[serde(default = "default_palm")]
    pub palm: [f64; 2],
}

/// Ordered list of gesture steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    pub steps: Vec<ScriptStep>,
}

impl GestureScript {
    /// Load a script from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a script from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let script: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::ScriptError(format!("Failed to parse gesture script: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    /// The built-in demo script
    #[must_use]
    pub fn demo() -> Self {
        Self::from_yaml_str(DEMO_SCRIPT).unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if !step.palm.iter().all(|c| (0.0..=1.0).contains(c)) {
                return Err(Error::ScriptError(format!(
                    "Step {i}: palm coordinates must be within 0..1"
                )));
            }
        }
        Ok(())
    }

    /// Hand frames covered by the whole script
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Play the script one hand frame at a time
    #[must_use]
    pub fn player(&self) -> ScriptPlayer {
        ScriptPlayer {
            samples: self.steps.iter().map(|s| (synthesize(s.gesture, s.palm), s.frames)).collect(),
            step: 0,
            emitted: 0,
        }
    }
}

/// Synthesise a hand holding `gesture` with its palm centre at `palm`
#[must_use]
pub fn synthesize(gesture: ScriptedGesture, palm: [f64; 2]) -> Option<HandSample> {
    let spread = match gesture {
        ScriptedGesture::Absent => return None,
        ScriptedGesture::Fist => FIST_SPREAD,
        ScriptedGesture::Open => OPEN_SPREAD,
        ScriptedGesture::Neutral | ScriptedGesture::Pinch => NEUTRAL_SPREAD,
    };

    let [px, py] = palm;
    let mut hand = HandSample::new([Landmark::new(px, py, 0.0); NUM_HAND_LANDMARKS]);

    // Wrist below the palm, fingertips fanned upward (image y grows downward)
    let wrist = Landmark::new(px, py + 0.1, 0.0);
    *hand.landmark_mut(landmarks::WRIST) = wrist;
    for (tip, angle) in landmarks::FINGERTIPS.into_iter().zip(FINGER_FAN) {
        *hand.landmark_mut(tip) = Landmark::new(wrist.x + spread * angle.sin(), wrist.y - spread * angle.cos(), 0.0);
    }

    let index = *hand.landmark(landmarks::INDEX_FINGER_TIP);
    *hand.landmark_mut(landmarks::THUMB_TIP) = if gesture == ScriptedGesture::Pinch {
        Landmark::new(index.x + PINCH_OFFSET, index.y, index.z)
    } else {
        Landmark::new(index.x + THUMB_OFFSET.0, index.y + THUMB_OFFSET.1, index.z)
    };

    Some(hand)
}

/// Iterator over synthesised hand frames; `None` items mean no hand in view
#[derive(Debug, Clone)]
pub struct ScriptPlayer {
    samples: Vec<(Option<HandSample>, u32)>,
    step: usize,
    emitted: u32,
}

impl Iterator for ScriptPlayer {
    type Item = Option<HandSample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (sample, frames) = self.samples.get(self.step)?;
            if self.emitted < *frames {
                self.emitted += 1;
                return Some(sample.clone());
            }
            self.step += 1;
            self.emitted = 0;
        }
    }
}
