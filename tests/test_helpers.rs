//! Helper functions and utilities for tests

use gesture_choreography::{
    config::Config,
    engine::ChoreographyEngine,
    gesture::{landmarks, HandSample, Landmark},
};

/// Seeded engine with `decor_count` decorations and optionally the default photo
pub fn create_test_engine(decor_count: usize, default_photo: bool) -> ChoreographyEngine {
    let mut config = Config::default();
    config.scene.seed = Some(99);
    config.scene.decor_count = decor_count;
    config.scene.default_photo = default_photo;
    ChoreographyEngine::from_config(&config)
}

/// Hand whose thumb sits `pinch` from the index tip and whose fingertips all
/// lie `spread` from the wrist, in the image plane
pub fn hand_with(pinch: f64, spread: f64) -> HandSample {
    let mut hand = HandSample::new([Landmark::new(0.5, 0.5, 0.0); 21]);
    *hand.landmark_mut(landmarks::WRIST) = Landmark::new(0.5, 0.9, 0.0);
    for tip in landmarks::FINGERTIPS {
        *hand.landmark_mut(tip) = Landmark::new(0.5, 0.9 - spread, 0.0);
    }
    *hand.landmark_mut(landmarks::THUMB_TIP) = Landmark::new(0.5 + pinch, 0.9 - spread, 0.0);
    hand
}
