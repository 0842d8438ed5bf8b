//! Scripted runs of the headless application

use gesture_choreography::{
    app::{AppConfig, ChoreographyApp},
    config::Config,
    mode::Mode,
    script::{GestureScript, DEMO_SCRIPT},
    Error,
};

fn run(script: GestureScript, frames: u64, hand_interval: u32) -> gesture_choreography::app::RunSummary {
    let mut config = Config::default();
    config.scene.seed = Some(11);
    config.scene.decor_count = 60;

    let app_config = AppConfig {
        frames,
        fps: 60.0,
        hand_interval,
        realtime: false,
        dump_path: None,
        script,
    };
    ChoreographyApp::new(app_config, &config).unwrap().run().unwrap()
}

#[test]
fn test_demo_script_visits_every_mode() {
    let script = GestureScript::from_yaml_str(DEMO_SCRIPT).unwrap();
    let hand_frames = script.total_frames();
    let summary = run(script, hand_frames * 2, 2);

    let modes: Vec<Mode> = summary.transitions.iter().map(|&(_, mode)| mode).collect();
    assert_eq!(modes, vec![Mode::Scatter, Mode::Tree, Mode::Focus]);
    assert_eq!(summary.final_snapshot.mode, Mode::Focus);
    assert!(summary.final_snapshot.focus_target.is_some());
}

#[test]
fn test_transition_frames_follow_hand_interval() {
    let script =
        GestureScript::from_yaml_str("steps:\n  - gesture: neutral\n    frames: 4\n  - gesture: open\n    frames: 1\n")
            .unwrap();
    let summary = run(script, 40, 3);
    assert_eq!(summary.transitions, vec![(12, Mode::Scatter)]);
    assert_eq!(summary.hand_frames, 14);
}

#[test]
fn test_empty_script_stays_in_tree() {
    let summary = run(GestureScript::default(), 30, 1);
    assert!(summary.transitions.is_empty());
    assert_eq!(summary.final_snapshot.mode, Mode::Tree);
    assert_eq!(summary.final_snapshot.particles.len(), 61);
}

#[test]
fn test_missing_script_file() {
    let result = GestureScript::from_file("/nonexistent/gestures.yaml");
    assert!(matches!(result, Err(Error::Io(_))));
}
