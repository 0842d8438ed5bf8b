//! Configuration file handling

use gesture_choreography::{
    config::{Config, EXAMPLE_CONFIG},
    engine::ChoreographyEngine,
    particle::ParticleKind,
    Error,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gesture_choreography_{}_{}", std::process::id(), name))
}

#[test]
fn test_config_file_round_trip() {
    let path = temp_path("round_trip.yaml");
    let mut config = Config::default();
    config.scene.seed = Some(5);
    config.scene.decor_count = 42;
    config.layout.focus_position = [1.0, 2.0, 3.0];
    config.motion.transition_speed = 0.08;

    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file() {
    let result = Config::from_file(temp_path("does_not_exist.yaml"));
    assert!(matches!(result, Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn test_example_config_builds_engine() {
    let config = Config::from_yaml_str(EXAMPLE_CONFIG).unwrap();
    config.validate().unwrap();

    let engine = ChoreographyEngine::from_config(&config);
    assert_eq!(engine.registry().len(), 301);
    assert_eq!(engine.registry().particles_of_kind(ParticleKind::Photo).count(), 1);
}

#[test]
fn test_same_seed_same_scene() {
    let config = Config::from_yaml_str(EXAMPLE_CONFIG).unwrap();
    let a = ChoreographyEngine::from_config(&config).snapshot();
    let b = ChoreographyEngine::from_config(&config).snapshot();
    assert_eq!(a, b);
}

#[test]
fn test_unknown_field_types_rejected() {
    let result = Config::from_yaml_str("scene:\n  decor_count: lots\n");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_non_finite_config_never_reaches_engine() {
    let yaml = "gesture:\n  pinch_threshold: .nan\nlayout:\n  tree_height: .nan\n";
    let config = Config::from_yaml_str(yaml).unwrap();
    assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

    let mut config = Config::default();
    config.layout.tree_height = f64::INFINITY;
    assert!(config.validate().is_err());
}
