use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use astrobit_defender::config::*;
use astrobit_defender::error::GameError;

fn config_from(pairs: &[(&str, &str)]) -> Result<Config, GameError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_nothing_set() {
    let config = config_from(&[]).expect("defaults");
    assert_eq!(config, Config::default());
    assert_eq!(config.fps, 60);
    assert_eq!(config.seed, None);
    assert_eq!(config.log_file, None);
}

#[test]
fn reads_every_key() {
    let config = config_from(&[
        (ENV_FPS, "30"),
        (ENV_SEED, " 1234 "),
        (ENV_LOG_FILE, "/tmp/astrobit.log"),
    ])
    .expect("valid");
    assert_eq!(config.fps, 30);
    assert_eq!(config.seed, Some(1234));
    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/astrobit.log")));
}

#[test]
fn rejects_bad_fps() {
    for bad in ["fast", "0", "241", "-5"] {
        let err = config_from(&[(ENV_FPS, bad)]).err();
        assert!(
            matches!(err, Some(GameError::InvalidConfig { key, .. }) if key == ENV_FPS),
            "accepted {bad}"
        );
    }
}

#[test]
fn fps_bounds_inclusive() {
    assert_eq!(config_from(&[(ENV_FPS, "1")]).expect("min").fps, 1);
    assert_eq!(config_from(&[(ENV_FPS, "240")]).expect("max").fps, 240);
}

#[test]
fn rejects_bad_seed() {
    let err = config_from(&[(ENV_SEED, "abc")]).err();
    assert!(matches!(err, Some(GameError::InvalidConfig { key, .. }) if key == ENV_SEED));
}

#[test]
fn blank_log_path_means_no_log() {
    let config = config_from(&[(ENV_LOG_FILE, "  ")]).expect("valid");
    assert_eq!(config.log_file, None);
}

#[test]
fn frame_interval_from_fps() {
    let config = config_from(&[(ENV_FPS, "50")]).expect("valid");
    assert_eq!(config.frame_interval(), Duration::from_millis(20));
}

#[test]
fn error_messages_name_the_key() {
    let err = config_from(&[(ENV_FPS, "fast")]).expect_err("invalid");
    let msg = err.to_string();
    assert!(msg.contains(ENV_FPS));
    assert!(msg.contains("fast"));
}
