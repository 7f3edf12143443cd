//! Coverage for config files and env overrides.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use adcraft::config::{config_path_with, Config};

fn resolver(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_gives_defaults() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = Config::load_from_file(&tmp.path().join("absent.toml"))
        .expect("missing file should be fine");

    assert_eq!(config.service.latency_ms, 500);
    assert!((config.service.transient_failure_rate - 0.1).abs() < f64::EPSILON);
    assert_eq!(config.service.seed, None);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.credentials.env_file, PathBuf::from(".env"));
}

#[test]
fn file_values_are_loaded() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("adcraft.toml");
    std::fs::write(
        &path,
        r#"
[service]
latency_ms = 0
transient_failure_rate = 0.0
seed = 42

[logging]
level = "debug"
logs_dir = "/var/log/adcraft"
"#,
    )
    .expect("should write config");

    let config = Config::load_from_file(&path).expect("config should parse");
    assert_eq!(config.service.latency_ms, 0);
    assert_eq!(config.service.seed, Some(42));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.logs_dir.as_deref(),
        Some(Path::new("/var/log/adcraft"))
    );
    assert_eq!(config.credentials.env_file, PathBuf::from(".env"));
}

#[test]
fn malformed_file_is_an_error() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("adcraft.toml");
    std::fs::write(&path, "[service]\nlatency_ms = \"fast\"\n").expect("should write config");

    let err = Config::load_from_file(&path).expect_err("wrong type");
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn env_overrides_win_over_file() {
    let mut config = Config::from_toml("[service]\nlatency_ms = 250\n").expect("should parse");
    config.apply_overrides(resolver(&[
        ("ADCRAFT_LATENCY_MS", "0"),
        ("ADCRAFT_FAILURE_RATE", "1"),
        ("ADCRAFT_SEED", "9"),
        ("ADCRAFT_LOG_LEVEL", "adcraft=trace"),
        ("ADCRAFT_ENV_FILE", "/etc/adcraft/.env"),
    ]));

    assert_eq!(config.service.latency_ms, 0);
    assert!((config.service.transient_failure_rate - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.service.seed, Some(9));
    assert_eq!(config.logging.level, "adcraft=trace");
    assert_eq!(config.credentials.env_file, PathBuf::from("/etc/adcraft/.env"));
}

#[test]
fn invalid_overrides_are_ignored() {
    let mut config = Config::default();
    config.apply_overrides(resolver(&[
        ("ADCRAFT_LATENCY_MS", "soon"),
        ("ADCRAFT_FAILURE_RATE", "1.5"),
        ("ADCRAFT_SEED", "-1"),
    ]));

    assert_eq!(config.service, Config::default().service);
}

#[test]
fn config_path_prefers_env() {
    assert_eq!(
        config_path_with(resolver(&[("ADCRAFT_CONFIG_PATH", "/tmp/custom.toml")])),
        PathBuf::from("/tmp/custom.toml")
    );
    assert_eq!(config_path_with(resolver(&[])), PathBuf::from("adcraft.toml"));
}
