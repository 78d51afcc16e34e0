//! Configuration loading integration tests

use serial_test::serial;
use std::fs;
use stepkit::config::{Config, InteractiveMode};
use stepkit::log::{LogFormat, Producer};
use tempfile::TempDir;

fn write_config(dir: &TempDir, yaml: &str) -> String {
    let path = dir.path().join("stepkit.yaml");
    fs::write(&path, yaml).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
log:
  format: json
  producer: step
  debug: true
analytics:
  enabled: false
  endpoint: http://localhost:8080/track
  timeout_secs: 5
  pool_size: 2
  queue_size: 8
retry:
  times: 4
  wait_secs: 1
progress:
  interactive: never
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.log.format, LogFormat::Json);
    assert_eq!(config.log.producer, Producer::Step);
    assert!(config.log.debug);
    assert!(!config.analytics.enabled);
    assert_eq!(config.analytics.endpoint, "http://localhost:8080/track");
    assert_eq!(config.analytics.pool_size, 2);
    assert_eq!(config.analytics.queue_size, 8);
    assert_eq!(config.retry.times, 4);
    assert_eq!(config.progress.interactive, InteractiveMode::Never);
    assert!(!config.progress.is_interactive());
}

#[test]
fn test_empty_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");
    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    let path = path.to_str().unwrap();

    assert!(Config::load(path).is_err());
    assert_eq!(Config::load_or_default(path).unwrap(), Config::default());
}

#[test]
fn test_malformed_yaml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "log: [unclosed");
    let err = Config::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_invalid_values_are_all_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
analytics:
  endpoint: ftp://example.com
  pool_size: 0
  queue_size: 0
  timeout_secs: 0
"#,
    );

    let message = Config::load(&path).unwrap_err().to_string();
    assert!(message.contains("Invalid analytics endpoint: 'ftp://example.com'"));
    assert!(message.contains("pool_size must be at least 1"));
    assert!(message.contains("queue_size must be at least 1"));
    assert!(message.contains("timeout_secs must be at least 1"));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.yaml");
    let path = path.to_str().unwrap();

    let mut config = Config::new();
    config.log.format = LogFormat::Json;
    config.retry.times = 2;
    config.progress.interactive = InteractiveMode::Always;
    config.save(path).unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.starts_with("---\n"));
    assert_eq!(Config::load(path).unwrap(), config);
}

#[test]
#[serial]
fn test_debug_env_enables_debug() {
    let mut config = Config::new();

    unsafe { std::env::set_var("STEPKIT_DEBUG", "true") };
    config.apply_env();
    unsafe { std::env::remove_var("STEPKIT_DEBUG") };

    assert!(config.log.debug);
}

#[test]
#[serial]
fn test_debug_env_ignores_other_values() {
    let mut config = Config::new();

    unsafe { std::env::set_var("STEPKIT_DEBUG", "no") };
    config.apply_env();
    unsafe { std::env::remove_var("STEPKIT_DEBUG") };

    assert!(!config.log.debug);
}

#[test]
#[serial]
fn test_ci_env_disables_auto_progress() {
    let previous = std::env::var("CI").ok();

    unsafe { std::env::set_var("CI", "true") };
    let config = Config::new();
    assert_eq!(config.progress.interactive, InteractiveMode::Auto);
    assert!(!config.progress.is_interactive());

    match previous {
        Some(value) => unsafe { std::env::set_var("CI", value) },
        None => unsafe { std::env::remove_var("CI") },
    }
}
