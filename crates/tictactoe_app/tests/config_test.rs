//! Tests for configuration loading.

use std::io::Write;
use std::time::Duration;
use tictactoe_app::AppConfig;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
log_filter = "debug"

[players]
x = "Ada"

[confetti]
particles_per_spawn = 4
seed = 7

[announcement]
draw_ms = 250
"#
    )
    .unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(config.log_filter(), "debug");
    assert_eq!(config.log_file(), "tictactoe.log");
    assert_eq!(config.players().x(), "Ada");
    assert_eq!(config.players().o(), "");

    let celebration = config.confetti().celebration();
    assert_eq!(celebration.particles_per_spawn, 4);
    assert_eq!(celebration.seed, Some(7));
    assert_eq!(celebration.spawn_interval, Duration::from_millis(20));

    assert_eq!(config.announcement().draw(), Duration::from_millis(250));
    assert_eq!(config.announcement().win(), Duration::from_millis(1000));
}

#[test]
fn test_round_trips_through_toml() {
    let config = AppConfig::default();
    let text = config.to_toml().unwrap();
    assert!(text.contains("[confetti]"));
    assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn test_invalid_toml_is_reported() {
    let err = AppConfig::from_toml("log_filter = ").unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_zero_cell_size_is_rejected() {
    let err = AppConfig::from_toml("[confetti]\ncell_width = 0.0\n").unwrap_err();
    assert!(err.message.contains("cell size"));
}

#[test]
fn test_unreadable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(AppConfig::from_file(dir.path()).is_err());
}
