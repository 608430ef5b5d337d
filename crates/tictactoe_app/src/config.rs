//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictactoe_confetti::{CelebrationConfig, Viewport};
use tracing::{debug, info, instrument};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// File receiving TUI logs.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// Names pre-filled on the start screen.
    #[serde(default)]
    players: PlayerDefaults,

    /// Confetti timing and sizing.
    #[serde(default)]
    confetti: ConfettiSettings,

    /// Delays before the result announcement appears.
    #[serde(default)]
    announcement: AnnouncementDelays,
}

fn default_log_filter() -> String {
    "info,tictactoe_app=debug".to_string()
}

fn default_log_file() -> String {
    "tictactoe.log".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_file: default_log_file(),
            players: PlayerDefaults::default(),
            confetti: ConfettiSettings::default(),
            announcement: AnnouncementDelays::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::from_file(path)?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Replaces the pre-filled names where given.
    #[instrument(skip(self))]
    pub fn override_players(&mut self, x: Option<String>, o: Option<String>) {
        if let Some(x) = x {
            self.players.x = x;
        }
        if let Some(o) = o {
            self.players.o = o;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.confetti;
        if c.cell_width <= 0.0 || c.cell_height <= 0.0 {
            return Err(ConfigError::new(format!(
                "confetti cell size must be positive, got {}x{}",
                c.cell_width, c.cell_height
            )));
        }
        if c.frame_interval_ms == 0 || c.spawn_interval_ms == 0 {
            return Err(ConfigError::new(
                "confetti intervals must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }
}

/// Names pre-filled on the start screen. Blank means the default name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct PlayerDefaults {
    /// Pre-filled name for X.
    #[serde(default)]
    x: String,
    /// Pre-filled name for O.
    #[serde(default)]
    o: String,
}

/// Confetti settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiSettings {
    /// Milliseconds between spawn bursts.
    spawn_interval_ms: u64,
    /// Particles per burst.
    particles_per_spawn: usize,
    /// Milliseconds between animation steps.
    frame_interval_ms: u64,
    /// Seed for reproducible confetti.
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    /// Surface units per terminal column.
    cell_width: f32,
    /// Surface units per terminal row.
    cell_height: f32,
}

impl Default for ConfettiSettings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 20,
            particles_per_spawn: 2,
            frame_interval_ms: 16,
            seed: None,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl ConfettiSettings {
    /// Scheduler settings for a celebration.
    pub fn celebration(&self) -> CelebrationConfig {
        CelebrationConfig {
            spawn_interval: Duration::from_millis(self.spawn_interval_ms),
            particles_per_spawn: self.particles_per_spawn,
            frame_interval: Duration::from_millis(self.frame_interval_ms),
            seed: self.seed,
        }
    }

    /// Surface covering a terminal of `cols` x `rows` cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            f32::from(cols) * self.cell_width,
            f32::from(rows) * self.cell_height,
        )
    }
}

/// Delays before the result announcement.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementDelays {
    /// Milliseconds after a win.
    win_ms: u64,
    /// Milliseconds after a draw.
    draw_ms: u64,
}

impl Default for AnnouncementDelays {
    fn default() -> Self {
        Self {
            win_ms: 1000,
            draw_ms: 500,
        }
    }
}

impl AnnouncementDelays {
    /// Delay after a win.
    pub fn win(&self) -> Duration {
        Duration::from_millis(self.win_ms)
    }

    /// Delay after a draw.
    pub fn draw(&self) -> Duration {
        Duration::from_millis(self.draw_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_browser_timing() {
        let config = AppConfig::default();
        let celebration = config.confetti().celebration();
        assert_eq!(celebration.spawn_interval, Duration::from_millis(20));
        assert_eq!(celebration.particles_per_spawn, 2);
        assert_eq!(config.announcement().win(), Duration::from_secs(1));
        assert_eq!(config.announcement().draw(), Duration::from_millis(500));
    }

    #[test]
    fn test_viewport_scales_cells() {
        let settings = ConfettiSettings::default();
        assert_eq!(settings.viewport(80, 24), Viewport::new(640.0, 384.0));
    }

    #[test]
    fn test_override_players() {
        let mut config = AppConfig::default();
        config.override_players(Some("Ada".to_string()), None);
        assert_eq!(config.players().x(), "Ada");
        assert_eq!(config.players().o(), "");
    }
}
