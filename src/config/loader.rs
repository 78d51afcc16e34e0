//! Configuration file loading and saving

use super::validation::{validate_config, validation_errors_to_anyhow};
use crate::constants::analytics::{
    DEFAULT_ENDPOINT, DEFAULT_POOL_SIZE, DEFAULT_QUEUE_SIZE, DEFAULT_TIMEOUT,
};
use crate::constants::config::DEBUG_ENV;
use crate::log::{LogFormat, Producer};
use crate::retry::Model;
use crate::utils::terminal::is_interactive;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub producer: Producer,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub pool_size: usize,
    pub queue_size: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            pool_size: DEFAULT_POOL_SIZE,
            queue_size: DEFAULT_QUEUE_SIZE,
        }
    }
}

impl AnalyticsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Reattempts after the first attempt
    pub times: usize,
    pub wait_secs: u64,
}

impl RetryConfig {
    pub fn model(&self) -> Model {
        Model::times(self.times).wait(Duration::from_secs(self.wait_secs))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractiveMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub interactive: InteractiveMode,
}

impl ProgressConfig {
    /// Resolve `auto` against the current terminal and `CI` variable
    pub fn is_interactive(&self) -> bool {
        match self.interactive {
            InteractiveMode::Auto => is_interactive(),
            InteractiveMode::Always => true,
            InteractiveMode::Never => false,
        }
    }
}

/// Settings of the stepkit CLI; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub analytics: AnalyticsConfig,
    pub retry: RetryConfig,
    pub progress: ProgressConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;

        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file '{}'", path))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        self.apply_debug_env(std::env::var(DEBUG_ENV).ok().as_deref());
    }

    fn apply_debug_env(&mut self, value: Option<&str>) {
        if let Some(value) = value
            && (value.eq_ignore_ascii_case("true") || value == "1")
        {
            self.log.debug = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_config(self).map_err(validation_errors_to_anyhow)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("---\n{}", yaml))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.log.format, LogFormat::Console);
        assert_eq!(config.log.producer, Producer::BitriseCli);
        assert!(!config.log.debug);
        assert!(config.analytics.enabled);
        assert_eq!(config.analytics.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.analytics.pool_size, 10);
        assert_eq!(config.analytics.queue_size, 100);
        assert_eq!(config.analytics.timeout(), Duration::from_secs(30));
        assert_eq!(config.retry.model().retries(), 0);
        assert_eq!(config.progress.interactive, InteractiveMode::Auto);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str(
            r#"
log:
  format: json
retry:
  times: 3
  wait_secs: 2
"#,
        )
        .unwrap();
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.producer, Producer::BitriseCli);
        assert_eq!(config.retry.model().retries(), 3);
        assert_eq!(config.retry.model().wait_duration(), Duration::from_secs(2));
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn test_debug_env_values() {
        let mut config = Config::new();
        config.apply_debug_env(Some("false"));
        assert!(!config.log.debug);
        config.apply_debug_env(None);
        assert!(!config.log.debug);
        config.apply_debug_env(Some("TRUE"));
        assert!(config.log.debug);
    }

    #[test]
    fn test_progress_mode_overrides() {
        let always = ProgressConfig {
            interactive: InteractiveMode::Always,
        };
        let never = ProgressConfig {
            interactive: InteractiveMode::Never,
        };
        assert!(always.is_interactive());
        assert!(!never.is_interactive());
    }
}
