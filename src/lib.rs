//! Stepkit - helper libraries for CLI and CI tooling
//!
//! Logging with ANSI and JSON producers, an analytics event pipeline, a retry
//! engine, progress indicators and a subprocess runner that re-levels colored
//! child output. Every side effect (clock, sleep, writer, HTTP) is injected.

pub mod analytics;
pub mod command;
pub mod commands;
pub mod config;
pub mod constants;
pub mod log;
pub mod progress;
pub mod retry;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use analytics::{AsyncTracker, Properties, Property, SyncTracker, Tracker};
pub use command::{CommandRunner, CommandSpec};
pub use config::Config;
pub use log::{Level, Logger, LoggerExt, Producer};
pub use retry::Model;

/// Helper to load the default config file, falling back to defaults
pub fn load_default_config() -> anyhow::Result<Config> {
    Config::load_or_default(constants::config::DEFAULT_CONFIG_FILE)
}
