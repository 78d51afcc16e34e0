//! Configuration management module

pub mod loader;
pub mod validation;

pub use loader::{
    AnalyticsConfig, Config, InteractiveMode, LogConfig, ProgressConfig, RetryConfig,
};
pub use validation::{ValidationError, validate_config};
