//! Central constants for the stepkit library

/// Default values for the analytics pipeline
pub mod analytics {
    use std::time::Duration;

    /// Default tracking endpoint
    pub const DEFAULT_ENDPOINT: &str = "https://bitrise-step-analytics.herokuapp.com/track";

    /// Request timeout of the default HTTP client
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Request timeout used by the synchronous tracker
    pub const SYNC_TIMEOUT: Duration = Duration::from_secs(10);

    /// Number of workers draining the async tracker queue
    pub const DEFAULT_POOL_SIZE: usize = 10;

    /// Capacity of the async tracker queue
    pub const DEFAULT_QUEUE_SIZE: usize = 100;

    /// Status code reported when the request never got a response
    pub const TRANSPORT_FAILURE_STATUS: u16 = 0;
}

/// Default values for progress indicators
pub mod progress {
    use std::time::Duration;

    /// Spinner frame delay
    pub const SPINNER_DELAY: Duration = Duration::from_millis(100);

    /// Ticker dot interval
    pub const TICKER_INTERVAL: Duration = Duration::from_secs(5);

    /// Spinner glyphs, one frame each
    pub const SPINNER_CHARS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "stepkit.yaml";

    /// Enables debug logging when set to `true`
    pub const DEBUG_ENV: &str = "STEPKIT_DEBUG";

    /// Set by CI providers; forces non-interactive progress output
    pub const CI_ENV: &str = "CI";
}
