//! Time and sleep capabilities
//!
//! Every timestamp, sleep and tick in the library goes through one of these
//! so that tests can substitute a deterministic implementation.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Blocking sleep primitive
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by [`std::thread::sleep`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSleeper;

impl Sleeper for SystemSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Zero-argument wall-clock source
pub type TimeProvider = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Time provider returning the current system time
pub fn system_time() -> TimeProvider {
    Arc::new(Utc::now)
}

/// Time provider that always returns `instant`
pub fn fixed_time(instant: DateTime<Utc>) -> TimeProvider {
    Arc::new(move || instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_time_is_stable() {
        let instant = Utc.with_ymd_and_hms(2022, 1, 1, 1, 1, 1).unwrap();
        let provider = fixed_time(instant);
        assert_eq!(provider(), instant);
        assert_eq!(provider(), provider());
    }

    #[test]
    fn test_system_sleeper_zero_duration_returns() {
        SystemSleeper.sleep(Duration::ZERO);
    }
}
