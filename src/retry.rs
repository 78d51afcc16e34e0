//! Bounded retry loop with a fixed wait between attempts
//!
//! ```rust
//! use stepkit::retry::Model;
//! use std::time::Duration;
//!
//! let result: Result<(), String> = Model::times(2)
//!     .wait(Duration::ZERO)
//!     .try_action(|attempt| if attempt < 1 { Err("flaky".into()) } else { Ok(()) });
//! assert!(result.is_ok());
//! ```

use crate::utils::clock::{Sleeper, SystemSleeper};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Retry policy: `retry + 1` attempts at most, `wait` between them
#[derive(Clone)]
pub struct Model {
    retry: usize,
    wait: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("retry", &self.retry)
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::times(0)
    }
}

impl Model {
    /// Policy allowing `retry` reattempts after the first one
    pub fn times(retry: usize) -> Self {
        Self {
            retry,
            wait: Duration::ZERO,
            sleeper: Arc::new(SystemSleeper),
        }
    }

    /// Set the pause between two attempts
    pub fn wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn retries(&self) -> usize {
        self.retry
    }

    pub fn wait_duration(&self) -> Duration {
        self.wait
    }

    /// Run `action` until it succeeds or the attempts are used up
    ///
    /// The action receives the zero-based attempt index. The error of the
    /// last attempt is returned unchanged.
    pub fn try_action<F, E>(&self, mut action: F) -> Result<(), E>
    where
        F: FnMut(usize) -> Result<(), E>,
    {
        self.try_with_abort(|attempt| (action(attempt), false))
    }

    /// Like [`Model::try_action`], but the action may stop the loop early
    ///
    /// When the returned flag is `true` the loop ends at once with that
    /// attempt's result, without sleeping.
    pub fn try_with_abort<F, E>(&self, mut action: F) -> Result<(), E>
    where
        F: FnMut(usize) -> (Result<(), E>, bool),
    {
        let mut attempt = 0;
        loop {
            let (result, abort) = action(attempt);
            let error = match result {
                Ok(()) => return Ok(()),
                Err(error) => error,
            };
            if abort || attempt >= self.retry {
                return Err(error);
            }
            if !self.wait.is_zero() {
                self.sleeper.sleep(self.wait);
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSleeper {
        calls: Mutex<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.calls.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn test_zero_retries_runs_once() {
        let mut calls = 0;
        let result: Result<(), &str> = Model::times(0).try_action(|_| {
            calls += 1;
            Err("nope")
        });
        assert_eq!(result, Err("nope"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_attempt_indexes_increase() {
        let mut seen = Vec::new();
        let _: Result<(), ()> = Model::times(3).try_action(|attempt| {
            seen.push(attempt);
            Err(())
        });
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_returns_last_error() {
        let result: Result<(), String> =
            Model::times(2).try_action(|attempt| Err(format!("attempt {}", attempt)));
        assert_eq!(result, Err("attempt 2".to_string()));
    }

    #[test]
    fn test_sleeps_between_attempts_only() {
        let sleeper = Arc::new(RecordingSleeper::default());
        let wait = Duration::from_millis(250);
        let model = Model::times(2).wait(wait).with_sleeper(sleeper.clone());

        let _: Result<(), ()> = model.try_action(|_| Err(()));

        assert_eq!(*sleeper.calls.lock().unwrap(), vec![wait, wait]);
    }

    #[test]
    fn test_debug_output() {
        let model = Model::times(1).wait(Duration::from_secs(2));
        let debug = format!("{:?}", model);
        assert!(debug.contains("retry: 1"));
        assert_eq!(model.retries(), 1);
        assert_eq!(model.wait_duration(), Duration::from_secs(2));
    }
}
