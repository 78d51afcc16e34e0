//! Dot-per-interval progress indicator

use super::{State, lock, stop_requested};
use crate::constants::progress::TICKER_INTERVAL;
use crate::utils::clock::{Sleeper, SystemSleeper};
use std::io::{self, Stdout, Write};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Prints its message once, then a dot per tick until stopped
///
/// ```text
/// Downloading cache.....
/// ```
pub struct Ticker<W: Write + Send + 'static = Stdout> {
    message: String,
    interval: Duration,
    sleeper: Arc<dyn Sleeper>,
    state: Arc<Mutex<State<W>>>,
}

impl Ticker<Stdout> {
    /// Ticker on stdout with the default interval
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::new(
            message,
            TICKER_INTERVAL,
            io::stdout(),
            Arc::new(SystemSleeper),
        )
    }
}

impl<W: Write + Send + 'static> Ticker<W> {
    pub fn new(
        message: impl Into<String>,
        interval: Duration,
        output: W,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            message: message.into(),
            interval,
            sleeper,
            state: Arc::new(Mutex::new(State::new(output))),
        }
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }

    /// Print the message and start ticking; no-op when already running
    pub fn start(&self) {
        let (generation, stop_rx) = {
            let mut state = lock(&self.state);
            if state.active {
                return;
            }
            state.active = true;
            state.generation += 1;

            if let Err(e) = state.write_str(&self.message) {
                eprintln!("progress ticker failed to write message: {}", e);
            }

            let (stop_tx, stop_rx) = mpsc::sync_channel(1);
            state.stop = Some(stop_tx);
            (state.generation, stop_rx)
        };

        let state = Arc::clone(&self.state);
        let sleeper = Arc::clone(&self.sleeper);
        let interval = self.interval;

        thread::spawn(move || {
            loop {
                sleeper.sleep(interval);
                if stop_requested(&stop_rx) {
                    return;
                }

                let mut state = lock(&state);
                if !state.is_current(generation) {
                    return;
                }
                if let Err(e) = state.write_str(".") {
                    eprintln!("progress ticker failed to write: {}", e);
                    return;
                }
            }
        });
    }

    /// Stop ticking and end the line; no-op when not running
    pub fn stop(&self) {
        let mut state = lock(&self.state);
        if !state.active {
            return;
        }
        state.active = false;

        if let Some(stop) = state.stop.take() {
            let _ = stop.try_send(());
        }
        if let Err(e) = state.write_str("\n") {
            eprintln!("progress ticker failed to write: {}", e);
        }
    }
}

impl<W: Write + Send + 'static> Drop for Ticker<W> {
    fn drop(&mut self) {
        self.stop();
    }
}
