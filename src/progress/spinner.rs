//! Animated in-place progress indicator

use super::{State, lock, stop_requested};
use crate::constants::progress::{SPINNER_CHARS, SPINNER_DELAY};
use crate::utils::clock::{Sleeper, SystemSleeper};
use std::io::{self, Stdout, Write};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Redraws `<message> <glyph>` every `delay`, cycling through the glyphs
///
/// Each frame first erases the previous one with one backspace-space-backspace
/// per character, so `stop` leaves the line as it was before `start`.
pub struct Spinner<W: Write + Send + 'static = Stdout> {
    message: String,
    chars: Arc<Vec<String>>,
    delay: Duration,
    sleeper: Arc<dyn Sleeper>,
    state: Arc<Mutex<State<W>>>,
}

impl Spinner<Stdout> {
    /// Spinner on stdout with the default glyphs and delay
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::new(
            message,
            SPINNER_CHARS.iter().map(|c| c.to_string()).collect(),
            SPINNER_DELAY,
            io::stdout(),
            Arc::new(SystemSleeper),
        )
    }
}

impl<W: Write + Send + 'static> Spinner<W> {
    /// An empty glyph list falls back to the default glyphs
    pub fn new(
        message: impl Into<String>,
        chars: Vec<String>,
        delay: Duration,
        output: W,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        let chars = if chars.is_empty() {
            SPINNER_CHARS.iter().map(|c| c.to_string()).collect()
        } else {
            chars
        };
        Self {
            message: message.into(),
            chars: Arc::new(chars),
            delay,
            sleeper,
            state: Arc::new(Mutex::new(State::new(output))),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }

    /// Start animating; no-op when already running
    pub fn start(&self) {
        let (generation, stop_rx) = {
            let mut state = lock(&self.state);
            if state.active {
                return;
            }
            state.active = true;
            state.generation += 1;

            let (stop_tx, stop_rx) = mpsc::sync_channel(1);
            state.stop = Some(stop_tx);
            (state.generation, stop_rx)
        };

        let state = Arc::clone(&self.state);
        let sleeper = Arc::clone(&self.sleeper);
        let chars = Arc::clone(&self.chars);
        let message = self.message.clone();
        let delay = self.delay;

        thread::spawn(move || {
            for glyph in chars.iter().cycle() {
                if stop_requested(&stop_rx) {
                    return;
                }

                {
                    let mut state = lock(&state);
                    if !state.is_current(generation) {
                        return;
                    }
                    let frame = format!("{} {}", message, glyph);
                    let text = format!("{}{}", erase_sequence(&state.last_output), frame);
                    if let Err(e) = state.write_str(&text) {
                        eprintln!("progress spinner failed to write: {}", e);
                        return;
                    }
                    state.last_output = frame;
                }

                sleeper.sleep(delay);
            }
        });
    }

    /// Stop animating and erase the last frame; no-op when not running
    pub fn stop(&self) {
        let mut state = lock(&self.state);
        if !state.active {
            return;
        }
        state.active = false;

        if let Some(stop) = state.stop.take() {
            let _ = stop.try_send(());
        }

        let erase = erase_sequence(&state.last_output);
        state.last_output.clear();
        if let Err(e) = state.write_str(&erase) {
            eprintln!("progress spinner failed to write: {}", e);
        }
    }

    /// Write text on the spinner's output, outside of any animation
    pub(crate) fn write_plain(&self, text: &str) {
        let mut state = lock(&self.state);
        if let Err(e) = state.write_str(text) {
            eprintln!("progress failed to write: {}", e);
        }
    }
}

impl<W: Write + Send + 'static> Drop for Spinner<W> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Backspace-space-backspace once per character of `printed`
fn erase_sequence(printed: &str) -> String {
    "\u{8} \u{8}".repeat(printed.chars().count())
}
