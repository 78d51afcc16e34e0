//! Progress indicators for long-running actions
//!
//! - [`Ticker`] prints a message followed by one dot per interval
//! - [`Spinner`] redraws `<message> <glyph>` in place
//! - [`Wrapper`] brackets an action with a spinner, or with plain text when
//!   the output is not interactive
//!
//! Both indicators run their emitter on a background thread started by
//! `start` and silenced by `stop`. State is guarded by one mutex shared with
//! the emitter, and every pause goes through an injected
//! [`Sleeper`](crate::utils::Sleeper).

pub mod spinner;
pub mod ticker;
pub mod wrapper;

pub use spinner::Spinner;
pub use ticker::Ticker;
pub use wrapper::Wrapper;

use std::io::Write;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Mutex, MutexGuard};

/// Shared state of an indicator and its emitter thread
struct State<W> {
    active: bool,
    /// Bumped on every start so a lingering emitter from an earlier run exits
    generation: u64,
    output: W,
    last_output: String,
    stop: Option<std::sync::mpsc::SyncSender<()>>,
}

impl<W: Write> State<W> {
    fn new(output: W) -> Self {
        Self {
            active: false,
            generation: 0,
            output,
            last_output: String::new(),
            stop: None,
        }
    }

    fn write_str(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Whether the emitter started at `generation` may still write
    fn is_current(&self, generation: u64) -> bool {
        self.active && self.generation == generation
    }
}

fn lock<W>(state: &Mutex<State<W>>) -> MutexGuard<'_, State<W>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn stop_requested(stop: &Receiver<()>) -> bool {
    !matches!(stop.try_recv(), Err(TryRecvError::Empty))
}
