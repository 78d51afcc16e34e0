//! Bracket an action with a progress indicator

use super::Spinner;
use crate::utils::terminal::is_interactive;
use std::io::{Stdout, Write};

/// Runs actions under a spinner, or under a static message when the output
/// is not a terminal
pub struct Wrapper<W: Write + Send + 'static = Stdout> {
    spinner: Spinner<W>,
    interactive: bool,
}

impl Wrapper<Stdout> {
    /// Stdout spinner, animated only when stdout is interactive
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::new(Spinner::with_message(message), is_interactive())
    }
}

impl<W: Write + Send + 'static> Wrapper<W> {
    pub fn new(spinner: Spinner<W>, interactive: bool) -> Self {
        Self {
            spinner,
            interactive,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Run `action` under the indicator and return its result
    ///
    /// The indicator is finished even if `action` panics.
    pub fn wrap_action<T>(&self, action: impl FnOnce() -> T) -> T {
        if self.interactive {
            self.spinner.start();
            let _guard = SpinnerGuard(&self.spinner);
            action()
        } else {
            self.spinner.write_plain(&static_message(self.spinner.message()));
            let _guard = NewlineGuard(&self.spinner);
            action()
        }
    }
}

/// Message shown in non-interactive mode
fn static_message(message: &str) -> String {
    if message.ends_with('.') {
        message.to_string()
    } else {
        format!("{}...", message)
    }
}

struct SpinnerGuard<'a, W: Write + Send + 'static>(&'a Spinner<W>);

impl<W: Write + Send + 'static> Drop for SpinnerGuard<'_, W> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

struct NewlineGuard<'a, W: Write + Send + 'static>(&'a Spinner<W>);

impl<W: Write + Send + 'static> Drop for NewlineGuard<'_, W> {
    fn drop(&mut self) {
        self.0.write_plain("\n");
    }
}
