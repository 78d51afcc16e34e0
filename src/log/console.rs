//! ANSI-colored text logger

use super::level::{Level, Producer, RESET};
use super::{Logger, write_record};
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

/// Logger writing one colored line per record
///
/// Each level is wrapped in its bold color (`ESC[<code>;1m ... ESC[0m`),
/// [`Level::Normal`] is written as is.
pub struct ConsoleLogger<W = Stdout> {
    output: Mutex<W>,
    producer: Producer,
    debug_enabled: bool,
}

impl ConsoleLogger<Stdout> {
    /// Console logger on the process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleLogger<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
            producer: Producer::default(),
            debug_enabled: false,
        }
    }

    pub fn with_producer(mut self, producer: Producer) -> Self {
        self.producer = producer;
        self
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    /// Consume the logger and hand back its writer
    pub fn into_inner(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Logger for ConsoleLogger<W> {
    fn log(&self, _producer: Producer, level: Level, message: &str) {
        if level == Level::Debug && !self.debug_enabled {
            return;
        }
        write_record(&self.output, format_console(level, message).as_bytes());
    }

    fn producer(&self) -> Producer {
        self.producer
    }
}

/// Render one console record, always ending in exactly one newline
pub fn format_console(level: Level, message: &str) -> String {
    let body = message.strip_suffix('\n').unwrap_or(message);
    match level.color() {
        Some(color) => format!("{}{}{}\n", color.prefix(), body, RESET),
        None => format!("{}\n", body),
    }
}
