//! Layered logging
//!
//! ## Sub-modules
//!
//! - [`level`]: `Level`, `Producer` and the ANSI color table
//! - [`console`]: `ConsoleLogger`, colored text output
//! - [`json`]: `JsonLogger`, one JSON object per line
//! - [`writer`]: `LogWriter`, decodes colored subprocess output into records
//!
//! Every logger implements the single-method [`Logger`] capability. The
//! per-level helpers live on [`LoggerExt`] and are available on any logger.

pub mod console;
pub mod json;
pub mod level;
pub mod writer;

pub use console::ConsoleLogger;
pub use json::JsonLogger;
pub use level::{AnsiColor, Level, Producer, RESET};
pub use writer::LogWriter;

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

/// Sink for log records
pub trait Logger: Send + Sync {
    fn log(&self, producer: Producer, level: Level, message: &str);

    /// Producer used by the [`LoggerExt`] helpers
    fn producer(&self) -> Producer {
        Producer::default()
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, producer: Producer, level: Level, message: &str) {
        (**self).log(producer, level, message)
    }

    fn producer(&self) -> Producer {
        (**self).producer()
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, producer: Producer, level: Level, message: &str) {
        (**self).log(producer, level, message)
    }

    fn producer(&self) -> Producer {
        (**self).producer()
    }
}

/// Per-level helpers on top of [`Logger::log`]
pub trait LoggerExt: Logger {
    fn error(&self, message: &str) {
        self.log(self.producer(), Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.log(self.producer(), Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(self.producer(), Level::Info, message);
    }

    fn done(&self, message: &str) {
        self.log(self.producer(), Level::Done, message);
    }

    fn normal(&self, message: &str) {
        self.log(self.producer(), Level::Normal, message);
    }

    fn debug(&self, message: &str) {
        self.log(self.producer(), Level::Debug, message);
    }
}

impl<L: Logger + ?Sized> LoggerExt for L {}

/// Output format of a logger built by [`build_logger`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Console,
    Json,
}

/// Build a shared logger of the given format
pub fn build_logger<W>(format: LogFormat, producer: Producer, debug: bool, output: W) -> Arc<dyn Logger>
where
    W: Write + Send + 'static,
{
    match format {
        LogFormat::Console => Arc::new(
            ConsoleLogger::new(output)
                .with_producer(producer)
                .with_debug(debug),
        ),
        LogFormat::Json => Arc::new(
            JsonLogger::new(output)
                .with_producer(producer)
                .with_debug(debug),
        ),
    }
}

static DEFAULT_LOGGER: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Install the process-wide logger; may succeed only once
pub fn init_default(logger: Arc<dyn Logger>) -> anyhow::Result<()> {
    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| anyhow::anyhow!("Default logger is already initialized"))
}

/// Process-wide logger, a stdout [`ConsoleLogger`] unless one was installed
pub fn default_logger() -> Arc<dyn Logger> {
    DEFAULT_LOGGER
        .get_or_init(|| Arc::new(ConsoleLogger::stdout()))
        .clone()
}

/// Write one record with a single call; failures are reported on stderr only
pub(crate) fn write_record<W: Write>(output: &Mutex<W>, record: &[u8]) {
    let mut output = output.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Err(e) = output.write_all(record).and_then(|_| output.flush()) {
        eprintln!("failed to write log message: {}", e);
    }
}
