//! Line-delimited JSON logger

use super::level::{Level, Producer};
use super::{Logger, write_record};
use crate::utils::clock::{TimeProvider, system_time};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

/// One JSON record; field order is part of the wire format
#[derive(Debug, Serialize)]
struct LogLine<'a> {
    timestamp: String,
    #[serde(rename = "type")]
    kind: &'static str,
    producer: Producer,
    level: Level,
    message: &'a str,
}

/// Logger writing one JSON object per line
pub struct JsonLogger<W = Stdout> {
    output: Mutex<W>,
    producer: Producer,
    debug_enabled: bool,
    time_provider: TimeProvider,
}

impl JsonLogger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonLogger<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
            producer: Producer::default(),
            debug_enabled: false,
            time_provider: system_time(),
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

    pub fn with_time_provider(mut self, time_provider: TimeProvider) -> Self {
        self.time_provider = time_provider;
        self
    }

    pub fn into_inner(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Logger for JsonLogger<W> {
    fn log(&self, producer: Producer, level: Level, message: &str) {
        if level == Level::Debug && !self.debug_enabled {
            return;
        }

        let line = LogLine {
            timestamp: format_timestamp(&(self.time_provider)()),
            kind: "log",
            producer,
            level,
            message,
        };

        match serde_json::to_string(&line) {
            Ok(mut json) => {
                json.push('\n');
                write_record(&self.output, json.as_bytes());
            }
            Err(e) => eprintln!("failed to serialize log message: {}", e),
        }
    }

    fn producer(&self) -> Producer {
        self.producer
    }
}

/// RFC 3339 UTC timestamp with up to microsecond precision
///
/// The fractional part is omitted when zero and trailing zeros are trimmed.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    let mut out = instant.format("%Y-%m-%dT%H:%M:%S").to_string();
    let micros = instant.timestamp_subsec_micros() % 1_000_000;
    if micros > 0 {
        let fraction = format!("{:06}", micros);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('Z');
    out
}
