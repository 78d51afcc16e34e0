//! Severity levels, producers and their ANSI color table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closing sequence of every colored console record
pub const RESET: &str = "\u{1b}[0m";

/// Severity of a log record
///
/// The ordering only matters for display; filtering is limited to the
/// `debug` gate on each logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Error,
    Warn,
    Info,
    Done,
    Normal,
    Debug,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Done,
        Level::Normal,
        Level::Debug,
    ];

    /// Wire name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Done => "done",
            Level::Normal => "normal",
            Level::Debug => "debug",
        }
    }

    /// Console color of the level, `None` for [`Level::Normal`]
    pub fn color(&self) -> Option<AnsiColor> {
        match self {
            Level::Error => Some(AnsiColor::Red),
            Level::Warn => Some(AnsiColor::Yellow),
            Level::Info => Some(AnsiColor::Blue),
            Level::Done => Some(AnsiColor::Green),
            Level::Debug => Some(AnsiColor::Magenta),
            Level::Normal => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical source of a log record
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Producer {
    #[default]
    BitriseCli,
    Step,
}

impl Producer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Producer::BitriseCli => "bitrise_cli",
            Producer::Step => "step",
        }
    }
}

impl fmt::Display for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Producer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitrise_cli" => Ok(Producer::BitriseCli),
            "step" => Ok(Producer::Step),
            other => anyhow::bail!("Unknown producer: '{}'", other),
        }
    }
}

/// The five recognized bold console colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
}

impl AnsiColor {
    pub const ALL: [AnsiColor; 5] = [
        AnsiColor::Red,
        AnsiColor::Green,
        AnsiColor::Yellow,
        AnsiColor::Blue,
        AnsiColor::Magenta,
    ];

    /// Decimal SGR color code
    pub fn code(&self) -> u8 {
        match self {
            AnsiColor::Red => 31,
            AnsiColor::Green => 32,
            AnsiColor::Yellow => 33,
            AnsiColor::Blue => 34,
            AnsiColor::Magenta => 35,
        }
    }

    /// Opening escape sequence, e.g. `ESC[31;1m`
    pub fn prefix(&self) -> &'static str {
        match self {
            AnsiColor::Red => "\u{1b}[31;1m",
            AnsiColor::Green => "\u{1b}[32;1m",
            AnsiColor::Yellow => "\u{1b}[33;1m",
            AnsiColor::Blue => "\u{1b}[34;1m",
            AnsiColor::Magenta => "\u{1b}[35;1m",
        }
    }

    /// Level a line opening with this color decodes to
    pub fn level(&self) -> Level {
        match self {
            AnsiColor::Red => Level::Error,
            AnsiColor::Green => Level::Done,
            AnsiColor::Yellow => Level::Warn,
            AnsiColor::Blue => Level::Info,
            AnsiColor::Magenta => Level::Debug,
        }
    }
}
