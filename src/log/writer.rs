//! Byte-stream adaptor turning colored subprocess output into log records

use super::Logger;
use super::level::{AnsiColor, Level, Producer, RESET};
use std::io::{self, Write};

/// Line-buffering sink that re-levels ANSI-colored output
///
/// Bytes are buffered until a newline arrives (or [`Write::flush`] is
/// called), so a record is never emitted for a partial line. Each line whose
/// only markup is one recognized color prefix and a closing reset decodes to
/// that color's level; every other line is forwarded verbatim as
/// [`Level::Normal`].
///
/// Lines are decoded as UTF-8. Invalid byte sequences are replaced with
/// U+FFFD before the line reaches the logger.
pub struct LogWriter<L: Logger> {
    logger: L,
    producer: Producer,
    buffer: Vec<u8>,
}

impl<L: Logger> LogWriter<L> {
    /// Adaptor emitting records under the logger's own producer
    pub fn new(logger: L) -> Self {
        let producer = logger.producer();
        Self {
            logger,
            producer,
            buffer: Vec::new(),
        }
    }

    pub fn with_producer(mut self, producer: Producer) -> Self {
        self.producer = producer;
        self
    }

    fn emit(&self, line: &[u8]) {
        let line = String::from_utf8_lossy(line);
        let (level, message) = parse_colored_line(&line);
        self.logger.log(self.producer, level, &message);
    }
}

impl<L: Logger> Write for LogWriter<L> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Only the new bytes are scanned; the buffer never holds a newline.
        let mut rest = buf;
        while let Some(pos) = rest.iter().position(|b| *b == b'\n') {
            let (line, tail) = rest.split_at(pos + 1);
            if self.buffer.is_empty() {
                self.emit(line);
            } else {
                self.buffer.extend_from_slice(line);
                let line = std::mem::take(&mut self.buffer);
                self.emit(&line);
            }
            rest = tail;
        }
        self.buffer.extend_from_slice(rest);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.emit(&line);
        }
        Ok(())
    }
}

impl<L: Logger> Drop for LogWriter<L> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Decode one line into its level and message
///
/// A trailing newline survives decoding; whitespace between the reset code
/// and the newline does not. Exactly one reset is stripped.
pub fn parse_colored_line(line: &str) -> (Level, String) {
    for color in AnsiColor::ALL {
        let Some(rest) = line.strip_prefix(color.prefix()) else {
            continue;
        };

        let Some(payload) = rest.trim_end().strip_suffix(RESET) else {
            break;
        };

        if AnsiColor::ALL
            .iter()
            .any(|nested| payload.contains(nested.prefix()))
        {
            break;
        }

        let mut message = payload.to_string();
        if line.ends_with('\n') {
            message.push('\n');
        }
        return (color.level(), message);
    }

    (Level::Normal, line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_wrapper() {
        assert_eq!(
            parse_colored_line("\u{1b}[31;1mThis is an error\u{1b}[0m"),
            (Level::Error, "This is an error".to_string())
        );
        assert_eq!(
            parse_colored_line("\u{1b}[35;1mtrace\u{1b}[0m\n"),
            (Level::Debug, "trace\n".to_string())
        );
    }

    #[test]
    fn test_parse_drops_whitespace_after_reset() {
        assert_eq!(
            parse_colored_line("\u{1b}[33;1mLast error\u{1b}[0m   \n"),
            (Level::Warn, "Last error\n".to_string())
        );
    }

    #[test]
    fn test_parse_leading_whitespace_is_normal() {
        let line = "  \u{1b}[31;1mLast error\u{1b}[0m   \n";
        assert_eq!(parse_colored_line(line), (Level::Normal, line.to_string()));
    }

    #[test]
    fn test_parse_nested_colors_is_normal() {
        let line = "\u{1b}[34;1mThis is \u{1b}[33;1mmulti color\u{1b}[31;1m mix\u{1b}[0m";
        assert_eq!(parse_colored_line(line), (Level::Normal, line.to_string()));
    }

    #[test]
    fn test_parse_missing_reset_is_normal() {
        let line = "\u{1b}[32;1mnever closed\n";
        assert_eq!(parse_colored_line(line), (Level::Normal, line.to_string()));
    }

    #[test]
    fn test_parse_strips_exactly_one_reset() {
        assert_eq!(
            parse_colored_line("\u{1b}[34;1mtwice\u{1b}[0m\u{1b}[0m"),
            (Level::Info, "twice\u{1b}[0m".to_string())
        );
    }

    #[test]
    fn test_parse_unrecognized_color_is_normal() {
        let line = "\u{1b}[36;1mcyan\u{1b}[0m";
        assert_eq!(parse_colored_line(line), (Level::Normal, line.to_string()));
        let line = "\u{1b}[31mnot bold\u{1b}[0m";
        assert_eq!(parse_colored_line(line), (Level::Normal, line.to_string()));
    }
}
