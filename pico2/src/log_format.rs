//! Fixed-size formatting for forwarded log records.
//!
//! The firmware forwards `log` records from the watchface core to defmt.
//! defmt cannot take `core::fmt::Arguments`, so each record is first
//! formatted into a `heapless::String`; longer messages are cut and marked
//! with a trailing `~`.

use core::fmt::{self, Write};

use heapless::String;

/// Maximum characters per forwarded message.
pub const LOG_MSG_LEN: usize = 96;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn from_log(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Self::Trace,
            log::Level::Debug => Self::Debug,
            log::Level::Info => Self::Info,
            log::Level::Warn => Self::Warn,
            log::Level::Error => Self::Error,
        }
    }
}

/// Writer that keeps what fits and remembers whether anything was cut.
struct Truncating {
    buf: String<LOG_MSG_LEN>,
    truncated: bool,
}

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.buf.len() + c.len_utf8() > LOG_MSG_LEN - 1 {
                self.truncated = true;
                return Ok(());
            }
            self.buf.push(c).ok();
        }
        Ok(())
    }
}

/// Format `args` into a bounded string.
pub fn format_message(args: fmt::Arguments<'_>) -> String<LOG_MSG_LEN> {
    let mut writer = Truncating {
        buf: String::new(),
        truncated: false,
    };
    writer.write_fmt(args).ok();
    if writer.truncated {
        writer.buf.push('~').ok();
    }
    writer.buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_is_unchanged() {
        let msg = format_message(format_args!("Battery {}%", 42));
        assert_eq!(msg.as_str(), "Battery 42%");
    }

    #[test]
    fn test_long_message_is_cut_and_marked() {
        let long = "x".repeat(200);
        let msg = format_message(format_args!("{long}"));
        assert_eq!(msg.len(), LOG_MSG_LEN);
        assert!(msg.ends_with('~'));
    }

    #[test]
    fn test_multibyte_chars_are_not_split() {
        let long = "é".repeat(LOG_MSG_LEN);
        let msg = format_message(format_args!("{long}"));
        assert!(msg.len() <= LOG_MSG_LEN);
        assert!(msg.ends_with('~'));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::from_log(log::Level::Warn), LogLevel::Warn);
        assert_eq!(LogLevel::from_log(log::Level::Trace), LogLevel::Trace);
    }
}
