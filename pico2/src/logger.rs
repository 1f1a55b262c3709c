//! `log` to defmt bridge.
//!
//! The watchface core logs through the `log` facade. This logger formats each
//! record into a bounded string and emits it with the defmt macro of the same
//! level, prefixed with the record's target. Firmware-local code calls defmt
//! directly.

use log::{LevelFilter, Log, Metadata, Record};
use watchface_pico2::log_format::{LogLevel, format_message};

/// Records below this level are not formatted.
const MAX_LEVEL: LevelFilter = LevelFilter::Info;

struct DefmtLogger;

static LOGGER: DefmtLogger = DefmtLogger;

impl Log for DefmtLogger {
    fn enabled(
        &self,
        metadata: &Metadata<'_>,
    ) -> bool {
        metadata.level() <= MAX_LEVEL
    }

    fn log(
        &self,
        record: &Record<'_>,
    ) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let msg = format_message(*record.args());
        let target = record.target();
        match LogLevel::from_log(record.level()) {
            LogLevel::Trace => defmt::trace!("[{=str}] {=str}", target, msg.as_str()),
            LogLevel::Debug => defmt::debug!("[{=str}] {=str}", target, msg.as_str()),
            LogLevel::Info => defmt::info!("[{=str}] {=str}", target, msg.as_str()),
            LogLevel::Warn => defmt::warn!("[{=str}] {=str}", target, msg.as_str()),
            LogLevel::Error => defmt::error!("[{=str}] {=str}", target, msg.as_str()),
        }
    }

    fn flush(&self) {}
}

/// Install the bridge. Must run before the watchface starts.
pub fn init() {
    match log::set_logger(&LOGGER) {
        Ok(()) => log::set_max_level(MAX_LEVEL),
        Err(_) => defmt::warn!("Logger already installed"),
    }
}
