//! Simulator configuration from environment variables.
//!
//! - `WATCHFACE_24H`: `0`, `false`, `no` or `off` selects the 12-hour clock
//!   (default: 24-hour).
//! - `WATCHFACE_SETTINGS`: settings file path (default:
//!   `watchface-settings.bin` in the working directory).

use std::env;
use std::path::PathBuf;

use watchface_common::{ClockStyle, WatchConfig};

/// Default settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "watchface-settings.bin";

/// Window scale factor.
pub const WINDOW_SCALE: u32 = 3;

/// Battery percent at startup.
pub const INITIAL_BATTERY: u8 = 80;

/// Battery change per Up/Down key press.
pub const BATTERY_STEP: u8 = 5;

pub struct SimConfig {
    pub watch: WatchConfig,
    pub settings_path: PathBuf,
}

impl SimConfig {
    pub fn from_env() -> Self {
        let is_24h = env::var("WATCHFACE_24H").map_or(true, |v| parse_flag(&v));
        let settings_path = env::var_os("WATCHFACE_SETTINGS").map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from);
        Self {
            watch: WatchConfig::with_clock_style(ClockStyle::from_24h(is_24h)),
            settings_path,
        }
    }
}

/// Read a boolean environment value. Anything but an explicit "off" is on.
fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
