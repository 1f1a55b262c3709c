//! Firmware configuration.
//!
//! - `layout`: Panel dimensions and scene placement
//! - `board`: Pins, bus speed, flash layout, clock seed and sampling periods

pub mod board;
pub mod layout;

// Re-export at config level for convenience
pub use board::{
    BATTERY_SAMPLE_SECS,
    BOOT_EPOCH,
    DEBOUNCE_MS,
    FLASH_SIZE,
    PULSE_GAP_MS,
    PULSE_MS,
    SETTINGS_OFFSETS,
    SETTINGS_SECTOR_SIZE,
    SPI_FREQUENCY_HZ,
    VIBE_QUEUE_LEN,
};
pub use layout::{SCENE_OFFSET, SCREEN_HEIGHT, SCREEN_WIDTH};
