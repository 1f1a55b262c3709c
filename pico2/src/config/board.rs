//! Board constants for the Pico 2 with the PIM715 display pack.
//!
//! Pin mapping:
//! - Display: DC=GPIO16, CS=GPIO17, CLK=GPIO18, MOSI=GPIO19, Backlight=GPIO20
//! - Buttons (active-low): A=GPIO12, B=GPIO13, X=GPIO14, Y=GPIO15
//! - Vibration motor driver: GPIO22 (active-high)
//! - VSYS sense: GPIO29 / ADC3 (VSYS / 3)
//! - RGB LED (active-low): R=GPIO26, G=GPIO27, B=GPIO28
//!
//! Pins are typed embassy peripherals, so they are taken by name in `main.rs`;
//! the mapping above is the reference for both.

// =============================================================================
// Display Bus
// =============================================================================

/// SPI clock for the ST7789 (datasheet maximum).
pub const SPI_FREQUENCY_HZ: u32 = 62_500_000;

// =============================================================================
// Flash Layout
// =============================================================================

/// On-board QSPI flash of the Pico 2.
pub const FLASH_SIZE: usize = 4 * 1024 * 1024;

/// Erase sector size.
pub const SETTINGS_SECTOR_SIZE: u32 = 4096;

/// Settings alternate between the last two sectors, clear of the firmware image.
pub const SETTINGS_OFFSETS: [u32; 2] = [
    FLASH_SIZE as u32 - 2 * SETTINGS_SECTOR_SIZE,
    FLASH_SIZE as u32 - SETTINGS_SECTOR_SIZE,
];

const _: () = assert!(SETTINGS_OFFSETS[0] % SETTINGS_SECTOR_SIZE == 0);

// =============================================================================
// Clock
// =============================================================================

/// Wall-clock seed: Unix seconds at boot (2025-01-01 00:00:00 UTC).
///
/// The board has no RTC battery or network time, so the software clock
/// counts up from here.
pub const BOOT_EPOCH: u64 = 1_735_689_600;

// =============================================================================
// Sampling and Timing
// =============================================================================

/// VSYS sampling period in seconds.
pub const BATTERY_SAMPLE_SECS: u64 = 10;

/// Button debounce window in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Motor on-time per pulse in milliseconds.
pub const PULSE_MS: u64 = 150;

/// Motor off-time between the pulses of a double pulse in milliseconds.
pub const PULSE_GAP_MS: u64 = 100;

/// Pending vibration requests; further requests are dropped.
pub const VIBE_QUEUE_LEN: usize = 4;
