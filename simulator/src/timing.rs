//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Target frame time (~20 FPS). Ticks are derived once per frame, so this is
/// also the worst-case tick latency.
pub const FRAME_TIME: Duration = Duration::from_millis(50);

/// Length of one border flash standing in for a vibration pulse.
pub const PULSE_DURATION: Duration = Duration::from_millis(150);

/// Gap between the two pulses of a double pulse.
pub const PULSE_GAP: Duration = Duration::from_millis(100);
