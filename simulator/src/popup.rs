//! On-screen stand-in for the vibration motor.
//!
//! A vibration request starts a border flash around the watchface: one flash
//! for a short pulse, two for a double pulse. Each flash holds its start time
//! for expiration checking, like the firmware holds its motor timing.

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use watchface_common::VibePattern;

use crate::timing::{PULSE_DURATION, PULSE_GAP};

/// Width of the flashing border in pixels.
const BORDER_WIDTH: u32 = 4;

/// Active vibration flash with its start time.
#[derive(Clone, Copy, Debug)]
pub struct VibeFlash {
    pattern: VibePattern,
    started: Instant,
}

impl VibeFlash {
    pub fn new(pattern: VibePattern) -> Self {
        Self {
            pattern,
            started: Instant::now(),
        }
    }

    const fn pulses(&self) -> u32 {
        match self.pattern {
            VibePattern::ShortPulse => 1,
            VibePattern::DoublePulse => 2,
        }
    }

    /// Total length of the pattern.
    pub const fn duration(&self) -> Duration {
        match self.pulses() {
            1 => PULSE_DURATION,
            _ => Duration::from_millis(
                2 * PULSE_DURATION.as_millis() as u64 + PULSE_GAP.as_millis() as u64,
            ),
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool { self.started.elapsed() >= self.duration() }

    /// Whether the border is lit `elapsed` after the start.
    pub fn is_lit_at(
        &self,
        elapsed: Duration,
    ) -> bool {
        let period = PULSE_DURATION + PULSE_GAP;
        let pulse = elapsed.as_millis() / period.as_millis();
        let within = elapsed.as_millis() % period.as_millis();
        pulse < u128::from(self.pulses()) && within < PULSE_DURATION.as_millis()
    }

    #[inline]
    pub fn is_lit(&self) -> bool { self.is_lit_at(self.started.elapsed()) }
}

/// Draw the flash border along the edges of `display`.
pub fn draw_flash_border<D>(
    display: &mut D,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let bounds = display.bounding_box();
    Rectangle::new(bounds.top_left, bounds.size)
        .into_styled(PrimitiveStyle::with_stroke(color, BORDER_WIDTH))
        .draw(display)
        .ok();
}
