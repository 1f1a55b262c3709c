//! Field selection: which pre-rendered image shows a value.
//!
//! All selection is plain index arithmetic. Inputs are guaranteed in range by
//! the host (0-99 for clock and date values, 0-100 for battery percent), so
//! none of these functions can fail.

use crate::config::ClockStyle;

// =============================================================================
// Battery Buckets
// =============================================================================

/// Number of coarse battery gauge images.
pub const BATTERY_BUCKETS: u8 = 10;

/// Battery glyph index of the percent sign (glyphs 0-9 are digits).
pub const PERCENT_SIGN: u8 = 10;

/// Width of one battery bucket in percent.
const BUCKET_WIDTH: u8 = 100 / BATTERY_BUCKETS;

const _: () = assert!(BUCKET_WIDTH as u16 * BATTERY_BUCKETS as u16 == 100);

/// Decimal place of a two-digit value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Place {
    Tens,
    Units,
}

/// Digit shown in `place` for a value in 0-99.
#[inline]
pub const fn select_digit(
    value: u8,
    place: Place,
) -> u8 {
    match place {
        Place::Tens => value / 10,
        Place::Units => value % 10,
    }
}

/// Both digits of a value in 0-99, tens first.
#[inline]
pub const fn split_digits(value: u8) -> [u8; 2] { [select_digit(value, Place::Tens), select_digit(value, Place::Units)] }

/// Coarse battery bucket (1-10) for a charge percent.
///
/// The percent is rounded up to the next multiple of ten: `<=10 -> 1`,
/// `<=20 -> 2`, ... `<=100 -> 10`. Zero shares the lowest bucket and values
/// above 100 are treated as 100.
#[inline]
pub const fn battery_bucket(percent: u8) -> u8 {
    let percent = if percent > 100 { 100 } else { percent };
    let bucket = percent.div_ceil(BUCKET_WIDTH);
    if bucket == 0 { 1 } else { bucket }
}

/// Battery glyph indices for the three readout slots.
///
/// 0-99 reads as tens, units and the percent sign. A full battery does not
/// fit two digits plus the sign, so 100 reads `1`, `0`, `0`.
#[inline]
pub const fn battery_readout(percent: u8) -> [u8; 3] {
    if percent >= 100 {
        [1, 0, 0]
    } else {
        [select_digit(percent, Place::Tens), select_digit(percent, Place::Units), PERCENT_SIGN]
    }
}

/// Hour value shown for a 0-23 hour in the given style.
#[inline]
pub const fn display_hour(
    hour: u8,
    style: ClockStyle,
) -> u8 {
    match style {
        ClockStyle::TwentyFourHour => hour,
        ClockStyle::TwelveHour => {
            let h = hour % 12;
            if h == 0 { 12 } else { h }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
