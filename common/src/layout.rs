//! Screen dimensions and fixed field positions.
//!
//! Every image has a fixed size and every field a fixed origin, so the whole
//! layout is known at compile time. The `const` assertions below fail the
//! build if a field would be placed partly off screen.

// =============================================================================
// Display Configuration
// =============================================================================

/// Watchface width in pixels.
pub const SCREEN_WIDTH: u32 = 144;

/// Watchface height in pixels.
pub const SCREEN_HEIGHT: u32 = 168;

// =============================================================================
// Image Sizes
// =============================================================================

/// Large hour/minute digit (width, height).
pub const TIME_DIGIT_SIZE: (u32, u32) = (28, 44);

/// Small digit used for seconds, date and battery readout (width, height).
pub const SMALL_DIGIT_SIZE: (u32, u32) = (9, 13);

/// Day name label (width, height). Three 6x13 font characters.
pub const DAY_NAME_SIZE: (u32, u32) = (18, 13);

/// Hour/minute separator (width, height).
pub const SEPARATOR_SIZE: (u32, u32) = (8, 44);

/// Battery gauge frame (width, height). Sits behind the time digits.
pub const GAUGE_SIZE: (u32, u32) = (132, 79);

/// Stroke width of large digit segments.
pub const TIME_DIGIT_STROKE: u32 = 5;

/// Stroke width of small digit segments.
pub const SMALL_DIGIT_STROKE: u32 = 2;

/// Height of the gauge segment strip at the bottom of the gauge frame.
pub const GAUGE_STRIP_HEIGHT: u32 = 6;

// =============================================================================
// Field Origins (x, y)
// =============================================================================

pub const HOUR_TENS_ORIGIN: (i32, i32) = (6, 40);
pub const HOUR_UNITS_ORIGIN: (i32, i32) = (36, 40);
pub const MINUTE_TENS_ORIGIN: (i32, i32) = (78, 40);
pub const MINUTE_UNITS_ORIGIN: (i32, i32) = (108, 40);
pub const SEPARATOR_ORIGIN: (i32, i32) = (65, 40);

pub const SECOND_TENS_ORIGIN: (i32, i32) = (118, 27);
pub const SECOND_UNITS_ORIGIN: (i32, i32) = (128, 27);

pub const BATTERY_TENS_ORIGIN: (i32, i32) = (8, 27);
pub const BATTERY_UNITS_ORIGIN: (i32, i32) = (18, 27);
pub const BATTERY_SIGN_ORIGIN: (i32, i32) = (28, 27);

pub const DAY_NAME_ORIGIN: (i32, i32) = (8, 122);
pub const DATE_TENS_ORIGIN: (i32, i32) = (29, 122);
pub const DATE_UNITS_ORIGIN: (i32, i32) = (39, 122);

pub const GAUGE_ORIGIN: (i32, i32) = (6, 40);

// =============================================================================
// Compile-Time Validation
// =============================================================================

const fn fits(
    origin: (i32, i32),
    size: (u32, u32),
) -> bool {
    origin.0 >= 0
        && origin.1 >= 0
        && origin.0 as u32 + size.0 <= SCREEN_WIDTH
        && origin.1 as u32 + size.1 <= SCREEN_HEIGHT
}

const _: () = assert!(fits(HOUR_TENS_ORIGIN, TIME_DIGIT_SIZE));
const _: () = assert!(fits(HOUR_UNITS_ORIGIN, TIME_DIGIT_SIZE));
const _: () = assert!(fits(MINUTE_TENS_ORIGIN, TIME_DIGIT_SIZE));
const _: () = assert!(fits(MINUTE_UNITS_ORIGIN, TIME_DIGIT_SIZE));
const _: () = assert!(fits(SEPARATOR_ORIGIN, SEPARATOR_SIZE));
const _: () = assert!(fits(SECOND_TENS_ORIGIN, SMALL_DIGIT_SIZE));
const _: () = assert!(fits(SECOND_UNITS_ORIGIN, SMALL_DIGIT_SIZE));
const _: () = assert!(fits(BATTERY_TENS_ORIGIN, SMALL_DIGIT_SIZE));
const _: () = assert!(fits(BATTERY_UNITS_ORIGIN, SMALL_DIGIT_SIZE));
const _: () = assert!(fits(BATTERY_SIGN_ORIGIN, SMALL_DIGIT_SIZE));
const _: () = assert!(fits(DAY_NAME_ORIGIN, DAY_NAME_SIZE));
const _: () = assert!(fits(DATE_TENS_ORIGIN, SMALL_DIGIT_SIZE));
const _: () = assert!(fits(DATE_UNITS_ORIGIN, SMALL_DIGIT_SIZE));
const _: () = assert!(fits(GAUGE_ORIGIN, GAUGE_SIZE));

// Digits on one row must not overlap
const _: () = assert!(HOUR_TENS_ORIGIN.0 + TIME_DIGIT_SIZE.0 as i32 <= HOUR_UNITS_ORIGIN.0);
const _: () = assert!(HOUR_UNITS_ORIGIN.0 + TIME_DIGIT_SIZE.0 as i32 <= SEPARATOR_ORIGIN.0);
const _: () = assert!(SEPARATOR_ORIGIN.0 + SEPARATOR_SIZE.0 as i32 <= MINUTE_TENS_ORIGIN.0);
const _: () = assert!(MINUTE_TENS_ORIGIN.0 + TIME_DIGIT_SIZE.0 as i32 <= MINUTE_UNITS_ORIGIN.0);
const _: () = assert!(SECOND_TENS_ORIGIN.0 + SMALL_DIGIT_SIZE.0 as i32 <= SECOND_UNITS_ORIGIN.0);
const _: () = assert!(DAY_NAME_ORIGIN.0 + DAY_NAME_SIZE.0 as i32 <= DATE_TENS_ORIGIN.0);

// The gauge strip sits below the time digits
const _: () = assert!(
    GAUGE_ORIGIN.1 + (GAUGE_SIZE.1 - GAUGE_STRIP_HEIGHT) as i32 >= HOUR_TENS_ORIGIN.1 + TIME_DIGIT_SIZE.1 as i32
);
