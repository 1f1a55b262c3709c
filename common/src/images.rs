//! Identifiers of the pre-rendered images that make up the mosaic.

use embedded_graphics::prelude::Size;

use crate::digits::{BATTERY_BUCKETS, PERCENT_SIGN};
use crate::layout::{DAY_NAME_SIZE, GAUGE_SIZE, SEPARATOR_SIZE, SMALL_DIGIT_SIZE, TIME_DIGIT_SIZE};
use crate::time::Weekday;

/// One pre-rendered image.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ImageId {
    /// Large hour/minute digit 0-9.
    TimeDigit(u8),
    /// Small seconds/date digit 0-9.
    SmallDigit(u8),
    /// Battery readout glyph: digits 0-9, [`PERCENT_SIGN`] for `%`.
    BatteryGlyph(u8),
    /// Three-letter day name.
    DayName(Weekday),
    /// Battery gauge with 1-10 segments lit.
    BatteryGauge(u8),
    /// Hour/minute separator.
    Separator,
}

impl ImageId {
    /// Fixed image size from the resource table.
    pub const fn size(self) -> Size {
        let (w, h) = match self {
            Self::TimeDigit(_) => TIME_DIGIT_SIZE,
            Self::SmallDigit(_) | Self::BatteryGlyph(_) => SMALL_DIGIT_SIZE,
            Self::DayName(_) => DAY_NAME_SIZE,
            Self::BatteryGauge(_) => GAUGE_SIZE,
            Self::Separator => SEPARATOR_SIZE,
        };
        Size::new(w, h)
    }

    /// Whether the id names an image that exists.
    pub const fn is_valid(self) -> bool {
        match self {
            Self::TimeDigit(d) | Self::SmallDigit(d) => d <= 9,
            Self::BatteryGlyph(g) => g <= PERCENT_SIGN,
            Self::BatteryGauge(b) => b >= 1 && b <= BATTERY_BUCKETS,
            Self::DayName(_) | Self::Separator => true,
        }
    }
}
