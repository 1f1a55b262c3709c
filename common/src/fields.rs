//! Display fields: the fixed screen slots of the watchface.
//!
//! Layout (144 x 168):
//!   Row y=27:  BATT% (3 glyphs) ................ SECONDS (2 small digits)
//!   Row y=40:  HH  :  MM            (gauge frame behind, strip at its bottom)
//!   Row y=122: DAY  DATE (2 small digits)
//!
//! [`DisplayField::ALL`] is also the drawing order: the battery gauge first so
//! digits are drawn over it.

use embedded_graphics::prelude::Point;

use crate::layout::{
    BATTERY_SIGN_ORIGIN,
    BATTERY_TENS_ORIGIN,
    BATTERY_UNITS_ORIGIN,
    DATE_TENS_ORIGIN,
    DATE_UNITS_ORIGIN,
    DAY_NAME_ORIGIN,
    GAUGE_ORIGIN,
    HOUR_TENS_ORIGIN,
    HOUR_UNITS_ORIGIN,
    MINUTE_TENS_ORIGIN,
    MINUTE_UNITS_ORIGIN,
    SECOND_TENS_ORIGIN,
    SECOND_UNITS_ORIGIN,
    SEPARATOR_ORIGIN,
};
use crate::time::TimeUnits;

/// Number of display fields (and scene layers).
pub const FIELD_COUNT: usize = 14;

/// One fixed screen slot holding at most one image. Doubles as the scene's
/// layer id.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DisplayField {
    BatteryGauge,
    Separator,
    DayName,
    HourTens,
    HourUnits,
    MinuteTens,
    MinuteUnits,
    SecondTens,
    SecondUnits,
    DateTens,
    DateUnits,
    BatteryTens,
    BatteryUnits,
    BatterySign,
}

impl DisplayField {
    /// All fields in drawing order.
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::BatteryGauge,
        Self::Separator,
        Self::DayName,
        Self::HourTens,
        Self::HourUnits,
        Self::MinuteTens,
        Self::MinuteUnits,
        Self::SecondTens,
        Self::SecondUnits,
        Self::DateTens,
        Self::DateUnits,
        Self::BatteryTens,
        Self::BatteryUnits,
        Self::BatterySign,
    ];

    /// The two seconds fields (hidden together by the hide-seconds setting).
    pub const SECONDS: [Self; 2] = [Self::SecondTens, Self::SecondUnits];

    /// The three battery readout fields.
    pub const BATTERY_READOUT: [Self; 3] = [Self::BatteryTens, Self::BatteryUnits, Self::BatterySign];

    /// Slot index in the scene and in the face's bitmap arena.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Fixed top-left position of the field's image.
    pub const fn origin(self) -> Point {
        let (x, y) = match self {
            Self::BatteryGauge => GAUGE_ORIGIN,
            Self::Separator => SEPARATOR_ORIGIN,
            Self::DayName => DAY_NAME_ORIGIN,
            Self::HourTens => HOUR_TENS_ORIGIN,
            Self::HourUnits => HOUR_UNITS_ORIGIN,
            Self::MinuteTens => MINUTE_TENS_ORIGIN,
            Self::MinuteUnits => MINUTE_UNITS_ORIGIN,
            Self::SecondTens => SECOND_TENS_ORIGIN,
            Self::SecondUnits => SECOND_UNITS_ORIGIN,
            Self::DateTens => DATE_TENS_ORIGIN,
            Self::DateUnits => DATE_UNITS_ORIGIN,
            Self::BatteryTens => BATTERY_TENS_ORIGIN,
            Self::BatteryUnits => BATTERY_UNITS_ORIGIN,
            Self::BatterySign => BATTERY_SIGN_ORIGIN,
        };
        Point::new(x, y)
    }

    /// Time unit whose change redraws this field (`NONE` for fields driven by
    /// battery reports or drawn once).
    pub const fn governing_unit(self) -> TimeUnits {
        match self {
            Self::DayName | Self::DateTens | Self::DateUnits => TimeUnits::DAY,
            Self::HourTens | Self::HourUnits => TimeUnits::HOUR,
            Self::MinuteTens | Self::MinuteUnits => TimeUnits::MINUTE,
            Self::SecondTens | Self::SecondUnits => TimeUnits::SECOND,
            Self::BatteryGauge
            | Self::Separator
            | Self::BatteryTens
            | Self::BatteryUnits
            | Self::BatterySign => TimeUnits::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_drawing_order() {
        for (i, field) in DisplayField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_origins() {
        assert_eq!(DisplayField::HourTens.origin(), Point::new(6, 40));
        assert_eq!(DisplayField::MinuteUnits.origin(), Point::new(108, 40));
        assert_eq!(DisplayField::SecondTens.origin(), Point::new(118, 27));
        assert_eq!(DisplayField::DayName.origin(), Point::new(8, 122));
        assert_eq!(DisplayField::BatterySign.origin(), Point::new(28, 27));
    }

    #[test]
    fn test_governing_units() {
        assert_eq!(DisplayField::DateUnits.governing_unit(), TimeUnits::DAY);
        assert_eq!(DisplayField::HourUnits.governing_unit(), TimeUnits::HOUR);
        assert_eq!(DisplayField::MinuteTens.governing_unit(), TimeUnits::MINUTE);
        assert_eq!(DisplayField::SecondUnits.governing_unit(), TimeUnits::SECOND);
        assert!(DisplayField::BatteryGauge.governing_unit().is_empty());
    }
}
