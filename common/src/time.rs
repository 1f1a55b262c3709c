//! Calendar breakdown, changed-unit masks and tick tracking.
//!
//! A tick carries the current [`TickTime`] and the [`TimeUnits`] that changed
//! since the previous tick. Hosts that generate their own ticks (the
//! simulator and the firmware) feed each observed time into a
//! [`TickTracker`], which decides when a tick is due for the subscribed
//! granularity.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

// =============================================================================
// Time Units
// =============================================================================

/// Bitmask of calendar units.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);

    /// Every unit the watchface draws (used for the startup render).
    pub const CLOCK: Self = Self(Self::DAY.0 | Self::HOUR.0 | Self::MINUTE.0 | Self::SECOND.0);

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 { self.0 }

    /// Build from raw bits, dropping unknown bits.
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self { Self(bits & 0x3F) }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    /// Whether every unit in `other` is set.
    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0 && !other.is_empty()
    }

    #[inline]
    pub const fn union(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether a tick with these changed units is due for a subscription at
    /// `granularity` (the unit itself or any larger unit changed).
    #[inline]
    pub const fn triggers(
        self,
        granularity: Self,
    ) -> bool {
        if granularity.is_empty() {
            return false;
        }
        let lowest = granularity.0 & granularity.0.wrapping_neg();
        self.0 & !(lowest - 1) != 0
    }
}

impl BitOr for TimeUnits {
    type Output = Self;

    fn bitor(
        self,
        rhs: Self,
    ) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for TimeUnits {
    fn bitor_assign(
        &mut self,
        rhs: Self,
    ) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for TimeUnits {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        const NAMES: [&str; 6] = ["SECOND", "MINUTE", "HOUR", "DAY", "MONTH", "YEAR"];

        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (bit, name) in NAMES.iter().enumerate() {
            if self.0 & (1 << bit) != 0 {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Weekday
// =============================================================================

/// Day of the week, Sunday first (index 0).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Weekday {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All days, Sunday first.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Day from a Sunday-based index; wraps modulo 7.
    #[inline]
    pub const fn from_index(index: u8) -> Self { Self::ALL[(index % 7) as usize] }

    /// Sunday-based index (0-6).
    #[inline]
    pub const fn index(self) -> u8 { self as u8 }

    /// Three-letter upper-case label drawn on the day-name image.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Sunday => "SUN",
            Self::Monday => "MON",
            Self::Tuesday => "TUE",
            Self::Wednesday => "WED",
            Self::Thursday => "THU",
            Self::Friday => "FRI",
            Self::Saturday => "SAT",
        }
    }
}

// =============================================================================
// Calendar Breakdown
// =============================================================================

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Calendar time as delivered with a tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TickTime {
    pub year: u16,
    /// 1-12.
    pub month: u8,
    /// 1-31.
    pub month_day: u8,
    pub weekday: Weekday,
    /// 0-23.
    pub hour: u8,
    /// 0-59.
    pub minute: u8,
    /// 0-59.
    pub second: u8,
}

impl TickTime {
    /// Break down seconds since the Unix epoch (UTC, 1970-01-01 was a Thursday).
    pub fn from_unix(secs: u64) -> Self {
        let days = secs / SECS_PER_DAY;
        let rem = secs % SECS_PER_DAY;
        let (year, month, month_day) = civil_from_days(days);

        Self {
            year,
            month,
            month_day,
            weekday: Weekday::from_index(((days + 4) % 7) as u8),
            hour: (rem / SECS_PER_HOUR) as u8,
            minute: ((rem % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
            second: (rem % SECS_PER_MINUTE) as u8,
        }
    }

    /// Units whose value differs from `previous`.
    pub fn changed_units(
        &self,
        previous: &Self,
    ) -> TimeUnits {
        let mut units = TimeUnits::NONE;
        if self.second != previous.second {
            units |= TimeUnits::SECOND;
        }
        if self.minute != previous.minute {
            units |= TimeUnits::MINUTE;
        }
        if self.hour != previous.hour {
            units |= TimeUnits::HOUR;
        }
        if self.month_day != previous.month_day || self.month != previous.month || self.year != previous.year {
            units |= TimeUnits::DAY;
        }
        if self.month != previous.month || self.year != previous.year {
            units |= TimeUnits::MONTH;
        }
        if self.year != previous.year {
            units |= TimeUnits::YEAR;
        }
        units
    }
}

/// Proleptic Gregorian date for a day count since 1970-01-01.
///
/// Howard Hinnant's `civil_from_days`, restricted to non-negative day counts.
fn civil_from_days(days: u64) -> (u16, u8, u8) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year as u16, month, day)
}

// =============================================================================
// Tick Tracking
// =============================================================================

/// Turns a stream of observed times into ticks for a subscribed granularity.
///
/// Changed units accumulate across observations that do not trigger a tick,
/// so a minute tick still reports the seconds that changed in between.
#[derive(Default, Debug)]
pub struct TickTracker {
    last: Option<TickTime>,
    pending: TimeUnits,
}

impl TickTracker {
    pub const fn new() -> Self {
        Self {
            last: None,
            pending: TimeUnits::NONE,
        }
    }

    /// Tracker that treats `now` as already rendered.
    pub const fn starting_at(now: TickTime) -> Self {
        Self {
            last: Some(now),
            pending: TimeUnits::NONE,
        }
    }

    /// Record an observed time. Returns the tick to dispatch, if one is due.
    ///
    /// The first observation only primes the tracker.
    pub fn observe(
        &mut self,
        now: TickTime,
        granularity: TimeUnits,
    ) -> Option<(TickTime, TimeUnits)> {
        let last = self.last.replace(now)?;
        self.pending |= now.changed_units(&last);

        if self.pending.triggers(granularity) {
            let units = self.pending;
            self.pending = TimeUnits::NONE;
            Some((now, units))
        } else {
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn time(
        hour: u8,
        minute: u8,
        second: u8,
    ) -> TickTime {
        TickTime {
            year: 2024,
            month: 3,
            month_day: 9,
            weekday: Weekday::Saturday,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn test_from_unix_epoch() {
        let t = TickTime::from_unix(0);
        assert_eq!((t.year, t.month, t.month_day), (1970, 1, 1));
        assert_eq!(t.weekday, Weekday::Thursday);
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
    }

    #[test]
    fn test_from_unix_known_dates() {
        // 2000-02-29 12:34:56 UTC (Tuesday)
        let t = TickTime::from_unix(951_827_696);
        assert_eq!((t.year, t.month, t.month_day), (2000, 2, 29));
        assert_eq!(t.weekday, Weekday::Tuesday);
        assert_eq!((t.hour, t.minute, t.second), (12, 34, 56));

        // 2024-12-31 23:59:59 UTC (Tuesday)
        let t = TickTime::from_unix(1_735_689_599);
        assert_eq!((t.year, t.month, t.month_day), (2024, 12, 31));
        assert_eq!(t.weekday, Weekday::Tuesday);
        assert_eq!((t.hour, t.minute, t.second), (23, 59, 59));
    }

    #[test]
    fn test_changed_units_rollovers() {
        let a = TickTime::from_unix(1_735_689_599);
        let b = TickTime::from_unix(1_735_689_600);
        let units = b.changed_units(&a);
        assert!(units.contains(TimeUnits::SECOND));
        assert!(units.contains(TimeUnits::MINUTE));
        assert!(units.contains(TimeUnits::HOUR));
        assert!(units.contains(TimeUnits::DAY));
        assert!(units.contains(TimeUnits::MONTH));
        assert!(units.contains(TimeUnits::YEAR));

        let units = time(10, 0, 1).changed_units(&time(10, 0, 0));
        assert_eq!(units, TimeUnits::SECOND);

        let units = time(10, 1, 0).changed_units(&time(10, 0, 59));
        assert_eq!(units, TimeUnits::SECOND | TimeUnits::MINUTE);
    }

    #[test]
    fn test_triggers_granularity() {
        assert!(TimeUnits::SECOND.triggers(TimeUnits::SECOND));
        assert!(!TimeUnits::SECOND.triggers(TimeUnits::MINUTE));
        assert!((TimeUnits::SECOND | TimeUnits::MINUTE).triggers(TimeUnits::MINUTE));
        assert!(TimeUnits::DAY.triggers(TimeUnits::MINUTE));
        assert!(!TimeUnits::NONE.triggers(TimeUnits::SECOND));
        assert!(!TimeUnits::DAY.triggers(TimeUnits::NONE));
    }

    #[test]
    fn test_contains_and_bits() {
        let units = TimeUnits::CLOCK;
        assert!(units.contains(TimeUnits::DAY));
        assert!(units.contains(TimeUnits::SECOND));
        assert!(!units.contains(TimeUnits::MONTH));
        assert!(!units.contains(TimeUnits::NONE));
        assert_eq!(TimeUnits::from_bits_truncate(0xFF).bits(), 0x3F);
    }

    #[test]
    fn test_weekday_index_roundtrip() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index() as usize, i);
            assert_eq!(Weekday::from_index(i as u8), *day);
        }
        assert_eq!(Weekday::from_index(7), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.short_name(), "WED");
    }

    #[test]
    fn test_tracker_primes_on_first_observation() {
        let mut tracker = TickTracker::new();
        assert_eq!(tracker.observe(time(9, 0, 0), TimeUnits::SECOND), None);
        let tick = tracker.observe(time(9, 0, 1), TimeUnits::SECOND);
        assert_eq!(tick, Some((time(9, 0, 1), TimeUnits::SECOND)));
    }

    #[test]
    fn test_tracker_ignores_repeated_time() {
        let mut tracker = TickTracker::starting_at(time(9, 0, 0));
        assert_eq!(tracker.observe(time(9, 0, 0), TimeUnits::SECOND), None);
    }

    #[test]
    fn test_tracker_minute_granularity_accumulates_seconds() {
        let mut tracker = TickTracker::starting_at(time(9, 0, 58));
        assert_eq!(tracker.observe(time(9, 0, 59), TimeUnits::MINUTE), None);
        let (now, units) = tracker.observe(time(9, 1, 0), TimeUnits::MINUTE).unwrap();
        assert_eq!(now, time(9, 1, 0));
        assert_eq!(units, TimeUnits::SECOND | TimeUnits::MINUTE);
        // Pending mask is cleared after dispatch
        assert_eq!(tracker.observe(time(9, 1, 1), TimeUnits::MINUTE), None);
    }

    #[test]
    fn test_units_debug_lists_names() {
        assert_eq!(format!("{:?}", TimeUnits::NONE), "NONE");
        assert_eq!(format!("{:?}", TimeUnits::MINUTE), "MINUTE");
        assert_eq!(format!("{:?}", TimeUnits::CLOCK), "SECOND|MINUTE|HOUR|DAY");
    }
}
