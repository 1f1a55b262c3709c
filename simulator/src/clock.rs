//! Wall-clock ticks from the desktop's local time.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use watchface_common::{TickTime, Weekday};

/// Break down a local date-time for the watchface.
pub fn tick_time<Tz: TimeZone>(now: &DateTime<Tz>) -> TickTime {
    TickTime {
        year: now.year().clamp(0, i32::from(u16::MAX)) as u16,
        month: now.month() as u8,
        month_day: now.day() as u8,
        weekday: Weekday::from_index(now.weekday().num_days_from_sunday() as u8),
        hour: now.hour() as u8,
        minute: now.minute() as u8,
        second: now.second() as u8,
    }
}

/// Current local time.
#[inline]
pub fn now() -> TickTime { tick_time(&Local::now()) }
