//! Runtime watchface configuration.
//!
//! Layout is fixed at compile time (see [`crate::layout`]); the values here
//! are the few things a host may choose when it starts the face.

use crate::colors::Palette;

/// How hours are shown.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ClockStyle {
    /// 0-23.
    #[default]
    TwentyFourHour,
    /// 1-12, midnight and noon shown as 12.
    TwelveHour,
}

impl ClockStyle {
    /// Pick a style from a "24h" boolean preference.
    #[inline]
    pub const fn from_24h(is_24h: bool) -> Self {
        if is_24h { Self::TwentyFourHour } else { Self::TwelveHour }
    }
}

/// Tick granularity requested once startup completes.
///
/// Hiding seconds switches the subscription to minute ticks whenever the
/// setting is applied, but the watchface has always subscribed to second
/// ticks at the end of startup regardless of the stored value.
/// [`StartupTicks::AlwaysSeconds`] keeps that behaviour.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum StartupTicks {
    /// Subscribe to second ticks after startup, even with seconds hidden.
    #[default]
    AlwaysSeconds,
    /// Subscribe to minute ticks after startup when seconds are hidden.
    FollowHideSeconds,
}

/// Configuration supplied by the host when starting the watchface.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct WatchConfig {
    /// 12 or 24 hour display.
    pub clock_style: ClockStyle,
    /// Colours used by the scene.
    pub palette: Palette,
    /// Tick subscription policy at the end of startup.
    pub startup_ticks: StartupTicks,
}

impl WatchConfig {
    /// Configuration with the given clock style and defaults otherwise.
    pub const fn with_clock_style(clock_style: ClockStyle) -> Self {
        Self {
            clock_style,
            palette: Palette::CLASSIC,
            startup_ticks: StartupTicks::AlwaysSeconds,
        }
    }
}
