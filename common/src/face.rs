//! The watchface controller.
//!
//! [`WatchFace`] owns the settings, one bitmap per display field and the
//! inversion overlay. Every handler takes the host explicitly, so the face
//! has no global state and runs one event at a time on whatever task the
//! host serialises its calls through.
//!
//! # Lifecycle
//!
//! 1. [`WatchFace::init`] loads the settings, applies them, renders every
//!    field once and subscribes to ticks. The first render never vibrates.
//! 2. Handlers react to ticks, battery reports, connectivity changes and
//!    configuration messages.
//! 3. [`WatchFace::deinit`] gives every bitmap and the overlay back to the
//!    host and cancels the tick subscription.

use log::{debug, info, warn};

use crate::config::{StartupTicks, WatchConfig};
use crate::digits::{battery_bucket, battery_readout, display_hour, split_digits};
use crate::error::Error;
use crate::event::{Event, EventQueue};
use crate::fields::{DisplayField, FIELD_COUNT};
use crate::host::{Compositor, Host, VibePattern};
use crate::images::ImageId;
use crate::message::ConfigMessage;
use crate::settings::{SettingKey, Settings};
use crate::time::{TickTime, TimeUnits};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    /// Inside `init`, before the first render completed.
    Starting,
    Running,
    /// After `deinit`.
    Stopped,
}

/// Watchface state for one host.
pub struct WatchFace<H: Compositor> {
    config: WatchConfig,
    settings: Settings,
    phase: Phase,
    slots: [Option<H::Bitmap>; FIELD_COUNT],
    inverter: Option<H::Overlay>,
    battery_percent: u8,
    subscription: TimeUnits,
}

impl<H: Host> WatchFace<H> {
    /// Start the watchface: load settings, render `now` and `battery_percent`,
    /// subscribe to ticks.
    ///
    /// On failure every bitmap loaded so far is released before the error is
    /// returned.
    pub fn init(
        host: &mut H,
        config: WatchConfig,
        now: &TickTime,
        battery_percent: u8,
    ) -> Result<Self, Error> {
        let mut face = Self {
            config,
            settings: Settings::load(&*host),
            phase: Phase::Starting,
            slots: [const { None }; FIELD_COUNT],
            inverter: None,
            battery_percent: battery_percent.min(100),
            subscription: TimeUnits::NONE,
        };

        match face.start(host, now) {
            Ok(()) => {
                info!(
                    "Watchface started ({:?}, ticks every {:?}, {:?})",
                    face.config.clock_style, face.subscription, face.settings
                );
                Ok(face)
            }
            Err(e) => {
                warn!("Watchface startup failed: {e}");
                face.teardown(host);
                Err(e)
            }
        }
    }

    fn start(
        &mut self,
        host: &mut H,
        now: &TickTime,
    ) -> Result<(), Error> {
        self.set_image(host, DisplayField::Separator, ImageId::Separator)?;

        // Stored values are applied as they are, not written back
        for key in SettingKey::ALL {
            self.apply_effect(host, key)?;
        }

        self.render_battery(host)?;
        self.handle_tick(host, now, TimeUnits::CLOCK)?;

        let granularity = match self.config.startup_ticks {
            StartupTicks::AlwaysSeconds => TimeUnits::SECOND,
            StartupTicks::FollowHideSeconds => seconds_granularity(self.settings.hide_seconds),
        };
        self.subscribe(host, granularity);

        self.phase = Phase::Running;
        Ok(())
    }

    /// Stop the watchface and return every resource to the host.
    pub fn deinit(
        &mut self,
        host: &mut H,
    ) {
        self.teardown(host);
        info!("Watchface stopped");
    }

    fn teardown(
        &mut self,
        host: &mut H,
    ) {
        for field in DisplayField::ALL {
            if let Some(bitmap) = self.slots[field.index()].take() {
                host.detach(field);
                host.release(bitmap);
            }
        }
        if let Some(overlay) = self.inverter.take() {
            host.destroy_inverter(overlay);
        }
        if !self.subscription.is_empty() {
            host.unsubscribe();
            self.subscription = TimeUnits::NONE;
        }
        self.phase = Phase::Stopped;
    }

    // =========================================================================
    // Tick Dispatch
    // =========================================================================

    /// Redraw the fields governed by `units`.
    ///
    /// Seconds are updated even while hidden. An hour change requests a short
    /// pulse when hourly vibration is enabled, except during startup.
    pub fn handle_tick(
        &mut self,
        host: &mut H,
        time: &TickTime,
        units: TimeUnits,
    ) -> Result<(), Error> {
        self.ensure_not_stopped()?;
        debug!(
            "Tick {:02}:{:02}:{:02} {:?}",
            time.hour, time.minute, time.second, units
        );

        if units.contains(TimeUnits::DAY) {
            let [tens, ones] = split_digits(time.month_day);
            self.set_image(host, DisplayField::DayName, ImageId::DayName(time.weekday))?;
            self.set_image(host, DisplayField::DateTens, ImageId::SmallDigit(tens))?;
            self.set_image(host, DisplayField::DateUnits, ImageId::SmallDigit(ones))?;
        }

        if units.contains(TimeUnits::HOUR) {
            let [tens, ones] = split_digits(display_hour(time.hour, self.config.clock_style));
            self.set_image(host, DisplayField::HourTens, ImageId::TimeDigit(tens))?;
            self.set_image(host, DisplayField::HourUnits, ImageId::TimeDigit(ones))?;

            if self.settings.hourly_vibe && self.phase == Phase::Running {
                info!("Hourly vibration at {:02}:00", time.hour);
                host.vibrate(VibePattern::ShortPulse);
            }
        }

        if units.contains(TimeUnits::MINUTE) {
            let [tens, ones] = split_digits(time.minute);
            self.set_image(host, DisplayField::MinuteTens, ImageId::TimeDigit(tens))?;
            self.set_image(host, DisplayField::MinuteUnits, ImageId::TimeDigit(ones))?;
        }

        if units.contains(TimeUnits::SECOND) {
            let [tens, ones] = split_digits(time.second);
            self.set_image(host, DisplayField::SecondTens, ImageId::SmallDigit(tens))?;
            self.set_image(host, DisplayField::SecondUnits, ImageId::SmallDigit(ones))?;
        }

        Ok(())
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Redraw the gauge and readout for a new charge level.
    pub fn handle_battery(
        &mut self,
        host: &mut H,
        percent: u8,
    ) -> Result<(), Error> {
        self.ensure_not_stopped()?;
        self.battery_percent = percent.min(100);
        debug!("Battery {}%", self.battery_percent);
        self.render_battery(host)
    }

    fn render_battery(
        &mut self,
        host: &mut H,
    ) -> Result<(), Error> {
        let percent = self.battery_percent;
        self.set_image(host, DisplayField::BatteryGauge, ImageId::BatteryGauge(battery_bucket(percent)))?;
        for (field, glyph) in DisplayField::BATTERY_READOUT.into_iter().zip(battery_readout(percent)) {
            self.set_image(host, field, ImageId::BatteryGlyph(glyph))?;
        }
        Ok(())
    }

    /// React to a connectivity change with a double pulse, if enabled.
    pub fn handle_connection(
        &mut self,
        host: &mut H,
        connected: bool,
    ) -> Result<(), Error> {
        self.ensure_not_stopped()?;
        info!("Connection {}", if connected { "restored" } else { "lost" });
        if self.settings.bluetooth_vibe && self.phase == Phase::Running {
            host.vibrate(VibePattern::DoublePulse);
        }
        Ok(())
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Change one setting, write it through to the store and apply its effect.
    ///
    /// A failed store write is reported as [`Error::Storage`] after the new
    /// value has been applied.
    pub fn apply_setting(
        &mut self,
        host: &mut H,
        key: SettingKey,
        value: bool,
    ) -> Result<(), Error> {
        self.ensure_not_stopped()?;
        info!("Setting {} = {}", key.name(), value);
        self.settings.set(key, value);

        let stored = host.write_bool(key, value);
        if let Err(e) = stored {
            warn!("Could not persist {}: {e}", key.name());
        }

        self.apply_effect(host, key)?;
        stored
    }

    fn apply_effect(
        &mut self,
        host: &mut H,
        key: SettingKey,
    ) -> Result<(), Error> {
        let value = self.settings.get(key);
        match key {
            SettingKey::InvertColors => match (value, self.inverter.is_some()) {
                (true, false) => self.inverter = Some(host.create_inverter()?),
                (false, true) => {
                    if let Some(overlay) = self.inverter.take() {
                        host.destroy_inverter(overlay);
                    }
                }
                _ => {}
            },
            SettingKey::HideSeconds => {
                for field in DisplayField::SECONDS {
                    host.set_hidden(field, value);
                }
                self.subscribe(host, seconds_granularity(value));
            }
            SettingKey::HourlyVibe | SettingKey::BluetoothVibe => {}
        }
        Ok(())
    }

    /// Apply every update of a configuration message in order.
    ///
    /// Unknown keys are skipped. Each update is applied even if an earlier
    /// one failed; the first error is returned.
    pub fn handle_message(
        &mut self,
        host: &mut H,
        message: &ConfigMessage,
    ) -> Result<(), Error> {
        self.ensure_not_stopped()?;
        let mut result = Ok(());
        for update in message.updates() {
            match update.setting() {
                Some(key) => {
                    let applied = self.apply_setting(host, key, update.value);
                    if result.is_ok() {
                        result = applied;
                    }
                }
                None => debug!("Ignoring unknown setting key {}", update.key),
            }
        }
        result
    }

    /// Decode a wire message and apply it. Nothing is applied if decoding fails.
    pub fn handle_raw_message(
        &mut self,
        host: &mut H,
        bytes: &[u8],
    ) -> Result<(), Error> {
        let message = ConfigMessage::decode(bytes)?;
        self.handle_message(host, &message)
    }

    // =========================================================================
    // Event Routing
    // =========================================================================

    pub fn dispatch(
        &mut self,
        host: &mut H,
        event: &Event,
    ) -> Result<(), Error> {
        match event {
            Event::Tick(time, units) => self.handle_tick(host, time, *units),
            Event::Battery(percent) => self.handle_battery(host, *percent),
            Event::Connection(connected) => self.handle_connection(host, *connected),
            Event::Config(message) => self.handle_message(host, message),
        }
    }

    /// Dispatch queued events until the queue is empty.
    ///
    /// Failed events are logged and skipped. Returns the number of events
    /// dispatched.
    pub fn drain(
        &mut self,
        host: &mut H,
        queue: &mut EventQueue,
    ) -> usize {
        let mut count = 0;
        while let Some(event) = queue.pop() {
            if let Err(e) = self.dispatch(host, &event) {
                warn!("Event {event:?} failed: {e}");
            }
            count += 1;
        }
        count
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Load `id`, show it in `field` and release the bitmap it replaces.
    fn set_image(
        &mut self,
        host: &mut H,
        field: DisplayField,
        id: ImageId,
    ) -> Result<(), Error> {
        let bitmap = host.load(id)?;
        host.place(field, &bitmap, field.origin());
        if let Some(old) = self.slots[field.index()].replace(bitmap) {
            host.release(old);
        }
        Ok(())
    }

    fn subscribe(
        &mut self,
        host: &mut H,
        granularity: TimeUnits,
    ) {
        host.subscribe(granularity);
        self.subscription = granularity;
    }
}

impl<H: Compositor> WatchFace<H> {
    #[inline]
    pub const fn settings(&self) -> &Settings { &self.settings }

    #[inline]
    pub const fn config(&self) -> &WatchConfig { &self.config }

    /// Whether startup finished and the face has not been stopped.
    #[inline]
    pub fn is_running(&self) -> bool { self.phase == Phase::Running }

    /// Last battery percent shown.
    #[inline]
    pub const fn battery_percent(&self) -> u8 { self.battery_percent }

    /// Current tick subscription (`NONE` once stopped).
    #[inline]
    pub const fn subscription(&self) -> TimeUnits { self.subscription }

    fn ensure_not_stopped(&self) -> Result<(), Error> {
        if self.phase == Phase::Stopped { Err(Error::NotStarted) } else { Ok(()) }
    }
}

const fn seconds_granularity(hide_seconds: bool) -> TimeUnits {
    if hide_seconds { TimeUnits::MINUTE } else { TimeUnits::SECOND }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockStyle;
    use crate::digits::PERCENT_SIGN;
    use crate::message::MAX_ENCODED_LEN;
    use crate::settings::SettingsStore;
    use crate::testing::TestHost;
    use crate::time::Weekday;

    /// Saturday 2024-03-09 at the given time.
    fn at(
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

    fn start(host: &mut TestHost) -> WatchFace<TestHost> {
        WatchFace::init(host, WatchConfig::default(), &at(13, 45, 27), 85).unwrap()
    }

    fn host_with(settings: &[(SettingKey, bool)]) -> TestHost {
        let mut host = TestHost::new();
        for &(key, value) in settings {
            host.store.write_bool(key, value).unwrap();
        }
        host
    }

    #[test]
    fn test_init_renders_every_field() {
        let mut host = TestHost::new();
        let face = start(&mut host);
        let scene = &host.scene;

        assert!(face.is_running());
        assert_eq!(scene.image(DisplayField::HourTens), Some(ImageId::TimeDigit(1)));
        assert_eq!(scene.image(DisplayField::HourUnits), Some(ImageId::TimeDigit(3)));
        assert_eq!(scene.image(DisplayField::MinuteTens), Some(ImageId::TimeDigit(4)));
        assert_eq!(scene.image(DisplayField::MinuteUnits), Some(ImageId::TimeDigit(5)));
        assert_eq!(scene.image(DisplayField::SecondTens), Some(ImageId::SmallDigit(2)));
        assert_eq!(scene.image(DisplayField::SecondUnits), Some(ImageId::SmallDigit(7)));
        assert_eq!(scene.image(DisplayField::DayName), Some(ImageId::DayName(Weekday::Saturday)));
        assert_eq!(scene.image(DisplayField::DateTens), Some(ImageId::SmallDigit(0)));
        assert_eq!(scene.image(DisplayField::DateUnits), Some(ImageId::SmallDigit(9)));
        assert_eq!(scene.image(DisplayField::BatteryGauge), Some(ImageId::BatteryGauge(9)));
        assert_eq!(scene.image(DisplayField::BatteryTens), Some(ImageId::BatteryGlyph(8)));
        assert_eq!(scene.image(DisplayField::BatteryUnits), Some(ImageId::BatteryGlyph(5)));
        assert_eq!(scene.image(DisplayField::BatterySign), Some(ImageId::BatteryGlyph(PERCENT_SIGN)));
        assert_eq!(scene.image(DisplayField::Separator), Some(ImageId::Separator));
        assert_eq!(scene.live_bitmaps(), FIELD_COUNT);
        assert!(!scene.is_inverted());
        assert_eq!(host.subscribed, Some(TimeUnits::SECOND));
    }

    #[test]
    fn test_init_twelve_hour_clock() {
        let mut host = TestHost::new();
        let config = WatchConfig::with_clock_style(ClockStyle::TwelveHour);
        let mut face = WatchFace::init(&mut host, config, &at(0, 5, 0), 50).unwrap();
        assert_eq!(host.scene.image(DisplayField::HourTens), Some(ImageId::TimeDigit(1)));
        assert_eq!(host.scene.image(DisplayField::HourUnits), Some(ImageId::TimeDigit(2)));

        face.handle_tick(&mut host, &at(13, 0, 0), TimeUnits::HOUR).unwrap();
        assert_eq!(host.scene.image(DisplayField::HourTens), Some(ImageId::TimeDigit(0)));
        assert_eq!(host.scene.image(DisplayField::HourUnits), Some(ImageId::TimeDigit(1)));
    }

    #[test]
    fn test_startup_never_vibrates() {
        let mut host = host_with(&[(SettingKey::HourlyVibe, true), (SettingKey::BluetoothVibe, true)]);
        let face = start(&mut host);
        assert!(face.settings().hourly_vibe);
        assert!(host.vibes.is_empty());
    }

    #[test]
    fn test_startup_applies_stored_settings_without_rewriting() {
        let mut host = host_with(&[(SettingKey::InvertColors, true), (SettingKey::HideSeconds, true)]);
        let writes = host.store.writes();
        let face = start(&mut host);

        assert!(face.settings().invert_colors);
        assert_eq!(host.scene.overlay_count(), 1);
        assert!(host.scene.is_hidden(DisplayField::SecondTens));
        assert!(host.scene.is_hidden(DisplayField::SecondUnits));
        assert_eq!(host.store.writes(), writes);
    }

    #[test]
    fn test_startup_ticks_always_seconds_by_default() {
        let mut host = host_with(&[(SettingKey::HideSeconds, true)]);
        let face = start(&mut host);
        // Hiding subscribed to minutes, then startup switched back to seconds
        assert_eq!(host.subscriptions, [TimeUnits::MINUTE, TimeUnits::SECOND]);
        assert_eq!(face.subscription(), TimeUnits::SECOND);
    }

    #[test]
    fn test_startup_ticks_follow_hide_seconds() {
        let mut host = host_with(&[(SettingKey::HideSeconds, true)]);
        let config = WatchConfig {
            startup_ticks: StartupTicks::FollowHideSeconds,
            ..WatchConfig::default()
        };
        let face = WatchFace::init(&mut host, config, &at(8, 0, 0), 50).unwrap();
        assert_eq!(host.subscribed, Some(TimeUnits::MINUTE));
        assert_eq!(face.subscription(), TimeUnits::MINUTE);
    }

    #[test]
    fn test_second_tick_updates_only_seconds() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);
        host.placed.clear();

        face.handle_tick(&mut host, &at(13, 45, 28), TimeUnits::SECOND).unwrap();
        assert_eq!(host.placed, [DisplayField::SecondTens, DisplayField::SecondUnits]);
        assert_eq!(host.scene.image(DisplayField::SecondUnits), Some(ImageId::SmallDigit(8)));
    }

    #[test]
    fn test_minute_tick_updates_minutes_and_seconds() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);
        host.placed.clear();

        let units = at(13, 46, 0).changed_units(&at(13, 45, 59));
        face.handle_tick(&mut host, &at(13, 46, 0), units).unwrap();
        assert_eq!(
            host.placed,
            [
                DisplayField::MinuteTens,
                DisplayField::MinuteUnits,
                DisplayField::SecondTens,
                DisplayField::SecondUnits
            ]
        );
    }

    #[test]
    fn test_seconds_update_while_hidden() {
        let mut host = host_with(&[(SettingKey::HideSeconds, true)]);
        let mut face = start(&mut host);
        face.handle_tick(&mut host, &at(13, 45, 31), TimeUnits::SECOND).unwrap();
        assert!(host.scene.is_hidden(DisplayField::SecondUnits));
        assert_eq!(host.scene.image(DisplayField::SecondUnits), Some(ImageId::SmallDigit(1)));
    }

    #[test]
    fn test_hourly_vibe_on_hour_change() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);

        face.handle_tick(&mut host, &at(14, 0, 0), TimeUnits::HOUR | TimeUnits::MINUTE).unwrap();
        assert!(host.vibes.is_empty());

        face.apply_setting(&mut host, SettingKey::HourlyVibe, true).unwrap();
        face.handle_tick(&mut host, &at(14, 0, 1), TimeUnits::SECOND).unwrap();
        assert!(host.vibes.is_empty());
        face.handle_tick(&mut host, &at(15, 0, 0), TimeUnits::HOUR).unwrap();
        assert_eq!(host.vibes, [VibePattern::ShortPulse]);
    }

    #[test]
    fn test_connection_vibrates_when_enabled() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);

        face.handle_connection(&mut host, false).unwrap();
        assert!(host.vibes.is_empty());

        face.apply_setting(&mut host, SettingKey::BluetoothVibe, true).unwrap();
        face.handle_connection(&mut host, false).unwrap();
        face.handle_connection(&mut host, true).unwrap();
        assert_eq!(host.vibes, [VibePattern::DoublePulse, VibePattern::DoublePulse]);
    }

    #[test]
    fn test_invert_is_idempotent() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);

        face.apply_setting(&mut host, SettingKey::InvertColors, true).unwrap();
        face.apply_setting(&mut host, SettingKey::InvertColors, true).unwrap();
        assert_eq!(host.scene.overlay_count(), 1);

        face.apply_setting(&mut host, SettingKey::InvertColors, false).unwrap();
        assert_eq!(host.scene.overlay_count(), 0);
        face.apply_setting(&mut host, SettingKey::InvertColors, false).unwrap();
        assert_eq!(host.scene.overlay_count(), 0);
    }

    #[test]
    fn test_hide_seconds_toggles_layers_and_ticks() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);

        face.apply_setting(&mut host, SettingKey::HideSeconds, true).unwrap();
        assert!(host.scene.is_hidden(DisplayField::SecondTens));
        assert!(host.scene.is_hidden(DisplayField::SecondUnits));
        assert_eq!(host.subscribed, Some(TimeUnits::MINUTE));

        face.apply_setting(&mut host, SettingKey::HideSeconds, false).unwrap();
        assert!(!host.scene.is_hidden(DisplayField::SecondTens));
        assert!(!host.scene.is_hidden(DisplayField::SecondUnits));
        assert_eq!(host.subscribed, Some(TimeUnits::SECOND));
    }

    #[test]
    fn test_settings_write_through_and_survive_restart() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);
        face.apply_setting(&mut host, SettingKey::HideSeconds, true).unwrap();
        face.apply_setting(&mut host, SettingKey::BluetoothVibe, true).unwrap();
        assert_eq!(host.store.read_bool(SettingKey::HideSeconds), Some(true));
        let before = *face.settings();
        face.deinit(&mut host);

        let face = start(&mut host);
        assert_eq!(*face.settings(), before);
    }

    #[test]
    fn test_store_failure_still_applies() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);
        host.store.set_fail_writes(true);

        assert_eq!(
            face.apply_setting(&mut host, SettingKey::InvertColors, true),
            Err(Error::Storage)
        );
        assert!(face.settings().invert_colors);
        assert!(host.scene.is_inverted());
    }

    #[test]
    fn test_start_stop_cycle_releases_everything() {
        let mut host = host_with(&[(SettingKey::InvertColors, true)]);
        let mut face = start(&mut host);
        for s in 28..40 {
            face.handle_tick(&mut host, &at(13, 45, s), TimeUnits::SECOND).unwrap();
        }
        face.handle_battery(&mut host, 40).unwrap();
        assert_eq!(host.scene.live_bitmaps(), FIELD_COUNT);

        face.deinit(&mut host);
        assert_eq!(host.scene.live_bitmaps(), 0);
        assert_eq!(host.scene.overlay_count(), 0);
        assert_eq!(host.subscribed, None);
        for field in DisplayField::ALL {
            assert_eq!(host.scene.image(field), None);
        }
    }

    #[test]
    fn test_handlers_after_deinit_fail() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);
        face.deinit(&mut host);
        assert!(!face.is_running());
        assert_eq!(face.handle_battery(&mut host, 50), Err(Error::NotStarted));
        assert_eq!(
            face.handle_tick(&mut host, &at(1, 2, 3), TimeUnits::SECOND),
            Err(Error::NotStarted)
        );
        assert_eq!(host.scene.live_bitmaps(), 0);
    }

    #[test]
    fn test_failed_startup_releases_loaded_bitmaps() {
        let mut host = host_with(&[(SettingKey::InvertColors, true)]);
        host.scene.set_capacity(5);
        let result = WatchFace::init(&mut host, WatchConfig::default(), &at(9, 30, 0), 60);

        assert!(matches!(result, Err(Error::ResourceUnavailable(_))));
        assert_eq!(host.scene.live_bitmaps(), 0);
        assert_eq!(host.scene.overlay_count(), 0);
    }

    #[test]
    fn test_missing_resource_keeps_previous_image() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);
        host.scene.set_capacity(FIELD_COUNT);

        let result = face.handle_tick(&mut host, &at(13, 45, 28), TimeUnits::SECOND);
        assert_eq!(result, Err(Error::ResourceUnavailable(ImageId::SmallDigit(2))));
        assert_eq!(host.scene.image(DisplayField::SecondUnits), Some(ImageId::SmallDigit(7)));
        assert_eq!(host.scene.live_bitmaps(), FIELD_COUNT);
    }

    #[test]
    fn test_battery_updates_gauge_and_readout() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);

        face.handle_battery(&mut host, 100).unwrap();
        assert_eq!(host.scene.image(DisplayField::BatteryGauge), Some(ImageId::BatteryGauge(10)));
        assert_eq!(host.scene.image(DisplayField::BatteryTens), Some(ImageId::BatteryGlyph(1)));
        assert_eq!(host.scene.image(DisplayField::BatteryUnits), Some(ImageId::BatteryGlyph(0)));
        assert_eq!(host.scene.image(DisplayField::BatterySign), Some(ImageId::BatteryGlyph(0)));

        face.handle_battery(&mut host, 5).unwrap();
        assert_eq!(face.battery_percent(), 5);
        assert_eq!(host.scene.image(DisplayField::BatteryGauge), Some(ImageId::BatteryGauge(1)));
        assert_eq!(host.scene.image(DisplayField::BatteryTens), Some(ImageId::BatteryGlyph(0)));
        assert_eq!(host.scene.image(DisplayField::BatteryUnits), Some(ImageId::BatteryGlyph(5)));
        assert_eq!(host.scene.image(DisplayField::BatterySign), Some(ImageId::BatteryGlyph(PERCENT_SIGN)));
    }

    #[test]
    fn test_message_applies_known_keys_in_order() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);

        let mut msg = ConfigMessage::new();
        msg.push(SettingKey::InvertColors.key(), true).unwrap();
        msg.push(99, true).unwrap();
        msg.push(SettingKey::InvertColors.key(), false).unwrap();
        msg.push(SettingKey::HourlyVibe.key(), true).unwrap();
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = msg.encode(&mut buf).unwrap();

        face.handle_raw_message(&mut host, &buf[..len]).unwrap();
        assert!(!face.settings().invert_colors);
        assert!(face.settings().hourly_vibe);
        assert_eq!(host.scene.overlay_count(), 0);
        assert_eq!(host.store.read_bool(SettingKey::InvertColors), Some(false));
    }

    #[test]
    fn test_malformed_message_applies_nothing() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);

        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = ConfigMessage::single(SettingKey::InvertColors, true)
            .encode(&mut buf)
            .unwrap();
        let result = face.handle_raw_message(&mut host, &buf[..len - 1]);

        assert!(matches!(result, Err(Error::Message(_))));
        assert!(!face.settings().invert_colors);
        assert!(!host.scene.is_inverted());
    }

    #[test]
    fn test_drain_dispatches_in_order() {
        let mut host = TestHost::new();
        let mut face = start(&mut host);
        let mut queue = EventQueue::new();

        queue.push(Event::Config(ConfigMessage::single(SettingKey::BluetoothVibe, true)));
        queue.push(Event::Connection(false));
        queue.push(Event::Battery(33));
        queue.push(Event::Tick(at(13, 45, 59), TimeUnits::SECOND));

        assert_eq!(face.drain(&mut host, &mut queue), 4);
        assert!(queue.is_empty());
        assert_eq!(host.vibes, [VibePattern::DoublePulse]);
        assert_eq!(host.scene.image(DisplayField::BatteryGauge), Some(ImageId::BatteryGauge(4)));
        assert_eq!(host.scene.image(DisplayField::SecondUnits), Some(ImageId::SmallDigit(9)));
    }
}
