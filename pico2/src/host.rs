//! Board host: scene compositor, flash settings, motor requests, tick subscription.
//!
//! Runs entirely inside the face loop. Vibration requests go to the motor
//! task through a bounded channel and are dropped when it is full.

use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embedded_graphics::prelude::Point;
use watchface_common::host::{Compositor, Haptics, TickService, VibePattern};
use watchface_common::scene::InverterToken;
use watchface_common::{DisplayField, Error, ImageId, Scene, SceneBitmap, SettingKey, SettingsStore, TimeUnits};
use watchface_pico2::storage::FlashStore;
use watchface_pico2::vibe::pattern_name;

use crate::config::VIBE_QUEUE_LEN;
use crate::flash::BoardFlash;

pub type VibeSender = Sender<'static, CriticalSectionRawMutex, VibePattern, VIBE_QUEUE_LEN>;

pub struct BoardHost {
    pub scene: Scene,
    store: FlashStore<BoardFlash>,
    vibe: VibeSender,
    subscription: Option<TimeUnits>,
}

impl BoardHost {
    pub fn new(
        scene: Scene,
        store: FlashStore<BoardFlash>,
        vibe: VibeSender,
    ) -> Self {
        Self {
            scene,
            store,
            vibe,
            subscription: None,
        }
    }

    /// Granularity the watchface subscribed to, if any.
    #[inline]
    pub const fn subscription(&self) -> Option<TimeUnits> { self.subscription }
}

impl Compositor for BoardHost {
    type Bitmap = SceneBitmap;
    type Overlay = InverterToken;

    fn load(
        &mut self,
        id: ImageId,
    ) -> Result<SceneBitmap, Error> {
        self.scene.load(id)
    }

    fn release(
        &mut self,
        bitmap: SceneBitmap,
    ) {
        self.scene.release(bitmap);
    }

    fn place(
        &mut self,
        layer: DisplayField,
        bitmap: &SceneBitmap,
        origin: Point,
    ) {
        self.scene.place(layer, bitmap, origin);
    }

    fn detach(
        &mut self,
        layer: DisplayField,
    ) {
        self.scene.detach(layer);
    }

    fn set_hidden(
        &mut self,
        layer: DisplayField,
        hidden: bool,
    ) {
        self.scene.set_hidden(layer, hidden);
    }

    fn create_inverter(&mut self) -> Result<InverterToken, Error> { self.scene.create_inverter() }

    fn destroy_inverter(
        &mut self,
        overlay: InverterToken,
    ) {
        self.scene.destroy_inverter(overlay);
    }
}

impl Haptics for BoardHost {
    fn vibrate(
        &mut self,
        pattern: VibePattern,
    ) {
        if self.vibe.try_send(pattern).is_err() {
            warn!("Motor busy, dropped {} pulse", pattern_name(pattern));
        }
    }
}

impl TickService for BoardHost {
    fn subscribe(
        &mut self,
        granularity: TimeUnits,
    ) {
        info!("Ticks every {}", if granularity == TimeUnits::MINUTE { "minute" } else { "second" });
        self.subscription = Some(granularity);
    }

    fn unsubscribe(&mut self) { self.subscription = None; }
}

impl SettingsStore for BoardHost {
    fn read_bool(
        &self,
        key: SettingKey,
    ) -> Option<bool> {
        self.store.read_bool(key)
    }

    fn write_bool(
        &mut self,
        key: SettingKey,
        value: bool,
    ) -> Result<(), Error> {
        self.store.write_bool(key, value)
    }
}
