//! Desktop host: scene compositor, file store, border-flash haptics.

use embedded_graphics::prelude::Point;
use log::info;
use watchface_common::host::{Compositor, Haptics, TickService, VibePattern};
use watchface_common::scene::InverterToken;
use watchface_common::{DisplayField, Error, ImageId, Scene, SceneBitmap, SettingKey, SettingsStore, TimeUnits};

use crate::popup::VibeFlash;
use crate::store::FileStore;

pub struct SimHost {
    pub scene: Scene,
    store: FileStore,
    subscription: Option<TimeUnits>,
    flash: Option<VibeFlash>,
}

impl SimHost {
    pub fn new(
        scene: Scene,
        store: FileStore,
    ) -> Self {
        Self {
            scene,
            store,
            subscription: None,
            flash: None,
        }
    }

    /// Granularity the watchface subscribed to, if any.
    #[inline]
    pub const fn subscription(&self) -> Option<TimeUnits> { self.subscription }

    /// Current vibration flash; expired flashes are dropped.
    pub fn flash(&mut self) -> Option<VibeFlash> {
        if self.flash.is_some_and(|f| f.is_expired()) {
            self.flash = None;
            self.scene.mark_dirty();
        }
        self.flash
    }
}

impl Compositor for SimHost {
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

impl Haptics for SimHost {
    fn vibrate(
        &mut self,
        pattern: VibePattern,
    ) {
        info!("Vibrate: {pattern:?}");
        self.flash = Some(VibeFlash::new(pattern));
    }
}

impl TickService for SimHost {
    fn subscribe(
        &mut self,
        granularity: TimeUnits,
    ) {
        info!("Ticks every {granularity:?}");
        self.subscription = Some(granularity);
    }

    fn unsubscribe(&mut self) { self.subscription = None; }
}

impl SettingsStore for SimHost {
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
