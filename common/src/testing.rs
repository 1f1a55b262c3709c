//! Test doubles shared by the unit tests.

use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::error::Error;
use crate::fields::DisplayField;
use crate::host::{Compositor, Haptics, TickService, VibePattern};
use crate::images::ImageId;
use crate::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::scene::{InverterToken, Scene, SceneBitmap};
use crate::settings::{MemoryStore, SettingKey, SettingsStore};
use crate::time::TimeUnits;

// =============================================================================
// Framebuffer
// =============================================================================

/// Screen-sized RGB565 framebuffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Framebuffer {
    pixels: Vec<Rgb565>,
}

impl Framebuffer {
    pub fn new(fill: Rgb565) -> Self {
        Self {
            pixels: vec![fill; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }

    /// Number of pixels of `color`.
    pub fn count(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Number of pixels of `color` inside `area`.
    pub fn count_in(
        &self,
        area: Rectangle,
        color: Rgb565,
    ) -> usize {
        area.points()
            .filter(|p| self.bounding_box().contains(*p))
            .filter(|p| self.pixels[p.y as usize * SCREEN_WIDTH as usize + p.x as usize] == color)
            .count()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                self.pixels[point.y as usize * SCREEN_WIDTH as usize + point.x as usize] = color;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Recording Host
// =============================================================================

/// Host backed by a real [`Scene`] and [`MemoryStore`] that records the
/// side effects it receives.
#[derive(Default)]
pub struct TestHost {
    pub scene: Scene,
    pub store: MemoryStore,
    /// Vibrations requested, oldest first.
    pub vibes: Vec<VibePattern>,
    /// Every subscription made, oldest first.
    pub subscriptions: Vec<TimeUnits>,
    /// Current subscription.
    pub subscribed: Option<TimeUnits>,
    /// Layers passed to `place`, oldest first.
    pub placed: Vec<DisplayField>,
}

impl TestHost {
    pub fn new() -> Self { Self::default() }
}

impl Compositor for TestHost {
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
        self.placed.push(layer);
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

impl Haptics for TestHost {
    fn vibrate(
        &mut self,
        pattern: VibePattern,
    ) {
        self.vibes.push(pattern);
    }
}

impl TickService for TestHost {
    fn subscribe(
        &mut self,
        granularity: TimeUnits,
    ) {
        self.subscriptions.push(granularity);
        self.subscribed = Some(granularity);
    }

    fn unsubscribe(&mut self) { self.subscribed = None; }
}

impl SettingsStore for TestHost {
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
