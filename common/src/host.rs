//! Services the watchface requests from its host.
//!
//! The watchface never talks to a display, motor or timer directly. Each
//! host (simulator, firmware, test harness) implements these traits and
//! passes itself into the [`crate::WatchFace`] handlers.

use embedded_graphics::prelude::Point;

use crate::error::Error;
use crate::fields::DisplayField;
use crate::images::ImageId;
use crate::settings::SettingsStore;
use crate::time::TimeUnits;

/// Retained compositor with one slot per [`DisplayField`].
///
/// Bitmaps are owned handles: every bitmap obtained from [`load`] must be
/// given back through [`release`] exactly once.
///
/// [`load`]: Compositor::load
/// [`release`]: Compositor::release
pub trait Compositor {
    /// Handle to a loaded image.
    type Bitmap;
    /// Handle to the full-screen inversion overlay.
    type Overlay;

    /// Load a pre-rendered image.
    fn load(
        &mut self,
        id: ImageId,
    ) -> Result<Self::Bitmap, Error>;

    /// Return a bitmap. It must no longer be needed by any layer.
    fn release(
        &mut self,
        bitmap: Self::Bitmap,
    );

    /// Show `bitmap` in `layer` at `origin`, replacing what the layer showed.
    fn place(
        &mut self,
        layer: DisplayField,
        bitmap: &Self::Bitmap,
        origin: Point,
    );

    /// Empty `layer`.
    fn detach(
        &mut self,
        layer: DisplayField,
    );

    fn set_hidden(
        &mut self,
        layer: DisplayField,
        hidden: bool,
    );

    /// Add the inversion overlay on top of every layer.
    fn create_inverter(&mut self) -> Result<Self::Overlay, Error>;

    fn destroy_inverter(
        &mut self,
        overlay: Self::Overlay,
    );
}

/// Vibration patterns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VibePattern {
    /// Hourly chime.
    ShortPulse,
    /// Connection change.
    DoublePulse,
}

pub trait Haptics {
    /// Request a vibration. Must not block.
    fn vibrate(
        &mut self,
        pattern: VibePattern,
    );
}

/// Tick subscription. A host delivers at most one tick per change of a unit
/// at or above the subscribed granularity.
pub trait TickService {
    /// Replace the current subscription.
    fn subscribe(
        &mut self,
        granularity: TimeUnits,
    );

    fn unsubscribe(&mut self);
}

/// Everything the watchface needs from its host.
pub trait Host: Compositor + Haptics + TickService + SettingsStore {}

impl<T> Host for T where T: Compositor + Haptics + TickService + SettingsStore {}
