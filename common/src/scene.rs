//! Retained fixed-layer compositor.
//!
//! The scene keeps, for every [`DisplayField`], which image is placed where
//! and whether the layer is hidden, plus an optional inversion overlay. It
//! renders into any `DrawTarget<Color = Rgb565>`; drivers poll
//! [`Scene::is_dirty`] and only redraw after a change.
//!
//! Bitmap handles are counted so a leaked or double-released bitmap shows up
//! in [`Scene::live_bitmaps`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{Palette, invert};
use crate::error::Error;
use crate::fields::{DisplayField, FIELD_COUNT};
use crate::glyphs::draw_image;
use crate::host::Compositor;
use crate::images::ImageId;

/// Default number of bitmaps that may be live at once: one per field plus
/// one while a field is being replaced.
pub const DEFAULT_BITMAP_CAPACITY: usize = FIELD_COUNT + 1;

/// Loaded image handle. Not `Clone`; every handle goes back through `release`.
#[derive(PartialEq, Eq, Debug)]
pub struct SceneBitmap {
    id: ImageId,
}

impl SceneBitmap {
    #[inline]
    pub const fn id(&self) -> ImageId { self.id }
}

/// Inversion overlay handle.
#[derive(PartialEq, Eq, Debug)]
pub struct InverterToken(());

/// Content of one layer.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Layer {
    /// Placed image and its top-left position.
    pub image: Option<(ImageId, Point)>,
    pub hidden: bool,
}

/// Fixed-slot compositor.
#[derive(Debug)]
pub struct Scene {
    layers: [Layer; FIELD_COUNT],
    palette: Palette,
    overlays: usize,
    live_bitmaps: usize,
    capacity: usize,
    dirty: bool,
}

impl Scene {
    pub const fn new(palette: Palette) -> Self {
        Self {
            layers: [Layer {
                image: None,
                hidden: false,
            }; FIELD_COUNT],
            palette,
            overlays: 0,
            live_bitmaps: 0,
            capacity: DEFAULT_BITMAP_CAPACITY,
            dirty: true,
        }
    }

    /// Limit the number of live bitmaps; loads beyond it fail.
    pub const fn set_capacity(
        &mut self,
        capacity: usize,
    ) {
        self.capacity = capacity;
    }

    #[inline]
    pub const fn layer(
        &self,
        field: DisplayField,
    ) -> Layer {
        self.layers[field.index()]
    }

    /// Image currently placed in `field`, if any.
    #[inline]
    pub const fn image(
        &self,
        field: DisplayField,
    ) -> Option<ImageId> {
        match self.layers[field.index()].image {
            Some((id, _)) => Some(id),
            None => None,
        }
    }

    #[inline]
    pub const fn is_hidden(
        &self,
        field: DisplayField,
    ) -> bool {
        self.layers[field.index()].hidden
    }

    #[inline]
    pub const fn is_inverted(&self) -> bool { self.overlays > 0 }

    /// Number of inversion overlays currently present.
    #[inline]
    pub const fn overlay_count(&self) -> usize { self.overlays }

    /// Number of bitmaps loaded and not yet released.
    #[inline]
    pub const fn live_bitmaps(&self) -> usize { self.live_bitmaps }

    #[inline]
    pub const fn is_dirty(&self) -> bool { self.dirty }

    /// Force a redraw, e.g. after the display was cleared externally.
    #[inline]
    pub fn mark_dirty(&mut self) { self.dirty = true; }

    /// Render every visible layer in z-order, then clear the dirty flag.
    pub fn draw<D>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.is_inverted() {
            self.draw_layers(&mut Inverted(display))?;
        } else {
            self.draw_layers(display)?;
        }
        self.dirty = false;
        Ok(())
    }

    fn draw_layers<D>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(self.palette.background)?;
        for layer in &self.layers {
            if let (Some((id, origin)), false) = (layer.image, layer.hidden) {
                draw_image(display, id, origin, self.palette.foreground);
            }
        }
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self { Self::new(Palette::CLASSIC) }
}

impl Compositor for Scene {
    type Bitmap = SceneBitmap;
    type Overlay = InverterToken;

    fn load(
        &mut self,
        id: ImageId,
    ) -> Result<SceneBitmap, Error> {
        if !id.is_valid() || self.live_bitmaps >= self.capacity {
            return Err(Error::ResourceUnavailable(id));
        }
        self.live_bitmaps += 1;
        Ok(SceneBitmap { id })
    }

    fn release(
        &mut self,
        _bitmap: SceneBitmap,
    ) {
        self.live_bitmaps = self.live_bitmaps.saturating_sub(1);
    }

    fn place(
        &mut self,
        layer: DisplayField,
        bitmap: &SceneBitmap,
        origin: Point,
    ) {
        let slot = &mut self.layers[layer.index()];
        let image = Some((bitmap.id, origin));
        if slot.image != image {
            slot.image = image;
            self.dirty = true;
        }
    }

    fn detach(
        &mut self,
        layer: DisplayField,
    ) {
        let slot = &mut self.layers[layer.index()];
        if slot.image.take().is_some() {
            self.dirty = true;
        }
    }

    fn set_hidden(
        &mut self,
        layer: DisplayField,
        hidden: bool,
    ) {
        let slot = &mut self.layers[layer.index()];
        if slot.hidden != hidden {
            slot.hidden = hidden;
            self.dirty = true;
        }
    }

    fn create_inverter(&mut self) -> Result<InverterToken, Error> {
        self.overlays += 1;
        self.dirty = true;
        Ok(InverterToken(()))
    }

    fn destroy_inverter(
        &mut self,
        _overlay: InverterToken,
    ) {
        self.overlays = self.overlays.saturating_sub(1);
        self.dirty = true;
    }
}

// =============================================================================
// Inversion Adapter
// =============================================================================

/// Draw target that inverts every colour before passing it on.
struct Inverted<'a, D>(&'a mut D);

impl<D: Dimensions> Dimensions for Inverted<'_, D> {
    fn bounding_box(&self) -> embedded_graphics::primitives::Rectangle { self.0.bounding_box() }
}

impl<D> DrawTarget for Inverted<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0
            .draw_iter(pixels.into_iter().map(|Pixel(point, color)| Pixel(point, invert(color))))
    }

    fn fill_contiguous<I>(
        &mut self,
        area: &embedded_graphics::primitives::Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.0.fill_contiguous(area, colors.into_iter().map(invert))
    }

    fn fill_solid(
        &mut self,
        area: &embedded_graphics::primitives::Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.0.fill_solid(area, invert(color))
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.0.clear(invert(color))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};
    use crate::testing::Framebuffer;

    fn placed(
        scene: &mut Scene,
        field: DisplayField,
        id: ImageId,
    ) -> SceneBitmap {
        let bitmap = scene.load(id).unwrap();
        scene.place(field, &bitmap, field.origin());
        bitmap
    }

    #[test]
    fn test_load_and_release_counts() {
        let mut scene = Scene::default();
        let a = scene.load(ImageId::TimeDigit(1)).unwrap();
        let b = scene.load(ImageId::Separator).unwrap();
        assert_eq!(scene.live_bitmaps(), 2);
        scene.release(a);
        scene.release(b);
        assert_eq!(scene.live_bitmaps(), 0);
    }

    #[test]
    fn test_load_invalid_image_fails() {
        let mut scene = Scene::default();
        assert_eq!(
            scene.load(ImageId::SmallDigit(10)),
            Err(Error::ResourceUnavailable(ImageId::SmallDigit(10)))
        );
        assert_eq!(scene.live_bitmaps(), 0);
    }

    #[test]
    fn test_load_beyond_capacity_fails() {
        let mut scene = Scene::default();
        scene.set_capacity(1);
        let a = scene.load(ImageId::Separator).unwrap();
        assert!(scene.load(ImageId::TimeDigit(0)).is_err());
        scene.release(a);
        assert!(scene.load(ImageId::TimeDigit(0)).is_ok());
    }

    #[test]
    fn test_place_keeps_image_after_release() {
        let mut scene = Scene::default();
        let bitmap = placed(&mut scene, DisplayField::HourTens, ImageId::TimeDigit(2));
        scene.release(bitmap);
        assert_eq!(scene.image(DisplayField::HourTens), Some(ImageId::TimeDigit(2)));
        scene.detach(DisplayField::HourTens);
        assert_eq!(scene.image(DisplayField::HourTens), None);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut scene = Scene::default();
        let mut fb = Framebuffer::new(BLACK);
        assert!(scene.is_dirty());
        scene.draw(&mut fb).unwrap();
        assert!(!scene.is_dirty());

        let bitmap = placed(&mut scene, DisplayField::Separator, ImageId::Separator);
        assert!(scene.is_dirty());
        scene.draw(&mut fb).unwrap();

        // Same image at the same place changes nothing
        scene.place(DisplayField::Separator, &bitmap, DisplayField::Separator.origin());
        scene.set_hidden(DisplayField::Separator, false);
        assert!(!scene.is_dirty());

        scene.set_hidden(DisplayField::Separator, true);
        assert!(scene.is_dirty());
        scene.release(bitmap);
    }

    #[test]
    fn test_hidden_layer_not_drawn() {
        let mut scene = Scene::default();
        let bitmap = placed(&mut scene, DisplayField::SecondTens, ImageId::SmallDigit(8));
        let area = embedded_graphics::primitives::Rectangle::new(
            DisplayField::SecondTens.origin(),
            ImageId::SmallDigit(8).size(),
        );

        let mut fb = Framebuffer::new(BLACK);
        scene.draw(&mut fb).unwrap();
        assert!(fb.count_in(area, WHITE) > 0);

        scene.set_hidden(DisplayField::SecondTens, true);
        scene.draw(&mut fb).unwrap();
        assert_eq!(fb.count(WHITE), 0);
        scene.release(bitmap);
    }

    #[test]
    fn test_inverter_inverts_every_pixel() {
        let mut scene = Scene::default();
        let bitmap = placed(&mut scene, DisplayField::HourUnits, ImageId::TimeDigit(8));

        let mut normal = Framebuffer::new(BLACK);
        scene.draw(&mut normal).unwrap();

        let token = scene.create_inverter().unwrap();
        assert!(scene.is_inverted());
        let mut inverted = Framebuffer::new(BLACK);
        scene.draw(&mut inverted).unwrap();

        assert_eq!(normal.count(WHITE), inverted.count(BLACK));
        assert_eq!(normal.count(BLACK), inverted.count(WHITE));

        scene.destroy_inverter(token);
        assert!(!scene.is_inverted());
        assert_eq!(scene.overlay_count(), 0);
        scene.release(bitmap);
    }
}
