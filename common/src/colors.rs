//! Colour constants and the inversion used by the overlay.
//!
//! The watchface is drawn in two colours. Both are `Rgb565` so the scene can
//! be rendered straight into the ST7789 framebuffer and the simulator display
//! without conversion.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Pure black (0, 0, 0). Default background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default foreground for digits and labels.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Two-colour palette used to draw the scene.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    /// Colour of digits, labels and gauge segments.
    pub foreground: Rgb565,
    /// Colour of the cleared screen.
    pub background: Rgb565,
}

impl Palette {
    /// White on black.
    pub const CLASSIC: Self = Self {
        foreground: WHITE,
        background: BLACK,
    };
}

impl Default for Palette {
    fn default() -> Self { Self::CLASSIC }
}

/// Invert a colour channel-wise (used by the inversion overlay).
#[inline]
pub fn invert(color: Rgb565) -> Rgb565 {
    Rgb565::new(
        Rgb565::MAX_R - color.r(),
        Rgb565::MAX_G - color.g(),
        Rgb565::MAX_B - color.b(),
    )
}
