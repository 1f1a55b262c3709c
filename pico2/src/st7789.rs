//! Async ST7789 display driver with a single framebuffer for embassy-rp.
//!
//! - [`St7789Renderer`]: `DrawTarget` over the framebuffer (big-endian RGB565)
//! - [`St7789Flusher`]: owns the SPI bus and sends the framebuffer by DMA
//!
//! The watchface redraws only after a change, at most a few times per second,
//! so one buffer is enough: render, then await the flush.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use static_cell::ConstStaticCell;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Framebuffer size in bytes (320x240, 2 bytes per pixel).
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT * 2;

/// The framebuffer. Taken once at startup.
pub static FRAMEBUFFER: ConstStaticCell<[u8; BUFFER_SIZE]> = ConstStaticCell::new([0u8; BUFFER_SIZE]);

// ST7789 Commands
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

// MADCTL flags
const MADCTL_MX: u8 = 0x40; // Column address order
const MADCTL_MV: u8 = 0x20; // Row/column exchange

/// Big-endian bytes of a colour as the panel expects them.
#[inline]
fn pixel_bytes(color: Rgb565) -> [u8; 2] {
    let raw: RawU16 = color.into();
    raw.into_inner().to_be_bytes()
}

// =============================================================================
// Flusher
// =============================================================================

/// Owns the SPI bus and control pins.
pub struct St7789Flusher<'d> {
    spi: Spi<'d, SPI0, Async>,
    dc: Output<'d>,
    cs: Output<'d>,
}

impl<'d> St7789Flusher<'d> {
    pub fn new(
        spi: Spi<'d, SPI0, Async>,
        dc: Output<'d>,
        cs: Output<'d>,
    ) -> Self {
        Self { spi, dc, cs }
    }

    /// Bring the panel up in landscape RGB565 with a full-screen window.
    pub async fn init(&mut self) {
        self.write_command(SWRESET).await;
        Timer::after_millis(150).await;

        self.write_command(SLPOUT).await;
        Timer::after_millis(10).await;

        self.write_command(COLMOD).await;
        self.write_data(&[0x55]).await;

        // 90° rotation: MV=1, MX=1
        self.write_command(MADCTL).await;
        self.write_data(&[MADCTL_MV | MADCTL_MX]).await;

        // Required for PIM715
        self.write_command(INVON).await;
        Timer::after_millis(10).await;

        self.write_command(NORON).await;
        Timer::after_millis(10).await;

        self.write_command(DISPON).await;
        Timer::after_millis(10).await;

        self.set_window(WIDTH as u16, HEIGHT as u16).await;
    }

    async fn write_command(
        &mut self,
        cmd: u8,
    ) {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.write(&[cmd]).await.ok();
        self.cs.set_high();
    }

    async fn write_data(
        &mut self,
        data: &[u8],
    ) {
        self.cs.set_low();
        self.dc.set_high();
        self.spi.write(data).await.ok();
        self.cs.set_high();
    }

    /// Window from the origin to `width` x `height`.
    async fn set_window(
        &mut self,
        width: u16,
        height: u16,
    ) {
        let [x1_hi, x1_lo] = (width - 1).to_be_bytes();
        let [y1_hi, y1_lo] = (height - 1).to_be_bytes();

        self.write_command(CASET).await;
        self.write_data(&[0, 0, x1_hi, x1_lo]).await;

        self.write_command(RASET).await;
        self.write_data(&[0, 0, y1_hi, y1_lo]).await;
    }

    /// Send a whole framebuffer. The window is set once in `init()`.
    pub async fn flush_buffer(
        &mut self,
        buffer: &[u8],
    ) {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.blocking_write(&[RAMWR]).ok();
        self.dc.set_high();
        self.spi.write(buffer).await.ok();
        self.cs.set_high();
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// `DrawTarget` writing into a framebuffer.
pub struct St7789Renderer<'a> {
    framebuffer: &'a mut [u8],
}

impl<'a> St7789Renderer<'a> {
    pub fn new(framebuffer: &'a mut [u8]) -> Self { Self { framebuffer } }

    /// Byte range of `width` pixels starting at (`x`, `y`).
    #[inline]
    const fn span(
        x: usize,
        y: usize,
        width: usize,
    ) -> core::ops::Range<usize> {
        let start = (y * WIDTH + x) * 2;
        start..start + width * 2
    }
}

impl OriginDimensions for St7789Renderer<'_> {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for St7789Renderer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y))
                && x < WIDTH
                && y < HEIGHT
            {
                self.framebuffer[Self::span(x, y, 1)].copy_from_slice(&pixel_bytes(color));
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size == Size::zero() {
            return Ok(());
        }

        let bytes = pixel_bytes(color);
        let x = area.top_left.x as usize;
        let width = area.size.width as usize;
        for y in area.rows() {
            for pixel in self.framebuffer[Self::span(x, y as usize, width)].chunks_exact_mut(2) {
                pixel.copy_from_slice(&bytes);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let bytes = pixel_bytes(color);
        for pixel in self.framebuffer.chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }
        Ok(())
    }
}
