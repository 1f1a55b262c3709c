//! Drawing of the pre-rendered images.
//!
//! The images are rendered from primitives instead of shipped as bitmaps:
//! digits as seven-segment blocks, day names with the 6x13 mono font, the
//! battery gauge as a strip of ten segments. Every image stays inside the box
//! given by [`ImageId::size`].

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X13;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::digits::{BATTERY_BUCKETS, PERCENT_SIGN};
use crate::images::ImageId;
use crate::layout::{GAUGE_STRIP_HEIGHT, SMALL_DIGIT_STROKE, TIME_DIGIT_STROKE};

// =============================================================================
// Seven-Segment Table
// =============================================================================

// Segment bits: a=top, b=upper right, c=lower right, d=bottom,
// e=lower left, f=upper left, g=middle.
const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

const DIGIT_SEGMENTS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,         // 0
    SEG_B | SEG_C,                                         // 1
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,                 // 2
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,                 // 3
    SEG_B | SEG_C | SEG_F | SEG_G,                         // 4
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,                 // 5
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,         // 6
    SEG_A | SEG_B | SEG_C,                                 // 7
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G, // 8
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,         // 9
];

/// Gap between two gauge segments in pixels.
const GAUGE_SEGMENT_GAP: u32 = 2;

/// Draw `id` with its top-left corner at `origin`.
///
/// Only foreground pixels are drawn; the caller clears the background.
/// Invalid ids draw nothing.
pub fn draw_image<D>(
    display: &mut D,
    id: ImageId,
    origin: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if !id.is_valid() {
        return;
    }
    let size = id.size();
    match id {
        ImageId::TimeDigit(d) => draw_seven_segment(display, origin, size, TIME_DIGIT_STROKE, d, color),
        ImageId::SmallDigit(d) => draw_seven_segment(display, origin, size, SMALL_DIGIT_STROKE, d, color),
        ImageId::BatteryGlyph(PERCENT_SIGN) => draw_percent_sign(display, origin, size, color),
        ImageId::BatteryGlyph(d) => draw_seven_segment(display, origin, size, SMALL_DIGIT_STROKE, d, color),
        ImageId::DayName(day) => {
            let style = MonoTextStyle::new(&FONT_6X13, color);
            Text::with_baseline(day.short_name(), origin, style, Baseline::Top)
                .draw(display)
                .ok();
        }
        ImageId::BatteryGauge(bucket) => draw_gauge(display, origin, size, bucket, color),
        ImageId::Separator => draw_separator(display, origin, size, color),
    }
}

fn fill<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

fn draw_seven_segment<D>(
    display: &mut D,
    origin: Point,
    size: Size,
    stroke: u32,
    digit: u8,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let segments = DIGIT_SEGMENTS[(digit % 10) as usize];
    let (x, y) = (origin.x, origin.y);
    let (w, h) = (size.width, size.height);
    let t = stroke as i32;
    // Top of the middle bar; upper and lower halves share it
    let mid = (h as i32 - t) / 2;
    let upper = (mid + t) as u32;
    let lower = (h as i32 - mid) as u32;

    if segments & SEG_A != 0 {
        fill(display, x, y, w, stroke, color);
    }
    if segments & SEG_B != 0 {
        fill(display, x + w as i32 - t, y, stroke, upper, color);
    }
    if segments & SEG_C != 0 {
        fill(display, x + w as i32 - t, y + mid, stroke, lower, color);
    }
    if segments & SEG_D != 0 {
        fill(display, x, y + h as i32 - t, w, stroke, color);
    }
    if segments & SEG_E != 0 {
        fill(display, x, y + mid, stroke, lower, color);
    }
    if segments & SEG_F != 0 {
        fill(display, x, y, stroke, upper, color);
    }
    if segments & SEG_G != 0 {
        fill(display, x, y + mid, w, stroke, color);
    }
}

fn draw_percent_sign<D>(
    display: &mut D,
    origin: Point,
    size: Size,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let right = origin.x + size.width as i32 - 1;
    let bottom = origin.y + size.height as i32 - 1;
    fill(display, origin.x, origin.y + 1, 3, 3, color);
    fill(display, right - 2, bottom - 3, 3, 3, color);
    Line::new(Point::new(origin.x, bottom - 1), Point::new(right, origin.y + 1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .ok();
}

/// Gauge frame: ten segments along the bottom edge, `bucket` of them filled.
fn draw_gauge<D>(
    display: &mut D,
    origin: Point,
    size: Size,
    bucket: u8,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let count = u32::from(BATTERY_BUCKETS);
    let pitch = size.width / count;
    let segment_w = pitch - GAUGE_SEGMENT_GAP;
    // Centre the strip when the width is not a multiple of the pitch
    let x0 = origin.x + ((size.width - pitch * count + GAUGE_SEGMENT_GAP) / 2) as i32;
    let y = origin.y + (size.height - GAUGE_STRIP_HEIGHT) as i32;

    for i in 0..count {
        let rect = Rectangle::new(
            Point::new(x0 + (i * pitch) as i32, y),
            Size::new(segment_w, GAUGE_STRIP_HEIGHT),
        );
        let style = if i < u32::from(bucket) {
            PrimitiveStyle::with_fill(color)
        } else {
            PrimitiveStyle::with_stroke(color, 1)
        };
        rect.into_styled(style).draw(display).ok();
    }
}

fn draw_separator<D>(
    display: &mut D,
    origin: Point,
    size: Size,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let dot = size.width - 2;
    let x = origin.x + 1;
    let h = size.height as i32;
    fill(display, x, origin.y + h / 3 - dot as i32 / 2, dot, dot, color);
    fill(display, x, origin.y + 2 * h / 3 - dot as i32 / 2, dot, dot, color);
}

// =============================================================================
// Unit Tests
// =============================================================================
