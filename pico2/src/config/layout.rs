//! Panel dimensions and where the watchface sits on it.
//!
//! The watchface is laid out for 144x168; the PIM715 panel is 320x240 in
//! landscape, so the scene is drawn through a translated target centred on the
//! panel. The margins take the scene background colour.

use embedded_graphics::prelude::Point;
use watchface_common::layout::{SCREEN_HEIGHT as FACE_HEIGHT, SCREEN_WIDTH as FACE_WIDTH};

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

// =============================================================================
// Scene Placement
// =============================================================================

/// Top-left corner of the watchface on the panel.
pub const SCENE_OFFSET: Point = Point::new(
    ((SCREEN_WIDTH - FACE_WIDTH) / 2) as i32,
    ((SCREEN_HEIGHT - FACE_HEIGHT) / 2) as i32,
);

const _: () = assert!(FACE_WIDTH <= SCREEN_WIDTH && FACE_HEIGHT <= SCREEN_HEIGHT);
