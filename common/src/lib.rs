//! Core logic for the digit mosaic watchface.
//!
//! This crate contains the platform-agnostic part of the watchface, shared
//! between the desktop simulator and the RP2350 firmware:
//!
//! - [`digits`]: Field selection (digit, battery bucket, 12/24h hour)
//! - [`layout`]: Screen size and fixed field positions
//! - [`fields`]: Display field enum and z-order
//! - [`images`]: Pre-rendered image identifiers and their sizes
//! - [`glyphs`]: Drawing of the pre-rendered images
//! - [`colors`]: RGB565 palette and colour inversion
//! - [`config`]: Runtime watchface configuration
//! - [`time`]: Calendar breakdown, changed-unit masks, tick tracking
//! - [`settings`]: Persisted boolean settings and the settings store
//! - [`message`]: Key-value configuration message codec
//! - [`host`]: Services the watchface requests from its host
//! - [`scene`]: Retained fixed-layer compositor rendering to a `DrawTarget`
//! - [`event`]: Inbound events and the bounded event queue
//! - [`face`]: The watchface controller
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. Run the tests on the host with:
//! ```bash
//! cargo test -p watchface-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod digits;
pub mod error;
pub mod event;
pub mod face;
pub mod fields;
pub mod glyphs;
pub mod host;
pub mod images;
pub mod layout;
pub mod message;
pub mod scene;
pub mod settings;
pub mod time;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use config::{ClockStyle, StartupTicks, WatchConfig};
pub use error::Error;
pub use event::{Event, EventQueue};
pub use face::WatchFace;
pub use fields::DisplayField;
pub use host::{Compositor, Haptics, Host, TickService, VibePattern};
pub use images::ImageId;
pub use message::ConfigMessage;
pub use scene::{Scene, SceneBitmap};
pub use settings::{MemoryStore, SettingKey, Settings, SettingsRecord, SettingsStore};
pub use time::{TickTime, TickTracker, TimeUnits, Weekday};
