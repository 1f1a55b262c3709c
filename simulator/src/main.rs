//! Digit mosaic watchface simulator for desktop platforms.
//!
//! Runs the watchface core against an SDL window using the
//! embedded-graphics-simulator crate.
//!
//! # Keys
//!
//! - **I**: Toggle colour inversion
//! - **S**: Toggle seconds
//! - **H**: Toggle hourly vibration
//! - **B**: Toggle Bluetooth-disconnect vibration
//! - **C**: Toggle simulated connectivity
//! - **Up/Down**: Battery +/- 5%
//! - **Q/Escape**: Quit
//!
//! Setting keys build a configuration message, encode it and decode it again
//! before queueing it, so every change goes through the wire codec.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod clock;
mod config;
mod host;
mod popup;
mod store;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{error, info, warn};
use watchface_common::colors::{WHITE, invert};
use watchface_common::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use watchface_common::message::MAX_ENCODED_LEN;
use watchface_common::{ConfigMessage, Event, EventQueue, Scene, SettingKey, TickTracker, WatchFace};

use crate::config::{BATTERY_STEP, INITIAL_BATTERY, SimConfig, WINDOW_SCALE};
use crate::host::SimHost;
use crate::popup::draw_flash_border;
use crate::store::FileStore;
use crate::timing::FRAME_TIME;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::from_env();
    info!("Starting watchface simulator");
    info!("Display: {}x{} (scale {}x)", SCREEN_WIDTH, SCREEN_HEIGHT, WINDOW_SCALE);
    info!("Keys: I=Invert  S=Seconds  H=Hourly  B=BT vibe  C=Connection  Up/Down=Battery  Q=Quit");

    let store = FileStore::open(&config.settings_path);
    info!("Settings file: {}", store.path().display());
    let mut host = SimHost::new(Scene::new(config.watch.palette), store);

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Watchface Sim", &output_settings);

    let now = clock::now();
    let mut battery = INITIAL_BATTERY;
    let mut face = match WatchFace::init(&mut host, config.watch, &now, battery) {
        Ok(face) => face,
        Err(e) => {
            error!("Watchface failed to start: {e}");
            return;
        }
    };

    let mut tracker = TickTracker::starting_at(now);
    let mut queue = EventQueue::new();
    let mut connected = true;
    let mut flash_lit = false;

    // The SDL window is created on the first update; events() needs it
    host.scene.draw(&mut display).ok();
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Q | Keycode::Escape => break 'running,
                        Keycode::I => queue_toggle(&mut queue, &face, SettingKey::InvertColors),
                        Keycode::S => queue_toggle(&mut queue, &face, SettingKey::HideSeconds),
                        Keycode::H => queue_toggle(&mut queue, &face, SettingKey::HourlyVibe),
                        Keycode::B => queue_toggle(&mut queue, &face, SettingKey::BluetoothVibe),
                        Keycode::C => {
                            connected = !connected;
                            queue.push(Event::Connection(connected));
                        }
                        Keycode::Up => {
                            battery = battery.saturating_add(BATTERY_STEP).min(100);
                            queue.push(Event::Battery(battery));
                        }
                        Keycode::Down => {
                            battery = battery.saturating_sub(BATTERY_STEP);
                            queue.push(Event::Battery(battery));
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Ticks follow the current subscription
        if let Some(granularity) = host.subscription()
            && let Some((time, units)) = tracker.observe(clock::now(), granularity)
        {
            queue.push(Event::Tick(time, units));
        }

        face.drain(&mut host, &mut queue);

        // Redraw when the scene changed or the flash border toggled
        let flash = host.flash();
        let lit = flash.is_some_and(|f| f.is_lit());
        if host.scene.is_dirty() || lit != flash_lit {
            host.scene.draw(&mut display).ok();
            if lit {
                let color = if host.scene.is_inverted() { invert(WHITE) } else { WHITE };
                draw_flash_border(&mut display, color);
            }
            flash_lit = lit;
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }

    face.deinit(&mut host);
    info!("Stopped, {} bitmaps still loaded", host.scene.live_bitmaps());
}

/// Queue a message flipping `key`, passed through the wire codec.
fn queue_toggle(
    queue: &mut EventQueue,
    face: &WatchFace<SimHost>,
    key: SettingKey,
) {
    let value = !face.settings().get(key);
    let mut buf = [0u8; MAX_ENCODED_LEN];
    let decoded = ConfigMessage::single(key, value)
        .encode(&mut buf)
        .and_then(|len| ConfigMessage::decode(&buf[..len]));
    match decoded {
        Ok(message) => queue.push(Event::Config(message)),
        Err(e) => warn!("Could not build message for {}: {e}", key.name()),
    }
}
