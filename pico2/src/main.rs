//! Digit mosaic watchface firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows the watchface centred on the Pimoroni PIM715 Display Pack 2.8".
//!
//! # Architecture
//!
//! - Main task (face loop): polls buttons and the software clock, collects
//!   battery reports, drains the event queue into the watchface, and redraws
//!   and flushes the framebuffer when the scene changed. It is the only task
//!   that touches the watchface.
//! - Battery task: samples VSYS every 10 s, signals the percent when it changes.
//! - Motor task: plays vibration patterns received over a bounded channel.
//!
//! # Button Controls
//!
//! - **A**: Toggle colour inversion
//! - **B**: Toggle seconds
//! - **X**: Toggle hourly vibration
//! - **Y**: Toggle Bluetooth-disconnect vibration
//!
//! The board has no radio, so connection events never occur.

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
mod display;
mod flash;
mod host;
mod logger;
mod st7789;

// Re-export testable modules from library for local use
mod config {
    pub use watchface_pico2::config::*;
}

use defmt::{Display2Format, error, info, warn};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel as AdcChannel};
use embassy_rp::bind_interrupts;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_graphics::prelude::*;
use watchface_common::event::EventQueue;
use watchface_common::host::VibePattern;
use watchface_common::{ConfigMessage, Event, Scene, WatchConfig, WatchFace};
use watchface_pico2::battery::BatteryMonitor;
use watchface_pico2::button::{Button, ButtonState};
use watchface_pico2::clock::SoftClock;
use watchface_pico2::storage::FlashStore;
use watchface_pico2::vibe::{pattern_name, steps};
use {defmt_rtt as _, panic_probe as _};

use crate::config::{BATTERY_SAMPLE_SECS, BOOT_EPOCH, FLASH_SIZE, SCENE_OFFSET, SETTINGS_OFFSETS, VIBE_QUEUE_LEN};
use crate::display::display_spi_config;
use crate::flash::BoardFlash;
use crate::host::BoardHost;
use crate::st7789::{FRAMEBUFFER, St7789Flusher, St7789Renderer};

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-watchface"),
    embassy_rp::binary_info::rp_program_description!(c"Digit mosaic watchface on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Face loop period. Buttons and the clock are polled at this rate.
const FRAME_TIME: Duration = Duration::from_millis(50);

// =============================================================================
// Inter-task Communication
// =============================================================================

/// Latest battery percent, taken by the face loop.
static BATTERY_LEVEL: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Vibration requests from the face loop to the motor task.
static VIBE_REQUESTS: Channel<CriticalSectionRawMutex, VibePattern, VIBE_QUEUE_LEN> = Channel::new();

// =============================================================================
// Tasks
// =============================================================================

/// Battery task - samples VSYS and reports percent changes.
#[embassy_executor::task]
async fn battery_task(
    mut adc: Adc<'static, adc::Async>,
    mut vsys: AdcChannel<'static>,
    mut monitor: BatteryMonitor,
) {
    info!("Battery task started");
    loop {
        Timer::after_secs(BATTERY_SAMPLE_SECS).await;
        match adc.read(&mut vsys).await {
            Ok(raw) => {
                if let Some(percent) = monitor.sample(raw) {
                    BATTERY_LEVEL.signal(percent);
                }
            }
            Err(e) => warn!("VSYS read failed: {}", e),
        }
    }
}

/// Motor task - plays one pattern at a time.
#[embassy_executor::task]
async fn motor_task(
    mut motor: Output<'static>,
    requests: Receiver<'static, CriticalSectionRawMutex, VibePattern, VIBE_QUEUE_LEN>,
) {
    info!("Motor task started");
    loop {
        let pattern = requests.receive().await;
        info!("Vibrate: {}", pattern_name(pattern));
        for step in steps(pattern) {
            motor.set_level(if step.on { Level::High } else { Level::Low });
            Timer::after_millis(step.duration_ms).await;
        }
        motor.set_low();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Watchface starting...");
    let p = embassy_rp::init(Default::default());
    logger::init();

    // RGB LED (active-low), kept off
    let _led_r = Output::new(p.PIN_26, Level::High);
    let _led_g = Output::new(p.PIN_27, Level::High);
    let _led_b = Output::new(p.PIN_28, Level::High);

    // Display: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, display_spi_config());
    let mut flusher = St7789Flusher::new(spi, dc, cs);
    flusher.init().await;
    info!("Display initialized");

    let framebuffer = FRAMEBUFFER.take();

    // Settings in the last two flash sectors
    let flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(p.FLASH);
    let store = FlashStore::open(BoardFlash::new(flash), SETTINGS_OFFSETS);

    // Battery: VSYS / 3 on GPIO29
    let mut adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let mut vsys = AdcChannel::new_pin(p.PIN_29, Pull::None);
    let mut monitor = BatteryMonitor::new();
    let battery = match adc.read(&mut vsys).await {
        Ok(raw) => monitor.sample(raw).unwrap_or_default(),
        Err(e) => {
            warn!("VSYS read failed: {}", e);
            0
        }
    };
    info!("Battery: {}%", battery);

    // Motor driver on GPIO22
    let motor = Output::new(p.PIN_22, Level::Low);

    spawner.spawn(battery_task(adc, vsys, monitor)).unwrap();
    spawner.spawn(motor_task(motor, VIBE_REQUESTS.receiver())).unwrap();

    // Buttons (active-low with internal pull-up): A=12, B=13, X=14, Y=15
    let buttons = [
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
    ];
    let mut button_states = [const { ButtonState::new() }; 4];

    let config = WatchConfig::default();
    let mut host = BoardHost::new(Scene::new(config.palette), store, VIBE_REQUESTS.sender());
    let uptime = Instant::now().as_secs();
    let mut clock = SoftClock::starting_at(BOOT_EPOCH, uptime);
    let now = clock.now(uptime);

    let mut face = match WatchFace::init(&mut host, config, &now, battery) {
        Ok(face) => face,
        Err(e) => {
            error!("Watchface failed to start: {}", Display2Format(&e));
            loop {
                Timer::after_secs(60).await;
            }
        }
    };

    let mut queue = EventQueue::new();
    let mut ticker = Ticker::every(FRAME_TIME);
    info!("Face loop starting");

    loop {
        let now = Instant::now();

        // Buttons toggle their setting through a config message
        for ((button, input), state) in Button::ALL.iter().zip(&buttons).zip(&mut button_states) {
            if state.just_pressed(input.is_low(), now.as_millis()) {
                let key = button.setting();
                info!("Button {}: {}", button.name(), key.name());
                queue.push(Event::Config(ConfigMessage::single(key, !face.settings().get(key))));
            }
        }

        if let Some(percent) = BATTERY_LEVEL.try_take() {
            queue.push(Event::Battery(percent));
        }

        if let Some(granularity) = host.subscription()
            && let Some((time, units)) = clock.poll(now.as_secs(), granularity)
        {
            queue.push(Event::Tick(time, units));
        }

        face.drain(&mut host, &mut queue);

        if host.scene.is_dirty() {
            let mut renderer = St7789Renderer::new(framebuffer.as_mut_slice());
            host.scene.draw(&mut renderer.translated(SCENE_OFFSET)).ok();
            flusher.flush_buffer(framebuffer.as_slice()).await;
        }

        ticker.next().await;
    }
}
