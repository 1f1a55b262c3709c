//! Watchface firmware library - testable modules for the Pico 2 host.
//!
//! This library contains the board logic that can be tested on the host
//! machine: battery conversion, the software clock, button debounce, motor
//! timing, the flash settings layout and log formatting. The binary
//! (`main.rs`) uses this library and adds the embedded-specific code.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p watchface-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p watchface-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pure logic modules (testable on host, no ARM dependencies) ===

// Configuration
pub mod config;

// Board logic
pub mod battery;
pub mod button;
pub mod clock;
pub mod storage;
pub mod vibe;

// Logging
pub mod log_format;
