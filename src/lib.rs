//! Arc intro animation and control panel for small embedded displays.
//!
//! Three concentric arcs sweep into view around a logo, then are replaced by a
//! control panel (temperature slider, brightness slider, battery indicator).
//! Everything here is platform independent; the simulator and the firmware
//! binaries supply a `DrawTarget`, a battery sensor and a backlight.
//!
//! - [`easing`]: tick -> arc geometry curves
//! - [`scene`]: retained widget arena and its `embedded-graphics` renderer
//! - [`factory`]: intro arc set and control panel construction
//! - [`sequencer`]: the phased animation callback
//! - [`bindings`]: slider and battery handlers
//! - [`timer`]: periodic timer registry
//! - [`app`]: bootstrap and timer dispatch tying it all together
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p arc-panel --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware build stays `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Must come first so the log macros are visible to every module below
#[macro_use]
mod fmt;

pub mod app;
pub mod battery;
pub mod bindings;
pub mod colors;
pub mod config;
pub mod easing;
pub mod error;
pub mod factory;
pub mod peripherals;
pub mod scene;
pub mod sequencer;
pub mod styles;
pub mod thresholds;
pub mod timer;

// Re-export commonly used items
pub use app::{PanelSlider, Task, Ui};
pub use error::Error;
pub use peripherals::{Backlight, BatterySensor};
pub use sequencer::{Phase, Sequencer, Timeline};
