//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they live here rather than in the core crate.

use std::time::Duration;

/// Target frame time (~50 FPS), matching the animation period.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Simulated battery loses one percent every this many seconds.
pub const BATTERY_DRAIN_SECS_PER_PERCENT: u64 = 6;

/// Temperature change per Left/Right key press (degrees).
pub const TEMPERATURE_KEY_STEP: i32 = 1;

/// Brightness change per Up/Down key press (percent).
pub const BRIGHTNESS_KEY_STEP: i32 = 5;
