//! Debounced Display Pack buttons.
//!
//! Time-based edge detection so contact bounce does not nudge a slider twice.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Active-low push button with press-edge detection.
pub struct Button<'d> {
    input: Input<'d>,
    was_pressed: bool,
    last_change: Option<Instant>,
}

impl<'d> Button<'d> {
    pub const fn new(input: Input<'d>) -> Self {
        Self {
            input,
            was_pressed: false,
            last_change: None,
        }
    }

    /// Returns true only on the press edge, ignoring changes within the
    /// debounce window.
    pub fn just_pressed(&mut self) -> bool {
        let pressed = self.input.is_low();
        if pressed == self.was_pressed {
            return false;
        }

        if let Some(last) = self.last_change
            && last.elapsed() < Duration::from_millis(DEBOUNCE_MS)
        {
            return false;
        }

        self.was_pressed = pressed;
        self.last_change = Some(Instant::now());
        pressed
    }
}
