//! Display and layout configuration constants.
//!
//! Positions are expressed as an [`Align`] anchor plus an offset, resolved by
//! the scene at render time, so nothing here depends on text widths.

use crate::scene::Align;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Maximum number of live widgets on the scene.
/// Logo + 3 arcs during the intro, logo + 5 panel widgets afterwards.
pub const MAX_WIDGETS: usize = 8;

// =============================================================================
// Intro Arcs
// =============================================================================

/// Number of arcs in the intro animation.
pub const ARC_COUNT: usize = 3;

/// Bounding size of the outermost arc. Each inner arc shrinks by [`ARC_SIZE_STEP`].
pub const ARC_OUTER_SIZE: u32 = 220;

/// Size difference between neighbouring arcs.
pub const ARC_SIZE_STEP: u32 = 30;

/// Arc stroke width in pixels.
pub const ARC_WIDTH: u32 = 10;

/// Background angle spacing between the arcs before the first tick.
pub const ARC_INITIAL_SPACING: u16 = 120;

/// Background sweep of each arc before the first tick.
pub const ARC_INITIAL_SWEEP: u16 = 10;

const _: () = assert!(ARC_OUTER_SIZE > ARC_SIZE_STEP * (ARC_COUNT as u32 - 1) + 2 * ARC_WIDTH);
const _: () = assert!(ARC_OUTER_SIZE <= SCREEN_HEIGHT);

// =============================================================================
// Control Panel
// =============================================================================

/// Thickness of a slider track (height when horizontal, width when vertical).
pub const SLIDER_THICKNESS: u32 = 10;

/// Temperature slider range and default value (degrees).
pub const TEMPERATURE_MIN: i32 = -20;
pub const TEMPERATURE_MAX: i32 = 40;
pub const TEMPERATURE_DEFAULT: i32 = 0;

/// Temperature slider length in pixels.
pub const TEMPERATURE_SLIDER_WIDTH: u32 = 200;

/// Temperature slider sits below the screen center by this many pixels.
pub const TEMPERATURE_SLIDER_Y_OFFSET: i32 = 50;

/// Brightness slider range and initial value (percent).
pub const BRIGHTNESS_MIN: i32 = 0;
pub const BRIGHTNESS_MAX: i32 = 100;
pub const BRIGHTNESS_INITIAL: i32 = 50;

/// Brightness slider length in pixels.
pub const BRIGHTNESS_SLIDER_HEIGHT: u32 = 150;

/// Gap between the brightness slider and the right screen edge.
pub const BRIGHTNESS_SLIDER_MARGIN: i32 = 16;

/// Caption and unit of the temperature label ("Teplota: 21°C").
pub const TEMPERATURE_CAPTION: &str = "Teplota";
pub const TEMPERATURE_UNIT: &str = "°C";

/// Corner the temperature label is anchored to after every update.
pub const TEMPERATURE_LABEL_ALIGN: Align = Align::TopLeft;

/// Corner the battery label is anchored to after every refresh.
pub const BATTERY_LABEL_ALIGN: Align = Align::TopRight;

const _: () = assert!(TEMPERATURE_MIN <= TEMPERATURE_DEFAULT && TEMPERATURE_DEFAULT <= TEMPERATURE_MAX);
const _: () = assert!(BRIGHTNESS_MIN <= BRIGHTNESS_INITIAL && BRIGHTNESS_INITIAL <= BRIGHTNESS_MAX);
const _: () = assert!(BRIGHTNESS_MIN >= 0 && BRIGHTNESS_MAX <= 100);
const _: () = assert!(TEMPERATURE_SLIDER_WIDTH <= SCREEN_WIDTH);
const _: () = assert!(BRIGHTNESS_SLIDER_HEIGHT <= SCREEN_HEIGHT);
