//! Easing curves for the intro arcs.
//!
//! Each tick of the intro maps to a background angle pair for every arc:
//!
//! ```text
//! start(t)       = 0                          if t <= 0
//!                = (1 - cos(t/180 * pi)) * 270 otherwise
//! sweep(t)       = (sin(t/180 * pi) + 1) * 135
//! rotation(t, i) = (t + 120 * (i + 1)) mod 360
//! ```
//!
//! For the intro range (-90..90) the start angle holds at zero while the sweep
//! grows, then the start angle chases the sweep around while every arc keeps
//! rotating by one degree per tick, each arc offset by a third of a turn.
//!
//! Trigonometry goes through `micromath` so this stays usable without `std`.
//! Results are truncated to whole degrees and kept in [0, 360).

use core::f32::consts::PI;

use micromath::F32;

/// Rotation offset between neighbouring arcs in degrees.
const ARC_PHASE_OFFSET: i32 = 120;

/// Largest degree value produced by the curves.
const MAX_DEGREES: i32 = 359;

/// Start angle and sweep length of one arc, in whole degrees.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ArcAngles {
    /// Background start angle.
    pub start: u16,
    /// Background sweep length.
    pub sweep: u16,
}

#[inline]
fn tick_radians(tick: i32) -> F32 { F32(tick as f32 / 180.0 * PI) }

/// Truncate to a whole degree in [0, 360).
#[inline]
fn to_degrees(value: f32) -> u16 { (value as i32).clamp(0, MAX_DEGREES) as u16 }

/// Start angle of every arc at `tick`. Zero until the tick turns positive.
pub fn start_angle(tick: i32) -> u16 {
    if tick <= 0 {
        return 0;
    }
    to_degrees((1.0 - tick_radians(tick).cos().0) * 270.0)
}

/// Sweep length of every arc at `tick`.
pub fn sweep_length(tick: i32) -> u16 { to_degrees((tick_radians(tick).sin().0 + 1.0) * 135.0) }

/// Rotation of arc `index` at `tick`, always in [0, 360).
pub fn rotation(
    tick: i32,
    index: usize,
) -> u16 {
    let offset = i64::from(ARC_PHASE_OFFSET) * (index as i64 + 1);
    (i64::from(tick) + offset).rem_euclid(360) as u16
}

/// Start angle and sweep length at `tick`.
#[inline]
pub fn arc_angles(tick: i32) -> ArcAngles {
    ArcAngles {
        start: start_angle(tick),
        sweep: sweep_length(tick),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
