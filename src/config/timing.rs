//! Timer periods and the intro tick plan.
//!
//! The sequencer compares its counter against [`TRANSITION_TICK`] and
//! [`FINAL_TICK`] by exact equality, so both must be reachable from
//! [`TICK_START`] in whole steps. The assertions below turn a step change that
//! breaks this into a build failure instead of a silently skipped transition.

/// Period of the animation callback in milliseconds (~50 FPS).
pub const ANIMATION_PERIOD_MS: u32 = 20;

/// Period of the battery label refresh in milliseconds.
pub const BATTERY_REFRESH_PERIOD_MS: u32 = 60_000;

/// Counter value of the first animation tick.
pub const TICK_START: i32 = -90;

/// Counter increment per tick.
pub const TICK_STEP: i32 = 5;

/// Counter value on which the arcs are replaced by the control panel.
pub const TRANSITION_TICK: i32 = 90;

/// Counter value that ends the sequence and cancels the animation timer.
pub const FINAL_TICK: i32 = 220;

/// Maximum number of concurrently registered timers.
pub const MAX_TIMERS: usize = 4;

const _: () = assert!(TICK_STEP > 0);
const _: () = assert!(TICK_START < TRANSITION_TICK);
const _: () = assert!(TRANSITION_TICK < FINAL_TICK);
const _: () = assert!((TRANSITION_TICK - TICK_START) % TICK_STEP == 0);
const _: () = assert!((FINAL_TICK - TICK_START) % TICK_STEP == 0);
const _: () = assert!(ANIMATION_PERIOD_MS > 0 && BATTERY_REFRESH_PERIOD_MS > 0);
