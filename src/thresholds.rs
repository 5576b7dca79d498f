//! Battery tier thresholds.
//!
//! Each constant is the highest level (inclusive) of its tier. Levels below
//! zero mean the sensor could not report a value.
//!
//! # Compile-Time Validation
//!
//! The `const` assertions below verify threshold ordering at compile time. If
//! the thresholds are reordered by mistake, compilation fails.

/// Highest level of the critical tier (0-20% = one bar, RED).
pub const BATT_CRITICAL_MAX: i8 = 20;

/// Highest level of the low tier (21-40% = two bars, YELLOW).
pub const BATT_LOW_MAX: i8 = 40;

/// Highest level of the medium tier (41-60% = three bars, YELLOW).
pub const BATT_MEDIUM_MAX: i8 = 60;

/// Highest level of the high tier (61-80% = full symbol, YELLOW).
/// Anything above is the full tier (full symbol, GREEN).
pub const BATT_HIGH_MAX: i8 = 80;

const _: () = assert!(0 <= BATT_CRITICAL_MAX);
const _: () = assert!(BATT_CRITICAL_MAX < BATT_LOW_MAX);
const _: () = assert!(BATT_LOW_MAX < BATT_MEDIUM_MAX);
const _: () = assert!(BATT_MEDIUM_MAX < BATT_HIGH_MAX);
const _: () = assert!(BATT_HIGH_MAX < 100);

/// Returns true when the level is a sensor error sentinel.
#[inline]
pub const fn is_unknown_battery(level: i8) -> bool { level < 0 }
