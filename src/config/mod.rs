//! Application configuration.
//!
//! - `layout`: Display dimensions, widget geometry and anchors
//! - `timing`: Timer periods and the animation tick plan

pub mod layout;
pub mod timing;

// Re-export at config level for convenience
pub use layout::{
    ARC_COUNT,
    ARC_OUTER_SIZE,
    ARC_SIZE_STEP,
    ARC_WIDTH,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
pub use timing::{
    ANIMATION_PERIOD_MS,
    BATTERY_REFRESH_PERIOD_MS,
    FINAL_TICK,
    TICK_START,
    TICK_STEP,
    TRANSITION_TICK,
};
