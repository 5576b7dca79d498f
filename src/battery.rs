//! Battery level tiers and label formatting.
//!
//! A raw level from the [`BatterySensor`](crate::BatterySensor) maps to one of
//! six display tiers; each tier has a bar symbol and a color:
//!
//! ```text
//! level      tier       symbol   color
//! < 0        Unknown    [    ]   red
//! 0..=20     Critical   [|   ]   red
//! 21..=40    Low        [||  ]   yellow
//! 41..=60    Medium     [||| ]   yellow
//! 61..=80    High       [||||]   yellow
//! > 80       Full       [||||]   green
//! ```

use core::fmt::{self, Write};

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{GREEN, RED, YELLOW};
use crate::thresholds::{BATT_CRITICAL_MAX, BATT_HIGH_MAX, BATT_LOW_MAX, BATT_MEDIUM_MAX, is_unknown_battery};

/// Capacity of a formatted battery label ("[||||] -128%" is the longest).
pub const BATTERY_LABEL_LEN: usize = 16;

const SYMBOL_EMPTY: &str = "[    ]";
const SYMBOL_ONE: &str = "[|   ]";
const SYMBOL_TWO: &str = "[||  ]";
const SYMBOL_THREE: &str = "[||| ]";
const SYMBOL_FULL: &str = "[||||]";

/// Display tier of a battery level.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BatteryTier {
    /// Sensor reported a negative sentinel.
    Unknown,
    /// 0-20%.
    Critical,
    /// 21-40%.
    Low,
    /// 41-60%.
    Medium,
    /// 61-80%.
    High,
    /// Above 80%.
    Full,
}

impl BatteryTier {
    /// Map a raw level to its tier. First match wins, low to high.
    pub const fn from_level(level: i8) -> Self {
        if is_unknown_battery(level) {
            Self::Unknown
        } else if level <= BATT_CRITICAL_MAX {
            Self::Critical
        } else if level <= BATT_LOW_MAX {
            Self::Low
        } else if level <= BATT_MEDIUM_MAX {
            Self::Medium
        } else if level <= BATT_HIGH_MAX {
            Self::High
        } else {
            Self::Full
        }
    }

    /// Bar symbol shown in front of the percentage.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Unknown => SYMBOL_EMPTY,
            Self::Critical => SYMBOL_ONE,
            Self::Low => SYMBOL_TWO,
            Self::Medium => SYMBOL_THREE,
            Self::High | Self::Full => SYMBOL_FULL,
        }
    }

    /// Label color for this tier.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Unknown | Self::Critical => RED,
            Self::Low | Self::Medium | Self::High => YELLOW,
            Self::Full => GREEN,
        }
    }
}

impl fmt::Display for BatteryTier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Full => "full",
        };
        f.write_str(name)
    }
}

/// Format the battery label as `"<symbol> <level>%"`.
pub fn format_battery_label(level: i8) -> String<BATTERY_LABEL_LEN> {
    let tier = BatteryTier::from_level(level);
    let mut text: String<BATTERY_LABEL_LEN> = String::new();
    // Capacity covers the longest symbol plus "-128%"
    let _ = write!(text, "{} {level}%", tier.symbol());
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
