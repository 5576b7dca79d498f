//! Color constants and blending helpers.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! This format is native to the ST7789 and requires no conversion when
//! writing to the display.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::IntoStorage;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Scene background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default label text and slider knobs.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Unknown and critical battery tiers.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Full battery tier.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow (31, 63, 0). Intermediate battery tiers.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Dark gray for slider tracks.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Slider indicator blue, RGB888 (33, 150, 243).
pub const ACCENT_BLUE: Rgb565 = Rgb565::new(4, 37, 30);

/// Arc palette, outermost arc first. RGB888 values are
/// (232, 87, 116), (126, 87, 162) and (90, 202, 228).
pub const ARC_PALETTE: [Rgb565; 3] = [
    Rgb565::new(29, 21, 14),
    Rgb565::new(15, 21, 20),
    Rgb565::new(11, 50, 28),
];

/// Logo colors.
pub const LOGO_RED: Rgb565 = Rgb565::new(28, 6, 4);
pub const LOGO_LIGHT: Rgb565 = Rgb565::new(30, 60, 30);

// =============================================================================
// Blending
// =============================================================================

/// Fully opaque.
pub const OPA_COVER: u8 = 255;

/// Fully transparent.
pub const OPA_TRANSP: u8 = 0;

/// Blend `fg` over `bg` with `opacity` (0 = only `bg`, 255 = only `fg`).
///
/// Operates on the raw 5-6-5 components with 8-bit fixed-point weights, so
/// the result is exact at both ends of the range.
pub fn blend(
    fg: Rgb565,
    bg: Rgb565,
    opacity: u8,
) -> Rgb565 {
    match opacity {
        OPA_COVER => return fg,
        OPA_TRANSP => return bg,
        _ => {}
    }

    let fg_raw = fg.into_storage();
    let bg_raw = bg.into_storage();

    let mix = |shift: u16, mask: u16| -> u8 {
        let f = u32::from((fg_raw >> shift) & mask);
        let b = u32::from((bg_raw >> shift) & mask);
        let a = u32::from(opacity);
        ((f * a + b * (255 - a) + 127) / 255) as u8
    };

    Rgb565::new(mix(11, 0x1F), mix(5, 0x3F), mix(0, 0x1F))
}

/// Scale a color toward black by a brightness percentage (0-100).
#[inline]
pub fn dim(
    color: Rgb565,
    percent: u8,
) -> Rgb565 {
    let percent = u32::from(percent.min(100));
    blend(color, BLACK, (percent * 255 / 100) as u8)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(RED, BLACK, OPA_COVER), RED, "Opaque blend should return fg");
        assert_eq!(blend(RED, BLACK, OPA_TRANSP), BLACK, "Transparent blend should return bg");
    }

    #[test]
    fn test_blend_same_color() {
        assert_eq!(blend(GRAY, GRAY, 128), GRAY, "Blending a color with itself is a no-op");
    }

    #[test]
    fn test_blend_midpoint() {
        let mid = blend(WHITE, BLACK, 128).into_storage();
        let r = (mid >> 11) & 0x1F;
        let g = (mid >> 5) & 0x3F;
        let b = mid & 0x1F;

        assert!((14..=17).contains(&r), "Red should be near half, got {r}");
        assert!((30..=33).contains(&g), "Green should be near half, got {g}");
        assert!((14..=17).contains(&b), "Blue should be near half, got {b}");
    }

    #[test]
    fn test_dim_bounds() {
        assert_eq!(dim(YELLOW, 100), YELLOW, "Full brightness keeps the color");
        assert_eq!(dim(YELLOW, 0), BLACK, "Zero brightness is black");
        assert_eq!(dim(YELLOW, 250), YELLOW, "Percent above 100 saturates");
    }
}
