//! Pre-computed static styles to avoid per-frame object construction.
//!
//! Label colors change at runtime (battery tiers), so labels store only a
//! [`LabelFont`] and a color and build `MonoTextStyle::new(font, color)` at
//! draw time. Everything that never changes is a `const` here.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::iso_8859_1::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment};
use profont::PROFONT_14_POINT;

use crate::colors::{ACCENT_BLUE, GRAY, WHITE};

// =============================================================================
// Fonts
// =============================================================================

/// Temperature label font (10x20). The Latin-1 variant carries the degree sign.
pub const TEMPERATURE_FONT: &MonoFont = &FONT_10X20;

/// Battery label font (`ProFont` 14pt). ASCII only.
pub const BATTERY_FONT: &MonoFont = &PROFONT_14_POINT;

/// Font choice stored on a label.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LabelFont {
    /// Large text with Latin-1 coverage ([`TEMPERATURE_FONT`]).
    Body,
    /// Compact status text ([`BATTERY_FONT`]).
    Status,
}

impl LabelFont {
    #[inline]
    pub const fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::Body => TEMPERATURE_FONT,
            Self::Status => BATTERY_FONT,
        }
    }
}

// =============================================================================
// Slider Styles (const - zero runtime cost)
// =============================================================================

/// Slider background track.
pub const SLIDER_TRACK_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(GRAY);

/// Filled part of the slider between the minimum and the current value.
pub const SLIDER_INDICATOR_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(ACCENT_BLUE);

/// Round slider knob with a blue rim.
pub const SLIDER_KNOB_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .fill_color(WHITE)
    .stroke_color(ACCENT_BLUE)
    .stroke_width(2)
    .stroke_alignment(StrokeAlignment::Inside)
    .build();

/// Diameter of the slider knob in pixels.
pub const SLIDER_KNOB_SIZE: u32 = 18;

/// Corner radius of slider tracks.
pub const SLIDER_CORNER_RADIUS: u32 = 5;

/// Stroke style for an arc of the given color and width.
///
/// The stroke is drawn inside the widget bounds so an arc of size `s` never
/// paints outside its `s x s` box.
#[inline]
pub const fn arc_style(
    color: Rgb565,
    width: u32,
) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(width)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}
