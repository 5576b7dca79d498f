//! Widget kinds stored in the [`Scene`](super::Scene).
//!
//! Every widget is plain data; geometry is resolved from its [`Placement`]
//! when the scene is rendered or measured.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use heapless::String;

use super::align::Align;
use super::art::Art;
use crate::colors::{ACCENT_BLUE, OPA_COVER, WHITE};
use crate::config::layout::SLIDER_THICKNESS;
use crate::easing::ArcAngles;
use crate::styles::LabelFont;

/// Maximum label length in bytes. Longer text is truncated.
pub const LABEL_LEN: usize = 32;

/// Which control binding a slider notifies on value changes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Binding {
    /// Updates the temperature label.
    Temperature,
    /// Forwards the value to the backlight.
    Brightness,
}

/// Slider direction. Vertical sliders grow from the bottom.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Arc outline with a background angle range.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ArcWidget {
    /// Width and height of the square bounding box.
    pub size: u32,
    /// Stroke width in pixels.
    pub width: u32,
    pub color: Rgb565,
    /// Background start angle and sweep, relative to `rotation`.
    pub angles: ArcAngles,
    /// Rotation of the whole arc in degrees.
    pub rotation: u16,
    /// Whether the knob at the end of the arc is drawn.
    pub knob: bool,
}

impl ArcWidget {
    /// Arc with toolkit defaults: 270 degree background, knob shown.
    pub const fn new(size: u32) -> Self {
        Self {
            size,
            width: 15,
            color: ACCENT_BLUE,
            angles: ArcAngles { start: 135, sweep: 270 },
            rotation: 0,
            knob: true,
        }
    }

    pub const fn with_width(
        mut self,
        width: u32,
    ) -> Self {
        self.width = width;
        self
    }

    pub const fn with_color(
        mut self,
        color: Rgb565,
    ) -> Self {
        self.color = color;
        self
    }

    pub const fn with_angles(
        mut self,
        angles: ArcAngles,
    ) -> Self {
        self.angles = angles;
        self
    }

    /// Remove the knob visual.
    pub const fn without_knob(mut self) -> Self {
        self.knob = false;
        self
    }
}

/// Slider with an integer range.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SliderWidget {
    pub orientation: Orientation,
    /// Track length along the slider direction.
    pub length: u32,
    pub min: i32,
    pub max: i32,
    pub value: i32,
    /// Binding notified when the value changes.
    pub binding: Option<Binding>,
}

impl SliderWidget {
    const fn new(
        orientation: Orientation,
        length: u32,
    ) -> Self {
        Self {
            orientation,
            length,
            min: 0,
            max: 100,
            value: 0,
            binding: None,
        }
    }

    pub const fn horizontal(length: u32) -> Self { Self::new(Orientation::Horizontal, length) }

    pub const fn vertical(length: u32) -> Self { Self::new(Orientation::Vertical, length) }

    /// Set the range. The current value is pulled into it.
    pub const fn with_range(
        mut self,
        min: i32,
        max: i32,
    ) -> Self {
        self.min = min;
        self.max = max;
        self.value = self.clamp(self.value);
        self
    }

    pub const fn with_value(
        mut self,
        value: i32,
    ) -> Self {
        self.value = self.clamp(value);
        self
    }

    /// Route value-changed notifications to `binding`.
    pub const fn bind(
        mut self,
        binding: Binding,
    ) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Clamp `value` into the slider range.
    pub const fn clamp(
        &self,
        value: i32,
    ) -> i32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Position of the current value along the track, 0 to `length`.
    pub fn fill_length(&self) -> u32 {
        let span = i64::from(self.max) - i64::from(self.min);
        if span <= 0 {
            return 0;
        }
        let offset = i64::from(self.value) - i64::from(self.min);
        (offset * i64::from(self.length) / span) as u32
    }
}

/// Single line of monospace text.
#[derive(Clone, PartialEq, Debug)]
pub struct LabelWidget {
    pub text: String<LABEL_LEN>,
    pub color: Rgb565,
    pub font: LabelFont,
}

impl LabelWidget {
    pub fn new(
        text: &str,
        font: LabelFont,
    ) -> Self {
        let mut label = Self {
            text: String::new(),
            color: WHITE,
            font,
        };
        label.set_text(text);
        label
    }

    /// Replace the text, truncating at a character boundary if it does not fit.
    pub fn set_text(
        &mut self,
        text: &str,
    ) {
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
    }

    /// Rendered size of the text.
    pub fn text_size(&self) -> Size {
        let font = self.font.mono();
        let chars = self.text.chars().count() as u32;
        let width = if chars == 0 {
            0
        } else {
            chars * font.character_size.width + (chars - 1) * font.character_spacing
        };
        Size::new(width, font.character_size.height)
    }
}

/// Built-in picture with an opacity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ImageWidget {
    pub art: Art,
    /// 0 = invisible, 255 = fully opaque.
    pub opacity: u8,
}

impl ImageWidget {
    pub const fn new(art: Art) -> Self {
        Self {
            art,
            opacity: OPA_COVER,
        }
    }

    pub const fn with_opacity(
        mut self,
        opacity: u8,
    ) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Widget payload.
#[derive(Clone, PartialEq, Debug)]
pub enum WidgetKind {
    Arc(ArcWidget),
    Slider(SliderWidget),
    Label(LabelWidget),
    Image(ImageWidget),
}

/// Where a widget sits: an anchor on the screen plus a pixel offset.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub align: Align,
    pub offset: Point,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            align: Align::TopLeft,
            offset: Point::zero(),
        }
    }
}

/// A widget on the scene.
#[derive(Clone, PartialEq, Debug)]
pub struct Widget {
    pub kind: WidgetKind,
    pub placement: Placement,
}

impl Widget {
    /// Anchor the widget to `align`, shifted by `offset`.
    pub fn aligned(
        mut self,
        align: Align,
        offset: Point,
    ) -> Self {
        self.placement = Placement { align, offset };
        self
    }

    /// Unscaled size of the widget's bounding box.
    pub fn size(&self) -> Size {
        match &self.kind {
            WidgetKind::Arc(arc) => Size::new(arc.size, arc.size),
            WidgetKind::Slider(slider) => match slider.orientation {
                Orientation::Horizontal => Size::new(slider.length, SLIDER_THICKNESS),
                Orientation::Vertical => Size::new(SLIDER_THICKNESS, slider.length),
            },
            WidgetKind::Label(label) => label.text_size(),
            WidgetKind::Image(image) => image.art.size(),
        }
    }
}

impl From<ArcWidget> for Widget {
    fn from(arc: ArcWidget) -> Self {
        Self {
            kind: WidgetKind::Arc(arc),
            placement: Placement::default(),
        }
    }
}

impl From<SliderWidget> for Widget {
    fn from(slider: SliderWidget) -> Self {
        Self {
            kind: WidgetKind::Slider(slider),
            placement: Placement::default(),
        }
    }
}

impl From<LabelWidget> for Widget {
    fn from(label: LabelWidget) -> Self {
        Self {
            kind: WidgetKind::Label(label),
            placement: Placement::default(),
        }
    }
}

impl From<ImageWidget> for Widget {
    fn from(image: ImageWidget) -> Self {
        Self {
            kind: WidgetKind::Image(image),
            placement: Placement::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::TEMPERATURE_FONT;

    const BODY: LabelFont = LabelFont::Body;

    #[test]
    fn test_slider_clamps_value() {
        let slider = SliderWidget::horizontal(200).with_range(-20, 40).with_value(99);
        assert_eq!(slider.value, 40, "Value above range should clamp to max");

        let slider = slider.with_value(-99);
        assert_eq!(slider.value, -20, "Value below range should clamp to min");
    }

    #[test]
    fn test_slider_range_pulls_value_in() {
        // Default value is 0, which is outside 10..20
        let slider = SliderWidget::vertical(100).with_range(10, 20);
        assert_eq!(slider.value, 10);
    }

    #[test]
    fn test_slider_fill_length() {
        let slider = SliderWidget::horizontal(200).with_range(-20, 40);
        assert_eq!(slider.with_value(-20).fill_length(), 0);
        assert_eq!(slider.with_value(10).fill_length(), 100);
        assert_eq!(slider.with_value(40).fill_length(), 200);
    }

    #[test]
    fn test_slider_fill_length_empty_range() {
        let slider = SliderWidget::horizontal(200).with_range(5, 5);
        assert_eq!(slider.fill_length(), 0, "Degenerate range must not divide by zero");
    }

    #[test]
    fn test_label_truncates_long_text() {
        let long = "0123456789".repeat(5);
        let label = LabelWidget::new(&long, BODY);
        assert_eq!(label.text.len(), LABEL_LEN, "Label should keep as much text as fits");
    }

    #[test]
    fn test_label_truncates_on_char_boundary() {
        // 31 ASCII bytes + a 2-byte degree sign does not fit in 32 bytes
        let mut text = "x".repeat(31);
        text.push('°');
        let label = LabelWidget::new(&text, BODY);
        assert_eq!(label.text.len(), 31, "Multi-byte char should be dropped whole");
    }

    #[test]
    fn test_label_text_size() {
        let label = LabelWidget::new("abc", BODY);
        let w = TEMPERATURE_FONT.character_size.width;
        let s = TEMPERATURE_FONT.character_spacing;
        assert_eq!(label.text_size().width, 3 * w + 2 * s);
        assert_eq!(label.text_size().height, TEMPERATURE_FONT.character_size.height);

        let empty = LabelWidget::new("", BODY);
        assert_eq!(empty.text_size().width, 0);
    }

    #[test]
    fn test_arc_builders() {
        let arc = ArcWidget::new(100).with_width(10).without_knob();
        assert_eq!(arc.width, 10);
        assert!(!arc.knob);
        assert_eq!(Widget::from(arc).size(), Size::new(100, 100));
    }
}
