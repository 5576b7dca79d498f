//! Drawing the scene onto an `embedded-graphics` target.
//!
//! The whole scene is redrawn back to front on every call: background first,
//! then widgets in creation order. Callers that want partial updates check
//! [`Scene::take_dirty`] before calling [`Scene::render`].

use core::f32::consts::PI;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};
use micromath::F32;

use super::widget::{ArcWidget, ImageWidget, LabelWidget, Orientation, SliderWidget};
use super::{Scene, WidgetKind, widget_bounds};
use crate::colors::{OPA_TRANSP, blend};
use crate::styles::{
    SLIDER_CORNER_RADIUS,
    SLIDER_INDICATOR_STYLE,
    SLIDER_KNOB_SIZE,
    SLIDER_KNOB_STYLE,
    SLIDER_TRACK_STYLE,
    arc_style,
};

impl Scene {
    /// Draw the background and every live widget.
    pub fn render<D>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(self.background)?;

        for (_, widget) in self.iter() {
            let bounds = widget_bounds(widget);
            match &widget.kind {
                WidgetKind::Arc(arc) => draw_arc(display, arc, bounds)?,
                WidgetKind::Slider(slider) => draw_slider(display, slider, bounds)?,
                WidgetKind::Label(label) => draw_label(display, label, bounds)?,
                WidgetKind::Image(image) => draw_image(display, image, bounds, self.background)?,
            }
        }

        Ok(())
    }
}

// =============================================================================
// Arcs
// =============================================================================

fn draw_arc<D>(
    display: &mut D,
    arc: &ArcWidget,
    bounds: Rectangle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    // Nothing to draw for an empty background range
    if arc.angles.sweep == 0 {
        return Ok(());
    }

    let start = f32::from(arc.rotation) + f32::from(arc.angles.start);
    let sweep = f32::from(arc.angles.sweep);

    Arc::new(bounds.top_left, arc.size, Angle::from_degrees(start), Angle::from_degrees(sweep))
        .into_styled(arc_style(arc.color, arc.width))
        .draw(display)?;

    if arc.knob {
        draw_arc_knob(display, arc, bounds, start + sweep)?;
    }

    Ok(())
}

/// Knob sitting on the stroke center line at the end of the arc.
fn draw_arc_knob<D>(
    display: &mut D,
    arc: &ArcWidget,
    bounds: Rectangle,
    end_degrees: f32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let radius = arc.size.saturating_sub(arc.width) as f32 / 2.0;
    let theta = F32(end_degrees / 180.0 * PI);
    let center = bounds.center();
    let knob = Point::new(
        center.x + (radius * theta.cos().0) as i32,
        center.y + (radius * theta.sin().0) as i32,
    );

    Circle::with_center(knob, arc.width + 4)
        .into_styled(PrimitiveStyle::with_fill(arc.color))
        .draw(display)
}

// =============================================================================
// Sliders
// =============================================================================

fn draw_slider<D>(
    display: &mut D,
    slider: &SliderWidget,
    bounds: Rectangle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let corner = Size::new(SLIDER_CORNER_RADIUS, SLIDER_CORNER_RADIUS);

    RoundedRectangle::with_equal_corners(bounds, corner)
        .into_styled(SLIDER_TRACK_STYLE)
        .draw(display)?;

    let fill = slider.fill_length();
    let (indicator, knob_center) = match slider.orientation {
        Orientation::Horizontal => (
            Rectangle::new(bounds.top_left, Size::new(fill, bounds.size.height)),
            Point::new(bounds.top_left.x + fill as i32, bounds.center().y),
        ),
        Orientation::Vertical => {
            // Grows upward from the bottom edge
            let bottom = bounds.top_left.y + bounds.size.height as i32;
            (
                Rectangle::new(Point::new(bounds.top_left.x, bottom - fill as i32), Size::new(bounds.size.width, fill)),
                Point::new(bounds.center().x, bottom - fill as i32),
            )
        }
    };

    if fill > 0 {
        RoundedRectangle::with_equal_corners(indicator, corner)
            .into_styled(SLIDER_INDICATOR_STYLE)
            .draw(display)?;
    }

    Circle::with_center(knob_center, SLIDER_KNOB_SIZE)
        .into_styled(SLIDER_KNOB_STYLE)
        .draw(display)
}

// =============================================================================
// Labels and images
// =============================================================================

fn draw_label<D>(
    display: &mut D,
    label: &LabelWidget,
    bounds: Rectangle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if label.text.is_empty() {
        return Ok(());
    }
    let style = MonoTextStyle::new(label.font.mono(), label.color);
    Text::with_baseline(label.text.as_str(), bounds.top_left, style, Baseline::Top).draw(display)?;
    Ok(())
}

fn draw_image<D>(
    display: &mut D,
    image: &ImageWidget,
    bounds: Rectangle,
    background: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if image.opacity == OPA_TRANSP {
        return Ok(());
    }

    let origin = bounds.top_left;
    let mut result = Ok(());
    image.art.for_each_rect(|(dx, dy, w, h), color| {
        if result.is_err() {
            return;
        }
        result = Rectangle::new(origin + Point::new(dx, dy), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(blend(color, background, image.opacity)))
            .draw(display);
    });
    result
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::colors::{BLACK, LOGO_LIGHT, RED};
    use crate::scene::{Align, Art, Widget};
    use crate::styles::LabelFont;

    /// Draw target that records every pixel write on a 320x240 surface.
    struct Recorder {
        pixels: std::vec::Vec<(Point, Rgb565)>,
        clears: usize,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                pixels: std::vec::Vec::new(),
                clears: 0,
            }
        }

        fn has_color(
            &self,
            color: Rgb565,
        ) -> bool {
            self.pixels.iter().any(|(_, c)| *c == color)
        }
    }

    impl OriginDimensions for Recorder {
        fn size(&self) -> Size { Size::new(320, 240) }
    }

    impl DrawTarget for Recorder {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.pixels.extend(pixels.into_iter().map(|Pixel(p, c)| (p, c)));
            Ok(())
        }

        fn clear(
            &mut self,
            _color: Self::Color,
        ) -> Result<(), Self::Error> {
            self.clears += 1;
            self.pixels.clear();
            Ok(())
        }
    }

    #[test]
    fn test_empty_scene_only_clears() {
        let scene = Scene::new();
        let mut display = Recorder::new();
        scene.render(&mut display).unwrap();

        assert_eq!(display.clears, 1);
        assert!(display.pixels.is_empty());
    }

    #[test]
    fn test_arc_draws_in_its_color() {
        let mut scene = Scene::new();
        let id = scene.create(ArcWidget::new(100).with_color(RED).without_knob()).unwrap();
        scene.center(id);

        let mut display = Recorder::new();
        scene.render(&mut display).unwrap();

        assert!(display.has_color(RED), "Arc stroke should be drawn");
        // One pixel of slack for rasterization at the edge
        let bounds = scene.bounds(id).unwrap().offset(1);
        assert!(
            display.pixels.iter().all(|(p, _)| bounds.contains(*p)),
            "Inside stroke must stay within the arc bounds"
        );
    }

    #[test]
    fn test_zero_sweep_arc_draws_nothing() {
        let mut scene = Scene::new();
        let arc = ArcWidget::new(100).with_angles(crate::easing::ArcAngles { start: 0, sweep: 0 });
        scene.create(arc).unwrap();

        let mut display = Recorder::new();
        scene.render(&mut display).unwrap();
        assert!(display.pixels.is_empty());
    }

    #[test]
    fn test_transparent_image_is_skipped() {
        let mut scene = Scene::new();
        scene.create(ImageWidget::new(Art::Wordmark).with_opacity(0)).unwrap();

        let mut display = Recorder::new();
        scene.render(&mut display).unwrap();
        assert!(display.pixels.is_empty(), "Opacity 0 must not touch the display");
    }

    #[test]
    fn test_opaque_image_uses_art_colors() {
        let mut scene = Scene::new();
        scene.create(ImageWidget::new(Art::Wordmark)).unwrap();

        let mut display = Recorder::new();
        scene.render(&mut display).unwrap();
        assert!(display.has_color(LOGO_LIGHT));
    }

    #[test]
    fn test_label_draws_text() {
        let mut scene = Scene::new();
        let mut label = LabelWidget::new("Hi", LabelFont::Body);
        label.color = RED;
        let mut widget = Widget::from(label);
        widget.placement.align = Align::Center;
        scene.create(widget).unwrap();

        let mut display = Recorder::new();
        scene.render(&mut display).unwrap();
        assert!(display.has_color(RED), "Glyph pixels should use the label color");
        assert!(!display.has_color(BLACK), "Transparent text background should not be painted");
    }

    #[test]
    fn test_slider_draws_track_and_knob() {
        let mut scene = Scene::new();
        let id = scene.create(SliderWidget::vertical(100).with_value(50)).unwrap();
        scene.center(id);

        let mut display = Recorder::new();
        scene.render(&mut display).unwrap();
        assert!(display.has_color(crate::colors::GRAY), "Track should be drawn");
        assert!(display.has_color(crate::colors::WHITE), "Knob fill should be drawn");
        assert!(display.has_color(crate::colors::ACCENT_BLUE), "Indicator should be drawn");
    }
}
