//! Widget construction for the intro and the control panel.
//!
//! Every builder checks free scene capacity before creating its first widget,
//! so a build either completes or leaves the scene untouched.

use embedded_graphics::prelude::Point;
use heapless::Vec;

use crate::bindings::{format_temperature, refresh_battery};
use crate::colors::{ARC_PALETTE, OPA_TRANSP};
use crate::config::layout::{
    ARC_COUNT,
    ARC_INITIAL_SPACING,
    ARC_INITIAL_SWEEP,
    ARC_OUTER_SIZE,
    ARC_SIZE_STEP,
    ARC_WIDTH,
    BATTERY_LABEL_ALIGN,
    BRIGHTNESS_INITIAL,
    BRIGHTNESS_MAX,
    BRIGHTNESS_MIN,
    BRIGHTNESS_SLIDER_HEIGHT,
    BRIGHTNESS_SLIDER_MARGIN,
    TEMPERATURE_DEFAULT,
    TEMPERATURE_LABEL_ALIGN,
    TEMPERATURE_MAX,
    TEMPERATURE_MIN,
    TEMPERATURE_SLIDER_WIDTH,
    TEMPERATURE_SLIDER_Y_OFFSET,
};
use crate::easing::ArcAngles;
use crate::peripherals::BatterySensor;
use crate::scene::{
    Align,
    ArcWidget,
    Art,
    Binding,
    ImageWidget,
    LabelWidget,
    Scene,
    SceneError,
    SliderWidget,
    Widget,
    WidgetId,
};
use crate::styles::LabelFont;

/// Number of widgets [`build_panel`] creates.
pub const PANEL_WIDGET_COUNT: usize = 5;

const _: () = assert!(ARC_COUNT == ARC_PALETTE.len());

/// Handles of the intro arcs, outermost first.
///
/// Consumed by [`teardown_intro`], so the arcs can only be torn down once.
#[derive(Debug)]
pub struct ArcSet {
    arcs: Vec<WidgetId, ARC_COUNT>,
}

impl ArcSet {
    pub fn ids(&self) -> &[WidgetId] { &self.arcs }

    pub fn len(&self) -> usize { self.arcs.len() }

    pub fn is_empty(&self) -> bool { self.arcs.is_empty() }
}

/// Widgets of the control panel.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ControlPanelState {
    /// Transparent wordmark overlay.
    pub overlay: WidgetId,
    pub temperature_label: WidgetId,
    pub temperature_slider: WidgetId,
    pub brightness_slider: WidgetId,
    pub battery_label: WidgetId,
}

/// Bounding size of arc `index` (0 = outermost).
#[inline]
pub const fn arc_size(index: usize) -> u32 { ARC_OUTER_SIZE - ARC_SIZE_STEP * index as u32 }

/// Centered logo shown for the whole session.
pub fn build_logo(scene: &mut Scene) -> Result<WidgetId, SceneError> {
    scene.create(Widget::from(ImageWidget::new(Art::Logo)).aligned(Align::Center, Point::zero()))
}

/// Create the three concentric intro arcs, centered on the screen.
pub fn build_intro(scene: &mut Scene) -> Result<ArcSet, SceneError> {
    scene.reserve(ARC_COUNT)?;

    let mut arcs = Vec::new();
    for (i, color) in ARC_PALETTE.iter().enumerate() {
        let arc = ArcWidget::new(arc_size(i))
            .with_width(ARC_WIDTH)
            .with_color(*color)
            .with_angles(ArcAngles {
                start: ARC_INITIAL_SPACING * i as u16,
                sweep: ARC_INITIAL_SWEEP,
            })
            .without_knob();
        let id = scene.create(Widget::from(arc).aligned(Align::Center, Point::zero()))?;
        arcs.push(id).map_err(|_| SceneError::Full)?;
    }

    debug!("factory: intro arcs created");
    Ok(ArcSet { arcs })
}

/// Delete the intro arcs.
pub fn teardown_intro(
    scene: &mut Scene,
    arcs: ArcSet,
) {
    for id in arcs.arcs {
        scene.delete(id);
    }
    debug!("factory: intro arcs deleted");
}

/// Create the control panel and populate the battery label once.
pub fn build_panel<S>(
    scene: &mut Scene,
    sensor: &mut S,
) -> Result<ControlPanelState, SceneError>
where
    S: BatterySensor + ?Sized,
{
    scene.reserve(PANEL_WIDGET_COUNT)?;

    let overlay = scene.create(
        Widget::from(ImageWidget::new(Art::Wordmark).with_opacity(OPA_TRANSP))
            .aligned(Align::BottomMid, Point::new(0, -8)),
    )?;

    let temperature_label = scene.create(
        Widget::from(LabelWidget::new(&format_temperature(TEMPERATURE_DEFAULT), LabelFont::Body))
            .aligned(TEMPERATURE_LABEL_ALIGN, Point::zero()),
    )?;

    let temperature_slider = scene.create(
        Widget::from(
            SliderWidget::horizontal(TEMPERATURE_SLIDER_WIDTH)
                .with_range(TEMPERATURE_MIN, TEMPERATURE_MAX)
                .with_value(TEMPERATURE_DEFAULT)
                .bind(Binding::Temperature),
        )
        .aligned(Align::Center, Point::new(0, TEMPERATURE_SLIDER_Y_OFFSET)),
    )?;

    let brightness_slider = scene.create(
        Widget::from(
            SliderWidget::vertical(BRIGHTNESS_SLIDER_HEIGHT)
                .with_range(BRIGHTNESS_MIN, BRIGHTNESS_MAX)
                .with_value(BRIGHTNESS_INITIAL)
                .bind(Binding::Brightness),
        )
        .aligned(Align::RightMid, Point::new(-BRIGHTNESS_SLIDER_MARGIN, 0)),
    )?;

    let battery_label = scene.create(
        Widget::from(LabelWidget::new("", LabelFont::Status)).aligned(BATTERY_LABEL_ALIGN, Point::zero()),
    )?;
    refresh_battery(scene, battery_label, sensor);

    info!("factory: control panel created");
    Ok(ControlPanelState {
        overlay,
        temperature_label,
        temperature_slider,
        brightness_slider,
        battery_label,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::MAX_WIDGETS;
    use crate::scene::WidgetKind;

    struct FixedBattery(i8);

    impl BatterySensor for FixedBattery {
        fn read_level(&mut self) -> i8 { self.0 }
    }

    #[test]
    fn test_intro_arcs() {
        let mut scene = Scene::new();
        let arcs = build_intro(&mut scene).unwrap();
        assert_eq!(arcs.len(), 3);

        for (i, &id) in arcs.ids().iter().enumerate() {
            let arc = scene.arc(id).expect("Intro widget should be an arc");
            assert_eq!(arc.size, 220 - 30 * i as u32, "Arc {i} size");
            assert_eq!(arc.width, 10);
            assert_eq!(arc.color, ARC_PALETTE[i]);
            assert_eq!(arc.angles.start, 120 * i as u16, "Arc {i} initial start");
            assert_eq!(arc.angles.sweep, 10);
            assert!(!arc.knob, "Arc knob should be removed");
            assert_eq!(scene.get(id).unwrap().placement.align, Align::Center);
        }
    }

    #[test]
    fn test_intro_needs_three_slots() {
        let mut scene = Scene::new();
        for _ in 0..MAX_WIDGETS - 2 {
            build_logo(&mut scene).unwrap();
        }

        assert_eq!(build_intro(&mut scene).unwrap_err(), SceneError::Full);
        assert_eq!(scene.len(), MAX_WIDGETS - 2, "Failed build must not create any arc");
    }

    #[test]
    fn test_teardown_removes_arcs() {
        let mut scene = Scene::new();
        let logo = build_logo(&mut scene).unwrap();
        let arcs = build_intro(&mut scene).unwrap();
        let ids: std::vec::Vec<WidgetId> = arcs.ids().to_vec();

        teardown_intro(&mut scene, arcs);

        assert!(ids.iter().all(|&id| !scene.contains(id)));
        assert!(scene.contains(logo), "Logo must survive the teardown");
    }

    #[test]
    fn test_panel_widgets() {
        let mut scene = Scene::new();
        let panel = build_panel(&mut scene, &mut FixedBattery(90)).unwrap();
        assert_eq!(scene.len(), PANEL_WIDGET_COUNT);

        let overlay = scene.image(panel.overlay).unwrap();
        assert_eq!(overlay.opacity, 0, "Overlay should start transparent");

        let label = scene.label(panel.temperature_label).unwrap();
        assert_eq!(label.text.as_str(), "Teplota: 0°C");

        let temp = scene.slider(panel.temperature_slider).unwrap();
        assert_eq!((temp.min, temp.max, temp.value), (-20, 40, 0));
        assert_eq!(temp.length, 200);
        assert_eq!(temp.binding, Some(Binding::Temperature));
        assert_eq!(
            scene.get(panel.temperature_slider).unwrap().placement.offset,
            Point::new(0, 50)
        );

        let brightness = scene.slider(panel.brightness_slider).unwrap();
        assert_eq!((brightness.min, brightness.max, brightness.value), (0, 100, 50));
        assert_eq!(brightness.binding, Some(Binding::Brightness));
    }

    #[test]
    fn test_panel_battery_label_populated() {
        let mut scene = Scene::new();
        let panel = build_panel(&mut scene, &mut FixedBattery(90)).unwrap();

        let label = scene.label(panel.battery_label).unwrap();
        assert_eq!(label.text.as_str(), "[||||] 90%", "Battery label is filled synchronously");
        assert_eq!(label.color, crate::colors::GREEN);
    }

    #[test]
    fn test_panel_creation_order() {
        let mut scene = Scene::new();
        let panel = build_panel(&mut scene, &mut FixedBattery(50)).unwrap();

        let order: std::vec::Vec<WidgetId> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(
            order,
            [
                panel.overlay,
                panel.temperature_label,
                panel.temperature_slider,
                panel.brightness_slider,
                panel.battery_label
            ]
        );
        assert!(matches!(scene.get(panel.overlay).unwrap().kind, WidgetKind::Image(_)));
    }

    #[test]
    fn test_panel_all_or_nothing() {
        let mut scene = Scene::new();
        for _ in 0..MAX_WIDGETS - PANEL_WIDGET_COUNT + 1 {
            build_logo(&mut scene).unwrap();
        }
        let before = scene.len();

        assert_eq!(build_panel(&mut scene, &mut FixedBattery(50)), Err(SceneError::Full));
        assert_eq!(scene.len(), before, "Failed panel build must not leave widgets behind");
    }
}
