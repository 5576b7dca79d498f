//! Control bindings: what happens when a panel slider moves or the battery
//! refresh timer fires.
//!
//! Handlers take the widget handles they touch as parameters. A handle whose
//! widget no longer exists turns the handler into a no-op.

use core::fmt::Write;

use embedded_graphics::prelude::Point;
use heapless::String;

use crate::battery::{BatteryTier, format_battery_label};
use crate::config::layout::{BATTERY_LABEL_ALIGN, TEMPERATURE_CAPTION, TEMPERATURE_LABEL_ALIGN, TEMPERATURE_UNIT};
use crate::factory::ControlPanelState;
use crate::peripherals::{Backlight, BatterySensor};
use crate::scene::{Binding, Scene, ValueChanged, WidgetId};

/// Capacity of a formatted temperature label ("Teplota: -2147483648°C").
pub const TEMPERATURE_LABEL_LEN: usize = 24;

/// Format the temperature label, e.g. `"Teplota: -5°C"`.
pub fn format_temperature(value: i32) -> String<TEMPERATURE_LABEL_LEN> {
    let mut text: String<TEMPERATURE_LABEL_LEN> = String::new();
    // Capacity covers the caption, any i32 and the unit
    let _ = write!(text, "{TEMPERATURE_CAPTION}: {value}{TEMPERATURE_UNIT}");
    text
}

/// Show the temperature slider's value on the temperature label.
pub fn on_temperature_changed(
    scene: &mut Scene,
    slider: WidgetId,
    label: WidgetId,
) -> bool {
    let Some(value) = scene.slider_value(slider) else {
        return false;
    };
    let updated = scene.set_label_text(label, &format_temperature(value));
    scene.align(label, TEMPERATURE_LABEL_ALIGN, Point::zero());
    updated
}

/// Forward the brightness slider's value to the backlight.
pub fn on_brightness_changed<B>(
    scene: &Scene,
    slider: WidgetId,
    backlight: &mut B,
) -> bool
where
    B: Backlight + ?Sized,
{
    let Some(value) = scene.slider_value(slider) else {
        return false;
    };
    match u8::try_from(value) {
        Ok(percent) => {
            debug!("bindings: brightness {}%", percent);
            backlight.set_brightness(percent);
            true
        }
        Err(_) => {
            warn!("bindings: brightness {} out of range", value);
            false
        }
    }
}

/// Read the battery sensor and update the battery label text and color.
///
/// Returns the displayed tier, or `None` when the label no longer exists (in
/// which case the sensor is not read).
pub fn refresh_battery<S>(
    scene: &mut Scene,
    label: WidgetId,
    sensor: &mut S,
) -> Option<BatteryTier>
where
    S: BatterySensor + ?Sized,
{
    if scene.label(label).is_none() {
        debug!("bindings: battery label gone, skipping refresh");
        return None;
    }

    let level = sensor.read_level();
    let tier = BatteryTier::from_level(level);

    scene.set_label_text(label, &format_battery_label(level));
    scene.set_label_color(label, tier.color());
    scene.align(label, BATTERY_LABEL_ALIGN, Point::zero());

    trace!("bindings: battery {}% ({})", level, tier);
    Some(tier)
}

/// Route a slider notification to its binding.
pub fn dispatch<B>(
    event: ValueChanged,
    scene: &mut Scene,
    panel: &ControlPanelState,
    backlight: &mut B,
) -> bool
where
    B: Backlight + ?Sized,
{
    match event.binding {
        Binding::Temperature => on_temperature_changed(scene, event.slider, panel.temperature_label),
        Binding::Brightness => on_brightness_changed(scene, event.slider, backlight),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{GREEN, RED, YELLOW};
    use crate::factory::build_panel;

    struct Readings {
        levels: std::vec::Vec<i8>,
        reads: usize,
    }

    impl Readings {
        fn new(levels: &[i8]) -> Self {
            Self {
                levels: levels.to_vec(),
                reads: 0,
            }
        }
    }

    impl BatterySensor for Readings {
        fn read_level(&mut self) -> i8 {
            let level = self.levels[self.reads.min(self.levels.len() - 1)];
            self.reads += 1;
            level
        }
    }

    #[derive(Default)]
    struct RecordingBacklight {
        calls: std::vec::Vec<u8>,
    }

    impl Backlight for RecordingBacklight {
        fn set_brightness(
            &mut self,
            percent: u8,
        ) {
            self.calls.push(percent);
        }
    }

    fn panel() -> (Scene, ControlPanelState) {
        let mut scene = Scene::new();
        let panel = build_panel(&mut scene, &mut Readings::new(&[100])).unwrap();
        (scene, panel)
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(-5).as_str(), "Teplota: -5°C");
        assert_eq!(format_temperature(0).as_str(), "Teplota: 0°C");
        assert_eq!(format_temperature(40).as_str(), "Teplota: 40°C");
        assert_eq!(format_temperature(i32::MIN).as_str(), "Teplota: -2147483648°C", "Longest value must fit");
    }

    #[test]
    fn test_temperature_slider_updates_label() {
        let (mut scene, panel) = panel();
        let mut backlight = RecordingBacklight::default();

        let event = scene.set_slider_value(panel.temperature_slider, -5).unwrap();
        assert!(dispatch(event, &mut scene, &panel, &mut backlight));

        assert_eq!(scene.label(panel.temperature_label).unwrap().text.as_str(), "Teplota: -5°C");
        assert!(backlight.calls.is_empty(), "Temperature must not touch the backlight");
    }

    #[test]
    fn test_brightness_forwarded_once() {
        let (mut scene, panel) = panel();
        let mut backlight = RecordingBacklight::default();

        let event = scene.set_slider_value(panel.brightness_slider, 73).unwrap();
        dispatch(event, &mut scene, &panel, &mut backlight);

        assert_eq!(backlight.calls, [73], "Exactly one set_brightness(73) expected");
    }

    #[test]
    fn test_brightness_stale_slider() {
        let (mut scene, panel) = panel();
        let mut backlight = RecordingBacklight::default();
        scene.delete(panel.brightness_slider);

        assert!(!on_brightness_changed(&scene, panel.brightness_slider, &mut backlight));
        assert!(backlight.calls.is_empty());
    }

    #[test]
    fn test_battery_tiers_applied() {
        let (mut scene, panel) = panel();
        let mut sensor = Readings::new(&[-1, 10, 55, 95]);

        let cases = [
            (BatteryTier::Unknown, "[    ] -1%", RED),
            (BatteryTier::Critical, "[|   ] 10%", RED),
            (BatteryTier::Medium, "[||| ] 55%", YELLOW),
            (BatteryTier::Full, "[||||] 95%", GREEN),
        ];
        for (tier, text, color) in cases {
            assert_eq!(refresh_battery(&mut scene, panel.battery_label, &mut sensor), Some(tier));
            let label = scene.label(panel.battery_label).unwrap();
            assert_eq!(label.text.as_str(), text);
            assert_eq!(label.color, color, "{tier:?} color");
        }
    }

    #[test]
    fn test_battery_refresh_stale_label_is_noop() {
        let (mut scene, panel) = panel();
        scene.delete(panel.battery_label);
        let mut sensor = Readings::new(&[50]);

        assert_eq!(refresh_battery(&mut scene, panel.battery_label, &mut sensor), None);
        assert_eq!(sensor.reads, 0, "Sensor should not be read for a deleted label");
    }

    #[test]
    fn test_battery_label_stays_top_right() {
        let (mut scene, panel) = panel();
        let mut sensor = Readings::new(&[5, 100]);

        refresh_battery(&mut scene, panel.battery_label, &mut sensor);
        let narrow = scene.bounds(panel.battery_label).unwrap();
        refresh_battery(&mut scene, panel.battery_label, &mut sensor);
        let wide = scene.bounds(panel.battery_label).unwrap();

        let right = |r: embedded_graphics::primitives::Rectangle| r.top_left.x + r.size.width as i32;
        assert_eq!(right(narrow), 320, "Label should hug the right edge");
        assert_eq!(right(wide), 320, "Longer text should still hug the right edge");
        assert!(wide.size.width > narrow.size.width);
    }
}
