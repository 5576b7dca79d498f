//! UI runtime: bootstrap, timer dispatch and input entry points.
//!
//! [`Ui`] owns the scene, the timers, the intro sequencer and the two hardware
//! collaborators. The binary drives it with the current time and renders it
//! when it changed:
//!
//! ```text
//! let mut ui = Ui::start(sensor, backlight, now_ms)?;
//! loop {
//!     ui.service(now_ms)?;          // fire due timers
//!     ui.render_if_dirty(&mut display)?;
//!     // wait for input or the next deadline
//! }
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

use crate::battery::BatteryTier;
use crate::bindings::{dispatch, refresh_battery};
use crate::config::timing::{ANIMATION_PERIOD_MS, BATTERY_REFRESH_PERIOD_MS, MAX_TIMERS};
use crate::error::Error;
use crate::factory::{ControlPanelState, build_logo};
use crate::peripherals::{Backlight, BatterySensor};
use crate::scene::{Scene, WidgetId};
use crate::sequencer::{Phase, Sequencer, Timeline};
use crate::timer::{TimerControl, TimerHandle, TimerService};

/// Work items carried by the timer service.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Task {
    /// One tick of the intro sequence.
    Animation,
    /// Re-read the battery and update its label.
    BatteryRefresh,
}

/// Panel sliders addressable from input devices.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PanelSlider {
    Temperature,
    Brightness,
}

pub struct Ui<S, B> {
    scene: Scene,
    timers: TimerService<Task, MAX_TIMERS>,
    sequencer: Sequencer,
    logo: WidgetId,
    panel: Option<ControlPanelState>,
    battery_tier: Option<BatteryTier>,
    sensor: S,
    backlight: B,
}

impl<S, B> Ui<S, B>
where
    S: BatterySensor,
    B: Backlight,
{
    /// Show the logo and the intro arcs and schedule the animation.
    pub fn start(
        sensor: S,
        backlight: B,
        now_ms: u64,
    ) -> Result<Self, Error> {
        Self::with_timeline(sensor, backlight, now_ms, Timeline::DEFAULT)
    }

    pub fn with_timeline(
        sensor: S,
        backlight: B,
        now_ms: u64,
        timeline: Timeline,
    ) -> Result<Self, Error> {
        let mut scene = Scene::new();
        let logo = build_logo(&mut scene)?;
        let sequencer = Sequencer::with_timeline(&mut scene, timeline)?;

        let mut timers = TimerService::new();
        timers.register(Task::Animation, ANIMATION_PERIOD_MS, now_ms)?;

        Ok(Self {
            scene,
            timers,
            sequencer,
            logo,
            panel: None,
            battery_tier: None,
            sensor,
            backlight,
        })
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Run every timer due at `now_ms`.
    ///
    /// A failed animation tick cancels the animation timer and is returned;
    /// the rest of the UI keeps working.
    pub fn service(
        &mut self,
        now_ms: u64,
    ) -> Result<(), Error> {
        while let Some((handle, task)) = self.timers.take_due(now_ms) {
            match task {
                Task::Animation => self.run_animation(handle, now_ms)?,
                Task::BatteryRefresh => self.run_battery_refresh(),
            }
        }
        Ok(())
    }

    fn run_animation(
        &mut self,
        handle: TimerHandle,
        now_ms: u64,
    ) -> Result<(), Error> {
        let outcome = match self.sequencer.tick(&mut self.scene, &mut self.sensor) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.timers.cancel(handle);
                return Err(e.into());
            }
        };

        if let Some(panel) = outcome.panel {
            self.panel = Some(panel);
            self.timers.register(Task::BatteryRefresh, BATTERY_REFRESH_PERIOD_MS, now_ms)?;
        }
        if outcome.control == TimerControl::Cancel {
            self.timers.cancel(handle);
            info!("ui: intro finished");
        }
        Ok(())
    }

    fn run_battery_refresh(&mut self) {
        let Some(panel) = &self.panel else {
            return;
        };
        let Some(tier) = refresh_battery(&mut self.scene, panel.battery_label, &mut self.sensor) else {
            return;
        };
        if self.battery_tier != Some(tier) {
            info!("ui: battery tier {}", tier);
            self.battery_tier = Some(tier);
        }
    }

    /// Earliest time [`service`](Self::service) has work to do.
    #[inline]
    pub fn next_deadline(&self) -> Option<u64> { self.timers.next_deadline() }

    // =========================================================================
    // Input
    // =========================================================================

    /// Move a panel slider and run its binding if the value changed.
    ///
    /// Returns false before the panel exists or when nothing changed.
    pub fn set_slider_value(
        &mut self,
        slider: PanelSlider,
        value: i32,
    ) -> bool {
        let Some(panel) = self.panel else {
            return false;
        };
        match self.scene.set_slider_value(slider_id(&panel, slider), value) {
            Some(event) => dispatch(event, &mut self.scene, &panel, &mut self.backlight),
            None => false,
        }
    }

    /// Move a panel slider by `delta`.
    pub fn nudge_slider(
        &mut self,
        slider: PanelSlider,
        delta: i32,
    ) -> bool {
        match self.slider_value(slider) {
            Some(value) => self.set_slider_value(slider, value.saturating_add(delta)),
            None => false,
        }
    }

    pub fn slider_value(
        &self,
        slider: PanelSlider,
    ) -> Option<i32> {
        let panel = self.panel.as_ref()?;
        self.scene.slider_value(slider_id(panel, slider))
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw the whole scene.
    pub fn render<D>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.scene.take_dirty();
        self.scene.render(display)
    }

    /// Draw the scene if anything changed since the last render.
    pub fn render_if_dirty<D>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.scene.take_dirty() {
            return Ok(false);
        }
        self.scene.render(display)?;
        Ok(true)
    }
}

impl<S, B> Ui<S, B> {
    #[inline]
    pub fn scene(&self) -> &Scene { &self.scene }

    #[inline]
    pub fn phase(&self) -> Phase { self.sequencer.phase() }

    #[inline]
    pub fn panel(&self) -> Option<&ControlPanelState> { self.panel.as_ref() }

    #[inline]
    pub fn logo(&self) -> WidgetId { self.logo }

    /// Tier shown by the last periodic battery refresh.
    #[inline]
    pub fn battery_tier(&self) -> Option<BatteryTier> { self.battery_tier }

    #[inline]
    pub fn sensor_mut(&mut self) -> &mut S { &mut self.sensor }

    #[inline]
    pub fn backlight(&self) -> &B { &self.backlight }
}

fn slider_id(
    panel: &ControlPanelState,
    slider: PanelSlider,
) -> WidgetId {
    match slider {
        PanelSlider::Temperature => panel.temperature_slider,
        PanelSlider::Brightness => panel.brightness_slider,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
