//! Arc panel simulator for desktop platforms.
//!
//! Runs the intro animation and control panel in an SDL window using the
//! embedded-graphics-simulator crate.
//!
//! Keys:
//! - Left/Right: temperature slider down/up
//! - Up/Down: brightness slider up/down (dims the whole frame)
//! - Esc: quit
//!
//! Log output is filtered by `RUST_LOG` (default `debug`), e.g.
//! `RUST_LOG=arc_panel=trace cargo run`.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod devices;
mod timing;

use std::thread;
use std::time::Instant;

use arc_panel::config::layout::BRIGHTNESS_INITIAL;
use arc_panel::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use arc_panel::{PanelSlider, Ui};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use tracing::{error, info, trace};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::devices::{Dimmed, SimBacklight, SimBattery};
use crate::timing::{BRIGHTNESS_KEY_STEP, FRAME_TIME, TEMPERATURE_KEY_STEP};

type SimUi = Ui<SimBattery, SimBacklight>;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "debug";

/// `RUST_LOG` directives, falling back to [`DEFAULT_LOG_FILTER`].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    // The core logs through `log`; the subscriber's bridge forwards those records
    tracing_subscriber::registry().with(fmt::layer()).with(env_filter()).init();

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Arc Panel Sim", &output_settings);

    let start = Instant::now();
    let backlight = SimBacklight::new(BRIGHTNESS_INITIAL as u8);
    let mut ui: SimUi = Ui::start(SimBattery::new(), backlight, 0)?;
    info!("simulator started");

    draw(&mut ui, &mut display)?;
    window.update(&display);

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Escape {
                        return Ok(());
                    }
                    handle_key(&mut ui, keycode);
                }
                _ => {}
            }
        }

        let now_ms = start.elapsed().as_millis() as u64;
        if let Err(e) = ui.service(now_ms) {
            error!("timer dispatch failed: {e}");
        }

        if draw(&mut ui, &mut display)? {
            window.update(&display);
        }

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

fn handle_key(
    ui: &mut SimUi,
    keycode: Keycode,
) {
    let (slider, delta) = match keycode {
        Keycode::Left => (PanelSlider::Temperature, -TEMPERATURE_KEY_STEP),
        Keycode::Right => (PanelSlider::Temperature, TEMPERATURE_KEY_STEP),
        Keycode::Up => (PanelSlider::Brightness, BRIGHTNESS_KEY_STEP),
        Keycode::Down => (PanelSlider::Brightness, -BRIGHTNESS_KEY_STEP),
        _ => return,
    };

    if !ui.nudge_slider(slider, delta) {
        trace!("{slider:?} unchanged");
    }
}

/// Render into the window buffer through the backlight dimmer.
///
/// Returns true when the buffer changed.
fn draw(
    ui: &mut SimUi,
    display: &mut SimulatorDisplay<Rgb565>,
) -> anyhow::Result<bool> {
    let percent = ui.backlight().percent();
    let mut target = Dimmed::new(display, percent);
    Ok(ui.render_if_dirty(&mut target)?)
}
