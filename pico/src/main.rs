//! Arc intro and control panel firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Runs on the Pimoroni PIM715 Display Pack 2.8".
//!
//! Buttons:
//! - A/B: temperature down/up
//! - X/Y: brightness up/down

#![no_std]
#![no_main]

mod backlight;
mod battery;
mod button;
mod display;

use arc_panel::config::ANIMATION_PERIOD_MS;
use arc_panel::config::layout::BRIGHTNESS_INITIAL;
use arc_panel::{PanelSlider, Ui};
use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::{Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use crate::backlight::PwmBacklight;
use crate::battery::VsysBattery;
use crate::button::Button;
use crate::display::{display_spi_config, init_display};

/// Temperature change per A/B press (degrees).
const TEMPERATURE_STEP: i32 = 1;

/// Brightness change per X/Y press (percent).
const BRIGHTNESS_STEP: i32 = 10;

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"arc-panel"),
    embassy_rp::binary_info::rp_program_description!(c"Arc intro and control panel on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Arc panel starting...");

    let p = embassy_rp::init(Default::default());

    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());

    let Some(mut display) = init_display(spi, cs, dc) else {
        error!("Display init failed");
        return;
    };
    info!("Display initialized!");

    let backlight = PwmBacklight::new(p.PWM_SLICE2, p.PIN_20, BRIGHTNESS_INITIAL as u8);
    let battery = VsysBattery::new(p.ADC, p.PIN_29);

    // Buttons (active-low with internal pull-up)
    let mut btn_a = Button::new(Input::new(p.PIN_12, Pull::Up));
    let mut btn_b = Button::new(Input::new(p.PIN_13, Pull::Up));
    let mut btn_x = Button::new(Input::new(p.PIN_14, Pull::Up));
    let mut btn_y = Button::new(Input::new(p.PIN_15, Pull::Up));

    let boot = Instant::now();
    let mut ui = match Ui::start(battery, backlight, 0) {
        Ok(ui) => ui,
        Err(e) => {
            error!("UI start failed: {}", e);
            return;
        }
    };

    info!("Starting main loop...");
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(ANIMATION_PERIOD_MS)));

    loop {
        if btn_a.just_pressed() {
            ui.nudge_slider(PanelSlider::Temperature, -TEMPERATURE_STEP);
        }
        if btn_b.just_pressed() {
            ui.nudge_slider(PanelSlider::Temperature, TEMPERATURE_STEP);
        }
        if btn_x.just_pressed() {
            ui.nudge_slider(PanelSlider::Brightness, BRIGHTNESS_STEP);
        }
        if btn_y.just_pressed() {
            ui.nudge_slider(PanelSlider::Brightness, -BRIGHTNESS_STEP);
        }

        if let Err(e) = ui.service(boot.elapsed().as_millis()) {
            error!("Timer dispatch failed: {}", e);
        }

        if ui.render_if_dirty(&mut display).is_err() {
            error!("Display write failed");
        }

        ticker.next().await;
    }
}
