//! PWM backlight on GPIO20 (PWM slice 2, channel A).

use arc_panel::Backlight;
use defmt::debug;
use embassy_rp::Peri;
use embassy_rp::peripherals::{PIN_20, PWM_SLICE2};
use embassy_rp::pwm::{Config, Pwm};

/// PWM counter wrap value. Duty is `percent * PWM_TOP / 100`.
const PWM_TOP: u16 = 10_000;

pub struct PwmBacklight<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> PwmBacklight<'d> {
    pub fn new(
        slice: Peri<'d, PWM_SLICE2>,
        pin: Peri<'d, PIN_20>,
        percent: u8,
    ) -> Self {
        let mut config = Config::default();
        config.top = PWM_TOP;
        config.compare_a = duty(percent);
        Self {
            pwm: Pwm::new_output_a(slice, pin, config.clone()),
            config,
        }
    }
}

impl Backlight for PwmBacklight<'_> {
    fn set_brightness(
        &mut self,
        percent: u8,
    ) {
        self.config.compare_a = duty(percent);
        self.pwm.set_config(&self.config);
        debug!("backlight: {}% (compare {})", percent, self.config.compare_a);
    }
}

fn duty(percent: u8) -> u16 { (u32::from(percent.min(100)) * u32::from(PWM_TOP) / 100) as u16 }
