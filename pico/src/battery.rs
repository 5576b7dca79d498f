//! Battery level estimate from VSYS.
//!
//! VSYS reaches ADC3 (GPIO29) through a 3:1 divider. The charge level is a
//! linear estimate between an empty and a full single-cell LiPo.

use arc_panel::BatterySensor;
use defmt::warn;
use embassy_rp::Peri;
use embassy_rp::adc::{Adc, Blocking, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::{ADC, PIN_29};

/// ADC reference voltage in millivolts.
const ADC_VREF_MV: u32 = 3300;

/// 12-bit ADC full scale.
const ADC_MAX: u32 = 4096;

/// VSYS divider ratio on the Pico 2.
const VSYS_DIVIDER: u32 = 3;

/// Cell voltage treated as 0%.
const CELL_EMPTY_MV: u32 = 3000;

/// Cell voltage treated as 100%.
const CELL_FULL_MV: u32 = 4200;

const _: () = assert!(CELL_EMPTY_MV < CELL_FULL_MV);

/// Level reported when the ADC read fails.
const LEVEL_UNKNOWN: i8 = -1;

pub struct VsysBattery<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> VsysBattery<'d> {
    pub fn new(
        adc: Peri<'d, ADC>,
        vsys: Peri<'d, PIN_29>,
    ) -> Self {
        Self {
            adc: Adc::new_blocking(adc, Config::default()),
            channel: Channel::new_pin(vsys, Pull::None),
        }
    }
}

impl BatterySensor for VsysBattery<'_> {
    fn read_level(&mut self) -> i8 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => level_from_raw(raw),
            Err(e) => {
                warn!("battery: ADC read failed: {}", e);
                LEVEL_UNKNOWN
            }
        }
    }
}

/// Convert a raw ADC sample to a 0-100 charge estimate.
fn level_from_raw(raw: u16) -> i8 {
    let vsys_mv = u32::from(raw) * ADC_VREF_MV * VSYS_DIVIDER / ADC_MAX;
    let above_empty = vsys_mv.saturating_sub(CELL_EMPTY_MV);
    let level = (above_empty * 100 / (CELL_FULL_MV - CELL_EMPTY_MV)).min(100);
    level as i8
}
