//! Simulated battery and backlight.

use std::time::Instant;

use arc_panel::colors::dim;
use arc_panel::{Backlight, BatterySensor};
use tracing::{debug, info};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::timing::BATTERY_DRAIN_SECS_PER_PERCENT;

/// Battery that drains linearly from 100% and then reports an error.
pub struct SimBattery {
    start: Instant,
}

impl SimBattery {
    pub fn new() -> Self { Self { start: Instant::now() } }

    fn level_after(secs: u64) -> i8 {
        let level = 100_i64 - (secs / BATTERY_DRAIN_SECS_PER_PERCENT) as i64;
        // Past empty the "sensor" fails, which shows the unknown tier
        if level < 0 { -1 } else { level as i8 }
    }
}

impl BatterySensor for SimBattery {
    fn read_level(&mut self) -> i8 {
        let level = Self::level_after(self.start.elapsed().as_secs());
        debug!("sim battery: {level}%");
        level
    }
}

/// Backlight that only remembers its level; the main loop dims the frame.
pub struct SimBacklight {
    percent: u8,
}

impl SimBacklight {
    pub const fn new(percent: u8) -> Self { Self { percent } }

    #[inline]
    pub const fn percent(&self) -> u8 { self.percent }
}

impl Backlight for SimBacklight {
    fn set_brightness(
        &mut self,
        percent: u8,
    ) {
        info!("sim backlight: {percent}%");
        self.percent = percent;
    }
}

/// Draw target adapter that darkens every color by the backlight level.
pub struct Dimmed<'a, D> {
    target: &'a mut D,
    percent: u8,
}

impl<'a, D> Dimmed<'a, D> {
    pub fn new(
        target: &'a mut D,
        percent: u8,
    ) -> Self {
        Self { target, percent }
    }
}

impl<D: Dimensions> Dimensions for Dimmed<'_, D> {
    fn bounding_box(&self) -> Rectangle { self.target.bounding_box() }
}

impl<D> DrawTarget for Dimmed<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let percent = self.percent;
        self.target
            .draw_iter(pixels.into_iter().map(|Pixel(p, c)| Pixel(p, dim(c, percent))))
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.target.fill_solid(area, dim(color, self.percent))
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.target.clear(dim(color, self.percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_drain() {
        assert_eq!(SimBattery::level_after(0), 100);
        assert_eq!(SimBattery::level_after(BATTERY_DRAIN_SECS_PER_PERCENT * 30), 70);
        assert_eq!(SimBattery::level_after(BATTERY_DRAIN_SECS_PER_PERCENT * 100), 0);
        assert_eq!(SimBattery::level_after(BATTERY_DRAIN_SECS_PER_PERCENT * 101), -1, "Empty battery reads as unknown");
        assert_eq!(SimBattery::level_after(u64::MAX), -1);
    }
}
