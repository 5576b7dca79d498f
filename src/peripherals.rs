//! Hardware collaborators the UI talks to.
//!
//! The firmware implements these on top of the RP2350 ADC and PWM; the
//! simulator fakes them.

/// Source of the battery charge level.
pub trait BatterySensor {
    /// Charge level in percent. Negative values mean the reading failed.
    fn read_level(&mut self) -> i8;
}

/// Display backlight.
pub trait Backlight {
    /// Set the backlight level in percent (0-100).
    fn set_brightness(
        &mut self,
        percent: u8,
    );
}

impl<T: BatterySensor + ?Sized> BatterySensor for &mut T {
    fn read_level(&mut self) -> i8 { (**self).read_level() }
}

impl<T: Backlight + ?Sized> Backlight for &mut T {
    fn set_brightness(
        &mut self,
        percent: u8,
    ) {
        (**self).set_brightness(percent);
    }
}
