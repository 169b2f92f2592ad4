//! GPIO Abstractions
//!
//! Board status LED on PA5, active high.

use embassy_stm32::gpio::Output;

/// Status LED driven by the blink task
pub struct StatusLed<'d> {
    pin: Output<'d>,
}

impl<'d> StatusLed<'d> {
    /// Take the LED pin and switch it off
    #[must_use]
    pub fn new(mut pin: Output<'d>) -> Self {
        pin.set_low();
        Self { pin }
    }

    /// Light the LED
    pub fn on(&mut self) {
        self.pin.set_high();
    }

    /// Switch the LED off
    pub fn off(&mut self) {
        self.pin.set_low();
    }
}
