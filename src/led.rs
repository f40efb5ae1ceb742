use embedded_hal::digital::PinState;
use qclock::{indicator, SetMode, TimeOfDay};
use stm32f0xx_hal::{
    gpio::{gpioa::PA5, Output, PushPull},
    prelude::*,
};

/// Nucleo user LED on PA5.
pub struct StatusLed {
    led: PA5<Output<PushPull>>,
}

impl StatusLed {
    pub fn new(led: PA5<Output<PushPull>>) -> Self {
        Self { led }
    }

    pub fn show(&mut self, mode: SetMode, time: TimeOfDay) {
        match indicator(mode, time) {
            PinState::High => self.led.set_high().unwrap(),
            PinState::Low => self.led.set_low().unwrap(),
        }
    }
}
