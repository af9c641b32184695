//! Open-drain bus lines on RP2040 GPIO
//!
//! The output latch is held low once at construction; after that only the
//! pin direction changes. The bus pull-ups are external.

use embassy_rp::gpio::{Flex, Pull};
use piconsole_hal::OpenDrainLine;

/// RP2040 pin emulating an open-drain output
pub struct FlexLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexLine<'d> {
    /// Take a pin and leave it released
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::None);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }
}

impl OpenDrainLine for FlexLine<'_> {
    fn release(&mut self) {
        self.pin.set_as_input();
    }

    fn drive_low(&mut self) {
        self.pin.set_as_output();
    }

    fn is_high(&mut self) -> bool {
        self.pin.is_high()
    }
}
