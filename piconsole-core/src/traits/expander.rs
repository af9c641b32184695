//! GPIO expander trait

use piconsole_hal::I2cError;

/// Errors from an expander register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderError {
    /// The bus transaction failed
    Bus(I2cError),
}

impl From<I2cError> for ExpanderError {
    fn from(e: I2cError) -> Self {
        ExpanderError::Bus(e)
    }
}

/// Trait for an 8-bit GPIO expander with an output shadow
///
/// The shadow is the driver's copy of the last value written to the GPIO
/// register. New output values are always composed from the shadow, never
/// from a read of the live pins, so every write must go through
/// [`GpioExpander::write_gpio`].
pub trait GpioExpander {
    /// Read the current level of all eight pins
    ///
    /// On bus trouble this returns an error; callers must not treat a
    /// failed read as a valid sample.
    fn read_gpio(&mut self) -> Result<u8, ExpanderError>;

    /// Write all eight output latches and update the shadow
    fn write_gpio(&mut self, value: u8) -> Result<(), ExpanderError>;

    /// Last value written through [`GpioExpander::write_gpio`]
    fn output_shadow(&self) -> u8;

    /// Drive the pins in `mask` high, leaving the others unchanged
    fn set_pins(&mut self, mask: u8) -> Result<(), ExpanderError> {
        let value = self.output_shadow() | mask;
        self.write_gpio(value)
    }

    /// Drive the pins in `mask` low, leaving the others unchanged
    fn clear_pins(&mut self, mask: u8) -> Result<(), ExpanderError> {
        let value = self.output_shadow() & !mask;
        self.write_gpio(value)
    }
}
