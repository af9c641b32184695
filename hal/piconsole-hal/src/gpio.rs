//! GPIO pin abstractions
//!
//! The bus lines are emulated open-drain: a line is either released (pin
//! configured as input, pulled high by an external resistor) or driven
//! low (pin configured as output, level low). There is deliberately no way
//! to drive a line high, so two agents on the same wire can never fight.

/// One wire of an open-drain bus
///
/// Implementations switch the pin direction rather than its output level.
/// Direction changes must take effect immediately.
pub trait OpenDrainLine {
    /// Stop driving the line, letting the pull-up take it high
    fn release(&mut self);

    /// Drive the line low
    fn drive_low(&mut self);

    /// Check if the line currently reads high
    ///
    /// Takes `&mut self` because some pin implementations need mutable
    /// access to sample the input register.
    fn is_high(&mut self) -> bool;

    /// Check if the line currently reads low
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: OpenDrainLine + ?Sized> OpenDrainLine for &mut T {
    fn release(&mut self) {
        T::release(self)
    }

    fn drive_low(&mut self) {
        T::drive_low(self)
    }

    fn is_high(&mut self) -> bool {
        T::is_high(self)
    }
}
