//! Expander pin roles and register configuration
//!
//! The MCP23008 exposes eight GPIO pins. Each one has a fixed role in the
//! console; the direction and pull-up masks written to the device are
//! derived from this role table rather than maintained by hand.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 7-bit bus address of the expander (A2..A0 strapped to ground)
pub const EXPANDER_ADDRESS: u8 = 0x20;

/// IOCON value: no sequential operation, no slew rate control, hardware
/// address pins enabled, active driver INT output, active-low INT
pub const EXPANDER_IOCON: u8 = 0b0011_1000;

/// Pin direction as seen from the expander
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinDirection {
    Input,
    Output,
}

/// Role of each expander GPIO pin
///
/// The discriminant is the bit position in the GPIO register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ExpanderPin {
    /// GP0: RGB LED red anode
    LedRed = 0,
    /// GP1: RGB LED green anode
    LedGreen = 1,
    /// GP2: RGB LED blue anode
    LedBlue = 2,
    /// GP3: Power switch sense (pressed pulls to ground)
    PowerSwitch = 3,
    /// GP4: Fan MOSFET gate, active high
    FanPower = 4,
    /// GP5: Pi DC-DC supply enable, active high
    BoardPower = 5,
    /// GP6: Pi "powered up" signal, high once the Pi has booted
    BoardPoweredUp = 6,
    /// GP7: Request to the Pi to shut down, active high
    BoardPowerDown = 7,
}

impl ExpanderPin {
    /// Every pin, in bit order
    pub const ALL: [ExpanderPin; 8] = [
        ExpanderPin::LedRed,
        ExpanderPin::LedGreen,
        ExpanderPin::LedBlue,
        ExpanderPin::PowerSwitch,
        ExpanderPin::FanPower,
        ExpanderPin::BoardPower,
        ExpanderPin::BoardPoweredUp,
        ExpanderPin::BoardPowerDown,
    ];

    /// Bit position in the GPIO register
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask for this pin
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }

    /// Direction this pin must be configured for
    pub const fn direction(self) -> PinDirection {
        match self {
            ExpanderPin::PowerSwitch | ExpanderPin::BoardPoweredUp => PinDirection::Input,
            _ => PinDirection::Output,
        }
    }

    /// Whether the expander's internal pull-up is needed
    ///
    /// Only the power switch relies on it; the Pi's powered-up line has an
    /// external pull-down.
    pub const fn pull_up(self) -> bool {
        matches!(self, ExpanderPin::PowerSwitch)
    }

    /// Check whether this pin's bit is set in a GPIO register value
    pub const fn is_set(self, gpio: u8) -> bool {
        gpio & self.mask() != 0
    }
}

/// Bits of the three status LED pins
pub const LED_MASK: u8 =
    ExpanderPin::LedRed.mask() | ExpanderPin::LedGreen.mask() | ExpanderPin::LedBlue.mask();

/// IODIR value: 1 = input, 0 = output
pub const fn direction_mask() -> u8 {
    let mut mask = 0;
    let mut i = 0;
    while i < ExpanderPin::ALL.len() {
        let pin = ExpanderPin::ALL[i];
        if matches!(pin.direction(), PinDirection::Input) {
            mask |= pin.mask();
        }
        i += 1;
    }
    mask
}

/// GPPU value: 1 = internal pull-up enabled
pub const fn pull_up_mask() -> u8 {
    let mut mask = 0;
    let mut i = 0;
    while i < ExpanderPin::ALL.len() {
        let pin = ExpanderPin::ALL[i];
        if pin.pull_up() {
            mask |= pin.mask();
        }
        i += 1;
    }
    mask
}

/// Expander register configuration applied at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpanderConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Device configuration word (IOCON)
    pub iocon: u8,
    /// Pin directions (IODIR)
    pub direction: u8,
    /// Pull-up enables (GPPU)
    pub pull_ups: u8,
    /// Output latch state written before the outputs are enabled
    pub power_up: u8,
}

impl ExpanderConfig {
    /// Console wiring
    pub const DEFAULT: Self = Self {
        address: EXPANDER_ADDRESS,
        iocon: EXPANDER_IOCON,
        direction: direction_mask(),
        pull_ups: pull_up_mask(),
        power_up: 0x00,
    };
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_match_wiring() {
        assert_eq!(direction_mask(), 0b0100_1000);
        assert_eq!(pull_up_mask(), 0b0000_1000);
        assert_eq!(LED_MASK, 0b0000_0111);
    }

    #[test]
    fn test_pin_bits_are_unique() {
        let mut seen = 0u8;
        for pin in ExpanderPin::ALL {
            assert_eq!(seen & pin.mask(), 0, "{:?} overlaps", pin);
            seen |= pin.mask();
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn test_pin_directions() {
        assert_eq!(ExpanderPin::PowerSwitch.direction(), PinDirection::Input);
        assert_eq!(ExpanderPin::BoardPoweredUp.direction(), PinDirection::Input);
        assert_eq!(ExpanderPin::FanPower.direction(), PinDirection::Output);
        assert_eq!(ExpanderPin::BoardPowerDown.direction(), PinDirection::Output);
    }

    #[test]
    fn test_default_config() {
        let config = ExpanderConfig::default();
        assert_eq!(config.address, 0x20);
        assert_eq!(config.iocon, 0b0011_1000);
        assert_eq!(config.power_up, 0);
        // Nothing is switched on before the outputs are enabled
        assert_eq!(config.power_up & !config.direction, 0);
    }

    #[test]
    fn test_is_set() {
        assert!(ExpanderPin::BoardPoweredUp.is_set(0b0100_0000));
        assert!(!ExpanderPin::BoardPoweredUp.is_set(0b1011_1111));
    }
}
