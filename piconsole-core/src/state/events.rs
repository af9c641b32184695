//! Events that trigger state transitions

use crate::config::ExpanderPin;

/// Inputs decoded from one read of the expander GPIO register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Power switch is held in (its line reads low)
    pub switch_pressed: bool,
    /// The Pi reports that it has booted
    pub board_up: bool,
}

impl Sample {
    /// Decode the input pins from a raw GPIO register value
    pub const fn from_gpio(gpio: u8) -> Self {
        Self {
            switch_pressed: !ExpanderPin::PowerSwitch.is_set(gpio),
            board_up: ExpanderPin::BoardPoweredUp.is_set(gpio),
        }
    }
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Power switch pressed
    SwitchPressed,
    /// Power switch released
    SwitchReleased,
    /// Pi raised its powered-up line
    BoardPoweredUp,
    /// Pi dropped its powered-up line
    BoardPoweredDown,
    /// Shutdown countdown ran out
    ShutdownElapsed,
}
