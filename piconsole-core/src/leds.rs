//! Status LED rendering
//!
//! The RGB LED shows the controller state. Rendering is recomputed every
//! tick from the state and the blink phase alone.

use crate::config::{ExpanderPin, LED_MASK};
use crate::state::State;

/// Colour shown on the RGB status LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colour {
    Dark,
    Red,
    Green,
    Blue,
    /// Red and blue together
    Magenta,
}

impl Colour {
    /// GPIO bits lit for this colour
    pub const fn mask(self) -> u8 {
        match self {
            Colour::Dark => 0,
            Colour::Red => ExpanderPin::LedRed.mask(),
            Colour::Green => ExpanderPin::LedGreen.mask(),
            Colour::Blue => ExpanderPin::LedBlue.mask(),
            Colour::Magenta => ExpanderPin::LedRed.mask() | ExpanderPin::LedBlue.mask(),
        }
    }

    /// Replace the LED bits of a GPIO value, leaving every other pin alone
    pub const fn apply(self, gpio: u8) -> u8 {
        (gpio & !LED_MASK) | self.mask()
    }
}

/// Colour for a state at the given blink phase
pub fn render(state: State, blink_on: bool) -> Colour {
    let blink = |colour| if blink_on { colour } else { Colour::Dark };

    match state {
        State::Off => Colour::Red,
        State::PoweringUp => blink(Colour::Green),
        State::On => Colour::Green,
        State::PowerDownRequested => blink(Colour::Red),
        State::PowerDownWait => Colour::Magenta,
    }
}

/// Free-running blink phase
#[derive(Debug, Clone)]
pub struct Blink {
    ticks: u8,
    period: u8,
    on: bool,
}

impl Blink {
    /// Create a blink phase that toggles every `period` ticks, starting dark
    pub fn new(period: u8) -> Self {
        Self {
            ticks: 0,
            period: period.max(1),
            on: false,
        }
    }

    /// Current phase
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Count one tick, toggling the phase when the period elapses
    pub fn advance(&mut self) {
        self.ticks += 1;
        if self.ticks >= self.period {
            self.ticks = 0;
            self.on = !self.on;
        }
    }
}
