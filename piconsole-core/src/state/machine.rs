//! State machine definition
//!
//! Which pins are driven, and when, is a function of the current state
//! and an event. Nothing here touches hardware.

use heapless::Vec;

use super::events::{Event, Sample};
use crate::config::ExpanderPin;

/// Upper bound on the actions a single transition produces
pub const MAX_ACTIONS: usize = 4;

/// Side effects of a transition, in the order they must be performed
pub type Actions = Vec<Action, MAX_ACTIONS>;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Pi and fan unpowered, waiting for the switch to be pressed
    Off,
    /// Fan and Pi supply on, waiting for the Pi to report it has booted
    PoweringUp,
    /// Pi running, watching for switch release or a Pi-initiated shutdown
    On,
    /// Shutdown requested from the Pi, waiting for it to go down
    PowerDownRequested,
    /// Pi is down, counting down before the supply is cut
    PowerDownWait,
}

/// A single side effect of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Drive an output pin high
    Set(ExpanderPin),
    /// Drive an output pin low
    Clear(ExpanderPin),
    /// Give the fan time to spin up before the Pi draws current
    FanSettle,
    /// Block until the switch has stayed released for the guard window
    AwaitSwitchRelease,
}

impl State {
    /// Check if this state leaves the loop on a timer rather than an input
    pub fn is_timed(&self) -> bool {
        matches!(self, State::PowerDownWait)
    }

    /// Interpret one input sample
    ///
    /// Returns the event this sample would trigger from the current state,
    /// if any. The sequencer only acts on an event once a second sample,
    /// taken after the debounce delay, yields the same event.
    pub fn observe(self, sample: Sample) -> Option<Event> {
        match self {
            State::Off if sample.switch_pressed => Some(Event::SwitchPressed),
            State::PoweringUp if sample.board_up => Some(Event::BoardPoweredUp),
            // A Pi that shut itself down takes priority over the switch
            State::On if !sample.board_up => Some(Event::BoardPoweredDown),
            State::On if !sample.switch_pressed => Some(Event::SwitchReleased),
            State::PowerDownRequested if !sample.board_up => Some(Event::BoardPoweredDown),
            _ => None,
        }
    }

    /// Process an event and return the next state with its side effects
    ///
    /// Events that do not apply to the current state leave it unchanged
    /// and produce no actions.
    pub fn transition(self, event: Event) -> (Self, Actions) {
        use Action::*;
        use Event::*;
        use State::*;

        match (self, event) {
            (Off, SwitchPressed) => (
                PoweringUp,
                actions(&[
                    Set(ExpanderPin::FanPower),
                    FanSettle,
                    Set(ExpanderPin::BoardPower),
                ]),
            ),

            (PoweringUp, BoardPoweredUp) => (On, Actions::new()),

            // Pi went down on its own; withdraw any pending request
            (On, BoardPoweredDown) => (
                PowerDownWait,
                actions(&[Clear(ExpanderPin::BoardPowerDown)]),
            ),
            (On, SwitchReleased) => (
                PowerDownRequested,
                actions(&[Set(ExpanderPin::BoardPowerDown)]),
            ),

            (PowerDownRequested, BoardPoweredDown) => (
                PowerDownWait,
                actions(&[Clear(ExpanderPin::BoardPowerDown)]),
            ),

            (PowerDownWait, ShutdownElapsed) => (
                Off,
                actions(&[
                    Clear(ExpanderPin::BoardPower),
                    Clear(ExpanderPin::FanPower),
                    AwaitSwitchRelease,
                ]),
            ),

            // Default: stay in current state
            _ => (self, Actions::new()),
        }
    }
}

fn actions(list: &[Action]) -> Actions {
    debug_assert!(list.len() <= MAX_ACTIONS, "transition exceeds MAX_ACTIONS");

    let mut out = Actions::new();
    for action in list {
        if out.push(*action).is_err() {
            break;
        }
    }
    out
}
