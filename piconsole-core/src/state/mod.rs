//! Power sequencing state machine
//!
//! Defines what the controller does, independent of how pins are read or
//! written. Observation and transition are pure functions of the current
//! state; the sequencer performs the resulting actions.

pub mod events;
pub mod machine;

pub use events::{Event, Sample};
pub use machine::{Action, Actions, State, MAX_ACTIONS};
