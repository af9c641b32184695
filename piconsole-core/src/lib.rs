//! Board-agnostic core logic for the piconsole power controller
//!
//! This crate contains all policy that does not depend on a specific
//! microcontroller or bus implementation:
//!
//! - Expander pin role map and compile-time configuration
//! - Power sequencing state machine (pure transition and observation)
//! - Status LED rendering
//! - The cooperative control loop, generic over the expander and delay

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod leds;
pub mod sequencer;
pub mod state;
pub mod traits;
