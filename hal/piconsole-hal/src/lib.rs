//! piconsole Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the power controller so the
//! bus engine, expander driver and sequencer can run unchanged on the
//! RP2040 board and against simulated hardware in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  piconsole-core (power sequencer)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  piconsole-drivers (MCP23008, SoftI2c)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  piconsole-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  piconsole-firmware (embassy-rp Flex)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OpenDrainLine`] - One wire of an open-drain bus
//! - [`i2c::I2cBus`] - I2C master transactions

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::OpenDrainLine;
pub use i2c::{I2cBus, I2cError};
