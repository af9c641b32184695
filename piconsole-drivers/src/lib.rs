//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in piconsole-hal and piconsole-core:
//!
//! - Bit-banged I2C master over two open-drain lines
//! - MCP23008 8-bit GPIO expander

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod expander;

#[cfg(test)]
mod sim;
