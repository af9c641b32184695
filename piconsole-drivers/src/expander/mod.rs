//! GPIO expander drivers

pub mod mcp23008;

pub use mcp23008::{Mcp23008, Register};
