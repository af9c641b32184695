//! Hardware abstraction traits
//!
//! These traits define the interface between the sequencing logic and
//! the device drivers that implement it.

pub mod expander;

pub use expander::{ExpanderError, GpioExpander};
