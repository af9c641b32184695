//! Configuration types
//!
//! Everything here is a compile-time constant; the controller has no
//! runtime configuration surface.

pub mod expander;
pub mod timing;

pub use expander::*;
pub use timing::*;
