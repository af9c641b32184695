//! Bus master implementations

pub mod soft_i2c;

pub use soft_i2c::{I2cTiming, SoftI2c};
