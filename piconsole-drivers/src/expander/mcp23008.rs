//! MCP23008 8-bit I/O expander
//!
//! Register-level driver for the Microchip MCP23008 with the sequential
//! operation mode disabled, so every access is a single register.

use piconsole_core::config::ExpanderConfig;
use piconsole_core::traits::{ExpanderError, GpioExpander};
use piconsole_hal::I2cBus;

/// MCP23008 register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// I/O direction (1 = input)
    Iodir = 0x00,
    /// Input polarity
    Ipol = 0x01,
    /// Interrupt-on-change enable
    Gpinten = 0x02,
    /// Default compare value for interrupt-on-change
    Defval = 0x03,
    /// Interrupt control
    Intcon = 0x04,
    /// Device configuration
    Iocon = 0x05,
    /// Pull-up enable
    Gppu = 0x06,
    /// Interrupt flags
    Intf = 0x07,
    /// Interrupt capture
    Intcap = 0x08,
    /// Port value
    Gpio = 0x09,
    /// Output latch
    Olat = 0x0A,
}

impl Register {
    /// Register index on the wire
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// MCP23008 driver
///
/// Owns the bus and the output shadow. The shadow starts at zero, which
/// matches the device's power-on latch value.
pub struct Mcp23008<B> {
    bus: B,
    config: ExpanderConfig,
    shadow: u8,
}

impl<B: I2cBus> Mcp23008<B> {
    pub fn new(bus: B, config: ExpanderConfig) -> Self {
        Self {
            bus,
            config,
            shadow: 0,
        }
    }

    /// Put the device into its working configuration
    ///
    /// Outputs are enabled only after the latch holds the power-up value,
    /// so nothing is switched on while the pins change direction. Every
    /// write is attempted even if an earlier one failed; the first failure
    /// is returned.
    pub fn configure(&mut self) -> Result<(), ExpanderError> {
        let config = self.config;

        let iocon = self.write_register(Register::Iocon, config.iocon);
        let ipol = self.write_register(Register::Ipol, 0x00);
        let gpinten = self.write_register(Register::Gpinten, 0x00);
        let gppu = self.write_register(Register::Gppu, config.pull_ups);
        let gpio = self.write_gpio(config.power_up);
        let iodir = self.write_register(Register::Iodir, config.direction);

        iocon.and(ipol).and(gpinten).and(gppu).and(gpio).and(iodir)
    }

    /// Write a single register
    pub fn write_register(&mut self, register: Register, value: u8) -> Result<(), ExpanderError> {
        self.bus
            .write(self.config.address, &[register.addr(), value])
            .map_err(ExpanderError::from)
    }

    /// Read a single register
    pub fn read_register(&mut self, register: Register) -> Result<u8, ExpanderError> {
        let mut buf = [0u8; 1];
        self.bus
            .write_read(self.config.address, &[register.addr()], &mut buf)?;
        Ok(buf[0])
    }

    /// Access the underlying bus
    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> GpioExpander for Mcp23008<B> {
    fn read_gpio(&mut self) -> Result<u8, ExpanderError> {
        self.read_register(Register::Gpio)
    }

    /// Write the GPIO register
    ///
    /// The shadow takes the new value whether or not the device
    /// acknowledged it. Writes are never retried.
    fn write_gpio(&mut self, value: u8) -> Result<(), ExpanderError> {
        self.shadow = value;
        self.write_register(Register::Gpio, value)
    }

    fn output_shadow(&self) -> u8 {
        self.shadow
    }
}
