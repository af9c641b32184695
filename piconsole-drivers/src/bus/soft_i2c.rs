//! Bit-banged I2C master
//!
//! Drives SCL and SDA as emulated open-drain lines with fixed delays
//! between edges. There is no clock stretching and no arbitration; the
//! controller is assumed to be the only master on the bus.

use embedded_hal::delay::DelayNs;
use piconsole_hal::i2c::address_byte;
use piconsole_hal::{I2cBus, I2cError, OpenDrainLine};

/// Bit timing
///
/// Microsecond delays inserted between line changes. They are not
/// calibrated against the CPU clock; the defaults give roughly 100kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cTiming {
    /// Delay after each clock edge of a data bit
    pub quarter_period_us: u32,
    /// Delay on either side of the acknowledge clock pulse
    pub ack_delay_us: u32,
    /// Time allowed for the pull-ups to raise released lines
    pub settle_us: u32,
}

impl I2cTiming {
    pub const DEFAULT: Self = Self {
        quarter_period_us: 4,
        ack_delay_us: 2,
        settle_us: 10,
    };
}

impl Default for I2cTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Software I2C master on two open-drain lines
pub struct SoftI2c<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
    timing: I2cTiming,
}

impl<SCL, SDA, D> SoftI2c<SCL, SDA, D>
where
    SCL: OpenDrainLine,
    SDA: OpenDrainLine,
    D: DelayNs,
{
    pub fn new(scl: SCL, sda: SDA, delay: D, timing: I2cTiming) -> Self {
        Self {
            scl,
            sda,
            delay,
            timing,
        }
    }

    /// Release both lines and check that the bus idles high
    pub fn initialize(&mut self) -> Result<(), I2cError> {
        self.sda.release();
        self.scl.release();
        self.delay.delay_us(self.timing.settle_us);

        if self.scl.is_low() || self.sda.is_low() {
            return Err(I2cError::BusFault);
        }
        Ok(())
    }

    /// Issue a start condition and send an address byte
    ///
    /// `address` is the full wire byte, direction bit included. Expects an
    /// idle bus (both lines high).
    pub fn start(&mut self, address: u8) -> Result<(), I2cError> {
        self.sda.drive_low();
        self.quarter();
        self.scl.drive_low();

        if self.write_byte(address) {
            Ok(())
        } else {
            Err(I2cError::AddressNack)
        }
    }

    /// Issue a repeated start mid-transaction and send an address byte
    pub fn repeated_start(&mut self, address: u8) -> Result<(), I2cError> {
        self.sda.release();
        self.scl.release();
        self.quarter();
        self.start(address)
    }

    /// Issue a stop condition, leaving both lines released
    pub fn stop(&mut self) {
        self.sda.drive_low();
        self.quarter();
        self.scl.release();
        self.quarter();
        // SDA rising while SCL is high
        self.sda.release();
        self.quarter();
    }

    /// Clock out one byte MSB first
    ///
    /// Returns true if the receiver acknowledged. Leaves SCL and SDA low.
    pub fn write_byte(&mut self, value: u8) -> bool {
        for bit in (0..8).rev() {
            if value & (1 << bit) != 0 {
                self.sda.release();
            } else {
                self.sda.drive_low();
            }
            self.scl.release();
            self.quarter();
            self.scl.drive_low();
            self.quarter();
        }

        self.sda.release();
        self.scl.release();
        self.delay.delay_us(self.timing.ack_delay_us);
        let ack = self.sda.is_low();
        self.scl.drive_low();
        self.delay.delay_us(self.timing.ack_delay_us);
        self.sda.drive_low();

        ack
    }

    /// Clock in one byte MSB first
    ///
    /// Acknowledges the byte unless `is_last`, in which case the ack slot
    /// is left released to tell the device the read is over.
    pub fn read_byte(&mut self, is_last: bool) -> u8 {
        let mut value = 0;
        self.sda.release();

        for _ in 0..8 {
            value <<= 1;
            self.quarter();
            self.scl.release();
            if self.sda.is_high() {
                value |= 1;
            }
            self.scl.drive_low();
        }

        if is_last {
            self.sda.release();
        } else {
            self.sda.drive_low();
        }
        self.scl.release();
        self.delay.delay_us(self.timing.ack_delay_us);
        self.scl.drive_low();
        self.delay.delay_us(self.timing.ack_delay_us);
        self.sda.drive_low();

        value
    }

    /// Release the lines and delay provider
    pub fn release(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }

    fn quarter(&mut self) {
        self.delay.delay_us(self.timing.quarter_period_us);
    }

    fn send(&mut self, data: &[u8]) -> Result<(), I2cError> {
        for &byte in data {
            if !self.write_byte(byte) {
                return Err(I2cError::DataNack);
            }
        }
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) {
        let last = buf.len().saturating_sub(1);
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(i == last);
        }
    }

    /// Run the body of a transaction and always finish with a stop
    fn transaction(
        &mut self,
        address: u8,
        body: impl FnOnce(&mut Self) -> Result<(), I2cError>,
    ) -> Result<(), I2cError> {
        let result = body(self);
        self.stop();

        #[cfg(feature = "defmt")]
        if let Err(e) = result {
            defmt::warn!("I2C transaction with {=u8:#x} failed: {:?}", address, e);
        }
        #[cfg(not(feature = "defmt"))]
        let _ = address;

        result
    }
}

impl<SCL, SDA, D> I2cBus for SoftI2c<SCL, SDA, D>
where
    SCL: OpenDrainLine,
    SDA: OpenDrainLine,
    D: DelayNs,
{
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        self.transaction(address, |bus| {
            bus.start(address_byte(address, false))?;
            bus.send(data)
        })
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        self.transaction(address, |bus| {
            bus.start(address_byte(address, true))?;
            bus.receive(buf);
            Ok(())
        })
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cError> {
        self.transaction(address, |bus| {
            bus.start(address_byte(address, false))?;
            bus.send(write_data)?;
            bus.repeated_start(address_byte(address, true))?;
            bus.receive(read_buf);
            Ok(())
        })
    }
}
