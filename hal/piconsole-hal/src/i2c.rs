//! I2C bus abstractions
//!
//! Provides the transaction-level master interface used by register
//! drivers. Bit-level signalling lives in the bus implementation.

/// Errors from an I2C transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// A bus line was held low while the bus should be idle
    BusFault,
    /// No device acknowledged the address byte
    AddressNack,
    /// The device did not acknowledge a register or data byte
    DataNack,
}

/// I2C bus master
///
/// Every transaction ends with a stop condition, including failed ones,
/// so the bus is idle again when a method returns.
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cError>;
}

/// Address byte as sent on the wire
///
/// The 7-bit address is shifted up and the direction bit appended.
pub const fn address_byte(address: u8, read: bool) -> u8 {
    (address << 1) | read as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_byte() {
        assert_eq!(address_byte(0x20, false), 0x40);
        assert_eq!(address_byte(0x20, true), 0x41);
        assert_eq!(address_byte(0x7F, true), 0xFF);
    }
}
