//! Bus interface abstraction for the MAX31856 driver.
//!
//! Every method is one bracketed transaction: the device is selected for the
//! address byte and the full byte sequence that follows, and deselected on
//! every exit path, including errors.

pub mod chip_select;
pub mod spi;

/// Abstraction over the low-level bus access required by the driver.
pub trait Max31856Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Prepares the bus for the first transaction.
    fn init(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.write_many(register, core::slice::from_ref(&value))
    }

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    /// Reads consecutive registers starting at `register` into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Writes consecutive registers starting at `register` from the provided buffer.
    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;
}
