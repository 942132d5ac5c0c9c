//! SPI interface that drives its own chip-select line.
//!
//! Useful when the MAX31856 owns a bus exclusively and the HAL hands out a raw
//! `SpiBus` plus an `OutputPin` instead of a `SpiDevice`. The select line is
//! driven high by [`init`](Max31856Interface::init). After every exchange the
//! bus is flushed and the line driven high again, even when the exchange
//! failed; the first error is returned afterwards.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::Max31856Interface;
use crate::registers::address_byte;

/// Errors reported by [`ChipSelectInterface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError<SpiE, PinE> {
    /// The SPI bus reported an error.
    Spi(SpiE),
    /// Driving the chip-select line failed.
    ChipSelect(PinE),
}

/// SPI bus plus dedicated active-low chip-select pin.
pub struct ChipSelectInterface<BUS, CS> {
    bus: BUS,
    cs: CS,
}

impl<BUS, CS> ChipSelectInterface<BUS, CS> {
    /// Creates a new interface from an exclusive bus and its select pin.
    pub const fn new(bus: BUS, cs: CS) -> Self {
        Self { bus, cs }
    }

    /// Consumes the interface and returns the bus and pin.
    pub fn release(self) -> (BUS, CS) {
        (self.bus, self.cs)
    }
}

impl<BUS, CS> ChipSelectInterface<BUS, CS>
where
    BUS: SpiBus,
    CS: OutputPin,
{
    fn transaction<F>(&mut self, exchange: F) -> Result<(), BusError<BUS::Error, CS::Error>>
    where
        F: FnOnce(&mut BUS) -> Result<(), BUS::Error>,
    {
        self.cs.set_low().map_err(BusError::ChipSelect)?;
        let result = exchange(&mut self.bus);
        let flushed = self.bus.flush();
        let deselect = self.cs.set_high();
        result.and(flushed).map_err(BusError::Spi)?;
        deselect.map_err(BusError::ChipSelect)
    }
}

impl<BUS, CS> Max31856Interface for ChipSelectInterface<BUS, CS>
where
    BUS: SpiBus,
    CS: OutputPin,
{
    type Error = BusError<BUS::Error, CS::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(BusError::ChipSelect)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let command = [address_byte(register, false)];
        self.transaction(|bus| {
            bus.write(&command)?;
            bus.read(buf)
        })
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        let command = [address_byte(register, true)];
        self.transaction(|bus| {
            bus.write(&command)?;
            bus.write(data)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BusError, ChipSelectInterface};
    use crate::interface::Max31856Interface;
    use embedded_hal::digital::{self, OutputPin};
    use embedded_hal::spi::{self, ErrorKind, SpiBus};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    impl spi::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[derive(Default)]
    struct RecordingBus {
        written: [u8; 16],
        written_len: usize,
        response: u8,
        fail_after: Option<usize>,
        flushes: usize,
    }

    impl RecordingBus {
        fn push(&mut self, words: &[u8]) -> Result<(), BusFault> {
            for &word in words {
                if self.fail_after == Some(self.written_len) {
                    return Err(BusFault);
                }
                self.written[self.written_len] = word;
                self.written_len += 1;
            }
            Ok(())
        }
    }

    impl spi::ErrorType for RecordingBus {
        type Error = BusFault;
    }

    impl SpiBus for RecordingBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(self.response);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.push(words)
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.push(write)?;
            read.fill(self.response);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            self.push(words)?;
            words.fill(self.response);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    /// Records the line level and how often it was driven low.
    struct RecordingPin {
        high: bool,
        selects: usize,
    }

    impl digital::ErrorType for RecordingPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.selects += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    fn interface(bus: RecordingBus) -> ChipSelectInterface<RecordingBus, RecordingPin> {
        ChipSelectInterface::new(bus, RecordingPin { high: false, selects: 0 })
    }

    #[test]
    fn init_deselects_the_device() {
        let mut iface = interface(RecordingBus::default());
        iface.init().unwrap();
        let (_, cs) = iface.release();
        assert!(cs.high);
        assert_eq!(cs.selects, 0);
    }

    #[test]
    fn read_brackets_address_and_payload() {
        let mut iface = interface(RecordingBus { response: 0x5A, ..Default::default() });

        let mut buf = [0u8; 16];
        iface.read_many(0x00, &mut buf).unwrap();

        assert_eq!(buf, [0x5A; 16]);
        let (bus, cs) = iface.release();
        assert_eq!(&bus.written[..bus.written_len], &[0x00]);
        assert_eq!(bus.flushes, 1);
        assert!(cs.high);
        assert_eq!(cs.selects, 1);
    }

    #[test]
    fn write_sends_address_then_data() {
        let mut iface = interface(RecordingBus::default());

        iface.write_many(0x00, &[0x00, 0x03, 0xFF]).unwrap();

        let (bus, cs) = iface.release();
        assert_eq!(&bus.written[..bus.written_len], &[0x80, 0x00, 0x03, 0xFF]);
        assert!(cs.high);
    }

    #[test]
    fn failed_transfer_still_deselects() {
        let mut iface = interface(RecordingBus { fail_after: Some(2), ..Default::default() });

        let result = iface.write_many(0x00, &[0x01, 0x02, 0x03]);

        assert_eq!(result, Err(BusError::Spi(BusFault)));
        let (bus, cs) = iface.release();
        assert_eq!(bus.written_len, 2);
        assert_eq!(bus.flushes, 1, "bus must be flushed before deselecting");
        assert!(cs.high, "chip select must be released after a bus error");
        assert_eq!(cs.selects, 1);
    }
}
