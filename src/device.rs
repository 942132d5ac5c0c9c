//! High-level MAX31856 device driver implementation.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Mode, SpiBus, SpiDevice, MODE_3};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::image::RegisterImage;
use crate::interface::chip_select::ChipSelectInterface;
use crate::interface::spi::SpiInterface;
use crate::interface::Max31856Interface;
use crate::log::{debug, trace};
use crate::registers::{Cr0, FaultStatus, Register, REGISTER_COUNT};

/// High-level synchronous driver for the MAX31856 thermocouple converter.
///
/// The driver keeps a [`RegisterImage`] that mirrors the device. Reads and
/// writes of individual fields go through [`registers`](Self::registers) and
/// [`registers_mut`](Self::registers_mut); only [`refresh`](Self::refresh),
/// [`commit`](Self::commit) and the single-register helpers touch the bus.
pub struct Max31856<IFACE> {
    interface: IFACE,
    registers: RegisterImage,
}

impl<IFACE> Max31856<IFACE> {
    /// SPI mode required by the device (CPOL = 1, CPHA = 1).
    pub const SPI_MODE: Mode = MODE_3;
    /// Highest SPI clock used with the device, in hertz.
    pub const SPI_FREQUENCY_HZ: u32 = 2_000_000;
    /// Bits are shifted most significant first, the `embedded-hal` default.
    pub const SPI_MSB_FIRST: bool = true;

    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// The register image starts zeroed; call [`init`](Self::init) or
    /// [`refresh`](Self::refresh) to load it from the device.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            registers: RegisterImage::new(),
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    // ==================================================================
    // == Register Image ================================================
    // ==================================================================
    /// Returns the cached register image.
    pub fn registers(&self) -> &RegisterImage {
        &self.registers
    }

    /// Returns the cached register image for field updates.
    ///
    /// Changes reach the device on the next [`commit`](Self::commit).
    pub fn registers_mut(&mut self) -> &mut RegisterImage {
        &mut self.registers
    }

    /// Loads the power-on values into the register image without touching the bus.
    pub fn reset_to_factory_defaults(&mut self) {
        self.registers.reset_to_factory_defaults();
    }
}

impl<SPI> Max31856<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI) -> Self {
        Self::new(SpiInterface::new(spi))
    }

    /// Releases the driver, returning the SPI device.
    pub fn release_spi(self) -> SPI {
        self.release().release()
    }
}

impl<BUS, CS> Max31856<ChipSelectInterface<BUS, CS>>
where
    BUS: SpiBus,
    CS: OutputPin,
{
    /// Convenience constructor for an exclusive bus with a dedicated select pin.
    pub fn new_with_chip_select(bus: BUS, cs: CS) -> Self {
        Self::new(ChipSelectInterface::new(bus, cs))
    }

    /// Releases the driver, returning the bus and select pin.
    pub fn release_chip_select(self) -> (BUS, CS) {
        self.release().release()
    }
}

impl<IFACE, CommE> Max31856<IFACE>
where
    IFACE: Max31856Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Prepares the select line and loads the register image from the device.
    ///
    /// Returns the fault status register, like [`refresh`](Self::refresh).
    pub fn init(&mut self) -> Result<u8, CommE> {
        self.interface.init().map_err(Error::from)?;
        self.refresh()
    }

    // ==================================================================
    // == Block Transactions ============================================
    // ==================================================================
    /// Reads all sixteen registers into the image, starting at address 0.
    ///
    /// Returns the fault status register (the last byte read). On a bus
    /// error the image is left unchanged.
    pub fn refresh(&mut self) -> Result<u8, CommE> {
        let mut buf = [0u8; REGISTER_COUNT];
        self
            .interface
            .read_many(Cr0::ADDRESS, &mut buf)
            .map_err(Error::from)?;
        *self.registers.bytes_mut() = buf;

        let status = self.registers.status();
        trace!("refresh: {=[u8]:#x}", &self.registers.as_bytes()[..]);
        Ok(status)
    }

    /// Writes the writable prefix of the image to the device, starting at address 0.
    ///
    /// Ten bytes (`CR0`..`CJTO`) are sent while the internal cold-junction
    /// sensor is enabled, twelve (adding `CJTH`/`CJTL`) while it is disabled.
    /// The linearized temperature and status registers are never sent.
    pub fn commit(&mut self) -> Result<(), CommE> {
        let data = self.registers.writable_bytes();
        trace!("commit: {=[u8]:#x}", data);
        self
            .interface
            .write_many(Cr0::ADDRESS, data)
            .map_err(Error::from)
    }

    // ==================================================================
    // == Configuration =================================================
    // ==================================================================
    /// Validates `config`, applies it to the image and commits.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        config.validate().map_err(|_| Error::InvalidConfig)?;

        config.apply_to(&mut self.registers);
        debug!("configure: CR0={=u8:#x} CR1={=u8:#x}", self.registers.cr0(), self.registers.cr1());
        self.commit()
    }

    // ==================================================================
    // == Status & Single-Register Commands =============================
    // ==================================================================
    /// Reads only the fault status register and updates the cached copy.
    pub fn read_fault_status(&mut self) -> Result<FaultStatus, CommE> {
        let status = self
            .interface
            .read_register(FaultStatus::ADDRESS)
            .map_err(Error::from)?;

        self.registers.set_status(status);
        Ok(FaultStatus::from(status))
    }

    /// Clears latched faults (interrupt fault mode) by pulsing `CR0.FAULTCLR`.
    pub fn clear_faults(&mut self) -> Result<(), CommE> {
        self.pulse_cr0(|cr0| cr0.set_fault_clear(true))
    }

    /// Requests a single conversion by pulsing `CR0.1SHOT`.
    ///
    /// Results are available after the conversion time; read them with
    /// [`refresh`](Self::refresh).
    pub fn trigger_one_shot(&mut self) -> Result<(), CommE> {
        self.pulse_cr0(|cr0| cr0.set_one_shot(true))
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    /// Writes `CR0` with a self-clearing bit set, leaving the cached value clear.
    fn pulse_cr0<F>(&mut self, mutate: F) -> Result<(), CommE>
    where
        F: FnOnce(&mut Cr0),
    {
        let mut cr0 = self.registers.config0();
        cr0.set_fault_clear(false);
        cr0.set_one_shot(false);
        self.registers.set_config0(cr0);

        mutate(&mut cr0);
        let value = u8::from(cr0);
        debug!("CR0 pulse: {=u8:#x}", value);
        self
            .interface
            .write_register(Cr0::ADDRESS, value)
            .map_err(Error::from)
    }
}
