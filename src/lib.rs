//! `#![no_std]` driver for the MAX31856 precision thermocouple-to-digital converter.
//!
//! The driver mirrors the sixteen device registers in a [`RegisterImage`].
//! [`Max31856::refresh`] reads the whole register file in one SPI transaction,
//! typed accessors on the image decode temperatures, thresholds and offsets,
//! and [`Max31856::commit`] writes the configurable registers back.
//!
//! ```no_run
//! # fn demo<SPI: embedded_hal::spi::SpiDevice>(spi: SPI) -> Result<(), max31856::Error<SPI::Error>> {
//! use max31856::params::{ConversionMode, ThermocoupleType};
//! use max31856::{Config, Max31856};
//!
//! let mut tc = Max31856::new_spi(spi);
//! tc.init()?;
//! tc.configure(
//!     Config::new()
//!         .conversion_mode(ConversionMode::Automatic)
//!         .thermocouple(ThermocoupleType::K)
//!         .build(),
//! )?;
//!
//! let status = tc.refresh()?;
//! let celsius = tc.registers().tc_temperature_celsius();
//! # let _ = (status, celsius);
//! # Ok(())
//! # }
//! ```

#![no_std]

mod error;
mod log;

pub mod codec;
pub mod config;
pub mod device;
pub mod image;
pub mod interface;
pub mod params;
pub mod registers;

pub use crate::config::Config;
pub use crate::device::Max31856;
pub use crate::error::{Error, Result};
pub use crate::image::RegisterImage;
pub use crate::registers::FaultStatus;
