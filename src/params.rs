//! Strongly typed parameter enumerations for the MAX31856 driver.
//!
//! These enums map directly to datasheet field encodings of `CR0` and `CR1` and
//! are used across [`Config`](crate::config::Config), the register views in
//! [`registers`](crate::registers) and the [`RegisterImage`](crate::image::RegisterImage)
//! accessors.
//!
//! # Examples
//!
//! ```rust
//! use max31856::params::{Averaging, ConversionMode, ThermocoupleType};
//!
//! let mode = ConversionMode::Automatic;
//! let avg = Averaging::Samples4;
//! let tc = ThermocoupleType::K;
//! assert_eq!(avg.samples(), 4);
//! let _ = (mode, tc);
//! ```

use modular_bitfield::prelude::Specifier;

/// Conversion mode selection (`CR0.CMODE`, bit 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ConversionMode {
    /// Normally off; conversions only on one-shot requests (default).
    NormallyOff = 0,
    /// Automatic conversion every ~100 ms.
    Automatic = 1,
}

/// Open-circuit fault detection setting (`CR0.OCFAULT[1:0]`, bits 5:4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum OpenCircuitDetection {
    /// Detection disabled (default).
    Disabled = 0b00,
    /// Enabled, source resistance below 5 kΩ.
    LowResistance = 0b01,
    /// Enabled, 40 kΩ > source resistance > 5 kΩ, time constant below 2 ms.
    MidResistanceFast = 0b10,
    /// Enabled, 40 kΩ > source resistance > 5 kΩ, time constant above 2 ms.
    MidResistanceSlow = 0b11,
}

/// Internal cold-junction sensor selection (`CR0.CJ`, bit 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ColdJunction {
    /// Internal sensor enabled; CJTH/CJTL are chip computed (default).
    Internal = 0,
    /// Internal sensor disabled; CJTH/CJTL are written by the host.
    External = 1,
}

/// FAULT output behaviour (`CR0.FAULT`, bit 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum FaultMode {
    /// Comparator mode; faults follow the live condition (default).
    Comparator = 0,
    /// Interrupt mode; faults latch until cleared with `FAULTCLR`.
    Interrupt = 1,
}

/// Mains noise rejection filter (`CR0.50/60Hz`, bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum NoiseFilter {
    /// Reject 60 Hz and its harmonics (default).
    Hz60 = 0,
    /// Reject 50 Hz and its harmonics.
    Hz50 = 1,
}

/// Samples averaged per conversion, stored in the upper nibble of `CR1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Averaging {
    /// One sample (default).
    Samples1 = 0x0,
    /// Two samples.
    Samples2 = 0x1,
    /// Four samples.
    Samples4 = 0x2,
    /// Eight samples.
    Samples8 = 0x3,
    /// Sixteen samples.
    Samples16 = 0x4,
}

impl Averaging {
    /// Decodes the `CR1[7:4]` nibble. Codes `4..=7` all select sixteen samples.
    ///
    /// Decoding is many-to-one: re-encoding a reserved code writes `0x4`.
    pub const fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x07 {
            0 => Self::Samples1,
            1 => Self::Samples2,
            2 => Self::Samples4,
            3 => Self::Samples8,
            _ => Self::Samples16,
        }
    }

    /// Returns the nibble written to `CR1[7:4]`.
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// Returns the number of samples averaged.
    pub const fn samples(self) -> u8 {
        match self {
            Self::Samples1 => 1,
            Self::Samples2 => 2,
            Self::Samples4 => 4,
            Self::Samples8 => 8,
            Self::Samples16 => 16,
        }
    }
}

/// Thermocouple type, stored in the lower nibble of `CR1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ThermocoupleType {
    /// Type B.
    B = 0x0,
    /// Type E.
    E = 0x1,
    /// Type J.
    J = 0x2,
    /// Type K (default).
    K = 0x3,
    /// Type N.
    N = 0x4,
    /// Type R.
    R = 0x5,
    /// Type S.
    S = 0x6,
    /// Type T.
    T = 0x7,
    /// Voltage mode, gain 8.
    Gain8 = 0x8,
    /// Voltage mode, gain 32.
    Gain32 = 0xC,
}

impl ThermocoupleType {
    /// Decodes the `CR1[3:0]` nibble. Codes `0b10xx` select gain 8 and `0b11xx` gain 32.
    ///
    /// Decoding is many-to-one: re-encoding a voltage mode writes the
    /// canonical `0x8` or `0xC`. Use [`RegisterImage::set_cr1`] to keep the
    /// exact raw code.
    ///
    /// [`RegisterImage::set_cr1`]: crate::image::RegisterImage::set_cr1
    pub const fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => Self::B,
            0x1 => Self::E,
            0x2 => Self::J,
            0x3 => Self::K,
            0x4 => Self::N,
            0x5 => Self::R,
            0x6 => Self::S,
            0x7 => Self::T,
            0x8..=0xB => Self::Gain8,
            _ => Self::Gain32,
        }
    }

    /// Returns the nibble written to `CR1[3:0]`.
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the raw voltage modes, where the linearized
    /// temperature registers hold a scaled voltage instead of °C.
    pub const fn is_voltage_mode(self) -> bool {
        matches!(self, Self::Gain8 | Self::Gain32)
    }
}
