//! Register map definitions for the MAX31856 thermocouple converter.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{ColdJunction, ConversionMode, FaultMode, NoiseFilter, OpenCircuitDetection};

/// Register address of `CR0`.
pub const REG_CR0: u8 = 0x00;
/// Register address of `CR1`.
pub const REG_CR1: u8 = 0x01;
/// Register address of `MASK`.
pub const REG_MASK: u8 = 0x02;
/// Register address of `CJHF`.
pub const REG_CJHF: u8 = 0x03;
/// Register address of `CJLF`.
pub const REG_CJLF: u8 = 0x04;
/// Register address of `LTHFTH`.
pub const REG_LTHFTH: u8 = 0x05;
/// Register address of `LTHFTL`.
pub const REG_LTHFTL: u8 = 0x06;
/// Register address of `LTLFTH`.
pub const REG_LTLFTH: u8 = 0x07;
/// Register address of `LTLFTL`.
pub const REG_LTLFTL: u8 = 0x08;
/// Register address of `CJTO`.
pub const REG_CJTO: u8 = 0x09;
/// Register address of `CJTH`.
pub const REG_CJTH: u8 = 0x0A;
/// Register address of `CJTL`.
pub const REG_CJTL: u8 = 0x0B;
/// Register address of `LTCBH`.
pub const REG_LTCBH: u8 = 0x0C;
/// Register address of `LTCBM`.
pub const REG_LTCBM: u8 = 0x0D;
/// Register address of `LTCBL`.
pub const REG_LTCBL: u8 = 0x0E;
/// Register address of `SR`.
pub const REG_SR: u8 = 0x0F;

/// Number of addressable registers.
pub const REGISTER_COUNT: usize = 16;

/// Address-byte flag selecting a write transaction.
pub const WRITE_BIT: u8 = 0x80;

/// Registers always writable by the host (`CR0` through `CJTO`).
pub const WRITABLE_LEN_INTERNAL_CJ: usize = 10;

/// Writable registers when the internal cold-junction sensor is disabled
/// (`CJTH`/`CJTL` become host-provided).
pub const WRITABLE_LEN_EXTERNAL_CJ: usize = 12;

/// Power-on values of every register, in address order.
pub const FACTORY_DEFAULTS: [u8; REGISTER_COUNT] = [
    0x00, // CR0
    0x03, // CR1: 1 sample, type K
    0xFF, // MASK: all faults masked
    0x7F, // CJHF: +127 °C
    0xC0, // CJLF: -64 °C
    0x7F, 0xFF, // LTHFT: +2047.9375 °C
    0x80, 0x00, // LTLFT: -2048 °C
    0x00, // CJTO
    0x00, 0x00, // CJTH, CJTL
    0xFF, 0xF0, 0x00, // LTCBH, LTCBM, LTCBL
    0x00, // SR
];

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
    /// Writable only while the internal cold-junction sensor is disabled.
    ReadWriteExternalCj,
}

/// Returns the access permission of the register at `address`.
pub const fn access(address: u8) -> RegisterAccess {
    match address {
        REG_CR0..=REG_CJTO => RegisterAccess::ReadWrite,
        REG_CJTH | REG_CJTL => RegisterAccess::ReadWriteExternalCj,
        _ => RegisterAccess::ReadOnly,
    }
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `CR0` register (address `0x00`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cr0 {
    // 50/60 Hz rejection (bit 0).
    pub noise_filter: NoiseFilter,
    // Fault status clear, self-clearing on the device (bit 1).
    pub fault_clear: bool,
    // Comparator or interrupt fault mode (bit 2).
    pub fault_mode: FaultMode,
    // Internal cold-junction sensor disable (bit 3).
    pub cold_junction: ColdJunction,
    // Open-circuit detection (bits 5:4).
    pub open_circuit: OpenCircuitDetection,
    // One-shot conversion request, self-clearing on the device (bit 6).
    pub one_shot: bool,
    // Automatic or normally-off conversions (bit 7).
    pub conversion_mode: ConversionMode,
}

impl From<u8> for Cr0 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Cr0> for u8 {
    fn from(value: Cr0) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `MASK` register (address `0x02`).
///
/// A set bit masks the corresponding fault from the FAULT output.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultMask {
    // Open-circuit fault (bit 0).
    pub open: bool,
    // Over/under-voltage fault (bit 1).
    pub ovuv: bool,
    // Thermocouple low threshold (bit 2).
    pub tc_low: bool,
    // Thermocouple high threshold (bit 3).
    pub tc_high: bool,
    // Cold-junction low threshold (bit 4).
    pub cj_low: bool,
    // Cold-junction high threshold (bit 5).
    pub cj_high: bool,
    #[skip]
    __: B2,
}

impl FaultMask {
    /// Mask with every fault masked.
    ///
    /// Matches the power-on value `0xFF`, reserved bits 7:6 included.
    pub fn all() -> Self {
        Self::from(0xFF)
    }

    /// Mask with every fault reported.
    pub fn none() -> Self {
        Self::new()
    }
}

impl From<u8> for FaultMask {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<FaultMask> for u8 {
    fn from(value: FaultMask) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the fault status register `SR` (address `0x0F`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultStatus {
    // Thermocouple open circuit (bit 0).
    pub open: bool,
    // Over/under-voltage on the thermocouple inputs (bit 1).
    pub ovuv: bool,
    // Thermocouple below the low threshold (bit 2).
    pub tc_low: bool,
    // Thermocouple above the high threshold (bit 3).
    pub tc_high: bool,
    // Cold junction below the low threshold (bit 4).
    pub cj_low: bool,
    // Cold junction above the high threshold (bit 5).
    pub cj_high: bool,
    // Thermocouple outside the type's range (bit 6).
    pub tc_range: bool,
    // Cold junction outside its operating range (bit 7).
    pub cj_range: bool,
}

impl FaultStatus {
    /// Returns `true` when any fault bit is set.
    pub fn has_fault(&self) -> bool {
        self.into_bytes()[0] != 0
    }
}

impl From<u8> for FaultStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<FaultStatus> for u8 {
    fn from(value: FaultStatus) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FaultStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "FaultStatus {{ CJ_RANGE: {}, TC_RANGE: {}, CJHIGH: {}, CJLOW: {}, TCHIGH: {}, TCLOW: {}, OVUV: {}, OPEN: {} }}",
            self.cj_range(),
            self.tc_range(),
            self.cj_high(),
            self.cj_low(),
            self.tc_high(),
            self.tc_low(),
            self.ovuv(),
            self.open()
        );
    }
}

impl Register for Cr0 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CR0;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(FACTORY_DEFAULTS[REG_CR0 as usize]);
}

impl Register for FaultMask {
    type Raw = u8;
    const ADDRESS: u8 = REG_MASK;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(FACTORY_DEFAULTS[REG_MASK as usize]);
}

impl Register for FaultStatus {
    type Raw = u8;
    const ADDRESS: u8 = REG_SR;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = Some(FACTORY_DEFAULTS[REG_SR as usize]);
}

/// Builds the address byte that opens a transaction at `register`.
pub const fn address_byte(register: u8, write: bool) -> u8 {
    let address = register & 0x0F;
    if write { address | WRITE_BIT } else { address }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates that CR0 bitfields match the datasheet layout.
    #[test]
    fn cr0_layout_matches_datasheet() {
        let cr0 = Cr0::from(0b1001_1001);
        assert_eq!(cr0.noise_filter(), NoiseFilter::Hz50);
        assert!(!cr0.fault_clear());
        assert_eq!(cr0.fault_mode(), FaultMode::Comparator);
        assert_eq!(cr0.cold_junction(), ColdJunction::External);
        assert_eq!(cr0.open_circuit(), OpenCircuitDetection::LowResistance);
        assert!(!cr0.one_shot());
        assert_eq!(cr0.conversion_mode(), ConversionMode::Automatic);
    }

    #[test]
    fn cr0_builder_encodes_every_field() {
        let cr0 = Cr0::new()
            .with_conversion_mode(ConversionMode::Automatic)
            .with_open_circuit(OpenCircuitDetection::MidResistanceSlow)
            .with_fault_mode(FaultMode::Interrupt);

        assert_eq!(u8::from(cr0), 0b1011_0100);
    }

    #[test]
    fn fault_status_flags_follow_bit_positions() {
        let status = FaultStatus::from(0b1000_0001);
        assert!(status.open());
        assert!(status.cj_range());
        assert!(!status.tc_range());
        assert!(!status.ovuv());
        assert!(status.has_fault());
        assert!(!FaultStatus::from(0x00).has_fault());
    }

    #[test]
    fn fault_mask_all_matches_the_power_on_mask() {
        assert_eq!(u8::from(FaultMask::all()), FACTORY_DEFAULTS[REG_MASK as usize]);
        assert_eq!(Some(u8::from(FaultMask::all())), FaultMask::RESET_VALUE);
        assert!(FaultMask::all().open() && FaultMask::all().cj_high());
        assert_eq!(u8::from(FaultMask::none()), 0x00);
        assert!(FaultMask::from(0x20).cj_high());
    }

    #[test]
    fn access_splits_the_register_file() {
        assert_eq!(access(REG_CJTO), RegisterAccess::ReadWrite);
        assert_eq!(access(REG_CJTL), RegisterAccess::ReadWriteExternalCj);
        assert_eq!(access(REG_LTCBH), RegisterAccess::ReadOnly);
        assert_eq!(access(REG_SR), FaultStatus::ACCESS);
    }

    #[test]
    fn address_byte_sets_write_flag() {
        assert_eq!(address_byte(REG_CR0, false), 0x00);
        assert_eq!(address_byte(REG_CR0, true), 0x80);
        assert_eq!(address_byte(REG_SR, false), 0x0F);
        assert_eq!(address_byte(REG_CJTO, true), 0x89);
    }
}
