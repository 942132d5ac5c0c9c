//! In-memory mirror of the MAX31856 register file.
//!
//! [`RegisterImage`] stores the sixteen registers as a flat byte array in
//! address order. Typed accessors decode and encode individual fields through
//! [`codec`](crate::codec); nothing here touches the bus. The driver fills the
//! image on [`refresh`](crate::Max31856::refresh) and transmits its writable
//! prefix on [`commit`](crate::Max31856::commit).
//!
//! Integer accessors use each field's native unit (°C×128, °C×64, °C×16 or
//! °C). Float setters truncate toward zero and then narrow to the field width;
//! the `try_set_*` variants reject out-of-range input instead.

use core::fmt;

use crate::codec::{
    self, RangeError, CJ_OFFSET_SCALE, CJ_TEMPERATURE_MAX, CJ_TEMPERATURE_MIN,
    CJ_TEMPERATURE_SCALE, CJ_THRESHOLD_SCALE, TC_TEMPERATURE_SCALE, TC_THRESHOLD_SCALE,
};
use crate::params::{Averaging, ColdJunction, ThermocoupleType};
use crate::registers::{
    Cr0, FaultMask, FaultStatus, Register, FACTORY_DEFAULTS, REGISTER_COUNT, REG_CJHF, REG_CJLF,
    REG_CJTH, REG_CJTO, REG_CR1, REG_LTCBH, REG_LTCBL, REG_LTHFTH, REG_LTLFTH,
    WRITABLE_LEN_EXTERNAL_CJ, WRITABLE_LEN_INTERNAL_CJ,
};

/// Snapshot of all sixteen MAX31856 registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterImage {
    regs: [u8; REGISTER_COUNT],
}

impl RegisterImage {
    // ==================================================================
    // == Construction & Raw Access =====================================
    // ==================================================================
    /// Creates an all-zero image.
    pub const fn new() -> Self {
        Self { regs: [0; REGISTER_COUNT] }
    }

    /// Creates an image holding the power-on register values.
    pub const fn factory() -> Self {
        Self { regs: FACTORY_DEFAULTS }
    }

    /// Creates an image from raw register bytes in address order.
    pub const fn from_bytes(regs: [u8; REGISTER_COUNT]) -> Self {
        Self { regs }
    }

    /// Assigns the power-on value to every register.
    ///
    /// Only the image changes; call [`commit`](crate::Max31856::commit) to
    /// send the values to the device.
    pub fn reset_to_factory_defaults(&mut self) {
        self.regs = FACTORY_DEFAULTS;
    }

    /// Returns all registers in address order.
    pub const fn as_bytes(&self) -> &[u8; REGISTER_COUNT] {
        &self.regs
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; REGISTER_COUNT] {
        &mut self.regs
    }

    /// Returns the register at `address`, or `None` past `0x0F`.
    pub fn register(&self, address: u8) -> Option<u8> {
        self.regs.get(address as usize).copied()
    }

    /// Number of leading registers transmitted on commit.
    ///
    /// `CJTH`/`CJTL` are included only while the internal cold-junction sensor
    /// is disabled; the result always follows the current `CR0` value.
    pub fn writable_len(&self) -> usize {
        match self.config0().cold_junction() {
            ColdJunction::External => WRITABLE_LEN_EXTERNAL_CJ,
            ColdJunction::Internal => WRITABLE_LEN_INTERNAL_CJ,
        }
    }

    /// Returns the registers transmitted on commit.
    pub fn writable_bytes(&self) -> &[u8] {
        &self.regs[..self.writable_len()]
    }

    fn pair(&self, msb: u8) -> [u8; 2] {
        let at = msb as usize;
        [self.regs[at], self.regs[at + 1]]
    }

    fn set_pair(&mut self, msb: u8, bytes: [u8; 2]) {
        let at = msb as usize;
        self.regs[at..at + 2].copy_from_slice(&bytes);
    }

    // ==================================================================
    // == Configuration, Mask & Status ==================================
    // ==================================================================
    /// Raw `CR0`.
    pub fn cr0(&self) -> u8 {
        self.regs[Cr0::ADDRESS as usize]
    }

    /// Sets raw `CR0`.
    pub fn set_cr0(&mut self, value: u8) {
        self.regs[Cr0::ADDRESS as usize] = value;
    }

    /// `CR0` as a bitfield view.
    pub fn config0(&self) -> Cr0 {
        Cr0::from(self.cr0())
    }

    /// Stores a `CR0` bitfield view.
    pub fn set_config0(&mut self, value: Cr0) {
        self.set_cr0(u8::from(value));
    }

    /// Raw `CR1`.
    pub fn cr1(&self) -> u8 {
        self.regs[REG_CR1 as usize]
    }

    /// Sets raw `CR1`.
    pub fn set_cr1(&mut self, value: u8) {
        self.regs[REG_CR1 as usize] = value;
    }

    /// Averaging mode from `CR1[7:4]`.
    pub fn averaging(&self) -> Averaging {
        Averaging::from_nibble(self.cr1() >> 4)
    }

    /// Replaces `CR1[7:4]`, keeping the thermocouple type nibble.
    pub fn set_averaging(&mut self, averaging: Averaging) {
        self.set_cr1((self.cr1() & 0x0F) | (averaging.nibble() << 4));
    }

    /// Thermocouple type from `CR1[3:0]`.
    pub fn thermocouple_type(&self) -> ThermocoupleType {
        ThermocoupleType::from_nibble(self.cr1())
    }

    /// Replaces `CR1[3:0]`, keeping the averaging nibble.
    pub fn set_thermocouple_type(&mut self, tc_type: ThermocoupleType) {
        self.set_cr1((self.cr1() & 0xF0) | tc_type.nibble());
    }

    /// Raw `MASK`.
    pub fn mask(&self) -> u8 {
        self.regs[FaultMask::ADDRESS as usize]
    }

    /// Sets raw `MASK`.
    pub fn set_mask(&mut self, value: u8) {
        self.regs[FaultMask::ADDRESS as usize] = value;
    }

    /// `MASK` as a bitfield view.
    pub fn fault_mask(&self) -> FaultMask {
        FaultMask::from(self.mask())
    }

    /// Stores a `MASK` bitfield view.
    pub fn set_fault_mask(&mut self, mask: FaultMask) {
        self.set_mask(u8::from(mask));
    }

    /// Raw fault status register `SR`.
    pub fn status(&self) -> u8 {
        self.regs[FaultStatus::ADDRESS as usize]
    }

    pub(crate) fn set_status(&mut self, value: u8) {
        self.regs[FaultStatus::ADDRESS as usize] = value;
    }

    /// Fault status flags decoded from `SR`.
    pub fn fault_status(&self) -> FaultStatus {
        FaultStatus::from(self.status())
    }

    // ==================================================================
    // == Cold-Junction Fault Thresholds (°C) ===========================
    // ==================================================================
    /// Cold-junction high fault threshold in °C.
    pub fn cj_high_fault(&self) -> i8 {
        codec::decode_i8(self.regs[REG_CJHF as usize])
    }

    /// Cold-junction high fault threshold in °C.
    pub fn cj_high_fault_celsius(&self) -> f32 {
        codec::raw_to_celsius(self.cj_high_fault() as i32, CJ_THRESHOLD_SCALE)
    }

    /// Cold-junction high fault threshold in °F.
    pub fn cj_high_fault_fahrenheit(&self) -> f32 {
        codec::celsius_to_fahrenheit(self.cj_high_fault_celsius())
    }

    /// Sets the cold-junction high fault threshold in °C.
    pub fn set_cj_high_fault(&mut self, celsius: i8) {
        self.regs[REG_CJHF as usize] = codec::encode_i8(celsius);
    }

    /// Sets the cold-junction high fault threshold from °C.
    pub fn set_cj_high_fault_celsius(&mut self, celsius: f32) {
        self.set_cj_high_fault(codec::celsius_to_raw(celsius, CJ_THRESHOLD_SCALE) as i8);
    }

    /// Sets the cold-junction high fault threshold from °F.
    pub fn set_cj_high_fault_fahrenheit(&mut self, fahrenheit: f32) {
        self.set_cj_high_fault_celsius(codec::fahrenheit_to_celsius(fahrenheit));
    }

    /// Sets the cold-junction high fault threshold, rejecting values outside -128..=127 °C.
    pub fn try_set_cj_high_fault_celsius(&mut self, celsius: f32) -> Result<(), RangeError> {
        let raw = checked_i8(celsius, CJ_THRESHOLD_SCALE)?;
        self.set_cj_high_fault(raw);
        Ok(())
    }

    /// Cold-junction low fault threshold in °C.
    pub fn cj_low_fault(&self) -> i8 {
        codec::decode_i8(self.regs[REG_CJLF as usize])
    }

    /// Cold-junction low fault threshold in °C.
    pub fn cj_low_fault_celsius(&self) -> f32 {
        codec::raw_to_celsius(self.cj_low_fault() as i32, CJ_THRESHOLD_SCALE)
    }

    /// Cold-junction low fault threshold in °F.
    pub fn cj_low_fault_fahrenheit(&self) -> f32 {
        codec::celsius_to_fahrenheit(self.cj_low_fault_celsius())
    }

    /// Sets the cold-junction low fault threshold in °C.
    pub fn set_cj_low_fault(&mut self, celsius: i8) {
        self.regs[REG_CJLF as usize] = codec::encode_i8(celsius);
    }

    /// Sets the cold-junction low fault threshold from °C.
    pub fn set_cj_low_fault_celsius(&mut self, celsius: f32) {
        self.set_cj_low_fault(codec::celsius_to_raw(celsius, CJ_THRESHOLD_SCALE) as i8);
    }

    /// Sets the cold-junction low fault threshold from °F.
    pub fn set_cj_low_fault_fahrenheit(&mut self, fahrenheit: f32) {
        self.set_cj_low_fault_celsius(codec::fahrenheit_to_celsius(fahrenheit));
    }

    /// Sets the cold-junction low fault threshold, rejecting values outside -128..=127 °C.
    pub fn try_set_cj_low_fault_celsius(&mut self, celsius: f32) -> Result<(), RangeError> {
        let raw = checked_i8(celsius, CJ_THRESHOLD_SCALE)?;
        self.set_cj_low_fault(raw);
        Ok(())
    }

    // ==================================================================
    // == Linearized Temperature Fault Thresholds (°C×16) ===============
    // ==================================================================
    /// Linearized temperature high fault threshold in °C×16.
    pub fn tc_high_fault(&self) -> i16 {
        codec::decode_tc_threshold(self.pair(REG_LTHFTH))
    }

    /// Linearized temperature high fault threshold in °C.
    pub fn tc_high_fault_celsius(&self) -> f32 {
        codec::raw_to_celsius(self.tc_high_fault() as i32, TC_THRESHOLD_SCALE)
    }

    /// Linearized temperature high fault threshold in °F.
    pub fn tc_high_fault_fahrenheit(&self) -> f32 {
        codec::celsius_to_fahrenheit(self.tc_high_fault_celsius())
    }

    /// Sets the linearized temperature high fault threshold in °C×16.
    pub fn set_tc_high_fault(&mut self, raw: i16) {
        self.set_pair(REG_LTHFTH, codec::encode_tc_threshold(raw));
    }

    /// Sets the linearized temperature high fault threshold from °C.
    pub fn set_tc_high_fault_celsius(&mut self, celsius: f32) {
        self.set_tc_high_fault(codec::celsius_to_raw(celsius, TC_THRESHOLD_SCALE) as i16);
    }

    /// Sets the linearized temperature high fault threshold from °F.
    pub fn set_tc_high_fault_fahrenheit(&mut self, fahrenheit: f32) {
        self.set_tc_high_fault_celsius(codec::fahrenheit_to_celsius(fahrenheit));
    }

    /// Sets the linearized temperature high fault threshold, rejecting values
    /// outside -2048..=2047.9375 °C.
    pub fn try_set_tc_high_fault_celsius(&mut self, celsius: f32) -> Result<(), RangeError> {
        let raw = checked_i16(celsius, TC_THRESHOLD_SCALE)?;
        self.set_tc_high_fault(raw);
        Ok(())
    }

    /// Linearized temperature low fault threshold in °C×16.
    pub fn tc_low_fault(&self) -> i16 {
        codec::decode_tc_threshold(self.pair(REG_LTLFTH))
    }

    /// Linearized temperature low fault threshold in °C.
    pub fn tc_low_fault_celsius(&self) -> f32 {
        codec::raw_to_celsius(self.tc_low_fault() as i32, TC_THRESHOLD_SCALE)
    }

    /// Linearized temperature low fault threshold in °F.
    pub fn tc_low_fault_fahrenheit(&self) -> f32 {
        codec::celsius_to_fahrenheit(self.tc_low_fault_celsius())
    }

    /// Sets the linearized temperature low fault threshold in °C×16.
    pub fn set_tc_low_fault(&mut self, raw: i16) {
        self.set_pair(REG_LTLFTH, codec::encode_tc_threshold(raw));
    }

    /// Sets the linearized temperature low fault threshold from °C.
    pub fn set_tc_low_fault_celsius(&mut self, celsius: f32) {
        self.set_tc_low_fault(codec::celsius_to_raw(celsius, TC_THRESHOLD_SCALE) as i16);
    }

    /// Sets the linearized temperature low fault threshold from °F.
    pub fn set_tc_low_fault_fahrenheit(&mut self, fahrenheit: f32) {
        self.set_tc_low_fault_celsius(codec::fahrenheit_to_celsius(fahrenheit));
    }

    /// Sets the linearized temperature low fault threshold, rejecting values
    /// outside -2048..=2047.9375 °C.
    pub fn try_set_tc_low_fault_celsius(&mut self, celsius: f32) -> Result<(), RangeError> {
        let raw = checked_i16(celsius, TC_THRESHOLD_SCALE)?;
        self.set_tc_low_fault(raw);
        Ok(())
    }

    // ==================================================================
    // == Cold-Junction Offset (°C×16) ==================================
    // ==================================================================
    /// Cold-junction offset in °C×16.
    pub fn cj_offset(&self) -> i8 {
        codec::decode_i8(self.regs[REG_CJTO as usize])
    }

    /// Cold-junction offset in °C.
    pub fn cj_offset_celsius(&self) -> f32 {
        codec::raw_to_celsius(self.cj_offset() as i32, CJ_OFFSET_SCALE)
    }

    /// Cold-junction offset in °F.
    ///
    /// The offset is a temperature difference, so only the 1.8 factor applies.
    pub fn cj_offset_fahrenheit(&self) -> f32 {
        codec::celsius_delta_to_fahrenheit(self.cj_offset_celsius())
    }

    /// Sets the cold-junction offset in °C×16.
    pub fn set_cj_offset(&mut self, raw: i8) {
        self.regs[REG_CJTO as usize] = codec::encode_i8(raw);
    }

    /// Sets the cold-junction offset from °C.
    pub fn set_cj_offset_celsius(&mut self, celsius: f32) {
        self.set_cj_offset(codec::celsius_to_raw(celsius, CJ_OFFSET_SCALE) as i8);
    }

    /// Sets the cold-junction offset from a difference in °F.
    pub fn set_cj_offset_fahrenheit(&mut self, fahrenheit: f32) {
        self.set_cj_offset_celsius(codec::fahrenheit_delta_to_celsius(fahrenheit));
    }

    /// Sets the cold-junction offset, rejecting values outside -8..=7.9375 °C.
    pub fn try_set_cj_offset_celsius(&mut self, celsius: f32) -> Result<(), RangeError> {
        let raw = checked_i8(celsius, CJ_OFFSET_SCALE)?;
        self.set_cj_offset(raw);
        Ok(())
    }

    // ==================================================================
    // == Cold-Junction Temperature (°C×64) =============================
    // ==================================================================
    /// Cold-junction temperature in °C×64.
    pub fn cj_temperature(&self) -> i16 {
        codec::decode_cj_temperature(self.pair(REG_CJTH))
    }

    /// Cold-junction temperature in °C.
    pub fn cj_temperature_celsius(&self) -> f32 {
        codec::raw_to_celsius(self.cj_temperature() as i32, CJ_TEMPERATURE_SCALE)
    }

    /// Cold-junction temperature in °F.
    pub fn cj_temperature_fahrenheit(&self) -> f32 {
        codec::celsius_to_fahrenheit(self.cj_temperature_celsius())
    }

    /// Sets the cold-junction temperature in °C×64.
    ///
    /// Only transmitted while the internal sensor is disabled
    /// ([`ColdJunction::External`]).
    pub fn set_cj_temperature(&mut self, raw: i16) {
        self.set_pair(REG_CJTH, codec::encode_cj_temperature(raw));
    }

    /// Sets the cold-junction temperature from °C.
    pub fn set_cj_temperature_celsius(&mut self, celsius: f32) {
        self.set_cj_temperature(codec::celsius_to_raw(celsius, CJ_TEMPERATURE_SCALE) as i16);
    }

    /// Sets the cold-junction temperature from °F.
    pub fn set_cj_temperature_fahrenheit(&mut self, fahrenheit: f32) {
        self.set_cj_temperature_celsius(codec::fahrenheit_to_celsius(fahrenheit));
    }

    /// Sets the cold-junction temperature, rejecting values outside the
    /// -64..=127.984375 °C range the chip accepts.
    pub fn try_set_cj_temperature_celsius(&mut self, celsius: f32) -> Result<(), RangeError> {
        let raw = codec::checked_celsius_to_raw(
            celsius,
            CJ_TEMPERATURE_SCALE,
            CJ_TEMPERATURE_MIN as i32,
            CJ_TEMPERATURE_MAX as i32,
        )?;
        self.set_cj_temperature(raw as i16);
        Ok(())
    }

    // ==================================================================
    // == Linearized Thermocouple Temperature (°C×128) ==================
    // ==================================================================
    /// Linearized thermocouple temperature in °C×128.
    pub fn tc_temperature(&self) -> i32 {
        let at = REG_LTCBH as usize;
        let mut bytes = [0u8; 3];
        bytes.copy_from_slice(&self.regs[at..=REG_LTCBL as usize]);
        codec::decode_tc_temperature(bytes)
    }

    /// Linearized thermocouple temperature in °C.
    pub fn tc_temperature_celsius(&self) -> f32 {
        codec::raw_to_celsius(self.tc_temperature(), TC_TEMPERATURE_SCALE)
    }

    /// Linearized thermocouple temperature in °F.
    pub fn tc_temperature_fahrenheit(&self) -> f32 {
        codec::celsius_to_fahrenheit(self.tc_temperature_celsius())
    }
}

fn checked_i8(celsius: f32, scale: f32) -> Result<i8, RangeError> {
    codec::checked_celsius_to_raw(celsius, scale, i8::MIN as i32, i8::MAX as i32).map(|raw| raw as i8)
}

fn checked_i16(celsius: f32, scale: f32) -> Result<i16, RangeError> {
    codec::checked_celsius_to_raw(celsius, scale, i16::MIN as i32, i16::MAX as i32)
        .map(|raw| raw as i16)
}

/// Renders the registers as `0x00, 03, FF, ...` in address order.
impl fmt::Display for RegisterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for (index, value) in self.regs.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:02X}", value)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegisterImage {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RegisterImage {=[u8]:#x}", &self.regs[..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{REG_CJTL, REG_CR0, REG_LTCBM, REG_SR};
    use core::fmt::Write;

    fn assert_close(a: f32, b: f32, epsilon: f32) {
        let diff = a - b;
        assert!(
            diff < epsilon && diff > -epsilon,
            "{} and {} differ by more than {}",
            a,
            b,
            epsilon
        );
    }

    struct Line {
        buf: [u8; 128],
        len: usize,
    }

    impl Write for Line {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let end = self.len + s.len();
            self.buf[self.len..end].copy_from_slice(s.as_bytes());
            self.len = end;
            Ok(())
        }
    }

    #[test]
    fn factory_defaults_decode_to_documented_values() {
        let image = RegisterImage::factory();

        assert_eq!(image.cj_high_fault(), 127);
        assert_eq!(image.cj_low_fault(), -64);
        assert_close(image.cj_high_fault_celsius(), 127.0, 1e-6);
        assert_close(image.cj_low_fault_celsius(), -64.0, 1e-6);
        assert_eq!(image.tc_high_fault(), i16::MAX);
        assert_close(image.tc_high_fault_celsius(), 2047.9375, 1e-4);
        assert_eq!(image.tc_low_fault(), i16::MIN);
        assert_close(image.tc_low_fault_celsius(), -2048.0, 1e-4);
        assert_eq!(image.cj_offset(), 0);
        assert_eq!(image.cj_temperature(), 0);
        assert_eq!(image.tc_temperature(), -128);
        assert_close(image.tc_temperature_celsius(), -1.0, 1e-6);
        assert_eq!(image.averaging(), Averaging::Samples1);
        assert_eq!(image.thermocouple_type(), ThermocoupleType::K);
        assert_eq!(image.fault_mask(), FaultMask::from(0xFF));
        assert!(!image.fault_status().has_fault());
        assert_eq!(Some(image.cr0()), Cr0::RESET_VALUE);
    }

    #[test]
    fn reset_overwrites_every_register() {
        let mut image = RegisterImage::from_bytes([0xAA; REGISTER_COUNT]);
        image.reset_to_factory_defaults();
        assert_eq!(image, RegisterImage::factory());
        assert_eq!(RegisterImage::new().as_bytes(), &[0u8; REGISTER_COUNT]);
    }

    #[test]
    fn writable_len_follows_cold_junction_bit() {
        let mut image = RegisterImage::factory();
        assert_eq!(image.writable_len(), 10);

        image.set_cr0(0x08);
        assert_eq!(image.writable_len(), 12);
        assert_eq!(image.writable_bytes().len(), 12);

        image.set_config0(image.config0().with_cold_junction(ColdJunction::Internal));
        assert_eq!(image.writable_len(), 10);
    }

    #[test]
    fn averaging_and_type_preserve_each_other() {
        let mut image = RegisterImage::factory();

        image.set_averaging(Averaging::Samples16);
        assert_eq!(image.cr1(), 0x43);
        assert_eq!(image.thermocouple_type(), ThermocoupleType::K);

        image.set_thermocouple_type(ThermocoupleType::T);
        assert_eq!(image.cr1(), 0x47);
        assert_eq!(image.averaging(), Averaging::Samples16);

        image.set_thermocouple_type(ThermocoupleType::Gain32);
        assert_eq!(image.cr1(), 0x4C);
    }

    #[test]
    fn reserved_cr1_codes_decode_to_canonical_values() {
        let mut image = RegisterImage::new();
        image.set_cr1(0x69);
        assert_eq!(image.averaging(), Averaging::Samples16);
        assert_eq!(image.thermocouple_type(), ThermocoupleType::Gain8);

        image.set_averaging(image.averaging());
        image.set_thermocouple_type(image.thermocouple_type());
        assert_eq!(image.cr1(), 0x48);
    }

    #[test]
    fn tc_temperature_reads_ltcb_bytes() {
        let mut regs = [0u8; REGISTER_COUNT];
        regs[REG_LTCBH as usize] = 0x19;
        let image = RegisterImage::from_bytes(regs);
        assert_eq!(image.tc_temperature(), 51_200);
        assert_close(image.tc_temperature_celsius(), 400.0, 1e-4);
        assert_close(image.tc_temperature_fahrenheit(), 752.0, 1e-3);

        regs[REG_LTCBH as usize] = 0x00;
        regs[REG_LTCBM as usize] = 0x06;
        regs[REG_LTCBL as usize] = 0x40;
        let image = RegisterImage::from_bytes(regs);
        assert_close(image.tc_temperature_celsius(), 0.390625, 1e-7);
    }

    #[test]
    fn threshold_setters_encode_big_endian_pairs() {
        let mut image = RegisterImage::new();
        image.set_tc_high_fault_celsius(100.5);
        image.set_tc_low_fault(-16);

        assert_eq!(&image.as_bytes()[5..9], &[0x06, 0x48, 0xFF, 0xF0]);
        assert_close(image.tc_high_fault_celsius(), 100.5, 1e-4);
        assert_close(image.tc_low_fault_celsius(), -1.0, 1e-4);
    }

    #[test]
    fn setters_truncate_silently() {
        let mut image = RegisterImage::new();

        // 300 °C does not fit in one byte; the low eight bits remain.
        image.set_cj_high_fault_celsius(300.0);
        assert_eq!(image.register(REG_CJHF), Some(300u16 as u8));

        // One offset count is 0.0625 °C; 0.05 °C truncates to zero.
        image.set_cj_offset_celsius(0.05);
        assert_eq!(image.cj_offset(), 0);

        // 0.1 °C is 1.6 counts and truncates to one.
        image.set_cj_offset_celsius(0.1);
        assert_eq!(image.cj_offset(), 1);

        image.set_cj_offset_celsius(-0.0625);
        assert_eq!(image.cj_offset(), -1);
    }

    #[test]
    fn validated_setters_reject_and_leave_image_untouched() {
        let mut image = RegisterImage::factory();

        assert_eq!(image.try_set_cj_offset_celsius(8.0), Err(RangeError));
        assert_eq!(image.try_set_cj_high_fault_celsius(128.0), Err(RangeError));
        assert_eq!(image.try_set_tc_low_fault_celsius(-2049.0), Err(RangeError));
        assert_eq!(image.try_set_cj_temperature_celsius(-65.0), Err(RangeError));
        assert_eq!(image.try_set_tc_high_fault_celsius(f32::NAN), Err(RangeError));
        assert_eq!(image, RegisterImage::factory());

        assert_eq!(image.try_set_cj_offset_celsius(-8.0), Ok(()));
        assert_eq!(image.cj_offset(), i8::MIN);
        assert_eq!(image.try_set_cj_temperature_celsius(-64.0), Ok(()));
        assert_eq!(image.cj_temperature(), CJ_TEMPERATURE_MIN);
    }

    #[test]
    fn cj_temperature_setter_left_justifies() {
        let mut image = RegisterImage::new();
        image.set_cj_temperature_celsius(25.0);
        assert_eq!(image.register(REG_CJTH), Some(0x19));
        assert_eq!(image.register(REG_CJTL), Some(0x00));
        assert_close(image.cj_temperature_celsius(), 25.0, 1e-6);
        assert_close(image.cj_temperature_fahrenheit(), 77.0, 1e-4);
    }

    #[test]
    fn fahrenheit_round_trips_within_one_count() {
        let mut image = RegisterImage::new();

        image.set_tc_high_fault_fahrenheit(451.0);
        assert_close(image.tc_high_fault_fahrenheit(), 451.0, 1.8 / 16.0 + 1e-3);

        image.set_cj_low_fault_fahrenheit(-40.0);
        assert_eq!(image.cj_low_fault(), -40);
        assert_close(image.cj_low_fault_fahrenheit(), -40.0, 1e-4);

        image.set_cj_temperature_fahrenheit(98.6);
        assert_close(image.cj_temperature_fahrenheit(), 98.6, 1.8 / 64.0 + 1e-3);
    }

    #[test]
    fn cj_offset_fahrenheit_is_a_delta() {
        let mut image = RegisterImage::new();
        image.set_cj_offset_fahrenheit(1.8);
        assert_eq!(image.cj_offset(), 16);
        assert_close(image.cj_offset_fahrenheit(), 1.8, 1e-4);
    }

    #[test]
    fn display_renders_fixed_width_hex() {
        let mut line = Line { buf: [0; 128], len: 0 };
        write!(line, "{}", RegisterImage::factory()).unwrap();
        let rendered = core::str::from_utf8(&line.buf[..line.len]).unwrap();
        assert_eq!(
            rendered,
            "0x00, 03, FF, 7F, C0, 7F, FF, 80, 00, 00, 00, 00, FF, F0, 00, 00"
        );
    }

    #[test]
    fn register_lookup_is_bounded() {
        let image = RegisterImage::factory();
        assert_eq!(image.register(REG_CR0), Some(0x00));
        assert_eq!(image.register(REG_SR), Some(0x00));
        assert_eq!(image.register(0x10), None);
    }
}
