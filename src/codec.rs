//! Fixed-point conversions between raw register bytes and physical values.
//!
//! Every function here is pure. Decoders accept the register bytes in address
//! order (most significant first) and return the field's native integer unit;
//! encoders are their exact inverse over the field's integer domain and narrow
//! wider inputs by dropping the high-order bits, the same way the register
//! width does.

/// Linearized thermocouple temperature counts per °C.
pub const TC_TEMPERATURE_SCALE: f32 = 128.0;
/// Cold-junction temperature counts per °C.
pub const CJ_TEMPERATURE_SCALE: f32 = 64.0;
/// Linearized temperature fault threshold counts per °C.
pub const TC_THRESHOLD_SCALE: f32 = 16.0;
/// Cold-junction fault threshold counts per °C.
pub const CJ_THRESHOLD_SCALE: f32 = 1.0;
/// Cold-junction offset counts per °C.
pub const CJ_OFFSET_SCALE: f32 = 16.0;

/// Smallest linearized temperature count (19-bit signed).
pub const TC_TEMPERATURE_MIN: i32 = -(1 << 18);
/// Largest linearized temperature count (19-bit signed).
pub const TC_TEMPERATURE_MAX: i32 = (1 << 18) - 1;
/// Smallest cold-junction temperature count accepted by the chip (-64 °C).
pub const CJ_TEMPERATURE_MIN: i16 = -64 * 64;
/// Largest cold-junction temperature count (14-bit signed).
pub const CJ_TEMPERATURE_MAX: i16 = (1 << 13) - 1;

// Unused low-order bits below each left-justified field.
const TC_TEMPERATURE_SHIFT: u32 = 13;
const CJ_TEMPERATURE_SHIFT: u32 = 2;

/// A validated setter received a value outside the field's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeError;

/// Decodes `LTCBH:LTCBM:LTCBL` into °C×128.
///
/// The 19-bit value is left-justified in 24 bits; placing it in the top of an
/// `i32` and shifting arithmetically drops the five unused bits and extends the
/// sign.
pub const fn decode_tc_temperature(bytes: [u8; 3]) -> i32 {
    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], 0]) >> TC_TEMPERATURE_SHIFT
}

/// Encodes °C×128 into `LTCBH:LTCBM:LTCBL`. Bits beyond 19 are discarded.
pub const fn encode_tc_temperature(raw: i32) -> [u8; 3] {
    let [high, mid, low, _] = raw.wrapping_shl(TC_TEMPERATURE_SHIFT).to_be_bytes();
    [high, mid, low]
}

/// Decodes `CJTH:CJTL` (14 bits, left-justified) into °C×64.
pub const fn decode_cj_temperature(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes) >> CJ_TEMPERATURE_SHIFT
}

/// Encodes °C×64 into `CJTH:CJTL`. Bits beyond 14 are discarded.
pub const fn encode_cj_temperature(raw: i16) -> [u8; 2] {
    raw.wrapping_shl(CJ_TEMPERATURE_SHIFT).to_be_bytes()
}

/// Decodes a linearized temperature fault threshold pair into °C×16.
pub const fn decode_tc_threshold(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Encodes °C×16 into a linearized temperature fault threshold pair.
pub const fn encode_tc_threshold(raw: i16) -> [u8; 2] {
    raw.to_be_bytes()
}

/// Reinterprets a single-byte two's complement register.
pub const fn decode_i8(byte: u8) -> i8 {
    byte as i8
}

/// Stores a signed value in a single-byte register.
pub const fn encode_i8(value: i8) -> u8 {
    value as u8
}

/// Converts a raw count to °C.
pub fn raw_to_celsius(raw: i32, scale: f32) -> f32 {
    raw as f32 / scale
}

/// Converts °C to a raw count, truncating toward zero.
///
/// Values outside `i32` saturate and NaN maps to zero; callers narrow the
/// result to the field width afterwards.
pub fn celsius_to_raw(celsius: f32, scale: f32) -> i32 {
    (celsius * scale) as i32
}

/// Converts °C to a raw count, rejecting NaN and values whose truncated count
/// falls outside `min..=max`.
///
/// Accepts the same inputs the truncating setters store without wrapping, so
/// the open interval `(min - 1, max + 1)` is allowed on both ends.
pub fn checked_celsius_to_raw(
    celsius: f32,
    scale: f32,
    min: i32,
    max: i32,
) -> Result<i32, RangeError> {
    let scaled = celsius * scale;
    if scaled > (min - 1) as f32 && scaled < (max + 1) as f32 {
        Ok(scaled as i32)
    } else {
        Err(RangeError)
    }
}

/// Converts an absolute temperature from °C to °F.
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

/// Converts an absolute temperature from °F to °C.
pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) / 1.8
}

/// Converts a temperature difference from °C to °F.
pub fn celsius_delta_to_fahrenheit(delta: f32) -> f32 {
    delta * 1.8
}

/// Converts a temperature difference from °F to °C.
pub fn fahrenheit_delta_to_celsius(delta: f32) -> f32 {
    delta / 1.8
}
