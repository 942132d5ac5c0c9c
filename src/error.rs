//! Error handling primitives for the MAX31856 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
///
/// Sensor faults (open thermocouple, over/under-voltage, thresholds) are not
/// errors; they are reported through [`FaultStatus`](crate::registers::FaultStatus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Interface(_) => defmt::write!(f, "Error::Interface"),
            Self::InvalidConfig => defmt::write!(f, "Error::InvalidConfig"),
        }
    }
}
