//! Configuration primitives for the MAX31856 driver.

use crate::image::RegisterImage;
use crate::params::{
    Averaging,
    ColdJunction,
    ConversionMode,
    FaultMode,
    NoiseFilter,
    OpenCircuitDetection,
    ThermocoupleType,
};
use crate::registers::{Cr0, FaultMask};

/// User-facing configuration for the MAX31856 converter.
///
/// Thermocouple thresholds are in °C×16, cold-junction thresholds in °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Automatic or normally-off conversions.
    pub conversion_mode: ConversionMode,
    /// Open-circuit fault detection.
    pub open_circuit: OpenCircuitDetection,
    /// Internal or host-provided cold-junction temperature.
    pub cold_junction: ColdJunction,
    /// Comparator or interrupt fault mode.
    pub fault_mode: FaultMode,
    /// Mains rejection filter.
    pub noise_filter: NoiseFilter,
    /// Samples averaged per conversion.
    pub averaging: Averaging,
    /// Thermocouple type or voltage mode.
    pub thermocouple: ThermocoupleType,
    /// Faults masked from the FAULT output.
    pub fault_mask: FaultMask,
    /// Linearized temperature low fault threshold (°C×16).
    pub tc_low_fault: i16,
    /// Linearized temperature high fault threshold (°C×16).
    pub tc_high_fault: i16,
    /// Cold-junction low fault threshold (°C).
    pub cj_low_fault: i8,
    /// Cold-junction high fault threshold (°C).
    pub cj_high_fault: i8,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.tc_low_fault > self.tc_high_fault || self.cj_low_fault > self.cj_high_fault {
            return Err(ConfigError::InvertedThresholds);
        }

        Ok(())
    }

    /// Writes `CR0`, `CR1`, `MASK` and the fault thresholds into `image`.
    ///
    /// The self-clearing `FAULTCLR` and `1SHOT` bits are left clear.
    pub fn apply_to(&self, image: &mut RegisterImage) {
        image.set_config0(
            Cr0::new()
                .with_conversion_mode(self.conversion_mode)
                .with_open_circuit(self.open_circuit)
                .with_cold_junction(self.cold_junction)
                .with_fault_mode(self.fault_mode)
                .with_noise_filter(self.noise_filter),
        );
        image.set_averaging(self.averaging);
        image.set_thermocouple_type(self.thermocouple);
        image.set_fault_mask(self.fault_mask);
        image.set_tc_low_fault(self.tc_low_fault);
        image.set_tc_high_fault(self.tc_high_fault);
        image.set_cj_low_fault(self.cj_low_fault);
        image.set_cj_high_fault(self.cj_high_fault);
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the conversion mode.
    pub fn conversion_mode(mut self, mode: ConversionMode) -> Self {
        self.config.conversion_mode = mode;
        self
    }

    /// Overrides open-circuit detection.
    pub fn open_circuit(mut self, detection: OpenCircuitDetection) -> Self {
        self.config.open_circuit = detection;
        self
    }

    /// Selects the cold-junction source.
    pub fn cold_junction(mut self, cold_junction: ColdJunction) -> Self {
        self.config.cold_junction = cold_junction;
        self
    }

    /// Sets the fault mode.
    pub fn fault_mode(mut self, mode: FaultMode) -> Self {
        self.config.fault_mode = mode;
        self
    }

    /// Sets the mains rejection filter.
    pub fn noise_filter(mut self, filter: NoiseFilter) -> Self {
        self.config.noise_filter = filter;
        self
    }

    /// Sets the averaging mode.
    pub fn averaging(mut self, averaging: Averaging) -> Self {
        self.config.averaging = averaging;
        self
    }

    /// Sets the thermocouple type.
    pub fn thermocouple(mut self, thermocouple: ThermocoupleType) -> Self {
        self.config.thermocouple = thermocouple;
        self
    }

    /// Sets the fault mask.
    pub fn fault_mask(mut self, mask: FaultMask) -> Self {
        self.config.fault_mask = mask;
        self
    }

    /// Sets the linearized temperature fault window in °C×16.
    pub fn tc_fault_window(mut self, low: i16, high: i16) -> Self {
        self.config.tc_low_fault = low;
        self.config.tc_high_fault = high;
        self
    }

    /// Sets the cold-junction fault window in °C.
    pub fn cj_fault_window(mut self, low: i8, high: i8) -> Self {
        self.config.cj_low_fault = low;
        self.config.cj_high_fault = high;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    /// Power-on settings of the device.
    fn default() -> Self {
        Self {
            conversion_mode: ConversionMode::NormallyOff,
            open_circuit: OpenCircuitDetection::Disabled,
            cold_junction: ColdJunction::Internal,
            fault_mode: FaultMode::Comparator,
            noise_filter: NoiseFilter::Hz60,
            averaging: Averaging::Samples1,
            thermocouple: ThermocoupleType::K,
            fault_mask: FaultMask::all(),
            tc_low_fault: i16::MIN,
            tc_high_fault: i16::MAX,
            cj_low_fault: -64,
            cj_high_fault: 127,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A low fault threshold is above its high threshold.
    InvertedThresholds,
}
