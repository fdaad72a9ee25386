//! Gas sensor trait

/// Errors that can occur when sampling the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// End of conversion was not signalled within the poll budget
    Timeout,
    /// Conversion result wider than the configured resolution
    OutOfRange,
}

/// Trait for analog gas sensors
///
/// Implementations return the raw conversion result. For the 12-bit
/// converter this is 0-4095, proportional to the input over the reference.
///
/// Takes `&mut self` because starting a conversion mutates the converter.
pub trait GasSensor {
    /// Take one fresh sample
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

impl<T: GasSensor + ?Sized> GasSensor for &mut T {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        (**self).read_raw()
    }
}
