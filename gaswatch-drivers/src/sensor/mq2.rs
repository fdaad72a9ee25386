//! MQ-2 gas sensor
//!
//! The MQ-2 module's analog output is a voltage that rises with gas
//! concentration. It is wired straight to one converter channel; this driver
//! runs one software-triggered conversion per read and returns the raw
//! 12-bit result.

use core::hint::spin_loop;

use gaswatch_core::config::SamplerConfig;
use gaswatch_core::traits::{GasSensor, SensorError};
use gaswatch_hal::ConversionUnit;

/// Largest 12-bit conversion result
pub const MAX_READING: u16 = 4095;

/// MQ-2 sensor on a polled conversion unit
pub struct Mq2Sensor<A> {
    adc: A,
    channel: u8,
    poll_budget: u32,
}

impl<A: ConversionUnit> Mq2Sensor<A> {
    /// Create a sensor on an already-initialised conversion unit
    pub fn new(adc: A, config: SamplerConfig) -> Self {
        Self {
            adc,
            channel: config.channel,
            poll_budget: config.poll_budget,
        }
    }

    /// Take one sample, checking end-of-conversion at most `poll_budget` times
    pub fn read(&mut self) -> Result<u16, SensorError> {
        self.start();

        for _ in 0..self.poll_budget {
            if self.adc.is_complete() {
                return self.finish();
            }
            spin_loop();
        }

        Err(SensorError::Timeout)
    }

    /// Take one sample, waiting as long as it takes
    ///
    /// Spins forever if the converter never signals completion.
    pub fn read_blocking(&mut self) -> u16 {
        self.start();
        while !self.adc.is_complete() {
            spin_loop();
        }
        // Reading the data register clears the completion flag
        self.adc.read_result()
    }

    /// Access the conversion unit
    pub fn adc(&self) -> &A {
        &self.adc
    }

    fn start(&mut self) {
        self.adc.select_channel(self.channel);
        self.adc.start_conversion();
    }

    fn finish(&mut self) -> Result<u16, SensorError> {
        let raw = self.adc.read_result();
        if raw > MAX_READING {
            Err(SensorError::OutOfRange)
        } else {
            Ok(raw)
        }
    }
}

impl<A: ConversionUnit> GasSensor for Mq2Sensor<A> {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.read()
    }
}
