//! Push-pull outputs

use embassy_stm32::gpio::Output;
use gaswatch_hal::OutputPin;

/// Embassy output driving one of the HAL pin roles
pub struct Pin<'d>(Output<'d>);

impl<'d> Pin<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for Pin<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
