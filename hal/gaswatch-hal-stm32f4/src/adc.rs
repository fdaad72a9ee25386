//! Polled ADC1 conversions
//!
//! Single regular conversions started in software, completion detected by
//! polling `EOC`. No DMA, no scan mode, no interrupts. ADCCLK is APB2 / 2
//! (the reset prescaler), 36 MHz at the default clock tree.

use embassy_stm32::adc::SampleTime;
use embassy_stm32::pac;
use embassy_stm32::pac::adc::vals::Res;
use embassy_stm32::pac::gpio::vals::{Moder, Pupdr};
use embassy_stm32::peripherals::{ADC1, PA0};
use embassy_stm32::Peri;
use gaswatch_hal::ConversionUnit;

/// Map a cycle count to its sample-time register setting
pub fn sample_time_for_cycles(cycles: u16) -> Option<SampleTime> {
    let time = match cycles {
        3 => SampleTime::CYCLES3,
        15 => SampleTime::CYCLES15,
        28 => SampleTime::CYCLES28,
        56 => SampleTime::CYCLES56,
        84 => SampleTime::CYCLES84,
        112 => SampleTime::CYCLES112,
        144 => SampleTime::CYCLES144,
        480 => SampleTime::CYCLES480,
        _ => return None,
    };
    Some(time)
}

/// ADC1 with PA0 (channel 0) as its analog input
pub struct Adc1<'d> {
    _adc: Peri<'d, ADC1>,
    _pin: Peri<'d, PA0>,
}

/// Put PA0 in analog mode with pull-up/pull-down disabled
pub fn init_pin(_pin: &mut Peri<'_, PA0>) {
    pac::RCC.ahb1enr().modify(|w| w.set_gpioaen(true));
    pac::GPIOA.moder().modify(|w| w.set_moder(0, Moder::ANALOG));
    pac::GPIOA.pupdr().modify(|w| w.set_pupdr(0, Pupdr::FLOATING));
}

/// Clock and power up ADC1
///
/// Right-aligned 12-bit results, single conversion, channel 0 sampled
/// for `sample_time`.
pub fn init_converter(_adc: &mut Peri<'_, ADC1>, sample_time: SampleTime) {
    pac::RCC.apb2enr().modify(|w| w.set_adc1en(true));

    let regs = pac::ADC1;
    regs.cr1().write(|w| w.set_res(Res::BITS12));
    regs.cr2().write(|w| w.set_adon(true));
    regs.smpr2().modify(|w| w.set_smp(0, sample_time));
}

impl<'d> Adc1<'d> {
    /// Input channel PA0 is wired to
    pub const CHANNEL: u8 = 0;

    /// Initialise the input pin, then the converter
    pub fn new(mut adc: Peri<'d, ADC1>, mut pin: Peri<'d, PA0>, sample_time: SampleTime) -> Self {
        init_pin(&mut pin);
        init_converter(&mut adc, sample_time);

        #[cfg(feature = "defmt")]
        defmt::debug!("ADC1 powered, PA0 analog");

        Self {
            _adc: adc,
            _pin: pin,
        }
    }
}

impl ConversionUnit for Adc1<'_> {
    fn select_channel(&mut self, channel: u8) {
        // Sequence length 1: only the first regular slot is converted
        pac::ADC1.sqr3().write(|w| w.set_sq(0, channel));
    }

    fn start_conversion(&mut self) {
        pac::ADC1.cr2().modify(|w| w.set_swstart(true));
    }

    fn is_complete(&self) -> bool {
        pac::ADC1.sr().read().eoc()
    }

    fn read_result(&mut self) -> u16 {
        // Reading DR clears EOC
        pac::ADC1.dr().read().data()
    }
}
