//! Clock tree configuration
//!
//! 8 MHz crystal on HSE, PLL to 72 MHz SYSCLK:
//!
//! ```text
//! HSE 8 MHz / M=8 -> 1 MHz * N=144 -> 144 MHz VCO
//!   /P=2 -> 72 MHz SYSCLK
//!   /Q=7 -> ~20.6 MHz (USB/SDIO, unused)
//! AHB /1 = 72 MHz, APB1 /2 = 36 MHz, APB2 /1 = 72 MHz
//! ```

use embassy_stm32::rcc::{
    AHBPrescaler, APBPrescaler, Hse, HseMode, Pll, PllMul, PllPDiv, PllPreDiv, PllQDiv, PllSource,
    Sysclk,
};
use embassy_stm32::time::Hertz;
use embassy_stm32::Config;

/// External crystal frequency
pub const HSE_HZ: u32 = 8_000_000;

/// SYSCLK produced by [`rcc_config`]
pub const SYSCLK_HZ: u32 = 72_000_000;

/// Chip configuration with the 72 MHz PLL setup
pub fn rcc_config() -> Config {
    let mut config = Config::default();

    config.rcc.hse = Some(Hse {
        freq: Hertz(HSE_HZ),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll_src = PllSource::HSE;
    config.rcc.pll = Some(Pll {
        prediv: PllPreDiv::DIV8,
        mul: PllMul::MUL144,
        divp: Some(PllPDiv::DIV2),
        divq: Some(PllQDiv::DIV7),
        divr: None,
    });
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    // APB1 tops out at 42 MHz
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV1;

    config
}
