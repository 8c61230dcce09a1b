use cortex_m::peripheral::SYST;
use cortex_m::peripheral::syst::SystClkSource;
use defmt::info;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::time::Hertz;
use embassy_stm32::{Config, Peripherals};
use rgb_cycler::{PinButtons, PinLedPort, Polarity};

/// System clock after `configure_clock`
pub const SYSCLK_HZ: u32 = 48_000_000;

/// PWM tick rate. The LED carrier is this divided by 256 (100 Hz).
pub const PWM_TICK_HZ: u32 = 25_600;

/// RGB LED on PA6 (bit 0), PA7 (bit 1), PB0 (bit 2)
pub type LedPins = PinLedPort<Output<'static>, Output<'static>, Output<'static>>;

/// Mode button on PB4, change button on PB5, both to ground with pull-ups
pub type ButtonPins = PinButtons<Input<'static>, Input<'static>>;

/// Container for the initialized board peripherals
pub struct HardwareContext {
    pub led: LedPins,
    pub buttons: ButtonPins,
}

/// Configure system clock with HSE and PLL (8 MHz / 2 * 12 = 48 MHz)
pub fn configure_clock() -> Config {
    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV2,
            mul: PllMul::MUL12,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV1;
    }
    config
}

/// Set up the LED outputs and button inputs
pub fn init(p: Peripherals) -> HardwareContext {
    let led = PinLedPort::new(
        Output::new(p.PA6, Level::Low, Speed::Low),
        Output::new(p.PA7, Level::Low, Speed::Low),
        Output::new(p.PB0, Level::Low, Speed::Low),
        Polarity::ActiveHigh,
    );
    info!("RGB LED configured on PA6, PA7, PB0");

    let buttons = PinButtons::new(Input::new(p.PB4, Pull::Up), Input::new(p.PB5, Pull::Up));
    info!("Buttons configured on PB4 (mode), PB5 (change)");

    HardwareContext { led, buttons }
}

/// Configure SysTick to fire at `PWM_TICK_HZ`
///
/// SysTick reloads on its own, so every tick starts a full interval.
pub fn configure_pwm_tick(syst: &mut SYST) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(SYSCLK_HZ / PWM_TICK_HZ - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    info!("SysTick configured for {} Hz PWM ticks", PWM_TICK_HZ);
}
