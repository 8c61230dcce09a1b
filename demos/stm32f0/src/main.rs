#![no_std]
#![no_main]

use core::cell::RefCell;
use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use defmt::info;
use embassy_time::Delay;
use rgb_cycler::{Controller, ControllerConfig, PwmEngine, PwmLevels, SharedPort};
use {defmt_rtt as _, panic_probe as _};

mod hardware_setup;

use hardware_setup::LedPins;

type Engine = PwmEngine<'static, SharedPort<'static, Option<LedPins>>>;

/// Channel levels shared by the SysTick handler and the main loop
static LEVELS: PwmLevels = PwmLevels::new();

/// LED port, written by the PWM engine and by the speed blink
static PORT: Mutex<RefCell<Option<LedPins>>> = Mutex::new(RefCell::new(None));

static ENGINE: Mutex<RefCell<Engine>> =
    Mutex::new(RefCell::new(PwmEngine::new(&LEVELS, SharedPort::new(&PORT))));

/// SysTick interrupt handler - one PWM tick
#[exception]
fn SysTick() {
    critical_section::with(|cs| {
        ENGINE.borrow_ref_mut(cs).tick();
    });
}

#[entry]
fn main() -> ! {
    info!("=== RGB Cycler ===");

    let p = embassy_stm32::init(hardware_setup::configure_clock());
    let hw = hardware_setup::init(p);

    critical_section::with(|cs| {
        PORT.borrow_ref_mut(cs).replace(hw.led);
    });

    let mut cp = cortex_m::Peripherals::take().unwrap();
    hardware_setup::configure_pwm_tick(&mut cp.SYST);

    let mut controller = Controller::seeded(
        &LEVELS,
        hw.buttons,
        SharedPort::new(&PORT),
        Delay,
        ControllerConfig::default(),
    );

    info!("Ready! Mode button toggles cycling/fixed, change button sets speed/color");

    controller.run()
}
