//! Main loop driver.
//!
//! Provides [`Controller`], which owns the foreground peripherals and runs one
//! loop iteration at a time: delay, fade step, button poll, then button
//! actions. The PWM engine runs separately from the timer interrupt and shares
//! only the [`PwmLevels`] with the controller.

use crate::buttons::{ButtonEdges, ButtonPort, Buttons};
use crate::color::ColorCode;
use crate::config::ControllerConfig;
use crate::fade;
use crate::pwm::{CHANNEL_MASK, LedPort, PwmLevels};
use crate::random::{self, RandomSource};
use crate::speed::SpeedLevel;
use crate::state::DeviceState;
use crate::types::{Levels, Mode};
use embedded_hal::delay::DelayNs;
use heapless::Vec;
use nanorand::WyRand;

/// Upper bound on events a single iteration can report.
pub const MAX_EVENTS: usize = 4;

/// Events reported by one loop iteration.
pub type Events = Vec<ControllerEvent, MAX_EVENTS>;

/// Something observable that happened during an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// The fade reached its target and a new random target was chosen.
    TargetSelected(ColorCode),

    /// The mode button toggled the mode.
    ModeChanged(Mode),

    /// The change button advanced the manual color.
    ColorChanged(ColorCode),

    /// The change button advanced the speed and the LED blinked `blinks` times.
    SpeedChanged {
        /// New speed.
        level: SpeedLevel,
        /// Blinks shown.
        blinks: u8,
    },
}

/// Blinks the whole LED `count` times with the PWM engine paused.
///
/// Each blink is dark then lit for `half_period_us`; the LED is left dark for
/// `settle_us` before the engine resumes. Blocks for the whole sequence.
pub fn blink<L, D>(levels: &PwmLevels, port: &mut L, delay: &mut D, count: u8, half_period_us: u32, settle_us: u32)
where
    L: LedPort + ?Sized,
    D: DelayNs + ?Sized,
{
    levels.pause();

    for _ in 0..count {
        port.write(0x00);
        delay.delay_us(half_period_us);
        port.write(CHANNEL_MASK);
        delay.delay_us(half_period_us);
    }
    port.write(0x00);
    delay.delay_us(settle_us);

    levels.resume();
}

/// Runs the two-mode RGB controller.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared PWM levels
/// * `B` - Button port
/// * `L` - LED port used for blink feedback (usually shared with the PWM engine)
/// * `D` - Delay provider
/// * `R` - Random source for auto color selection
pub struct Controller<'a, B, L, D, R>
where
    B: ButtonPort,
    L: LedPort,
    D: DelayNs,
    R: RandomSource,
{
    state: DeviceState<'a>,
    buttons: B,
    port: L,
    delay: D,
    rng: R,
    config: ControllerConfig,
}

impl<'a, B, L, D> Controller<'a, B, L, D, WyRand>
where
    B: ButtonPort,
    L: LedPort,
    D: DelayNs,
{
    /// Creates a controller using the default generator seeded from `config.seed`.
    pub fn seeded(levels: &'a PwmLevels, buttons: B, port: L, delay: D, config: ControllerConfig) -> Self {
        let rng = random::seeded(config.seed);
        Self::new(levels, buttons, port, delay, rng, config)
    }
}

impl<'a, B, L, D, R> Controller<'a, B, L, D, R>
where
    B: ButtonPort,
    L: LedPort,
    D: DelayNs,
    R: RandomSource,
{
    /// Creates a controller in the power-on state.
    ///
    /// Resets every channel to full level and takes the initial button sample.
    pub fn new(levels: &'a PwmLevels, mut buttons: B, port: L, delay: D, rng: R, config: ControllerConfig) -> Self {
        let state = DeviceState::new(levels, &mut buttons);

        #[cfg(feature = "defmt")]
        defmt::info!("controller ready: {}", config);

        Self {
            state,
            buttons,
            port,
            delay,
            rng,
            config,
        }
    }

    /// Runs one loop iteration and returns what happened.
    ///
    /// Order: loop delay (also the debounce interval), fade step in cycling
    /// mode, button poll, mode button, change button.
    pub fn iterate(&mut self) -> Events {
        let mut events = Events::new();

        self.delay.delay_us(self.config.loop_delay_for(self.state.speed));

        if self.state.mode == Mode::Cycling {
            if let Some(code) = fade::step(&mut self.state, &mut self.rng) {
                #[cfg(feature = "defmt")]
                defmt::debug!("new target {}", code);
                let _ = events.push(ControllerEvent::TargetSelected(code));
            }
        }

        let edges = self.state.buttons.poll(&mut self.buttons);
        self.handle_edges(edges, &mut events);

        events
    }

    /// Runs the loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.iterate();
        }
    }

    fn handle_edges(&mut self, edges: ButtonEdges, events: &mut Events) {
        if edges.released.contains(Buttons::MODE) {
            let mode = self.state.toggle_mode();
            #[cfg(feature = "defmt")]
            defmt::info!("mode -> {}", mode);
            let _ = events.push(ControllerEvent::ModeChanged(mode));
        }

        if edges.released.contains(Buttons::CHANGE) {
            match self.state.mode {
                Mode::Cycling => {
                    let level = self.state.advance_speed();
                    let blinks = level.ordinal();
                    #[cfg(feature = "defmt")]
                    defmt::info!("speed -> {} ({} blinks)", level, blinks);
                    blink(
                        self.state.levels,
                        &mut self.port,
                        &mut self.delay,
                        blinks,
                        self.config.blink_half_period_us,
                        self.config.blink_settle_us,
                    );
                    let _ = events.push(ControllerEvent::SpeedChanged { level, blinks });
                }
                Mode::Fixed => {
                    let color = self.state.advance_color();
                    #[cfg(feature = "defmt")]
                    defmt::info!("color -> {}", color);
                    let _ = events.push(ControllerEvent::ColorChanged(color));
                }
            }
        }
    }

    /// Returns the device state.
    pub fn state(&self) -> &DeviceState<'a> {
        &self.state
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Returns the manual color.
    pub fn color(&self) -> ColorCode {
        self.state.color
    }

    /// Returns the cycling speed.
    pub fn speed(&self) -> SpeedLevel {
        self.state.speed
    }

    /// Returns the levels the PWM engine is reading.
    pub fn current(&self) -> Levels {
        self.state.current()
    }

    /// Returns the fade target.
    pub fn target(&self) -> Levels {
        self.state.target
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns a reference to the button port.
    pub fn buttons(&self) -> &B {
        &self.buttons
    }

    /// Returns a mutable reference to the button port.
    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    /// Returns a reference to the LED port.
    pub fn port(&self) -> &L {
        &self.port
    }

    /// Returns a reference to the delay provider.
    pub fn delay(&self) -> &D {
        &self.delay
    }
}
