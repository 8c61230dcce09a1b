//! Controller timing and seeding configuration.

use crate::random::DEFAULT_SEED;
use crate::speed::{SPEED_LEVELS, SpeedLevel};

/// Timing and seeding for a [`Controller`](crate::Controller).
///
/// The loop delay doubles as the button debounce interval, so very short
/// delays make the buttons chatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Main loop delay in microseconds for fast, medium and slow.
    pub loop_delay_us: [u32; SPEED_LEVELS],

    /// Time the LED spends dark, then lit, for each feedback blink.
    pub blink_half_period_us: u32,

    /// Dark time after the last blink before PWM resumes.
    pub blink_settle_us: u32,

    /// Seed for the auto-cycle color generator.
    pub seed: u64,
}

impl ControllerConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            loop_delay_us: [4_000, 12_000, 20_000],
            blink_half_period_us: 150_000,
            blink_settle_us: 500_000,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the loop delays for fast, medium and slow.
    pub const fn with_loop_delays(mut self, fast_us: u32, medium_us: u32, slow_us: u32) -> Self {
        self.loop_delay_us = [fast_us, medium_us, slow_us];
        self
    }

    /// Sets the blink timing.
    pub const fn with_blink(mut self, half_period_us: u32, settle_us: u32) -> Self {
        self.blink_half_period_us = half_period_us;
        self.blink_settle_us = settle_us;
        self
    }

    /// Sets the random seed.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loop delay for `speed`.
    #[inline]
    pub const fn loop_delay_for(&self, speed: SpeedLevel) -> u32 {
        self.loop_delay_us[speed.index()]
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}
