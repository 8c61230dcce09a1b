#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`PwmEngine`**: Software PWM generator; call `tick()` from a periodic timer interrupt
//! - **`PwmLevels`**: Per-channel levels shared lock-free between the interrupt and the main loop
//! - **`ButtonPoller`**: Edge detector producing one-iteration `pressed`/`released` pulses
//! - **`DeviceState`**: All foreground state: target levels, mode, manual color, speed, buttons
//! - **`Controller`**: Main loop driver sequencing delay, fade, polling and button actions
//! - **`ColorCode`**: Non-black three-bit color (1..=7)
//! - **`SpeedLevel`**: One of three cycling speeds
//! - **`LedPort`** / **`ButtonPort`** / **`RandomSource`**: Traits to implement for your hardware
//!
//! Levels are inverted with respect to brightness: the engine drives a channel
//! high whenever its level is at or below the free-running counter, so level 0
//! is always high and level 255 is high one tick in 256.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod buttons;
pub mod color;
pub mod config;
pub mod controller;
pub mod fade;
pub mod pwm;
pub mod random;
pub mod speed;
pub mod state;
pub mod types;

pub use buttons::{ButtonEdges, ButtonPoller, ButtonPort, Buttons, PinButtons};
pub use color::{AUTO_CODES, ColorCode};
pub use config::ControllerConfig;
pub use controller::{Controller, ControllerEvent, Events, blink};
pub use pwm::{CHANNEL_MASK, LedPort, PinLedPort, Polarity, PwmEngine, PwmLevels, SharedPort};
pub use random::{DEFAULT_SEED, RandomSource};
pub use speed::SpeedLevel;
pub use state::DeviceState;
pub use types::{CHANNEL_COUNT, Channel, ColorCodeError, FULL, Levels, Mode, ZERO};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bits_match_port_layout() {
        let mask = Channel::ALL.iter().fold(0, |mask, channel| mask | channel.bit());
        assert_eq!(mask, CHANNEL_MASK);
        assert_eq!(Channel::Blue.index(), CHANNEL_COUNT - 1);
    }
}
