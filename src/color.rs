//! Three-bit color codes and their channel levels.
//!
//! A [`ColorCode`] selects which channels are "set". How a set bit is turned
//! into an intensity depends on who applies it:
//!
//! - Fixed mode writes `0x00` for set bits and `0xff` for clear bits.
//! - Auto cycling fades toward `0xff` for set bits and `0x00` for clear bits.
//!
//! Because the PWM engine drives a channel high whenever its level is at or
//! below the counter, a level of `0x00` is the brightest output. The two
//! mappings are therefore complementary on the LED.

use crate::random::RandomSource;
use crate::types::{CHANNEL_COUNT, Channel, ColorCodeError, FULL, Levels, ZERO};
use palette::Srgb;

/// Number of codes the auto-cycle random selection draws from (codes 1..=6).
pub const AUTO_CODES: u8 = 6;

const CODE_MASK: u8 = 0b0000_0111;

/// A non-black three-bit color code in `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorCode(u8);

impl ColorCode {
    /// Code 1, the manual color after reset.
    pub const FIRST: ColorCode = ColorCode(1);

    /// Code 7, every channel set.
    pub const LAST: ColorCode = ColorCode(7);

    /// Creates a color code, rejecting 0 and values above 7.
    pub const fn new(code: u8) -> Result<Self, ColorCodeError> {
        match code {
            0 => Err(ColorCodeError::Black),
            1..=7 => Ok(ColorCode(code)),
            _ => Err(ColorCodeError::OutOfRange(code)),
        }
    }

    /// Returns the raw code.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns true if `channel` is selected by this code.
    #[inline]
    pub const fn is_set(self, channel: Channel) -> bool {
        self.0 & channel.bit() != 0
    }

    /// Next code for manual cycling: 1, 2, ... 7, then back to 1.
    pub const fn next(self) -> Self {
        let next = self.0.wrapping_add(1) & CODE_MASK;
        if next == 0 { ColorCode::FIRST } else { ColorCode(next) }
    }

    /// Draws a uniformly distributed code in `1..=6`.
    ///
    /// Code 7 is never produced here; it is only reachable by manual cycling.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        ColorCode(rng.next_below(AUTO_CODES) % AUTO_CODES + 1)
    }

    /// Levels applied when this code is shown in fixed mode.
    pub fn fixed_levels(self) -> Levels {
        self.levels_with(ZERO, FULL)
    }

    /// Targets the auto cycle fades toward for this code.
    pub fn cycle_levels(self) -> Levels {
        self.levels_with(FULL, ZERO)
    }

    fn levels_with(self, set: u8, clear: u8) -> Levels {
        let mut levels = [clear; CHANNEL_COUNT];
        for channel in Channel::ALL {
            if self.is_set(channel) {
                levels[channel.index()] = set;
            }
        }
        levels
    }

    /// The code as a color, with set bits fully lit.
    pub fn to_srgb(self) -> Srgb {
        let component = |channel| if self.is_set(channel) { 1.0 } else { 0.0 };
        Srgb::new(
            component(Channel::Red),
            component(Channel::Green),
            component(Channel::Blue),
        )
    }

    /// Short human readable name.
    pub const fn name(self) -> &'static str {
        match self.0 {
            1 => "red",
            2 => "green",
            3 => "yellow",
            4 => "blue",
            5 => "magenta",
            6 => "cyan",
            _ => "white",
        }
    }
}

impl TryFrom<u8> for ColorCode {
    type Error = ColorCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ColorCode::new(code)
    }
}

impl From<ColorCode> for u8 {
    fn from(code: ColorCode) -> Self {
        code.0
    }
}

impl core::fmt::Display for ColorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

/// Duty cycle a stored level produces: high on `256 - level` of every 256 ticks.
#[inline]
pub fn duty(level: u8) -> f32 {
    (256 - u16::from(level)) as f32 / 256.0
}

/// Approximates the LED color for a set of stored levels, assuming a high
/// output lights the channel.
pub fn perceived(levels: &Levels) -> Srgb {
    Srgb::new(duty(levels[0]), duty(levels[1]), duty(levels[2]))
}
