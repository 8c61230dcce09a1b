//! Core types shared by the controller components.

/// Number of PWM channels driven by the controller.
pub const CHANNEL_COUNT: usize = 3;

/// Highest channel intensity.
pub const FULL: u8 = 0xff;

/// Lowest channel intensity.
pub const ZERO: u8 = 0x00;

/// Per-channel intensities, indexed by [`Channel::index`].
pub type Levels = [u8; CHANNEL_COUNT];

/// One of the three PWM channels.
///
/// Channel `n` is driven by bit `n` of the output port and is selected by
/// bit `n` of a [`ColorCode`](crate::ColorCode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Port bit 0.
    Red,
    /// Port bit 1.
    Green,
    /// Port bit 2.
    Blue,
}

impl Channel {
    /// All channels in port bit order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel in a [`Levels`] array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Port and color-code bit for this channel.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Top-level operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Fade between randomly chosen colors.
    #[default]
    Cycling,

    /// Hold a manually selected color.
    Fixed,
}

impl Mode {
    /// Returns the other mode.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Mode::Cycling => Mode::Fixed,
            Mode::Fixed => Mode::Cycling,
        }
    }
}

/// Color code validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorCodeError {
    /// Code 0 would turn every channel off.
    Black,

    /// Code does not fit in three bits.
    OutOfRange(u8),
}

impl core::fmt::Display for ColorCodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ColorCodeError::Black => {
                write!(f, "color code 0 (black) is not selectable")
            }
            ColorCodeError::OutOfRange(code) => {
                write!(f, "color code {} is outside 1..=7", code)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ColorCodeError {}
