//! Cycling speed levels.

const STEP: u8 = 0x40;
const LIMIT: u8 = 0x80;

/// Number of speed levels.
pub const SPEED_LEVELS: usize = 3;

/// One of three cycling speeds, stored as an accumulator (`0x00`, `0x40`, `0x80`).
///
/// Advancing adds `0x40` with wrapping arithmetic and falls back to `0x00`
/// once the sum passes `0x80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    /// Shortest loop delay. The level after reset.
    pub const FAST: SpeedLevel = SpeedLevel(0x00);

    /// Middle loop delay.
    pub const MEDIUM: SpeedLevel = SpeedLevel(STEP);

    /// Longest loop delay.
    pub const SLOW: SpeedLevel = SpeedLevel(LIMIT);

    /// Next level: fast, medium, slow, then fast again.
    pub const fn next(self) -> Self {
        let next = self.0.wrapping_add(STEP);
        if next > LIMIT { SpeedLevel::FAST } else { SpeedLevel(next) }
    }

    /// 1 for fast, 2 for medium, 3 for slow. Also the feedback blink count.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        (self.0 >> 6) + 1
    }

    /// Zero-based position, for indexing per-level settings.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 >> 6) as usize
    }

    /// Raw accumulator value.
    #[inline]
    pub const fn accumulator(self) -> u8 {
        self.0
    }
}
