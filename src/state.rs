//! Device state and the mode/speed operations on it.
//!
//! [`DeviceState`] holds everything the foreground loop mutates. The channel
//! levels themselves live in a [`PwmLevels`] shared with the PWM interrupt;
//! this struct is their only writer.

use crate::buttons::{ButtonPoller, ButtonPort};
use crate::color::ColorCode;
use crate::pwm::PwmLevels;
use crate::speed::SpeedLevel;
use crate::types::{CHANNEL_COUNT, FULL, Levels, Mode};

/// All mutable device state, passed by reference to each component.
pub struct DeviceState<'a> {
    /// Levels the PWM engine reads (`current`).
    pub levels: &'a PwmLevels,

    /// Levels the fade is converging toward.
    pub target: Levels,

    /// Current operating mode.
    pub mode: Mode,

    /// Manual color shown in fixed mode.
    pub color: ColorCode,

    /// Auto-cycle speed.
    pub speed: SpeedLevel,

    /// Button edge detector.
    pub buttons: ButtonPoller,
}

impl<'a> DeviceState<'a> {
    /// Creates the power-on state and samples the buttons once.
    ///
    /// Mode is cycling, color is 1, speed is fast and every channel, current
    /// and target, is at full level.
    pub fn new<B: ButtonPort + ?Sized>(levels: &'a PwmLevels, buttons: &mut B) -> Self {
        levels.store([FULL; CHANNEL_COUNT]);

        Self {
            levels,
            target: [FULL; CHANNEL_COUNT],
            mode: Mode::Cycling,
            color: ColorCode::FIRST,
            speed: SpeedLevel::FAST,
            buttons: ButtonPoller::new(buttons),
        }
    }

    /// Levels currently read by the PWM engine.
    #[inline]
    pub fn current(&self) -> Levels {
        self.levels.snapshot()
    }

    /// Flips the mode. Entering fixed mode shows the manual color at once.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        if self.mode == Mode::Fixed {
            self.apply_color();
        }
        self.mode
    }

    /// Advances the manual color (7 wraps to 1) and shows it at once.
    pub fn advance_color(&mut self) -> ColorCode {
        self.color = self.color.next();
        self.apply_color();
        self.color
    }

    /// Advances the cycling speed (slow wraps to fast).
    pub fn advance_speed(&mut self) -> SpeedLevel {
        self.speed = self.speed.next();
        self.speed
    }

    /// Writes the manual color to both target and current, without fading.
    pub fn apply_color(&mut self) {
        let levels = self.color.fixed_levels();
        self.target = levels;
        self.levels.store(levels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::Buttons;

    struct Idle;

    impl ButtonPort for Idle {
        fn read(&mut self) -> Buttons {
            Buttons::ALL
        }
    }

    #[test]
    fn power_on_defaults() {
        let levels = PwmLevels::new();
        levels.store([1, 2, 3]);
        let state = DeviceState::new(&levels, &mut Idle);

        assert_eq!(state.mode, Mode::Cycling);
        assert_eq!(state.color, ColorCode::FIRST);
        assert_eq!(state.speed, SpeedLevel::FAST);
        assert_eq!(state.current(), [FULL; CHANNEL_COUNT]);
        assert_eq!(state.target, [FULL; CHANNEL_COUNT]);
    }

    #[test]
    fn entering_fixed_mode_applies_color_instantly() {
        let levels = PwmLevels::new();
        let mut state = DeviceState::new(&levels, &mut Idle);

        assert_eq!(state.toggle_mode(), Mode::Fixed);
        assert_eq!(state.target, [0x00, 0xff, 0xff]);
        assert_eq!(state.current(), [0x00, 0xff, 0xff]);
    }

    #[test]
    fn leaving_fixed_mode_keeps_levels() {
        let levels = PwmLevels::new();
        let mut state = DeviceState::new(&levels, &mut Idle);

        state.toggle_mode();
        assert_eq!(state.toggle_mode(), Mode::Cycling);
        assert_eq!(state.current(), [0x00, 0xff, 0xff]);
    }
}
