//! Auto-cycle color state machine.
//!
//! Every call moves each channel one unit toward its target. The fade rate is
//! set only by how often [`step`] runs, which is the main loop delay.

use crate::color::ColorCode;
use crate::random::RandomSource;
use crate::state::DeviceState;
use crate::types::Channel;

/// Moves `current` one unit toward `target` on every channel.
///
/// When all three channels were already at their targets, picks a new random
/// code in `1..=6`, sets the targets from it and returns it.
pub fn step<R: RandomSource + ?Sized>(state: &mut DeviceState<'_>, rng: &mut R) -> Option<ColorCode> {
    let mut done = 0;

    for channel in Channel::ALL {
        let current = state.levels.get(channel);
        let target = state.target[channel.index()];

        if current == target {
            done += 1;
        } else if current < target {
            state.levels.set(channel, current + 1);
        } else {
            state.levels.set(channel, current - 1);
        }
    }

    if done < Channel::ALL.len() {
        return None;
    }

    let code = ColorCode::random(rng);
    state.target = code.cycle_levels();
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::{ButtonPort, Buttons};
    use crate::pwm::PwmLevels;

    struct Idle;

    impl ButtonPort for Idle {
        fn read(&mut self) -> Buttons {
            Buttons::ALL
        }
    }

    struct Always(u8);

    impl RandomSource for Always {
        fn next_below(&mut self, _bound: u8) -> u8 {
            self.0
        }
    }

    #[test]
    fn moves_each_channel_by_one() {
        let levels = PwmLevels::new();
        let mut state = DeviceState::new(&levels, &mut Idle);
        levels.store([10, 20, 30]);
        state.target = [12, 20, 28];

        assert_eq!(step(&mut state, &mut Always(0)), None);
        assert_eq!(state.current(), [11, 20, 29]);
    }

    #[test]
    fn selects_only_when_all_channels_are_done() {
        let levels = PwmLevels::new();
        let mut state = DeviceState::new(&levels, &mut Idle);
        levels.store([0, 255, 254]);
        state.target = [0, 255, 255];

        assert_eq!(step(&mut state, &mut Always(5)), None);
        assert_eq!(state.current(), state.target);

        let code = step(&mut state, &mut Always(5));
        assert_eq!(code.map(ColorCode::get), Some(6));
        assert_eq!(state.target, [0, 255, 255]);
    }
}
