//! Button sampling and edge detection.
//!
//! Buttons are polled once per main-loop iteration; the loop delay is the
//! debounce interval. Bits carry the raw line level, so with the usual pull-up
//! wiring an idle button reads 1 and a held button reads 0. A `released` edge
//! is a 1 to 0 transition of the line.

use embedded_hal::digital::InputPin;

/// A set of buttons as a two-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    /// No buttons.
    pub const NONE: Buttons = Buttons(0);

    /// Mode button (bit 0): toggles cycling and fixed mode.
    pub const MODE: Buttons = Buttons(0b01);

    /// Change button (bit 1): speed in cycling mode, color in fixed mode.
    pub const CHANGE: Buttons = Buttons(0b10);

    /// Both buttons.
    pub const ALL: Buttons = Buttons(0b11);

    /// Builds a set from raw bits, ignoring bits above bit 1.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Buttons(bits & Self::ALL.0)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every button in `other` is in this set.
    #[inline]
    pub const fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Self) -> Self::Output {
        Buttons(self.0 | rhs.0)
    }
}

impl core::ops::BitAnd for Buttons {
    type Output = Buttons;

    fn bitand(self, rhs: Self) -> Self::Output {
        Buttons(self.0 & rhs.0)
    }
}

impl core::ops::BitXor for Buttons {
    type Output = Buttons;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Buttons(self.0 ^ rhs.0)
    }
}

impl core::ops::Not for Buttons {
    type Output = Buttons;

    fn not(self) -> Self::Output {
        Buttons::from_bits(!self.0)
    }
}

/// Trait for abstracting the two button inputs.
pub trait ButtonPort {
    /// Reads the current line level of both buttons.
    fn read(&mut self) -> Buttons;
}

impl<B: ButtonPort + ?Sized> ButtonPort for &mut B {
    fn read(&mut self) -> Buttons {
        (**self).read()
    }
}

/// Edges detected by one poll. Valid only for the iteration that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdges {
    /// Lines that went from 0 to 1.
    pub pressed: Buttons,

    /// Lines that went from 1 to 0.
    pub released: Buttons,
}

/// Edge detector over successive button samples.
#[derive(Debug, Clone, Copy)]
pub struct ButtonPoller {
    previous: Buttons,
}

impl ButtonPoller {
    /// Takes the initial sample so the first poll reports no spurious edges.
    pub fn new<B: ButtonPort + ?Sized>(port: &mut B) -> Self {
        Self {
            previous: port.read(),
        }
    }

    /// Samples the buttons and returns the edges since the previous sample.
    pub fn poll<B: ButtonPort + ?Sized>(&mut self, port: &mut B) -> ButtonEdges {
        let current = port.read();
        let changed = self.previous ^ current;

        self.previous = current;
        ButtonEdges {
            pressed: changed & current,
            released: changed & !current,
        }
    }
}

/// Button port built from two `embedded-hal` input pins.
///
/// Reports raw line levels. A pin that fails to read is treated as idle high.
pub struct PinButtons<M, C>
where
    M: InputPin,
    C: InputPin,
{
    mode: M,
    change: C,
}

impl<M, C> PinButtons<M, C>
where
    M: InputPin,
    C: InputPin,
{
    /// Creates a port from the mode (bit 0) and change (bit 1) pins.
    pub fn new(mode: M, change: C) -> Self {
        Self { mode, change }
    }
}

impl<M, C> ButtonPort for PinButtons<M, C>
where
    M: InputPin,
    C: InputPin,
{
    fn read(&mut self) -> Buttons {
        let mut buttons = Buttons::NONE;
        if self.mode.is_high().unwrap_or(true) {
            buttons = buttons | Buttons::MODE;
        }
        if self.change.is_high().unwrap_or(true) {
            buttons = buttons | Buttons::CHANGE;
        }
        buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Buttons);

    impl ButtonPort for Fixed {
        fn read(&mut self) -> Buttons {
            self.0
        }
    }

    #[test]
    fn first_poll_after_init_has_no_edges() {
        let mut port = Fixed(Buttons::ALL);
        let mut poller = ButtonPoller::new(&mut port);

        assert_eq!(poller.poll(&mut port), ButtonEdges::default());
    }

    #[test]
    fn falling_line_is_a_release() {
        let mut port = Fixed(Buttons::ALL);
        let mut poller = ButtonPoller::new(&mut port);

        port.0 = Buttons::CHANGE;
        let edges = poller.poll(&mut port);
        assert_eq!(edges.released, Buttons::MODE);
        assert!(edges.pressed.is_empty());

        port.0 = Buttons::ALL;
        let edges = poller.poll(&mut port);
        assert_eq!(edges.pressed, Buttons::MODE);
        assert!(edges.released.is_empty());
    }

    #[test]
    fn not_stays_within_two_bits() {
        assert_eq!(!Buttons::NONE, Buttons::ALL);
        assert_eq!((!Buttons::MODE).bits(), 0b10);
    }
}
