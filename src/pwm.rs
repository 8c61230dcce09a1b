//! Software PWM engine and the channel levels it shares with the main loop.
//!
//! [`PwmLevels`] is the only state shared between the timer interrupt and the
//! foreground loop. Each channel is a single atomic byte: the main loop is the
//! only writer, the engine the only reader, and a read always observes either
//! the value before or after a write. No lock is taken on the tick path.

use crate::types::{CHANNEL_COUNT, Channel, FULL, Levels};
use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use critical_section::Mutex;
use embedded_hal::digital::{OutputPin, PinState};

/// Port bits for all three channels.
pub const CHANNEL_MASK: u8 = 0b0000_0111;

/// Trait for abstracting the three-line LED output port.
///
/// Bit `n` of `bits` drives [`Channel`] `n`. Handle any hardware errors
/// internally - this method cannot fail.
pub trait LedPort {
    /// Writes all three output lines at once.
    fn write(&mut self, bits: u8);
}

impl<P: LedPort + ?Sized> LedPort for &mut P {
    fn write(&mut self, bits: u8) {
        (**self).write(bits);
    }
}

impl<P: LedPort> LedPort for Option<P> {
    fn write(&mut self, bits: u8) {
        if let Some(port) = self {
            port.write(bits);
        }
    }
}

/// Channel levels read by the PWM engine, plus its run/pause switch.
///
/// Starts with every channel at [`FULL`] and the engine running.
pub struct PwmLevels {
    levels: [AtomicU8; CHANNEL_COUNT],
    running: AtomicBool,
}

impl PwmLevels {
    /// Creates levels at full intensity. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            levels: [AtomicU8::new(FULL), AtomicU8::new(FULL), AtomicU8::new(FULL)],
            running: AtomicBool::new(true),
        }
    }

    /// Returns the level of one channel.
    #[inline]
    pub fn get(&self, channel: Channel) -> u8 {
        self.levels[channel.index()].load(Ordering::Relaxed)
    }

    /// Stores the level of one channel in a single write.
    #[inline]
    pub fn set(&self, channel: Channel, level: u8) {
        self.levels[channel.index()].store(level, Ordering::Relaxed);
    }

    /// Returns all three levels.
    ///
    /// Each channel is read atomically; the three reads are not a single
    /// snapshot.
    pub fn snapshot(&self) -> Levels {
        let mut levels = [0; CHANNEL_COUNT];
        for channel in Channel::ALL {
            levels[channel.index()] = self.get(channel);
        }
        levels
    }

    /// Stores all three levels, one channel at a time.
    pub fn store(&self, levels: Levels) {
        for channel in Channel::ALL {
            self.set(channel, levels[channel.index()]);
        }
    }

    /// Stops the engine from ticking or writing the port.
    ///
    /// Takes the same critical section as [`PwmEngine::tick`], so a tick
    /// already under way finishes its write before this returns.
    pub fn pause(&self) {
        critical_section::with(|_| self.running.store(false, Ordering::Release));
    }

    /// Lets the engine tick again.
    pub fn resume(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Returns true unless the engine is paused.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for PwmLevels {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-driven software PWM generator.
///
/// Call [`tick`](Self::tick) from a periodic timer interrupt. The carrier
/// frequency is the tick rate divided by 256. The timer must be re-armed for a
/// full interval after each tick (auto-reload timers do this on their own).
pub struct PwmEngine<'a, P: LedPort> {
    levels: &'a PwmLevels,
    port: P,
    count: u8,
}

impl<'a, P: LedPort> PwmEngine<'a, P> {
    /// Creates an engine with its counter at zero.
    pub const fn new(levels: &'a PwmLevels, port: P) -> Self {
        Self {
            levels,
            port,
            count: 0,
        }
    }

    /// Advances the counter and writes the port.
    ///
    /// Returns the byte written, or `None` while paused. A paused engine
    /// neither counts nor writes. The running check and the port write happen
    /// in one critical section, so no write lands after [`PwmLevels::pause`]
    /// has returned.
    pub fn tick(&mut self) -> Option<u8> {
        critical_section::with(|_| {
            if !self.levels.is_running() {
                return None;
            }

            // Wrapping at 256 is the PWM period boundary.
            self.count = self.count.wrapping_add(1);
            let out = Self::output_for(&self.levels.snapshot(), self.count);
            self.port.write(out);
            Some(out)
        })
    }

    /// Output byte for `levels` at counter value `count`.
    ///
    /// A channel is high when its level is at or below the counter, so level
    /// 0 is always high and level 255 is high once per period.
    pub fn output_for(levels: &Levels, count: u8) -> u8 {
        Channel::ALL
            .iter()
            .filter(|channel| levels[channel.index()] <= count)
            .fold(0, |out, channel| out | channel.bit())
    }

    /// Current counter value.
    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Returns a reference to the port.
    pub fn port(&self) -> &P {
        &self.port
    }
}

/// An [`LedPort`] shared between the PWM interrupt and the foreground.
///
/// Each write takes a critical section, so the blink routine and the engine
/// never interleave inside a single port update.
pub struct SharedPort<'a, P> {
    inner: &'a Mutex<RefCell<P>>,
}

impl<'a, P> SharedPort<'a, P> {
    /// Wraps a port stored behind a critical-section mutex.
    pub const fn new(inner: &'a Mutex<RefCell<P>>) -> Self {
        Self { inner }
    }
}

impl<P> Clone for SharedPort<'_, P> {
    fn clone(&self) -> Self {
        Self { inner: self.inner }
    }
}

impl<P: LedPort> LedPort for SharedPort<'_, P> {
    fn write(&mut self, bits: u8) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).write(bits));
    }
}

/// Line level that lights a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// A set port bit drives the pin high.
    #[default]
    ActiveHigh,

    /// A set port bit drives the pin low.
    ActiveLow,
}

/// LED port built from three `embedded-hal` output pins.
pub struct PinLedPort<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    red: R,
    green: G,
    blue: B,
    polarity: Polarity,
}

impl<R, G, B> PinLedPort<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Creates a port from the pins for port bits 0, 1 and 2.
    pub fn new(red: R, green: G, blue: B, polarity: Polarity) -> Self {
        Self {
            red,
            green,
            blue,
            polarity,
        }
    }

    fn state_for(&self, bits: u8, channel: Channel) -> PinState {
        let set = bits & channel.bit() != 0;
        PinState::from(set != (self.polarity == Polarity::ActiveLow))
    }
}

impl<R, G, B> LedPort for PinLedPort<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn write(&mut self, bits: u8) {
        let red = self.state_for(bits, Channel::Red);
        let green = self.state_for(bits, Channel::Green);
        let blue = self.state_for(bits, Channel::Blue);

        let _ = self.red.set_state(red);
        let _ = self.green.set_state(green);
        let _ = self.blue.set_state(blue);
    }
}
