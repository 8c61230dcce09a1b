//! Shared test infrastructure for rgb-cycler integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::delay::DelayNs;
use rgb_cycler::{ButtonPort, Buttons, ControllerConfig, LedPort, RandomSource};

// ============================================================================
// Mock LED Port
// ============================================================================

/// Mock port that records every write
pub struct MockPort {
    last: Option<u8>,
    history: heapless::Vec<u8, 256>,
    writes: usize,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            last: None,
            history: heapless::Vec::new(),
            writes: 0,
        }
    }

    pub fn last(&self) -> Option<u8> {
        self.last
    }

    /// First writes, up to the history capacity
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn clear(&mut self) {
        self.last = None;
        self.history.clear();
        self.writes = 0;
    }
}

impl LedPort for MockPort {
    fn write(&mut self, bits: u8) {
        self.last = Some(bits);
        self.writes += 1;
        let _ = self.history.push(bits);
    }
}

// ============================================================================
// Mock Buttons
// ============================================================================

/// Button lines under test control. Idle is both lines high (pull-ups).
pub struct MockButtons {
    lines: Buttons,
}

impl MockButtons {
    pub fn idle() -> Self {
        Self { lines: Buttons::ALL }
    }

    /// Pull the given buttons' lines low
    pub fn hold(&mut self, buttons: Buttons) {
        self.lines = !buttons;
    }

    /// Let every line float high again
    pub fn let_go(&mut self) {
        self.lines = Buttons::ALL;
    }
}

impl ButtonPort for MockButtons {
    fn read(&mut self) -> Buttons {
        self.lines
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that only records how long it was asked to wait
pub struct MockDelay {
    total_ns: u64,
    calls: usize,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            total_ns: 0,
            calls: 0,
        }
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us.saturating_mul(1_000));
    }
}

// ============================================================================
// Scripted Random Source
// ============================================================================

/// Random source replaying a fixed script, repeating it when exhausted
pub struct ScriptedRandom {
    script: heapless::Vec<u8, 16>,
    position: usize,
}

impl ScriptedRandom {
    pub fn new(values: &[u8]) -> Self {
        let mut script = heapless::Vec::new();
        for value in values {
            let _ = script.push(*value);
        }
        Self {
            script,
            position: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: u8) -> u8 {
        if self.script.is_empty() || bound == 0 {
            return 0;
        }
        let value = self.script[self.position % self.script.len()];
        self.position += 1;
        value % bound
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Configuration with small, distinct delays so tests can tell them apart
pub fn test_config() -> ControllerConfig {
    ControllerConfig::default()
        .with_loop_delays(10, 20, 30)
        .with_blink(100, 1_000)
}
