//! Hardware adapter: bridges the panel GPIO to the domain port traits.
//!
//! Implements [`LinePort`] over [`drivers::gpio`](crate::drivers::gpio)
//! and forwards [`DelayNs`] to [`SystemDelay`], so a single `&mut` value
//! satisfies the `impl LinePort + DelayNs` bound the
//! [`FrontPanel`](crate::app::service::FrontPanel) expects.
//!
//! Output levels are kept in shadow latches: an output pin configured
//! without its input buffer reads back 0 on ESP32, and the halt toggle
//! needs the level it last wrote.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use log::debug;

use crate::adapters::delay::SystemDelay;
use crate::app::ports::{Direction, Line, LinePort};
use crate::drivers::gpio;
use crate::error::LineError;
use crate::pins;

/// Concrete adapter that owns every panel line plus the delay source.
pub struct HardwareAdapter {
    latches: [PinState; Line::COUNT],
    delay: SystemDelay,
}

impl HardwareAdapter {
    pub fn new(delay: SystemDelay) -> Self {
        Self {
            latches: [PinState::Low; Line::COUNT],
            delay,
        }
    }
}

// ── LinePort implementation ───────────────────────────────────

impl LinePort for HardwareAdapter {
    fn read(&mut self, line: Line) -> PinState {
        if line.is_input() {
            PinState::from(gpio::read(pins::gpio(line)))
        } else {
            self.latches[line.index()]
        }
    }

    fn write(&mut self, line: Line, level: PinState) {
        gpio::write(pins::gpio(line), level == PinState::High);
        self.latches[line.index()] = level;
    }

    fn set_direction(&mut self, line: Line, direction: Direction) -> Result<(), LineError> {
        if !line.is_bidirectional() {
            return Err(LineError::NotBidirectional(line));
        }
        gpio::set_direction(pins::gpio(line), direction)?;
        debug!("GPIO{} -> {:?}", pins::gpio(line), direction);
        Ok(())
    }
}

// ── DelayNs implementation ────────────────────────────────────

impl DelayNs for HardwareAdapter {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
