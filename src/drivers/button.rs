//! Polled, debounced front-panel push-button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up: LOW = pressed,
//! HIGH = released.  Contact bounce settles within a few milliseconds.
//!
//! ## Debounce
//!
//! The press side needs no filtering: the first LOW sample fires the
//! action and latches the button as `Held`.  All filtering happens on
//! the release side, which must look clean before the button re-arms.
//!
//! | State  | Sample            | Result                                      |
//! |--------|-------------------|---------------------------------------------|
//! | `Idle` | LOW               | press edge, → `Held`                        |
//! | `Held` | HIGH ×3, 5ms apart| → `Idle` (re-armed)                         |
//! | `Held` | LOW on any re-check | stay `Held`, no edge                      |
//!
//! A released glitch inside a held press is therefore absorbed unless it
//! spans the first HIGH sample and both re-checks (10 ms with the default
//! timing).  Such a glitch re-arms the button and the next LOW sample
//! fires a second edge.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use log::{debug, trace};

use crate::app::ports::{Line, LinePort};
use crate::config::PanelTiming;

/// Level read from a pressed (active-low) button.
const PRESSED: PinState = PinState::Low;

/// The three front-panel buttons, in service priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Reset,
    Halt,
    Aux,
}

impl ButtonId {
    /// Service order within one loop iteration.
    pub const ALL: [ButtonId; 3] = [ButtonId::Reset, ButtonId::Halt, ButtonId::Aux];

    pub const fn line(self) -> Line {
        match self {
            Self::Reset => Line::ResetButton,
            Self::Halt => Line::HaltButton,
            Self::Aux => Line::AuxButton,
        }
    }
}

/// Debounce state of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Armed; the next LOW sample is a press.
    Idle,
    /// Press already reported; waiting for a confirmed release.
    Held,
}

pub struct DebouncedButton {
    line: Line,
    state: ButtonState,
    presses: u32,
}

impl DebouncedButton {
    pub fn new(line: Line) -> Self {
        Self {
            line,
            state: ButtonState::Idle,
            presses: 0,
        }
    }

    /// Input line this button is attached to.
    pub fn line(&self) -> Line {
        self.line
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Press edges reported since construction (wraps).
    pub fn press_count(&self) -> u32 {
        self.presses
    }

    /// Press half of a poll.  Returns `true` exactly once per physical
    /// press: on the first LOW sample while armed.
    pub fn detect_press(&mut self, port: &mut impl LinePort) -> bool {
        if self.state != ButtonState::Idle || port.read(self.line) != PRESSED {
            return false;
        }
        self.state = ButtonState::Held;
        self.presses = self.presses.wrapping_add(1);
        debug!("{:?}: press edge (#{})", self.line, self.presses);
        true
    }

    /// Release half of a poll.  When held and the line reads released,
    /// re-sample `debounce_rechecks` times, `debounce_settle_ms` apart.
    /// Blocks the caller for up to the full window.  Returns `true` when
    /// the button re-arms.
    pub fn confirm_release(
        &mut self,
        hw: &mut (impl LinePort + DelayNs),
        timing: &PanelTiming,
    ) -> bool {
        if self.state != ButtonState::Held || !self.reads_released(hw) {
            return false;
        }

        for recheck in 1..=timing.debounce_rechecks {
            hw.delay_ms(timing.debounce_settle_ms);
            if !self.reads_released(hw) {
                trace!("{:?}: bounce on re-check {}", self.line, recheck);
                return false;
            }
        }

        self.state = ButtonState::Idle;
        debug!("{:?}: released", self.line);
        true
    }

    /// Both halves back to back, as one loop iteration does for a single
    /// button.  Returns `true` on a press edge.
    pub fn poll(&mut self, hw: &mut (impl LinePort + DelayNs), timing: &PanelTiming) -> bool {
        let edge = self.detect_press(hw);
        self.confirm_release(hw, timing);
        edge
    }

    fn reads_released(&self, port: &mut impl LinePort) -> bool {
        port.read(self.line) != PRESSED
    }
}
