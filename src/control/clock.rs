//! Line-time clock (BEVNT) output control.
//!
//! The 60 Hz square wave itself comes from a free-running LEDC channel
//! configured at boot; this module only decides whether the panel drives
//! the line or releases it so an external clock source can take over.
//! The aux LED mirrors the mode: lit while driving.

use embedded_hal::digital::PinState;
use log::info;

use crate::app::ports::{Direction, Line, LinePort};
use crate::error::LineError;

/// Whether the panel drives the line clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// Line is an output carrying the generated waveform.
    Driving,
    /// Line is released (input); someone else may drive it.
    Released,
}

impl ClockMode {
    pub const fn direction(self) -> Direction {
        match self {
            Self::Driving => Direction::Output,
            Self::Released => Direction::Input,
        }
    }

    pub const fn led(self) -> PinState {
        match self {
            Self::Driving => PinState::High,
            Self::Released => PinState::Low,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Driving => Self::Released,
            Self::Released => Self::Driving,
        }
    }
}

/// Owner of the clock output mode.  Nothing else changes the BEVNT
/// direction.
pub struct LineClock {
    mode: ClockMode,
}

impl LineClock {
    pub fn new() -> Self {
        Self {
            mode: ClockMode::Driving,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Push the current mode out to the pins (startup).
    pub fn establish(&mut self, port: &mut impl LinePort) -> Result<(), LineError> {
        self.apply(port, self.mode)
    }

    /// Aux button action: flip between driving and released.
    pub fn toggle(&mut self, port: &mut impl LinePort) -> Result<ClockMode, LineError> {
        self.apply(port, self.mode.toggled())?;
        info!("LTC: {:?}", self.mode);
        Ok(self.mode)
    }

    /// Make sure the panel drives the clock.  Returns `true` if the mode
    /// changed.
    pub fn drive(&mut self, port: &mut impl LinePort) -> Result<bool, LineError> {
        let changed = self.mode != ClockMode::Driving;
        self.apply(port, ClockMode::Driving)?;
        if changed {
            info!("LTC: forced back to {:?}", self.mode);
        }
        Ok(changed)
    }

    fn apply(&mut self, port: &mut impl LinePort, mode: ClockMode) -> Result<(), LineError> {
        port.set_direction(Line::LineClock, mode.direction())?;
        port.write(Line::AuxLed, mode.led());
        self.mode = mode;
        Ok(())
    }
}

impl Default for LineClock {
    fn default() -> Self {
        Self::new()
    }
}
