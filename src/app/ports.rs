//! Port traits: the hexagonal boundary between panel logic and the pins.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FrontPanel (domain)
//! ```
//!
//! Driven adapters (GPIO, log output) implement these traits.  The
//! [`FrontPanel`](super::service::FrontPanel) receives them at each call
//! site, so the domain core never touches hardware directly.
//!
//! Blocking delays use [`embedded_hal::delay::DelayNs`] rather than a
//! port of our own; any HAL delay (or a test clock) plugs straight in.

use embedded_hal::digital::PinState;

use crate::error::LineError;

// ───────────────────────────────────────────────────────────────
// Line identity
// ───────────────────────────────────────────────────────────────

/// Every logic line the panel touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Line {
    // Inputs
    ResetButton = 0,
    HaltButton = 1,
    AuxButton = 2,
    /// SRUN, LOW while the processor executes.
    ProcessorRun = 3,

    // Bus control outputs
    PowerOk = 4,
    DcOk = 5,
    HaltRequest = 6,

    // Indicators
    RunLed = 7,
    HaltLed = 8,
    AuxLed = 9,

    /// BEVNT line-time clock.  The only line whose direction changes.
    LineClock = 10,
}

/// Fixed wiring role of a [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Input,
    Output,
    Bidirectional,
}

/// Runtime direction of a bidirectional line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Released (high impedance); another source may drive the line.
    Input,
    /// Driven by the panel.
    Output,
}

impl Line {
    pub const COUNT: usize = 11;

    pub const ALL: [Line; Line::COUNT] = [
        Line::ResetButton,
        Line::HaltButton,
        Line::AuxButton,
        Line::ProcessorRun,
        Line::PowerOk,
        Line::DcOk,
        Line::HaltRequest,
        Line::RunLed,
        Line::HaltLed,
        Line::AuxLed,
        Line::LineClock,
    ];

    pub const fn role(self) -> LineRole {
        match self {
            Self::ResetButton | Self::HaltButton | Self::AuxButton | Self::ProcessorRun => {
                LineRole::Input
            }
            Self::LineClock => LineRole::Bidirectional,
            _ => LineRole::Output,
        }
    }

    pub const fn is_input(self) -> bool {
        matches!(self.role(), LineRole::Input)
    }

    pub const fn is_bidirectional(self) -> bool {
        matches!(self.role(), LineRole::Bidirectional)
    }

    /// Dense index, for per-line tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ───────────────────────────────────────────────────────────────
// Line port (driven adapter: domain ↔ pins)
// ───────────────────────────────────────────────────────────────

/// Read/write access to the panel's logic lines.
pub trait LinePort {
    /// Sample a line.  Inputs return the pin level; outputs return the
    /// level last written (latch read-back).
    fn read(&mut self, line: Line) -> PinState;

    /// Drive an output line.
    fn write(&mut self, line: Line, level: PinState);

    /// Switch the direction of a bidirectional line.
    ///
    /// Implementations MUST reject every line whose role is not
    /// [`LineRole::Bidirectional`] with [`LineError::NotBidirectional`].
    fn set_direction(&mut self, line: Line, direction: Direction) -> Result<(), LineError>;

    fn is_high(&mut self, line: Line) -> bool {
        self.read(line) == PinState::High
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The panel emits structured [`PanelEvent`](super::events::PanelEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::PanelEvent);
}

// ───────────────────────────────────────────────────────────────
// In-crate test double
// ───────────────────────────────────────────────────────────────
