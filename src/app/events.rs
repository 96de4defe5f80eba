//! Outbound panel events.
//!
//! The [`FrontPanel`](super::service::FrontPanel) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, count them in a
//! test, etc.

use crate::control::clock::ClockMode;
use crate::drivers::button::ButtonId;

/// Structured events emitted by the panel core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Startup sequence finished; carries the resulting bus state.
    Started(BusStatus),

    /// A debounced press edge was detected.
    ButtonPressed(ButtonId),

    /// A held button was confirmed released.
    ButtonReleased(ButtonId),

    /// A reset pulse was issued and the bus is back up.
    ResetIssued,

    /// The halt request changed.
    HaltChanged { halted: bool },

    /// The line clock changed between driven and released.
    ClockChanged(ClockMode),
}

/// Externally observable bus and indicator state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusStatus {
    pub power_ok: bool,
    pub dc_ok: bool,
    /// HIGH lets the processor run.
    pub halt_request: bool,
    pub run_led: bool,
    pub halt_led: bool,
    pub aux_led: bool,
    pub clock: ClockMode,
    /// SRUN reports the processor executing instructions.
    pub processor_running: bool,
}

impl BusStatus {
    /// Halt requested (BHALT low).
    pub fn is_halted(&self) -> bool {
        !self.halt_request
    }

    /// Halt line and halt LED agree (BHALT low ⇔ LED lit).
    pub fn halt_indication_consistent(&self) -> bool {
        self.halt_request != self.halt_led
    }

    /// Bus fully powered and processor allowed to run.
    pub fn is_up(&self) -> bool {
        self.power_ok && self.dc_ok && self.halt_request
    }
}
