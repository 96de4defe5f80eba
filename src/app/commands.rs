//! Inbound commands to the panel.
//!
//! Each front-panel button maps to exactly one command; the control loop
//! turns press edges into these and hands them to
//! [`FrontPanel::handle_command`](super::service::FrontPanel::handle_command).

use crate::drivers::button::ButtonId;

/// Actions the panel can perform on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Pulse BPOK/BDCOK through a full bus reset (resumes a halted CPU).
    Reset,

    /// Flip BHALT between run and halt.
    ToggleHalt,

    /// Drive or release the line-time clock.
    ToggleClock,
}

impl From<ButtonId> for PanelCommand {
    fn from(button: ButtonId) -> Self {
        match button {
            ButtonId::Reset => Self::Reset,
            ButtonId::Halt => Self::ToggleHalt,
            ButtonId::Aux => Self::ToggleClock,
        }
    }
}
