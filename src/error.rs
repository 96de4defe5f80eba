//! Unified error types for the front-panel firmware.
//!
//! The panel logic itself has no failure modes: every input is a plain
//! logic level.  What can fail is the port underneath it (a direction
//! change requested on the wrong line, or a GPIO driver call rejected by
//! ESP-IDF).  All variants are `Copy` so they pass through the control
//! loop without allocation.

use core::fmt;

use crate::app::ports::Line;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A logic-line operation failed.
    Line(LineError),
    /// Board bring-up failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(e) => write!(f, "line: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Line errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// Direction changes are only defined for the line clock.
    NotBidirectional(Line),
    /// The GPIO driver rejected the request (`esp_err_t` code).
    Gpio { pin: i32, code: i32 },
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBidirectional(line) => {
                write!(f, "{line:?} has a fixed direction")
            }
            Self::Gpio { pin, code } => write!(f, "GPIO{pin} rejected (rc={code})"),
        }
    }
}

impl From<LineError> for Error {
    fn from(e: LineError) -> Self {
        Self::Line(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
