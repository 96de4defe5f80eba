//! Bus-facing control: power sequencing and the line-time clock.

pub mod clock;
pub mod sequencer;
