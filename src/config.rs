//! Panel timing parameters
//!
//! Every delay the panel uses, in one table.  The values are fixed by the
//! bus power-up contract and the switch hardware; they are not tunable at
//! runtime.  [`PanelTiming::default()`] is the only table the firmware
//! ever builds.

use serde::{Deserialize, Serialize};

/// Fixed delay table (all values in milliseconds unless noted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelTiming {
    // --- Startup ---
    /// Settle time after power-up before DC-OK is asserted.
    pub power_settle_ms: u32,
    /// DC-OK → power-OK spacing (also used at the end of a reset pulse).
    pub dc_to_power_ok_ms: u32,
    /// Power-OK → run LED, while the processor runs its power-up sequence.
    pub power_ok_to_run_ms: u32,
    /// Quiet period after the run LED lights, before buttons are polled.
    pub startup_hold_ms: u32,

    // --- Reset pulse ---
    /// Pause after forcing the processor to run, before the pulse starts.
    pub reset_lead_in_ms: u32,
    /// Power-OK low → DC-OK low.
    pub power_fail_to_dc_low_ms: u32,
    /// Time DC-OK is held low.
    pub dc_low_ms: u32,

    // --- Buttons ---
    /// Settle delay before each release re-check.
    pub debounce_settle_ms: u32,
    /// Released re-checks required after the first released sample.
    pub debounce_rechecks: u8,

    // --- Loop ---
    /// Sleep at the end of every control-loop iteration.  Also the
    /// sampling granularity of the press detector.
    pub poll_interval_ms: u32,
}

impl Default for PanelTiming {
    fn default() -> Self {
        Self {
            // Startup
            power_settle_ms: 1500,
            dc_to_power_ok_ms: 10,
            power_ok_to_run_ms: 100,
            startup_hold_ms: 500,

            // Reset pulse
            reset_lead_in_ms: 100,
            power_fail_to_dc_low_ms: 100,
            dc_low_ms: 100,

            // Buttons
            debounce_settle_ms: 5,
            debounce_rechecks: 2,

            // Loop
            poll_interval_ms: 10, // 100 Hz
        }
    }
}

impl PanelTiming {
    /// Total time the bus sits in reset (power-OK low until DC-OK rises).
    pub fn reset_hold_ms(&self) -> u32 {
        self.power_fail_to_dc_low_ms + self.dc_low_ms
    }

    /// Length of the release confirmation window, first sample to last.
    pub fn debounce_window_ms(&self) -> u32 {
        self.debounce_settle_ms * u32::from(self.debounce_rechecks)
    }

    /// Wall time consumed by the startup sequence.
    pub fn startup_ms(&self) -> u32 {
        self.power_settle_ms
            + self.dc_to_power_ok_ms
            + self.power_ok_to_run_ms
            + self.startup_hold_ms
    }

    /// Wall time consumed by one reset sequence.
    pub fn reset_ms(&self) -> u32 {
        self.reset_lead_in_ms
            + self.reset_hold_ms()
            + self.dc_to_power_ok_ms
            + self.power_ok_to_run_ms
    }
}
