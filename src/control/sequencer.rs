//! Bus power sequencer.
//!
//! Drives BDCOK / BPOK / BHALT through the fixed sequences the processor
//! expects from its power supply:
//!
//! ```text
//!            power-up                       reset pulse
//!  BDCOK ____/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾    ‾‾‾‾‾‾‾‾‾‾‾‾\_____/‾‾‾‾‾‾‾‾‾
//!  BPOK  _____/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾    ‾‾‾‾‾‾‾\__________/‾‾‾‾‾‾‾‾
//!           1500 10                   100  100  100 10
//!  BHALT ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾    (forced HIGH before the pulse)
//! ```
//!
//! DC-OK always rises before power-OK and falls after it.  Every delay
//! blocks the caller; a sequence cannot be interrupted once started.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use log::info;

use crate::app::ports::{Line, LinePort};
use crate::config::PanelTiming;

pub struct BusSequencer {
    timing: PanelTiming,
    resets: u32,
}

impl BusSequencer {
    pub fn new(timing: PanelTiming) -> Self {
        Self { timing, resets: 0 }
    }

    /// Reset pulses issued since startup.
    pub fn reset_count(&self) -> u32 {
        self.resets
    }

    /// Initial line levels: indicators dark, bus in power-fail, processor
    /// allowed to run once power comes good.
    pub fn assert_power_fail(&self, port: &mut impl LinePort) {
        port.write(Line::RunLed, PinState::Low);
        port.write(Line::HaltLed, PinState::Low);
        port.write(Line::DcOk, PinState::Low);
        port.write(Line::PowerOk, PinState::Low);
        port.write(Line::HaltRequest, PinState::High);
    }

    /// Power-up half of the startup sequence.  Expects
    /// [`assert_power_fail`](Self::assert_power_fail) to have run.
    pub fn power_up(&self, hw: &mut (impl LinePort + DelayNs)) {
        info!("bus: settling {} ms before DC-OK", self.timing.power_settle_ms);
        hw.delay_ms(self.timing.power_settle_ms);
        self.raise_power(hw);
        hw.delay_ms(self.timing.startup_hold_ms);
        info!("bus: power-up complete");
    }

    /// Full reset pulse.  Resumes a halted processor first; the bus
    /// contract expects a reset to leave the CPU running.
    pub fn reset(&mut self, hw: &mut (impl LinePort + DelayNs)) {
        self.release_halt(hw);
        hw.delay_ms(self.timing.reset_lead_in_ms);

        info!("bus: reset pulse ({} ms)", self.timing.reset_hold_ms());
        hw.write(Line::RunLed, PinState::Low);
        hw.write(Line::PowerOk, PinState::Low);
        hw.delay_ms(self.timing.power_fail_to_dc_low_ms);
        hw.write(Line::DcOk, PinState::Low);
        hw.delay_ms(self.timing.dc_low_ms);

        self.raise_power(hw);
        self.resets = self.resets.wrapping_add(1);
        info!("bus: reset #{} complete", self.resets);
    }

    /// Halt/continue toggle, decided by the current BHALT level.
    /// Returns `true` if the processor is now halted.
    pub fn toggle_halt(&self, port: &mut impl LinePort) -> bool {
        if port.is_high(Line::HaltRequest) {
            port.write(Line::HaltRequest, PinState::Low);
            port.write(Line::HaltLed, PinState::High);
            info!("bus: halt requested");
            true
        } else {
            self.release_halt(port);
            info!("bus: halt released");
            false
        }
    }

    /// BHALT high, halt LED off.
    pub fn release_halt(&self, port: &mut impl LinePort) {
        port.write(Line::HaltRequest, PinState::High);
        port.write(Line::HaltLed, PinState::Low);
    }

    /// DC-OK, then power-OK, then the run LED once the processor has had
    /// time to start.
    fn raise_power(&self, hw: &mut (impl LinePort + DelayNs)) {
        hw.write(Line::DcOk, PinState::High);
        hw.delay_ms(self.timing.dc_to_power_ok_ms);
        hw.write(Line::PowerOk, PinState::High);
        hw.delay_ms(self.timing.power_ok_to_run_ms);
        hw.write(Line::RunLed, PinState::High);
    }
}
