//! Front-panel service: the hexagonal core.
//!
//! [`FrontPanel`] owns the three debounced buttons, the bus sequencer and
//! the line-clock toggle.  Ports are injected at every call site, so the
//! whole loop runs against a simulated line set in tests.
//!
//! ```text
//!   LinePort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                │          FrontPanel           │
//!   DelayNs  ◀── │ Buttons · Sequencer · Clock   │
//!                └──────────────────────────────┘
//! ```
//!
//! One loop iteration:
//!
//! 1. press phase: reset, halt, aux; each edge dispatches its command
//! 2. release phase: same order; held buttons confirm release
//! 3. sleep `poll_interval_ms`

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::PanelTiming;
use crate::control::clock::{ClockMode, LineClock};
use crate::control::sequencer::BusSequencer;
use crate::drivers::button::{ButtonId, DebouncedButton};
use crate::error::Result;

use super::commands::PanelCommand;
use super::events::{BusStatus, PanelEvent};
use super::ports::{EventSink, Line, LinePort};

// ───────────────────────────────────────────────────────────────
// FrontPanel
// ───────────────────────────────────────────────────────────────

pub struct FrontPanel {
    timing: PanelTiming,
    sequencer: BusSequencer,
    clock: LineClock,
    /// Indexed in [`ButtonId::ALL`] order.
    buttons: [DebouncedButton; 3],
    cycles: u64,
}

impl FrontPanel {
    /// Does **not** touch the pins: call [`start`](Self::start) or
    /// [`run`](Self::run) next.
    pub fn new(timing: PanelTiming) -> Self {
        Self {
            timing,
            sequencer: BusSequencer::new(timing),
            clock: LineClock::new(),
            buttons: ButtonId::ALL.map(|id| DebouncedButton::new(id.line())),
            cycles: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Startup sequence: bus held in power-fail, clock driving, then the
    /// timed power-up.  Blocks for [`PanelTiming::startup_ms`].
    pub fn start(
        &mut self,
        hw: &mut (impl LinePort + DelayNs),
        sink: &mut impl EventSink,
    ) -> Result<BusStatus> {
        self.sequencer.assert_power_fail(hw);
        self.clock.establish(hw)?;
        self.sequencer.power_up(hw);

        let status = self.status(hw);
        sink.emit(&PanelEvent::Started(status));
        info!("FrontPanel started: {:?}", status);
        Ok(status)
    }

    /// Startup, then the control loop forever.  Only returns if a port
    /// fails.
    pub fn run(
        &mut self,
        hw: &mut (impl LinePort + DelayNs),
        sink: &mut impl EventSink,
    ) -> Result<Infallible> {
        self.start(hw, sink)?;
        info!("FrontPanel: polling every {} ms", self.timing.poll_interval_ms);
        loop {
            self.step(hw, sink)?;
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One control-loop iteration.
    pub fn step(
        &mut self,
        hw: &mut (impl LinePort + DelayNs),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        // 1. Press edges, in priority order
        for (idx, id) in ButtonId::ALL.into_iter().enumerate() {
            if self.buttons[idx].detect_press(hw) {
                sink.emit(&PanelEvent::ButtonPressed(id));
                self.handle_command(PanelCommand::from(id), hw, sink)?;
            }
        }

        // 2. Release confirmation (may block for the debounce window)
        for (idx, id) in ButtonId::ALL.into_iter().enumerate() {
            if self.buttons[idx].confirm_release(hw, &self.timing) {
                sink.emit(&PanelEvent::ButtonReleased(id));
            }
        }

        // 3. Inter-cycle sleep
        hw.delay_ms(self.timing.poll_interval_ms);
        self.cycles += 1;
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Perform one panel action.
    pub fn handle_command(
        &mut self,
        cmd: PanelCommand,
        hw: &mut (impl LinePort + DelayNs),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            PanelCommand::Reset => {
                // The processor must come out of reset with a line clock.
                if self.clock.drive(hw)? {
                    sink.emit(&PanelEvent::ClockChanged(ClockMode::Driving));
                }
                self.sequencer.reset(hw);
                sink.emit(&PanelEvent::ResetIssued);
            }
            PanelCommand::ToggleHalt => {
                let halted = self.sequencer.toggle_halt(hw);
                sink.emit(&PanelEvent::HaltChanged { halted });
            }
            PanelCommand::ToggleClock => {
                let mode = self.clock.toggle(hw)?;
                sink.emit(&PanelEvent::ClockChanged(mode));
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the bus and indicator lines.
    pub fn status(&self, port: &mut impl LinePort) -> BusStatus {
        BusStatus {
            power_ok: port.is_high(Line::PowerOk),
            dc_ok: port.is_high(Line::DcOk),
            halt_request: port.is_high(Line::HaltRequest),
            run_led: port.is_high(Line::RunLed),
            halt_led: port.is_high(Line::HaltLed),
            aux_led: port.is_high(Line::AuxLed),
            clock: self.clock.mode(),
            processor_running: !port.is_high(Line::ProcessorRun),
        }
    }

    pub fn clock_mode(&self) -> ClockMode {
        self.clock.mode()
    }

    pub fn button(&self, id: ButtonId) -> &DebouncedButton {
        &self.buttons[id as usize]
    }

    /// Completed control-loop iterations.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Reset pulses issued since startup.
    pub fn reset_count(&self) -> u32 {
        self.sequencer.reset_count()
    }

    pub fn timing(&self) -> &PanelTiming {
        &self.timing
    }
}
