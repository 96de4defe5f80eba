//! Fuzz target: `FrontPanel` control loop
//!
//! Each input byte pair is `(button mask, duration)`: the three low bits
//! hold reset/halt/aux down for `duration` ms.  After power-up the loop
//! runs across the whole script, checking after every iteration:
//! - No panics and no port errors
//! - BPOK, BDCOK and the run LED are high
//! - Halt LED matches BHALT, aux LED matches the clock mode
//!
//! cargo fuzz run fuzz_panel_loop

#![no_main]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use frontpanel::app::events::PanelEvent;
use frontpanel::app::ports::{Direction, EventSink, Line, LinePort};
use frontpanel::app::service::FrontPanel;
use frontpanel::config::PanelTiming;
use frontpanel::control::clock::ClockMode;
use frontpanel::error::LineError;
use libfuzzer_sys::fuzz_target;

const BUTTONS: [Line; 3] = [Line::ResetButton, Line::HaltButton, Line::AuxButton];

struct ScriptBoard {
    now_ms: u64,
    latches: [PinState; Line::COUNT],
    /// `(start_ms, mask)`, sorted by start.
    script: Vec<(u64, u8)>,
}

impl LinePort for ScriptBoard {
    fn read(&mut self, line: Line) -> PinState {
        let Some(bit) = BUTTONS.iter().position(|&b| b == line) else {
            return self.latches[line.index()];
        };
        let mask = self
            .script
            .iter()
            .rev()
            .find(|(start, _)| *start <= self.now_ms)
            .map_or(0, |&(_, mask)| mask);
        if mask & (1 << bit) != 0 { PinState::Low } else { PinState::High }
    }

    fn write(&mut self, line: Line, level: PinState) {
        self.latches[line.index()] = level;
    }

    fn set_direction(&mut self, line: Line, _direction: Direction) -> Result<(), LineError> {
        if line.is_bidirectional() {
            Ok(())
        } else {
            Err(LineError::NotBidirectional(line))
        }
    }
}

impl DelayNs for ScriptBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ms += u64::from(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &PanelEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let timing = PanelTiming::default();
    let mut t = u64::from(timing.startup_ms());
    let mut script = Vec::with_capacity(data.len() / 2 + 1);
    for pair in data.chunks_exact(2) {
        script.push((t, pair[0] & 0b111));
        t += u64::from(pair[1]) + 1;
    }
    script.push((t, 0));
    let end = t + 500;

    let mut board = ScriptBoard {
        now_ms: 0,
        latches: [PinState::Low; Line::COUNT],
        script,
    };
    let mut panel = FrontPanel::new(timing);
    panel.start(&mut board, &mut Discard).expect("startup");

    while board.now_ms < end {
        panel.step(&mut board, &mut Discard).expect("step");
        let s = panel.status(&mut board);
        assert!(s.power_ok && s.dc_ok && s.run_led, "bus down between cycles: {s:?}");
        assert!(s.halt_indication_consistent(), "halt LED disagrees: {s:?}");
        assert_eq!(s.aux_led, panel.clock_mode() == ClockMode::Driving);
    }
});
