//! Fuzz target: `DebouncedButton`
//!
//! Interprets the input as a waveform of alternating HIGH/LOW segments
//! (1..=32 ms each, starting HIGH) and polls one button across it on the
//! loop cadence, verifying:
//! - No panics under arbitrary waveforms
//! - Never more press edges than LOW segments
//! - Every edge after the first needs a HIGH segment longer than the
//!   release window to re-arm
//!
//! cargo fuzz run fuzz_debounce

#![no_main]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use frontpanel::app::ports::{Direction, Line, LinePort};
use frontpanel::config::PanelTiming;
use frontpanel::drivers::button::DebouncedButton;
use frontpanel::error::LineError;
use libfuzzer_sys::fuzz_target;

// ── Waveform-driven LinePort ──────────────────────────────────

struct Wave {
    now_ms: u64,
    /// `(start_ms, level)`, sorted by start.
    segments: Vec<(u64, PinState)>,
}

impl LinePort for Wave {
    fn read(&mut self, _line: Line) -> PinState {
        self.segments
            .iter()
            .rev()
            .find(|(start, _)| *start <= self.now_ms)
            .map_or(PinState::High, |&(_, level)| level)
    }

    fn write(&mut self, _line: Line, _level: PinState) {}

    fn set_direction(&mut self, line: Line, _direction: Direction) -> Result<(), LineError> {
        Err(LineError::NotBidirectional(line))
    }
}

impl DelayNs for Wave {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ms += u64::from(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }
}

fuzz_target!(|data: &[u8]| {
    let timing = PanelTiming::default();
    let window = u64::from(timing.debounce_window_ms());

    let mut segments = Vec::with_capacity(data.len());
    let mut low_segments = 0u32;
    let mut long_high_segments = 0u32;
    let mut t = 0u64;
    for (i, byte) in data.iter().enumerate() {
        let level = if i % 2 == 0 { PinState::High } else { PinState::Low };
        let len = u64::from(byte % 32) + 1;
        match level {
            PinState::Low => low_segments += 1,
            PinState::High if len > window => long_high_segments += 1,
            PinState::High => {}
        }
        segments.push((t, level));
        t += len;
    }
    // Trailing release so the last press can re-arm.
    segments.push((t, PinState::High));

    let mut wave = Wave { now_ms: 0, segments };
    let mut button = DebouncedButton::new(Line::HaltButton);
    while wave.now_ms < t {
        button.poll(&mut wave, &timing);
        wave.delay_ms(timing.poll_interval_ms);
    }

    let edges = button.press_count();
    assert!(edges <= low_segments, "{edges} edges from {low_segments} presses");
    assert!(
        edges <= 1 + long_high_segments,
        "{edges} edges with only {long_high_segments} re-arming gaps"
    );
});
