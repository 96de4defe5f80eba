//! Simulated panel board for integration tests.
//!
//! Runs on a virtual clock: every delay the panel requests advances time
//! instead of sleeping, and button lines follow scripted press windows
//! evaluated at the current virtual time.  Every write is journaled with
//! its timestamp so tests can assert on ordering as well as final state.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use frontpanel::app::events::PanelEvent;
use frontpanel::app::ports::{Direction, EventSink, Line, LinePort};
use frontpanel::app::service::FrontPanel;
use frontpanel::config::PanelTiming;
use frontpanel::error::LineError;

// ── SimBoard ──────────────────────────────────────────────────

pub struct SimBoard {
    now_ns: u64,
    latches: [PinState; Line::COUNT],
    /// `(line, from_ms, until_ms)`: line reads LOW in `[from, until)`.
    presses: Vec<(Line, u64, u64)>,
    pub clock_direction: Direction,
    /// SRUN level the processor reports (LOW = running).
    pub srun: PinState,
    /// `(time_ms, line, level)` for every write, in order.
    pub journal: Vec<(u64, Line, PinState)>,
    pub direction_changes: Vec<(u64, Direction)>,
}

#[allow(dead_code)]
impl SimBoard {
    pub fn new() -> Self {
        Self {
            now_ns: 0,
            latches: [PinState::Low; Line::COUNT],
            presses: Vec::new(),
            clock_direction: Direction::Input,
            srun: PinState::High,
            journal: Vec::new(),
            direction_changes: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ns / 1_000_000
    }

    /// Hold `line` pressed for `hold_ms`, starting `after_ms` from now.
    pub fn press_in(&mut self, line: Line, after_ms: u64, hold_ms: u64) {
        let from = self.now_ms() + after_ms;
        self.presses.push((line, from, from + hold_ms));
    }

    /// Absolute press window.
    pub fn press_at(&mut self, line: Line, from_ms: u64, until_ms: u64) {
        self.presses.push((line, from_ms, until_ms));
    }

    pub fn level(&self, line: Line) -> PinState {
        self.latches[line.index()]
    }

    pub fn high(&self, line: Line) -> bool {
        self.level(line) == PinState::High
    }

    /// Journal entries for one line.
    pub fn writes_to(&self, line: Line) -> Vec<(u64, PinState)> {
        self.journal
            .iter()
            .filter(|(_, l, _)| *l == line)
            .map(|&(t, _, v)| (t, v))
            .collect()
    }

    /// Position in the journal of the first `level` write to `line` at or
    /// after journal index `from`.
    pub fn first_write(&self, line: Line, level: PinState, from: usize) -> Option<usize> {
        self.journal[from..]
            .iter()
            .position(|&(_, l, v)| l == line && v == level)
            .map(|p| p + from)
    }

    /// HIGH→LOW transitions written to `line`.
    pub fn falling_edges(&self, line: Line) -> usize {
        let writes = self.writes_to(line);
        writes
            .windows(2)
            .filter(|w| w[0].1 == PinState::High && w[1].1 == PinState::Low)
            .count()
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl LinePort for SimBoard {
    fn read(&mut self, line: Line) -> PinState {
        match line {
            Line::ProcessorRun => self.srun,
            l if l.is_input() => {
                let now = self.now_ms();
                let pressed = self
                    .presses
                    .iter()
                    .any(|&(pl, from, until)| pl == l && from <= now && now < until);
                if pressed { PinState::Low } else { PinState::High }
            }
            l => self.latches[l.index()],
        }
    }

    fn write(&mut self, line: Line, level: PinState) {
        self.journal.push((self.now_ms(), line, level));
        self.latches[line.index()] = level;
    }

    fn set_direction(&mut self, line: Line, direction: Direction) -> Result<(), LineError> {
        if !line.is_bidirectional() {
            return Err(LineError::NotBidirectional(line));
        }
        self.direction_changes.push((self.now_ms(), direction));
        self.clock_direction = direction;
        Ok(())
    }
}

impl DelayNs for SimBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ns += u64::from(ms) * 1_000_000;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<PanelEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&PanelEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PanelEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// A panel that has completed its startup sequence.
#[allow(dead_code)]
pub fn started_panel() -> (FrontPanel, SimBoard, RecordingSink) {
    let mut panel = FrontPanel::new(PanelTiming::default());
    let mut board = SimBoard::new();
    let mut sink = RecordingSink::new();
    panel
        .start(&mut board, &mut sink)
        .expect("startup on a simulated board cannot fail");
    (panel, board, sink)
}

/// Step the control loop for `ms` of virtual time.
#[allow(dead_code)]
pub fn run_for(panel: &mut FrontPanel, board: &mut SimBoard, sink: &mut RecordingSink, ms: u64) {
    let until = board.now_ms() + ms;
    while board.now_ms() < until {
        panel.step(board, sink).expect("step on a simulated board cannot fail");
    }
}
