//! Startup sequence and idle loop, observed from the bus side.

use embedded_hal::digital::PinState;
use frontpanel::app::events::PanelEvent;
use frontpanel::app::ports::{Direction, Line};
use frontpanel::app::service::FrontPanel;
use frontpanel::config::PanelTiming;
use frontpanel::control::clock::ClockMode;

use super::mock_hw::{RecordingSink, SimBoard, run_for, started_panel};

// ── Post-startup invariants ──────────────────────────────────

#[test]
fn startup_leaves_bus_running_with_clock_driven() {
    let (panel, mut board, _sink) = started_panel();
    let status = panel.status(&mut board);

    assert!(status.power_ok, "BPOK must be high after startup");
    assert!(status.dc_ok, "BDCOK must be high after startup");
    assert!(status.halt_request, "BHALT must be high (run) after startup");
    assert!(status.run_led);
    assert!(status.aux_led);
    assert!(!status.halt_led);
    assert_eq!(status.clock, ClockMode::Driving);
    assert_eq!(board.clock_direction, Direction::Output);
    assert_eq!(board.now_ms(), u64::from(PanelTiming::default().startup_ms()));
}

#[test]
fn startup_raises_dc_ok_before_power_ok() {
    let (_panel, board, _sink) = started_panel();

    assert_eq!(
        board.writes_to(Line::DcOk),
        vec![(0, PinState::Low), (1500, PinState::High)]
    );
    assert_eq!(
        board.writes_to(Line::PowerOk),
        vec![(0, PinState::Low), (1510, PinState::High)]
    );
    assert_eq!(
        board.writes_to(Line::RunLed),
        vec![(0, PinState::Low), (1610, PinState::High)]
    );
    assert_eq!(board.writes_to(Line::HaltRequest), vec![(0, PinState::High)]);
    assert_eq!(board.writes_to(Line::HaltLed), vec![(0, PinState::Low)]);
}

#[test]
fn startup_emits_single_started_event() {
    let (panel, mut board, sink) = started_panel();
    assert_eq!(sink.events, vec![PanelEvent::Started(panel.status(&mut board))]);
}

#[test]
fn status_reports_processor_run_line() {
    let mut panel = FrontPanel::new(PanelTiming::default());
    let mut board = SimBoard::new();
    let mut sink = RecordingSink::new();
    board.srun = PinState::Low;

    let status = panel.start(&mut board, &mut sink).unwrap();
    assert!(status.processor_running);

    board.srun = PinState::High;
    assert!(!panel.status(&mut board).processor_running);
}

#[test]
fn custom_timing_stretches_startup() {
    let timing = PanelTiming {
        power_settle_ms: 3000,
        ..PanelTiming::default()
    };
    let mut panel = FrontPanel::new(timing);
    let mut board = SimBoard::new();
    let mut sink = RecordingSink::new();

    panel.start(&mut board, &mut sink).unwrap();
    assert_eq!(board.writes_to(Line::DcOk)[1], (3000, PinState::High));
    assert_eq!(board.now_ms(), u64::from(timing.startup_ms()));
}

// ── Idle loop ────────────────────────────────────────────────

#[test]
fn idle_loop_never_touches_the_bus() {
    let (mut panel, mut board, mut sink) = started_panel();
    let writes_after_startup = board.journal.len();

    run_for(&mut panel, &mut board, &mut sink, 1000);

    assert_eq!(board.journal.len(), writes_after_startup);
    assert_eq!(sink.events.len(), 1, "only Started expected");
    assert_eq!(panel.cycle_count(), 100);
    assert!(panel.status(&mut board).is_up());
}
