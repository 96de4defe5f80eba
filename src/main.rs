//! Front-panel Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │   HardwareAdapter              LogEventSink              │
//! │   (LinePort + DelayNs)         (EventSink)               │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            FrontPanel (pure logic)                 │  │
//! │  │   Buttons · BusSequencer · LineClock               │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Pin modes and the 60 Hz LEDC channel on BEVNT are configured once by
//! [`gpio::init_panel_pins`]; after that the panel only drives levels and
//! the BEVNT direction.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use frontpanel::adapters::delay::SystemDelay;
use frontpanel::adapters::hardware::HardwareAdapter;
use frontpanel::adapters::log_sink::LogEventSink;
use frontpanel::app::service::FrontPanel;
use frontpanel::config::PanelTiming;
use frontpanel::drivers::gpio;
use frontpanel::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Front panel v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Pins and adapters ──────────────────────────────────
    gpio::init_panel_pins()?;

    let timing = PanelTiming::default();
    info!(
        "Timing: settle={}ms reset={}ms debounce={}ms×{} poll={}ms, LTC {} Hz",
        timing.power_settle_ms,
        timing.reset_hold_ms(),
        timing.debounce_settle_ms,
        timing.debounce_rechecks,
        timing.poll_interval_ms,
        pins::LTC_FREQ_HZ,
    );

    let mut hw = HardwareAdapter::new(SystemDelay::new());
    let mut sink = LogEventSink::new();

    // ── 3. Power-up and control loop (never returns) ──────────
    let mut panel = FrontPanel::new(timing);
    match panel.run(&mut hw, &mut sink) {
        Ok(never) => match never {},
        Err(e) => {
            error!("Front panel stopped: {}, halting", e);
            Err(e.into())
        }
    }
}
