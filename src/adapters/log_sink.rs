//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing panel events to the ESP-IDF logger
//! (UART / USB-CDC in production).  Button traffic goes out at `debug`,
//! bus changes at `info`.

use log::{debug, info};

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PanelEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PanelEvent) {
        match event {
            PanelEvent::Started(s) => {
                info!(
                    "PANEL | started | BPOK={} BDCOK={} BHALT={} | run={} halt={} aux={} | \
                     ltc={:?} srun={}",
                    u8::from(s.power_ok),
                    u8::from(s.dc_ok),
                    u8::from(s.halt_request),
                    u8::from(s.run_led),
                    u8::from(s.halt_led),
                    u8::from(s.aux_led),
                    s.clock,
                    if s.processor_running { "RUN" } else { "STOP" },
                );
            }
            PanelEvent::ButtonPressed(id) => debug!("PANEL | {:?} pressed", id),
            PanelEvent::ButtonReleased(id) => debug!("PANEL | {:?} released", id),
            PanelEvent::ResetIssued => info!("PANEL | bus reset"),
            PanelEvent::HaltChanged { halted } => {
                info!("PANEL | {}", if *halted { "HALT" } else { "RUN" });
            }
            PanelEvent::ClockChanged(mode) => info!("PANEL | LTC {:?}", mode),
        }
    }
}
