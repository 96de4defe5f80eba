//! GPIO pin assignments for the front-panel board.
//!
//! Single source of truth: the hardware adapter maps every [`Line`]
//! through [`gpio`] rather than hard-coding pin numbers.
//!
//! Bus signals go through open-collector buffers on the backplane side;
//! the levels seen here are the logical, active-high values.

use crate::app::ports::Line;

// ---------------------------------------------------------------------------
// Bus control (to the minicomputer backplane)
// ---------------------------------------------------------------------------

/// BDCOK: DC power stable.
pub const BDCOK_GPIO: i32 = 1;
/// BPOK: AC power stable; processor leaves power-fail when this rises.
pub const BPOK_GPIO: i32 = 2;
/// BHALT: HIGH allows the processor to run, LOW requests halt (ODT).
pub const BHALT_GPIO: i32 = 3;
/// BEVNT: line-time clock.  Driven by the LEDC square wave, or released
/// so an external source can drive it.
pub const BEVNT_GPIO: i32 = 4;
/// SRUN: processor status, LOW while running.
pub const SRUN_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Push-buttons (active-low, external pull-ups)
// ---------------------------------------------------------------------------

/// SW1: system reset.
pub const RESET_BTN_GPIO: i32 = 6;
/// SW2: halt / continue.
pub const HALT_BTN_GPIO: i32 = 7;
/// SW3: auxiliary, controls the line clock.
pub const AUX_BTN_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Indicator LEDs (active-high)
// ---------------------------------------------------------------------------

pub const RUN_LED_GPIO: i32 = 11;
pub const HALT_LED_GPIO: i32 = 12;
pub const AUX_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Line clock
// ---------------------------------------------------------------------------

/// Mains frequency emitted on BEVNT when the panel drives it.
pub const LTC_FREQ_HZ: u32 = 60;
/// LEDC duty resolution for the line clock.  Mains frequency is far below
/// what an 8-bit timer can divide down to; 14 bits keeps the divider in
/// range for every LEDC clock source.
pub const LTC_DUTY_BITS: u32 = 14;

/// GPIO number wired to `line`.
pub const fn gpio(line: Line) -> i32 {
    match line {
        Line::ResetButton => RESET_BTN_GPIO,
        Line::HaltButton => HALT_BTN_GPIO,
        Line::AuxButton => AUX_BTN_GPIO,
        Line::ProcessorRun => SRUN_GPIO,
        Line::PowerOk => BPOK_GPIO,
        Line::DcOk => BDCOK_GPIO,
        Line::HaltRequest => BHALT_GPIO,
        Line::RunLed => RUN_LED_GPIO,
        Line::HaltLed => HALT_LED_GPIO,
        Line::AuxLed => AUX_LED_GPIO,
        Line::LineClock => BEVNT_GPIO,
    }
}
