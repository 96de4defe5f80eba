//! Raw GPIO access for the panel lines.
//!
//! [`init_panel_pins`] configures every line once at boot and starts the
//! line-clock square wave on BEVNT.  After that the panel only samples,
//! drives and re-directs already-configured pins.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: direct `gpio_*` / `ledc_*` driver calls.
//! On host/test: inputs read HIGH (buttons released), writes and
//! direction changes are accepted and dropped.
//!
//! ## Line clock routing
//!
//! BEVNT carries the LEDC output signal, not the GPIO latch.  Releasing it
//! turns the pin into an input; driving it again must route LEDC channel 0
//! back onto the pin, since a plain `gpio_set_direction(.., OUTPUT)`
//! reconnects the pin to its GPIO latch and silences the waveform.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

use crate::app::ports::Direction;
#[cfg(target_os = "espidf")]
use crate::app::ports::{Line, LineRole};
#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::{LineError, Result};
use crate::pins;

// ── Line clock parameters ─────────────────────────────────────

/// Largest LEDC clock divider the timer accepts (`LEDC_TIMER_DIV_NUM_MAX`,
/// 10.8 fixed point).
pub const LEDC_DIV_MAX: u64 = 0x3_FFFF;

/// Smallest usable divider (1.0 in 10.8 fixed point).
pub const LEDC_DIV_MIN: u64 = 1 << 8;

/// 50 % duty at [`pins::LTC_DUTY_BITS`] resolution.
pub const LTC_DUTY: u32 = 1 << (pins::LTC_DUTY_BITS - 1);

/// Divider the LEDC driver computes for `freq_hz` at `bits` of duty
/// resolution, fed from a `src_clk_hz` clock.
pub const fn ledc_divider(src_clk_hz: u64, freq_hz: u32, bits: u32) -> u64 {
    (src_clk_hz << 8) / ((freq_hz as u64) << bits)
}

/// What the clock pin is connected to for a given direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockRoute {
    /// Output buffer off; an external source may drive BEVNT.
    Released,
    /// Output buffer on, fed by LEDC channel 0.
    Ledc,
}

pub const fn clock_route(direction: Direction) -> ClockRoute {
    match direction {
        Direction::Input => ClockRoute::Released,
        Direction::Output => ClockRoute::Ledc,
    }
}

// ── Bring-up ──────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_panel_pins() -> Result<()> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        for line in Line::ALL {
            configure(line)?;
        }
        start_line_clock()?;
    }
    info!("gpio: panel lines configured, LTC {} Hz", pins::LTC_FREQ_HZ);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_panel_pins() -> Result<()> {
    log::info!("gpio(sim): pin setup skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn configure(line: Line) -> core::result::Result<(), LineError> {
    let pin = pins::gpio(line);
    let (mode, pull_up) = match line.role() {
        LineRole::Input if line == Line::ProcessorRun => (gpio_mode_t_GPIO_MODE_INPUT, false),
        LineRole::Input => (gpio_mode_t_GPIO_MODE_INPUT, true),
        LineRole::Output | LineRole::Bidirectional => (gpio_mode_t_GPIO_MODE_OUTPUT, false),
    };
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(LineError::Gpio { pin, code: ret });
    }
    Ok(())
}

/// 50 % duty square wave at mains frequency, routed to BEVNT.
#[cfg(target_os = "espidf")]
unsafe fn start_line_clock() -> Result<()> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        // ledc_timer_bit_t values equal their bit count.
        duty_resolution: pins::LTC_DUTY_BITS as ledc_timer_bit_t,
        freq_hz: pins::LTC_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    if unsafe { ledc_timer_config(&timer) } != ESP_OK as i32 {
        return Err(Error::Init("LEDC timer"));
    }
    unsafe { attach_line_clock(pins::BEVNT_GPIO) }?;
    Ok(())
}

/// Bind LEDC channel 0 to `pin`.  `ledc_channel_config` enables the output
/// buffer and connects the LEDC signal through the GPIO matrix.
#[cfg(target_os = "espidf")]
unsafe fn attach_line_clock(pin: i32) -> core::result::Result<(), LineError> {
    let channel = ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: ledc_channel_t_LEDC_CHANNEL_0,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        gpio_num: pin,
        duty: LTC_DUTY,
        hpoint: 0,
        ..Default::default()
    };
    let ret = unsafe { ledc_channel_config(&channel) };
    if ret != ESP_OK as i32 {
        return Err(LineError::Gpio { pin, code: ret });
    }
    Ok(())
}

// ── Line access ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured pin; main-loop only.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes the output latch of a configured pin.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn write(_pin: i32, _high: bool) {}

/// Release or drive the line-clock pin.  Driving re-binds the LEDC
/// channel; see the module docs.
#[cfg(target_os = "espidf")]
pub fn set_direction(pin: i32, direction: Direction) -> core::result::Result<(), LineError> {
    match clock_route(direction) {
        ClockRoute::Released => {
            // SAFETY: plain driver call on a valid pin number.  Disables
            // the output buffer; the LEDC timer keeps running.
            let ret = unsafe { gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT) };
            if ret != ESP_OK as i32 {
                return Err(LineError::Gpio { pin, code: ret });
            }
            Ok(())
        }
        // SAFETY: main-loop only; the LEDC timer was configured at boot.
        ClockRoute::Ledc => unsafe { attach_line_clock(pin) },
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn set_direction(_pin: i32, _direction: Direction) -> core::result::Result<(), LineError> {
    Ok(())
}
