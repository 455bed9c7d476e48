//! One-shot hardware initialisation for the encoder interrupt path.
//!
//! Configures the two encoder lines as pulled-up inputs with any-edge
//! interrupts using raw ESP-IDF sys calls, and registers an ISR that feeds
//! both line levels into a [`QuadratureDecoder`].  Buttons, display, relay
//! and buzzer go through `esp-idf-hal` pin drivers in `main()` instead.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::drivers::encoder::QuadratureDecoder;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrAddFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrAddFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(_: HwInitError) -> Self {
        Self::Init("encoder GPIO / ISR")
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── GPIO reads ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe from ISR and main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── Encoder ISR ───────────────────────────────────────────────

/// Any-edge handler shared by both encoder lines.  `arg` is the
/// `&'static QuadratureDecoder` registered in [`init_encoder_isr`].
#[cfg(target_os = "espidf")]
unsafe extern "C" fn encoder_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` was produced from a `&'static QuadratureDecoder` and the
    // decoder is only accessed through its atomics.
    let decoder = unsafe { &*(arg as *const QuadratureDecoder) };
    decoder.tick(
        gpio_read(pins::ENCODER_CLK_GPIO),
        gpio_read(pins::ENCODER_DT_GPIO),
    );
}

/// Configure both encoder lines and attach the decoder ISR.
/// Call once from `main()` before the loop starts.
#[cfg(target_os = "espidf")]
pub fn init_encoder_isr(decoder: &'static QuadratureDecoder) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: (1u64 << pins::ENCODER_CLK_GPIO) | (1u64 << pins::ENCODER_DT_GPIO),
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    // SAFETY: single-threaded init path, before the ISR is attached.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    // Start from the real line state so the first edge decodes correctly.
    decoder.tick(
        gpio_read(pins::ENCODER_CLK_GPIO),
        gpio_read(pins::ENCODER_DT_GPIO),
    );

    let arg = decoder as *const QuadratureDecoder as *mut core::ffi::c_void;

    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed.  The handler only touches the
    // decoder's atomics, and `decoder` lives for 'static.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        for pin in [pins::ENCODER_CLK_GPIO, pins::ENCODER_DT_GPIO] {
            let ret = gpio_isr_handler_add(pin, Some(encoder_gpio_isr), arg);
            if ret != ESP_OK {
                return Err(HwInitError::IsrAddFailed(ret));
            }
            gpio_intr_enable(pin);
        }
    }

    info!(
        "hw_init: encoder ISR on GPIO{} / GPIO{}",
        pins::ENCODER_CLK_GPIO,
        pins::ENCODER_DT_GPIO
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_encoder_isr(_decoder: &'static QuadratureDecoder) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): encoder ISR skipped");
    Ok(())
}
