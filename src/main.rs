//! Enlarger timer firmware — main entry point.
//!
//! Hexagonal layout: the pure [`TimerService`] in the middle, hardware and
//! logging adapters around it, and a polled main loop driving both.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter            LogEventSink   MonotonicClock│
//! │  (Input+Display+Output)     (EventSink)    (ms uptime)   │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           TimerService (pure logic)                │  │
//! │  │  FSM · countdown · blink · encoder tracking        │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  Encoder ISR (GPIO any-edge) → QuadratureDecoder         │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{IOPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use enlarger_timer::adapters::hardware::{Buttons, HardwareAdapter};
use enlarger_timer::adapters::log_sink::LogEventSink;
use enlarger_timer::adapters::time::MonotonicClock;
use enlarger_timer::app::service::TimerService;
use enlarger_timer::config::TimerConfig;
use enlarger_timer::drivers::button::DebouncedButton;
use enlarger_timer::drivers::buzzer::Buzzer;
use enlarger_timer::drivers::encoder::QuadratureDecoder;
use enlarger_timer::drivers::hw_init;
use enlarger_timer::drivers::seven_segment::SegmentDisplay;
use enlarger_timer::drivers::tm1637::Tm1637;
use enlarger_timer::drivers::uv_source::UvSource;
use enlarger_timer::pins;

/// Fed from the encoder GPIO interrupt, read by the main loop.
static ENCODER: QuadratureDecoder = QuadratureDecoder::new();

/// Main loop pacing.  Well under the debounce and blink periods.
const LOOP_DELAY_MS: u32 = 1;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Enlarger timer v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = TimerConfig::default();
    config.validate()?;
    info!("Config: {}", config.to_json()?);

    // ── 3. Peripherals ────────────────────────────────────────
    // GPIO fields below must match the numbers in `pins`.
    let peripherals = Peripherals::take()?;
    let gpio = peripherals.pins;
    info!(
        "Pins: encoder {}/{}, buttons {}/{}/{}, display {}/{}, relay {}, buzzer {}",
        pins::ENCODER_CLK_GPIO,
        pins::ENCODER_DT_GPIO,
        pins::CONFIRM_BUTTON_GPIO,
        pins::START_BUTTON_GPIO,
        pins::STOP_BUTTON_GPIO,
        pins::DISPLAY_DIO_GPIO,
        pins::DISPLAY_CLK_GPIO,
        pins::UV_RELAY_GPIO,
        pins::BUZZER_GPIO,
    );

    hw_init::init_encoder_isr(&ENCODER)?;

    let button = |pin| -> Result<_> {
        let mut driver = PinDriver::input(pin)?;
        driver.set_pull(Pull::Up)?;
        Ok(DebouncedButton::new(driver, config.debounce_ms))
    };
    let buttons = Buttons {
        confirm: button(gpio.gpio4.downgrade())?,
        start: button(gpio.gpio7.downgrade())?,
        stop: button(gpio.gpio15.downgrade())?,
    };

    let mut dio = PinDriver::input_output_od(gpio.gpio9)?;
    dio.set_pull(Pull::Up)?;
    let clk = PinDriver::output(gpio.gpio10)?;
    let display = SegmentDisplay::new(Tm1637::new(clk, dio, Ets), config.scroll_frame_ms);

    let uv = UvSource::new(PinDriver::output(gpio.gpio2)?)?;
    let buzzer = Buzzer::new(PinDriver::output(gpio.gpio11)?, Ets);

    let mut hw = HardwareAdapter::new(buttons, &ENCODER, display, uv, buzzer);

    // ── 4. Application service ────────────────────────────────
    let clock = MonotonicClock::new();
    let mut log_sink = LogEventSink::new();
    let mut timer = TimerService::new(config);
    timer.start(clock.now_ms(), &mut hw, &mut log_sink);

    info!("System ready. Entering main loop.");

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        timer.poll(clock.now_ms(), &mut hw, &mut log_sink);
        FreeRtos::delay_ms(LOOP_DELAY_MS);
    }
}
