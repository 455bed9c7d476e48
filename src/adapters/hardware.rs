//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the three debounced buttons, a handle to the ISR-fed encoder
//! decoder, the display, the UV relay and the buzzer, and exposes them
//! through [`InputPort`], [`DisplayPort`] and [`OutputPort`].  This is the
//! only module in the system that touches actual hardware.  Driver errors
//! are logged here and go no further.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::input::InputSnapshot;
use crate::app::ports::{DisplayPort, InputPort, OutputPort};
use crate::drivers::button::DebouncedButton;
use crate::drivers::buzzer::{Buzzer, CUE};
use crate::drivers::encoder::QuadratureDecoder;
use crate::drivers::seven_segment::SegmentDisplay;
use crate::drivers::uv_source::UvSource;
use crate::error::Result;

/// The three front-panel buttons.
pub struct Buttons<P> {
    pub confirm: DebouncedButton<P>,
    pub start: DebouncedButton<P>,
    pub stop: DebouncedButton<P>,
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<BTN, CLK, DIO, DD, UV, BZ, BD> {
    buttons: Buttons<BTN>,
    encoder: &'static QuadratureDecoder,
    display: SegmentDisplay<CLK, DIO, DD>,
    uv: UvSource<UV>,
    buzzer: Buzzer<BZ, BD>,
}

impl<BTN, CLK, DIO, DD, UV, BZ, BD> HardwareAdapter<BTN, CLK, DIO, DD, UV, BZ, BD>
where
    BTN: InputPin,
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    DD: DelayNs,
    UV: OutputPin,
    BZ: OutputPin,
    BD: DelayNs,
{
    pub fn new(
        buttons: Buttons<BTN>,
        encoder: &'static QuadratureDecoder,
        display: SegmentDisplay<CLK, DIO, DD>,
        uv: UvSource<UV>,
        buzzer: Buzzer<BZ, BD>,
    ) -> Self {
        Self {
            buttons,
            encoder,
            display,
            uv,
            buzzer,
        }
    }
}

/// Log a failed driver call; the domain has no error surface.
fn report(what: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("{}: {}", what, e);
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<BTN, CLK, DIO, DD, UV, BZ, BD> InputPort for HardwareAdapter<BTN, CLK, DIO, DD, UV, BZ, BD>
where
    BTN: InputPin,
{
    fn read_inputs(&mut self, now_ms: u32) -> InputSnapshot {
        InputSnapshot {
            confirm: self.buttons.confirm.poll(now_ms),
            start: self.buttons.start.poll(now_ms),
            stop: self.buttons.stop.poll(now_ms),
            encoder: self.encoder.snapshot(),
        }
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<BTN, CLK, DIO, DD, UV, BZ, BD> DisplayPort for HardwareAdapter<BTN, CLK, DIO, DD, UV, BZ, BD>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    DD: DelayNs,
{
    fn print_time(&mut self, minutes: u8, seconds: u8, colon: bool) {
        report("display time", self.display.print_time(minutes, seconds, colon));
    }

    fn clear(&mut self) {
        report("display clear", self.display.clear());
    }

    fn scrolling_text(&mut self, text: &str, repeats: u8) {
        report("display scroll", self.display.scrolling_text(text, repeats));
    }

    fn flush(&mut self) {
        report("display flush", self.display.flush());
    }

    fn snake(&mut self, cycles: u8) {
        report("display snake", self.display.snake(cycles));
    }

    fn set_backlight(&mut self, percent: u8) {
        report("display backlight", self.display.set_backlight(percent));
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<BTN, CLK, DIO, DD, UV, BZ, BD> OutputPort for HardwareAdapter<BTN, CLK, DIO, DD, UV, BZ, BD>
where
    UV: OutputPin,
    BZ: OutputPin,
    BD: DelayNs,
{
    fn set_uv(&mut self, on: bool) {
        let result = if on { self.uv.enable() } else { self.uv.disable() };
        report("UV relay", result);
    }

    fn is_uv_on(&self) -> bool {
        self.uv.is_on()
    }

    fn play_cue(&mut self) {
        report("buzzer", self.buzzer.play(&CUE));
    }
}
