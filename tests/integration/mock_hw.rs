//! Mock front panel for integration tests.
//!
//! Scripts button presses and encoder turns, and records every display and
//! output call so tests can assert on the full history without touching
//! real GPIO.

use std::collections::VecDeque;

use enlarger_timer::app::events::AppEvent;
use enlarger_timer::app::input::InputSnapshot;
use enlarger_timer::app::ports::{DisplayPort, EventSink, InputPort, OutputPort};
use enlarger_timer::drivers::encoder::{Direction, EncoderSnapshot};

// ── Call records ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Time { minutes: u8, seconds: u8, colon: bool },
    Clear,
    Scroll { text: String, repeats: u8 },
    Flush,
    Snake(u8),
    Backlight(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Confirm,
    Start,
    Stop,
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    /// One entry is consumed per `read_inputs`; `None` reads as released.
    presses: VecDeque<Option<Button>>,
    encoder: EncoderSnapshot,
    pub display: Vec<DisplayCall>,
    /// Every relay write, in order.
    pub uv_writes: Vec<bool>,
    uv_on: bool,
    pub cues: usize,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self {
            presses: VecDeque::new(),
            encoder: EncoderSnapshot::REST,
            display: Vec::new(),
            uv_writes: Vec::new(),
            uv_on: false,
            cues: 0,
        }
    }

    /// Queue a press seen by the next input read.
    pub fn press(&mut self, button: Button) {
        self.presses.push_back(Some(button));
    }

    /// Turn the encoder by `detents` (negative shortens).
    pub fn turn(&mut self, detents: i16) {
        self.encoder = EncoderSnapshot {
            position: self.encoder.position.wrapping_add(detents),
            direction: if detents < 0 {
                Direction::Backward
            } else {
                Direction::Forward
            },
        };
    }

    /// Net travel of `net` detents whose final detent went `last`, as
    /// when the knob reverses between two polls.
    pub fn turn_then_reverse(&mut self, net: i16, last: Direction) {
        self.encoder = EncoderSnapshot {
            position: self.encoder.position.wrapping_add(net),
            direction: last,
        };
    }

    pub fn uv_on(&self) -> bool {
        self.uv_on
    }

    pub fn last_time(&self) -> Option<(u8, u8)> {
        self.display.iter().rev().find_map(|c| match c {
            DisplayCall::Time { minutes, seconds, .. } => Some((*minutes, *seconds)),
            _ => None,
        })
    }

    pub fn last_display(&self) -> Option<&DisplayCall> {
        self.display.last()
    }

    pub fn clear_history(&mut self) {
        self.display.clear();
        self.uv_writes.clear();
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockPanel {
    fn read_inputs(&mut self, _now_ms: u32) -> InputSnapshot {
        let press = self.presses.pop_front().flatten();
        InputSnapshot {
            confirm: press == Some(Button::Confirm),
            start: press == Some(Button::Start),
            stop: press == Some(Button::Stop),
            encoder: self.encoder,
        }
    }
}

impl DisplayPort for MockPanel {
    fn print_time(&mut self, minutes: u8, seconds: u8, colon: bool) {
        self.display.push(DisplayCall::Time {
            minutes,
            seconds,
            colon,
        });
    }

    fn clear(&mut self) {
        self.display.push(DisplayCall::Clear);
    }

    fn scrolling_text(&mut self, text: &str, repeats: u8) {
        self.display.push(DisplayCall::Scroll {
            text: text.to_owned(),
            repeats,
        });
    }

    fn flush(&mut self) {
        self.display.push(DisplayCall::Flush);
    }

    fn snake(&mut self, cycles: u8) {
        self.display.push(DisplayCall::Snake(cycles));
    }

    fn set_backlight(&mut self, percent: u8) {
        self.display.push(DisplayCall::Backlight(percent));
    }
}

impl OutputPort for MockPanel {
    fn set_uv(&mut self, on: bool) {
        self.uv_on = on;
        self.uv_writes.push(on);
    }

    fn is_uv_on(&self) -> bool {
        self.uv_on
    }

    fn play_cue(&mut self) {
        self.cues += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
