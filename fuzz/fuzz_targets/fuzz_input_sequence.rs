//! Fuzz target: `TimerService::poll`
//!
//! Decodes arbitrary bytes into a stream of button presses, encoder turns
//! and idle gaps, and asserts that the service never panics and never
//! leaves the UV relay energised outside `Running`.
//!
//! cargo fuzz run fuzz_input_sequence

#![no_main]

use enlarger_timer::app::events::AppEvent;
use enlarger_timer::app::input::InputSnapshot;
use enlarger_timer::app::ports::{DisplayPort, EventSink, InputPort, OutputPort};
use enlarger_timer::app::service::TimerService;
use enlarger_timer::config::TimerConfig;
use enlarger_timer::drivers::encoder::{Direction, EncoderSnapshot};
use enlarger_timer::fsm::Mode;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Panel {
    next: InputSnapshot,
    uv: bool,
}

impl InputPort for Panel {
    fn read_inputs(&mut self, _now_ms: u32) -> InputSnapshot {
        let snap = self.next;
        self.next.confirm = false;
        self.next.start = false;
        self.next.stop = false;
        snap
    }
}

impl DisplayPort for Panel {
    fn print_time(&mut self, minutes: u8, seconds: u8, _colon: bool) {
        assert!(seconds < 60 || (minutes, seconds) == (66, 66), "bad time {minutes}:{seconds}");
    }
    fn clear(&mut self) {}
    fn scrolling_text(&mut self, _text: &str, _repeats: u8) {}
    fn flush(&mut self) {}
    fn snake(&mut self, _cycles: u8) {}
    fn set_backlight(&mut self, _percent: u8) {}
}

impl OutputPort for Panel {
    fn set_uv(&mut self, on: bool) {
        self.uv = on;
    }
    fn is_uv_on(&self) -> bool {
        self.uv
    }
    fn play_cue(&mut self) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut timer = TimerService::new(TimerConfig::default());
    let mut panel = Panel::default();
    let mut now: u32 = 0;

    timer.start(now, &mut panel, &mut Discard);

    for &byte in data {
        // Top two bits pick the action, the rest parameterise it.
        let arg = byte & 0x3F;
        let polls = match byte >> 6 {
            0 => {
                match arg % 3 {
                    0 => panel.next.confirm = true,
                    1 => panel.next.start = true,
                    _ => panel.next.stop = true,
                }
                1
            }
            1 => {
                let detents = i16::from(arg as i8 - 32);
                panel.next.encoder = EncoderSnapshot {
                    position: panel.next.encoder.position.wrapping_add(detents),
                    direction: if detents < 0 {
                        Direction::Backward
                    } else {
                        Direction::Forward
                    },
                };
                1
            }
            2 => u32::from(arg) * 16,
            _ => u32::from(arg) * 1_000,
        };

        for _ in 0..polls.max(1) {
            now = now.wrapping_add(1);
            timer.poll(now, &mut panel, &mut Discard);
            assert_eq!(panel.uv, timer.mode() == Mode::Running);
        }
    }
});
