//! Integration tests for the TimerService → FSM → panel pipeline.
//!
//! Everything goes through the public `poll` loop with a scripted panel,
//! one millisecond per iteration, exactly as the firmware main loop runs.

use enlarger_timer::app::events::AppEvent;
use enlarger_timer::app::service::TimerService;
use enlarger_timer::config::TimerConfig;
use enlarger_timer::drivers::encoder::Direction;
use enlarger_timer::fsm::Mode;

use crate::mock_hw::{Button, DisplayCall, MockPanel, RecordingSink};

struct Rig {
    timer: TimerService,
    panel: MockPanel,
    sink: RecordingSink,
    now: u32,
}

impl Rig {
    /// Started service, already past `Setup`.
    fn new() -> Self {
        let mut rig = Self {
            timer: TimerService::new(TimerConfig::default()),
            panel: MockPanel::new(),
            sink: RecordingSink::new(),
            now: 0,
        };
        rig.timer.start(rig.now, &mut rig.panel, &mut rig.sink);
        rig.step();
        rig
    }

    fn step(&mut self) {
        self.now += 1;
        self.timer.poll(self.now, &mut self.panel, &mut self.sink);
    }

    fn run_for(&mut self, ms: u32) {
        for _ in 0..ms {
            self.step();
        }
    }

    fn press(&mut self, button: Button) {
        self.panel.press(button);
        self.step();
    }

    fn turn(&mut self, detents: i16) {
        self.panel.turn(detents);
        self.step();
    }

    /// Idle → Editable → `detents` → Armed.
    fn arm(&mut self, detents: i16) {
        self.press(Button::Confirm);
        self.turn(detents);
        self.press(Button::Confirm);
        assert_eq!(self.timer.mode(), Mode::Armed);
    }

    fn completions(&self) -> usize {
        self.sink
            .count(|e| matches!(e, AppEvent::ExposureComplete))
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_lands_in_idle_with_relay_off() {
    let rig = Rig::new();

    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.timer.exposure_secs(), 0);
    assert!(!rig.panel.uv_on());
    assert_eq!(rig.panel.uv_writes, vec![false]);
    assert_eq!(rig.panel.last_time(), Some((0, 0)));
    assert_eq!(
        rig.sink.events[..2],
        [
            AppEvent::Started(Mode::Setup),
            AppEvent::ModeChanged {
                from: Mode::Setup,
                to: Mode::Idle
            },
        ]
    );
}

#[test]
fn boot_sequence_sets_backlight_and_plays_snake() {
    let rig = Rig::new();
    let config = TimerConfig::default();

    assert_eq!(
        rig.panel.display[..4],
        [
            DisplayCall::Clear,
            DisplayCall::Backlight(config.backlight_percent),
            DisplayCall::Snake(config.boot_snake_cycles),
            DisplayCall::Time {
                minutes: 0,
                seconds: 0,
                colon: true
            },
        ]
    );
    assert!(rig.panel.display.contains(&DisplayCall::Snake(config.idle_snake_cycles)));
}

// ── Full exposure ─────────────────────────────────────────────

#[test]
fn thirty_second_exposure_runs_to_completion() {
    let mut rig = Rig::new();

    rig.press(Button::Confirm);
    assert_eq!(rig.timer.mode(), Mode::Editable);

    rig.turn(6);
    assert_eq!(rig.timer.exposure_secs(), 30);
    assert!(rig.sink.events.contains(&AppEvent::ExposureAdjusted { secs: 30 }));

    rig.press(Button::Confirm);
    assert_eq!(rig.timer.mode(), Mode::Armed);
    assert!(!rig.panel.uv_on());

    rig.press(Button::Start);
    assert_eq!(rig.timer.mode(), Mode::Running);
    assert!(rig.panel.uv_on());
    assert!(rig.timer.is_countdown_running());

    rig.run_for(29_999);
    assert_eq!(rig.timer.mode(), Mode::Running);
    assert_eq!(rig.timer.countdown_elapsed(), 29);
    assert_eq!(rig.panel.last_time(), Some((0, 1)));
    assert!(rig.panel.uv_on());

    rig.step();
    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.timer.exposure_secs(), 0);
    assert!(!rig.panel.uv_on());
    assert!(!rig.timer.is_countdown_running());
    assert_eq!(rig.panel.last_time(), Some((0, 0)));
    assert_eq!(rig.completions(), 1);
    assert_eq!(rig.panel.uv_writes, vec![false, true, false]);
}

#[test]
fn countdown_renders_every_remaining_second() {
    let mut rig = Rig::new();
    rig.arm(2);
    rig.press(Button::Start);
    rig.panel.clear_history();

    rig.run_for(10_000);

    let times: Vec<(u8, u8)> = rig
        .panel
        .display
        .iter()
        .filter_map(|c| match c {
            DisplayCall::Time { minutes, seconds, .. } => Some((*minutes, *seconds)),
            _ => None,
        })
        .collect();
    // Ten countdown frames ending on 0:00, then Idle's own 0:00.
    let expected: Vec<(u8, u8)> = (0..=9).rev().map(|s| (0, s)).chain([(0, 0)]).collect();
    assert_eq!(times, expected);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::CountdownTick { .. })),
        10
    );
}

#[test]
fn exposure_over_a_minute_renders_minutes() {
    let mut rig = Rig::new();
    rig.arm(19); // 95 s
    assert_eq!(rig.timer.exposure_secs(), 95);
    assert_eq!(rig.panel.last_time(), Some((1, 35)));

    rig.press(Button::Start);
    rig.run_for(1_000);
    assert_eq!(rig.panel.last_time(), Some((1, 34)));
}

// ── Pause and resume ──────────────────────────────────────────

#[test]
fn pause_and_resume_preserve_the_remaining_time() {
    let mut rig = Rig::new();
    rig.arm(6);
    rig.press(Button::Start);

    rig.run_for(10_500);
    assert_eq!(rig.timer.countdown_elapsed(), 10);

    rig.press(Button::Stop);
    assert_eq!(rig.timer.mode(), Mode::Paused);
    assert!(!rig.panel.uv_on());
    assert!(rig.timer.is_countdown_paused());

    rig.run_for(5_000);
    assert_eq!(rig.timer.countdown_elapsed(), 10);
    assert_eq!(rig.timer.mode(), Mode::Paused);

    rig.press(Button::Start);
    assert_eq!(rig.timer.mode(), Mode::Running);
    assert!(rig.panel.uv_on());
    assert_eq!(rig.timer.countdown_elapsed(), 10);

    // 499 ms were left in the interrupted second.
    rig.run_for(19_498);
    assert_eq!(rig.timer.mode(), Mode::Running);
    assert_eq!(rig.timer.countdown_elapsed(), 29);

    rig.step();
    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert!(!rig.panel.uv_on());
    assert_eq!(rig.completions(), 1);
}

#[test]
fn stop_while_paused_cancels() {
    let mut rig = Rig::new();
    rig.arm(4);
    rig.press(Button::Start);
    rig.run_for(3_000);
    rig.press(Button::Stop);
    rig.press(Button::Stop);

    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.timer.exposure_secs(), 0);
    assert!(!rig.timer.is_countdown_running());
    assert!(!rig.timer.is_countdown_paused());

    rig.run_for(30_000);
    assert_eq!(rig.completions(), 0);
}

#[test]
fn editing_while_paused_restarts_from_the_full_duration() {
    let mut rig = Rig::new();
    rig.arm(2);
    rig.press(Button::Start);
    rig.run_for(4_000);
    rig.press(Button::Stop);

    rig.press(Button::Confirm);
    assert_eq!(rig.timer.mode(), Mode::Editable);
    assert_eq!(rig.timer.exposure_secs(), 10);
    assert!(!rig.timer.is_countdown_paused());

    rig.press(Button::Confirm);
    rig.press(Button::Start);
    assert_eq!(rig.timer.countdown_elapsed(), 0);

    rig.run_for(9_999);
    assert_eq!(rig.timer.mode(), Mode::Running);
    rig.step();
    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.completions(), 1);
}

// ── Editing ───────────────────────────────────────────────────

#[test]
fn confirming_zero_returns_to_idle() {
    let mut rig = Rig::new();
    rig.press(Button::Confirm);
    rig.press(Button::Confirm);

    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert!(!rig.panel.uv_on());
    assert!(!rig.timer.is_countdown_running());
}

#[test]
fn rotation_below_zero_clamps() {
    let mut rig = Rig::new();
    rig.press(Button::Confirm);
    rig.turn(2);
    rig.turn(-5);

    assert_eq!(rig.timer.exposure_secs(), 0);
    assert!(rig.sink.events.contains(&AppEvent::ExposureAdjusted { secs: 0 }));
}

#[test]
fn reversed_knob_follows_net_travel() {
    let mut rig = Rig::new();
    rig.press(Button::Confirm);
    rig.turn(4);
    assert_eq!(rig.timer.exposure_secs(), 20);

    // Back three detents, last one forward.
    rig.panel.turn_then_reverse(-3, Direction::Forward);
    rig.step();
    assert_eq!(rig.timer.exposure_secs(), 5);

    // Forward two detents, last one backward.
    rig.panel.turn_then_reverse(2, Direction::Backward);
    rig.step();
    assert_eq!(rig.timer.exposure_secs(), 15);
}

#[test]
fn rotation_outside_editable_is_ignored() {
    let mut rig = Rig::new();
    rig.turn(3);
    assert_eq!(rig.timer.exposure_secs(), 0);

    rig.arm(2);
    rig.turn(3);
    assert_eq!(rig.timer.exposure_secs(), 10);

    rig.press(Button::Confirm);
    rig.turn(1);
    assert_eq!(rig.timer.exposure_secs(), 15);
}

#[test]
fn stop_cancels_editing_and_armed() {
    let mut rig = Rig::new();
    rig.press(Button::Confirm);
    rig.turn(2);
    rig.press(Button::Stop);
    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.timer.exposure_secs(), 0);

    rig.arm(2);
    rig.press(Button::Stop);
    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.timer.exposure_secs(), 0);
}

#[test]
fn editable_display_blinks_and_settles_on_exit() {
    let mut rig = Rig::new();
    rig.press(Button::Confirm);
    rig.turn(2);
    rig.panel.clear_history();

    rig.run_for(300);
    assert!(rig.panel.display.contains(&DisplayCall::Clear));
    assert!(rig.panel.display.contains(&DisplayCall::Time {
        minutes: 0,
        seconds: 10,
        colon: true
    }));

    // Leave on a blanked phase: the exit re-renders the duration.
    while rig.timer.blink_visible() {
        rig.step();
    }
    assert_eq!(rig.panel.last_display(), Some(&DisplayCall::Clear));
    rig.press(Button::Confirm);
    assert_eq!(rig.timer.mode(), Mode::Armed);
    assert!(rig.timer.blink_visible());
    assert_eq!(rig.panel.last_time(), Some((0, 10)));

    rig.panel.clear_history();
    rig.run_for(500);
    assert!(rig.panel.display.is_empty(), "no blinking outside Editable");
}

// ── Secret sequence ───────────────────────────────────────────

#[test]
fn five_stops_in_idle_play_the_secret_once() {
    let mut rig = Rig::new();
    let config = TimerConfig::default();

    for _ in 0..4 {
        rig.press(Button::Stop);
    }
    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.timer.secret_presses(), 4);

    rig.press(Button::Stop);
    assert_eq!(rig.timer.mode(), Mode::Secret);
    assert_eq!(rig.timer.secret_presses(), 0);

    rig.panel.clear_history();
    rig.step();
    assert_eq!(rig.timer.mode(), Mode::Idle);
    assert_eq!(rig.panel.cues, 1);
    assert_eq!(
        rig.panel.display[..3],
        [
            DisplayCall::Scroll {
                text: config.secret_message.as_str().to_owned(),
                repeats: config.secret_scroll_repeats,
            },
            DisplayCall::Flush,
            DisplayCall::Time {
                minutes: 66,
                seconds: 66,
                colon: true
            },
        ]
    );
    assert_eq!(rig.panel.last_time(), Some((0, 0)));
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::SecretTriggered)),
        1
    );
    assert!(!rig.panel.uv_on());

    rig.run_for(1_000);
    assert_eq!(rig.panel.cues, 1);
}

#[test]
fn secret_counter_restarts_after_triggering() {
    let mut rig = Rig::new();
    for _ in 0..5 {
        rig.press(Button::Stop);
    }
    rig.step();

    for _ in 0..4 {
        rig.press(Button::Stop);
    }
    assert_eq!(rig.timer.mode(), Mode::Idle);
    rig.press(Button::Stop);
    assert_eq!(rig.timer.mode(), Mode::Secret);
    rig.step();
    assert_eq!(rig.panel.cues, 2);
}

// ── Relay invariant ───────────────────────────────────────────

#[test]
fn relay_only_energised_while_running() {
    let mut rig = Rig::new();
    let script = [
        Button::Confirm,
        Button::Start,
        Button::Confirm,
        Button::Start,
        Button::Stop,
        Button::Confirm,
        Button::Confirm,
        Button::Start,
        Button::Stop,
        Button::Start,
    ];

    rig.press(Button::Confirm);
    rig.turn(1);
    for button in script {
        rig.press(button);
        assert_eq!(rig.panel.uv_on(), rig.timer.mode() == Mode::Running);
        assert_eq!(rig.timer.relay_on(), rig.panel.uv_on());
        rig.run_for(700);
        assert_eq!(rig.panel.uv_on(), rig.timer.mode() == Mode::Running);
    }
}
