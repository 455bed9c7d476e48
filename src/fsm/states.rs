//! Concrete mode handler functions and table builder.
//!
//! Each mode is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  SETUP     ──(first tick)──▶ IDLE
//!  IDLE      ──confirm──▶ EDITABLE     ──stop ×5──▶ SECRET ──(message, cue)──▶ IDLE
//!  EDITABLE  ──confirm──▶ ARMED (t > 0) or IDLE (t = 0)     ──stop──▶ IDLE
//!  ARMED     ──confirm──▶ EDITABLE     ──start──▶ RUNNING   ──stop──▶ IDLE
//!  RUNNING   ──stop─────▶ PAUSED       ──natural stop──▶ IDLE
//!  PAUSED    ──confirm──▶ EDITABLE     ──start──▶ RUNNING   ──stop──▶ IDLE
//! ```
//!
//! Countdown control lives in the entry actions, so the countdown can only
//! tick while `Running`: every path into `Idle` or `Editable` stops it and
//! `Paused` suspends it.

use super::context::{CountdownCommand, DisplayCommand, Effect, TimerContext};
use super::{Mode, StateDescriptor};
use crate::events::Event;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; Mode::COUNT] {
    [
        // Index 0 — Setup
        StateDescriptor {
            id: Mode::Setup,
            name: "Setup",
            on_enter: None,
            on_exit: None,
            on_update: setup_update,
            on_event: ignore_event,
        },
        // Index 1 — Idle
        StateDescriptor {
            id: Mode::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: stay,
            on_event: idle_event,
        },
        // Index 2 — Editable
        StateDescriptor {
            id: Mode::Editable,
            name: "Editable",
            on_enter: Some(editable_enter),
            on_exit: Some(editable_exit),
            on_update: stay,
            on_event: editable_event,
        },
        // Index 3 — Armed
        StateDescriptor {
            id: Mode::Armed,
            name: "Armed",
            on_enter: None,
            on_exit: None,
            on_update: stay,
            on_event: armed_event,
        },
        // Index 4 — Running
        StateDescriptor {
            id: Mode::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: None,
            on_update: stay,
            on_event: running_event,
        },
        // Index 5 — Paused
        StateDescriptor {
            id: Mode::Paused,
            name: "Paused",
            on_enter: Some(paused_enter),
            on_exit: None,
            on_update: stay,
            on_event: paused_event,
        },
        // Index 6 — Secret
        StateDescriptor {
            id: Mode::Secret,
            name: "Secret",
            on_enter: None,
            on_exit: None,
            on_update: secret_update,
            on_event: ignore_event,
        },
    ]
}

fn stay(_ctx: &mut TimerContext) -> Option<Mode> {
    None
}

fn ignore_event(_ctx: &mut TimerContext, _event: Event) -> Option<Mode> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SETUP — pseudo-state, redirected on first evaluation
// ═══════════════════════════════════════════════════════════════════════════

fn setup_update(_ctx: &mut TimerContext) -> Option<Mode> {
    Some(Mode::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — nothing set, universal cancellation target
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut TimerContext) {
    ctx.countdown = Some(CountdownCommand::Stop);
    ctx.exposure_secs = 0;
    ctx.show_exposure();
    ctx.display(DisplayCommand::Snake(ctx.config.idle_snake_cycles));
    info!("IDLE: countdown stopped, exposure cleared");
}

fn idle_event(ctx: &mut TimerContext, event: Event) -> Option<Mode> {
    match event {
        Event::Confirm => Some(Mode::Editable),
        Event::Stop => {
            ctx.secret_presses = ctx.secret_presses.saturating_add(1);
            debug!("IDLE: secret press {}", ctx.secret_presses);
            if ctx.secret_presses >= ctx.config.secret_press_count {
                ctx.secret_presses = 0;
                return Some(Mode::Secret);
            }
            None
        }
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  EDITABLE — encoder adjusts the exposure, display blinks
// ═══════════════════════════════════════════════════════════════════════════

fn editable_enter(ctx: &mut TimerContext) {
    // A paused countdown is abandoned once the duration is up for editing.
    ctx.countdown = Some(CountdownCommand::Stop);
    ctx.blink_visible = true;
    info!("EDITABLE: {}s", ctx.exposure_secs);
}

fn editable_exit(ctx: &mut TimerContext) {
    ctx.blink_visible = true;
    ctx.show_exposure();
}

fn editable_event(ctx: &mut TimerContext, event: Event) -> Option<Mode> {
    match event {
        Event::Confirm if ctx.exposure_secs == 0 => Some(Mode::Idle),
        Event::Confirm => Some(Mode::Armed),
        Event::Stop => Some(Mode::Idle),
        Event::Rotate(steps) => {
            adjust_exposure(ctx, steps);
            None
        }
        Event::BlinkTick => {
            ctx.blink_visible = !ctx.blink_visible;
            if ctx.blink_visible {
                ctx.show_exposure();
            } else {
                ctx.display(DisplayCommand::Clear);
            }
            None
        }
        _ => None,
    }
}

/// One step per detent, clamped at zero, unbounded above.
fn adjust_exposure(ctx: &mut TimerContext, steps: i16) {
    let delta = u32::from(steps.unsigned_abs()).saturating_mul(ctx.config.step_secs);
    ctx.exposure_secs = if steps >= 0 {
        ctx.exposure_secs.saturating_add(delta)
    } else {
        ctx.exposure_secs.saturating_sub(delta)
    };
    debug!("EDITABLE: {} detents -> {}s", steps, ctx.exposure_secs);
}

// ═══════════════════════════════════════════════════════════════════════════
//  ARMED — duration confirmed, waiting for start
// ═══════════════════════════════════════════════════════════════════════════

fn armed_event(_ctx: &mut TimerContext, event: Event) -> Option<Mode> {
    match event {
        Event::Confirm => Some(Mode::Editable),
        Event::Start => Some(Mode::Running),
        Event::Stop => Some(Mode::Idle),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING — UV on, counting down
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut TimerContext) {
    ctx.countdown = Some(if ctx.previous == Mode::Paused {
        CountdownCommand::Resume
    } else {
        CountdownCommand::Start {
            count: ctx.exposure_secs,
        }
    });
    info!("RUNNING: {}s exposure, UV on", ctx.exposure_secs);
}

fn running_event(ctx: &mut TimerContext, event: Event) -> Option<Mode> {
    match event {
        Event::Stop => Some(Mode::Paused),
        Event::Tick { elapsed } => {
            ctx.display(DisplayCommand::time(ctx.exposure_secs.saturating_sub(elapsed)));
            None
        }
        Event::NaturalStop { elapsed } => {
            info!("RUNNING: exposure complete after {}s", elapsed);
            ctx.exposure_secs = 0;
            ctx.relay_on = false;
            Some(Mode::Idle)
        }
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  PAUSED — UV off, countdown suspended
// ═══════════════════════════════════════════════════════════════════════════

fn paused_enter(ctx: &mut TimerContext) {
    ctx.countdown = Some(CountdownCommand::Pause);
    info!("PAUSED: UV off");
}

fn paused_event(_ctx: &mut TimerContext, event: Event) -> Option<Mode> {
    match event {
        Event::Confirm => Some(Mode::Editable),
        Event::Start => Some(Mode::Running),
        Event::Stop => Some(Mode::Idle),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SECRET — fixed, non-interactive sequence, then back to Idle
// ═══════════════════════════════════════════════════════════════════════════

fn secret_update(ctx: &mut TimerContext) -> Option<Mode> {
    info!("SECRET: playing");
    let message = ctx.config.secret_message.clone();
    let repeats = ctx.config.secret_scroll_repeats;
    let (minutes, seconds) = ctx.config.secret_time;

    ctx.display(DisplayCommand::ScrollText(message, repeats));
    ctx.display(DisplayCommand::Flush);
    ctx.display(DisplayCommand::Time {
        minutes,
        seconds,
        colon: true,
    });
    ctx.effect(Effect::Cue);
    Some(Mode::Idle)
}
