//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART / USB-CDC on the device).  This is the serial transition
//! log: observability only, nothing reads it back.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::clock::MinSec;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | initial_mode={}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::ExposureAdjusted { secs } => {
                info!("EXPOSURE | set to {}", MinSec::from_secs(*secs));
            }
            AppEvent::CountdownTick { remaining_secs } => {
                debug!("COUNTDOWN | {} remaining", MinSec::from_secs(*remaining_secs));
            }
            AppEvent::ExposureComplete => {
                info!("DONE | exposure complete, UV off");
            }
            AppEvent::SecretTriggered => {
                info!("SECRET | sequence triggered");
            }
        }
    }
}
