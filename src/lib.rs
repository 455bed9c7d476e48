//! Darkroom enlarger exposure timer library.
//!
//! Exposes the pure-logic modules for integration testing and fuzzing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod scheduler;

// Hardware-facing modules; their device paths are cfg-guarded inside and
// their host paths work against embedded-hal mocks.
pub mod adapters;
pub mod drivers;
