//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the exposure controller: FSM orchestration,
//! countdown and blink coordination, and encoder-to-duration mapping.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod input;
pub mod ports;
pub mod service;
