//! UV source relay driver.
//!
//! One digital output: HIGH energises the relay feeding the enlarger's UV
//! source.  The driver remembers the last level it successfully wrote so the
//! controller can compare it against the level the mode demands.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UvState {
    Off,
    On,
}

pub struct UvSource<P> {
    pin: P,
    state: UvState,
}

impl<P: OutputPin> UvSource<P> {
    /// Take the pin and drive it low.
    pub fn new(pin: P) -> Result<Self> {
        let mut uv = Self {
            pin,
            state: UvState::On,
        };
        uv.disable()?;
        Ok(uv)
    }

    pub fn enable(&mut self) -> Result<()> {
        self.pin.set_high().map_err(|_| Error::Pin)?;
        self.state = UvState::On;
        info!("UV source on");
        Ok(())
    }

    /// Drop the relay.  On a write failure the state is still recorded as
    /// `On` so the next attempt retries.
    pub fn disable(&mut self) -> Result<()> {
        if let Err(e) = self.pin.set_low() {
            warn!("UV source: set_low failed: {:?}", e);
            return Err(Error::Pin);
        }
        self.state = UvState::Off;
        info!("UV source off");
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.state == UvState::On
    }
}
