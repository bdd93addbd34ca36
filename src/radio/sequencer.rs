//! Reset and identity verification
//!
//! The RFM95 only answers reliably once its reset pulse has completed and
//! the oscillator has settled. The sequence is:
//!
//! ```text
//! NRESET  ‾‾‾‾‾‾|____|‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//!         hold   pulse        settle         read RegVersion
//! ```
//!
//! followed by a single read of RegVersion. Any value other than the
//! expected silicon version is fatal; nothing here retries.

use super::protocol::RegisterAccess;
use super::register::reg;
use super::traits::{Level, Line, RadioError, Transport};
use crate::config::{identity, reset_timing};
use log::{debug, error, info, warn};

/// Reset line holds, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    /// Reset held high before the pulse
    pub release_hold_ms: u32,
    /// Reset held low
    pub pulse_ms: u32,
    /// Reset held high after the pulse
    pub settle_ms: u32,
}

impl ResetTiming {
    /// Every hold must be at least 1 ms and the pulse must not outlast the settle
    pub fn validate(&self) -> Result<(), RadioError> {
        if self.release_hold_ms == 0 || self.pulse_ms == 0 || self.settle_ms == 0 {
            return Err(RadioError::InvalidTiming);
        }
        if self.pulse_ms > self.settle_ms {
            return Err(RadioError::InvalidTiming);
        }
        Ok(())
    }
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self {
            release_hold_ms: reset_timing::RELEASE_HOLD_MS,
            pulse_ms: reset_timing::PULSE_MS,
            settle_ms: reset_timing::SETTLE_MS,
        }
    }
}

/// Bring-up parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringUpConfig {
    pub timing: ResetTiming,
    /// Value RegVersion must hold
    pub expected_version: u8,
}

impl Default for BringUpConfig {
    fn default() -> Self {
        Self {
            timing: ResetTiming::default(),
            expected_version: identity::EXPECTED_VERSION,
        }
    }
}

/// Where the peripheral is in its power-up sequence
///
/// The device itself cannot be queried for this; the state follows from
/// what has been driven on the reset line and what RegVersion returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Nothing driven yet, or the last bring-up hit a transport error
    Unknown,
    /// Reset pulse in progress
    Resetting,
    /// Reset released, oscillator settling
    Settling,
    /// Identity verified; register access allowed
    Ready,
    /// Identity check failed; register access refused
    Failed,
}

/// Drives the reset pulse and checks RegVersion
pub struct Sequencer {
    config: BringUpConfig,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self {
            config: BringUpConfig::default(),
        }
    }
}

impl Sequencer {
    /// Create a sequencer, rejecting invalid reset timing
    pub fn new(config: BringUpConfig) -> Result<Self, RadioError> {
        config.timing.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BringUpConfig {
        &self.config
    }

    /// Pulse the reset line and wait for the device to settle
    pub async fn reset<T: Transport>(
        &self,
        access: &mut RegisterAccess<T>,
        state: &mut DeviceState,
    ) -> Result<(), RadioError> {
        let timing = self.config.timing;
        let transport = access.transport_mut();

        *state = DeviceState::Resetting;
        debug!(
            "RFM95 reset: hold {} ms, pulse {} ms, settle {} ms",
            timing.release_hold_ms, timing.pulse_ms, timing.settle_ms
        );

        transport.set_line(Line::Reset, Level::High)?;
        transport.delay_ms(timing.release_hold_ms).await;

        transport.set_line(Line::Reset, Level::Low)?;
        transport.delay_ms(timing.pulse_ms).await;

        transport.set_line(Line::Reset, Level::High)?;
        *state = DeviceState::Settling;
        transport.delay_ms(timing.settle_ms).await;

        Ok(())
    }

    /// Read RegVersion and compare it against the expected identity
    ///
    /// Returns the version read on success.
    pub async fn verify<T: Transport>(
        &self,
        access: &mut RegisterAccess<T>,
        state: &mut DeviceState,
    ) -> Result<u8, RadioError> {
        let expected = self.config.expected_version;
        let found = access.read(reg::VERSION).await?;

        info!("RFM95 version: 0x{:02X}", found);

        if found == expected {
            info!("SPI link to RFM95 OK");
            *state = DeviceState::Ready;
            Ok(found)
        } else {
            error!(
                "SPI link to RFM95 failed: expected version 0x{:02X}, got 0x{:02X}",
                expected, found
            );
            warn!("Check the wiring, the power supply and the reset pin");
            *state = DeviceState::Failed;
            Err(RadioError::IdentityMismatch { expected, found })
        }
    }

    /// Reset then verify
    ///
    /// A transport failure leaves the state `Unknown` so the caller can
    /// attempt another bring-up; an identity mismatch leaves it `Failed`.
    pub async fn bring_up<T: Transport>(
        &self,
        access: &mut RegisterAccess<T>,
        state: &mut DeviceState,
    ) -> Result<u8, RadioError> {
        let result = match self.reset(access, state).await {
            Ok(()) => self.verify(access, state).await,
            Err(e) => Err(e),
        };

        if let Err(RadioError::Transport(e)) = result {
            error!("RFM95 bring-up aborted: transport error {:?}", e);
            *state = DeviceState::Unknown;
        }
        result
    }
}
