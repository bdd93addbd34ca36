//! RFM95 handle
//!
//! Owns the transport and refuses register traffic until the identity check
//! has passed.

use super::mode::OpMode;
use super::protocol::RegisterAccess;
use super::register::{reg, RegisterAddress};
use super::sequencer::{BringUpConfig, DeviceState, Sequencer};
use super::traits::{RadioError, Transport};

/// RFM95 driver
///
/// Uses dependency injection for the bus so the same code runs against the
/// ESP32 SPI peripheral and the test mock.
pub struct Rfm95<T: Transport> {
    access: RegisterAccess<T>,
    sequencer: Sequencer,
    state: DeviceState,
    version: Option<u8>,
}

impl<T: Transport> Rfm95<T> {
    /// Create a driver with the default reset timing and identity
    pub fn new(transport: T) -> Self {
        Self::from_parts(transport, Sequencer::default())
    }

    /// Create a driver with custom bring-up parameters
    pub fn with_config(transport: T, config: BringUpConfig) -> Result<Self, RadioError> {
        Ok(Self::from_parts(transport, Sequencer::new(config)?))
    }

    fn from_parts(transport: T, sequencer: Sequencer) -> Self {
        Self {
            access: RegisterAccess::new(transport),
            sequencer,
            state: DeviceState::Unknown,
            version: None,
        }
    }

    /// Reset the module and verify its identity
    ///
    /// May be called again after a failure; each call drives a fresh reset
    /// pulse. Returns the version read from the device.
    pub async fn init(&mut self) -> Result<u8, RadioError> {
        self.version = None;
        let version = self
            .sequencer
            .bring_up(&mut self.access, &mut self.state)
            .await?;
        self.version = Some(version);
        Ok(version)
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Ready
    }

    /// Version read during the last successful bring-up
    pub fn version(&self) -> Option<u8> {
        self.version
    }

    pub fn config(&self) -> &BringUpConfig {
        self.sequencer.config()
    }

    /// Read a register
    pub async fn read_register(&mut self, address: RegisterAddress) -> Result<u8, RadioError> {
        self.ensure_ready()?;
        Ok(self.access.read(address).await?)
    }

    /// Write a register
    pub async fn write_register(&mut self, address: RegisterAddress, value: u8) -> Result<(), RadioError> {
        self.ensure_ready()?;
        Ok(self.access.write(address, value).await?)
    }

    /// Read and decode RegOpMode
    pub async fn op_mode(&mut self) -> Result<OpMode, RadioError> {
        self.read_register(reg::OP_MODE).await.map(OpMode::from_byte)
    }

    /// Write RegOpMode
    pub async fn set_op_mode(&mut self, mode: OpMode) -> Result<(), RadioError> {
        self.write_register(reg::OP_MODE, mode.bits()).await
    }

    pub fn transport(&self) -> &T {
        self.access.transport()
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.access.release()
    }

    fn ensure_ready(&self) -> Result<(), RadioError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(RadioError::NotReady)
        }
    }
}
