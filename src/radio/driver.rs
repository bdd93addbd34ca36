//! SPI/GPIO transport for the RFM95
//!
//! Implements the Transport trait over an async SPI bus with manual NSS
//! control, the reset line, and embassy timers.

use crate::radio::traits::{Level, Line, Transport, TransportError, FRAME_LEN};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::spi::SpiBus;

/// Control pins for the RFM95
pub struct Rfm95Pins<Nss, Nrst> {
    pub nss: Nss,
    pub nrst: Nrst,
}

/// Hardware transport
///
/// The SPI bus must be configured for mode 0, MSB first before it is handed
/// over. NSS is driven here rather than by the SPI peripheral so a frame is
/// exactly one chip-select window.
pub struct SpiTransport<Spi, Nss, Nrst>
where
    Spi: SpiBus,
    Nss: OutputPin,
    Nrst: OutputPin,
{
    spi: Spi,
    nss: Nss,
    nrst: Nrst,
}

impl<Spi, Nss, Nrst> SpiTransport<Spi, Nss, Nrst>
where
    Spi: SpiBus,
    Nss: OutputPin,
    Nrst: OutputPin,
{
    /// Create a new transport
    pub fn new(spi: Spi, pins: Rfm95Pins<Nss, Nrst>) -> Self {
        Self {
            spi,
            nss: pins.nss,
            nrst: pins.nrst,
        }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

impl<Spi, Nss, Nrst> Transport for SpiTransport<Spi, Nss, Nrst>
where
    Spi: SpiBus,
    Nss: OutputPin,
    Nrst: OutputPin,
{
    async fn exchange(&mut self, tx: [u8; FRAME_LEN]) -> Result<[u8; FRAME_LEN], TransportError> {
        let mut rx = [0u8; FRAME_LEN];

        self.spi
            .transfer(&mut rx, &tx)
            .await
            .map_err(|_| TransportError::Spi)?;

        // Last bit must be on the wire before NSS is released
        self.spi.flush().await.map_err(|_| TransportError::Spi)?;

        Ok(rx)
    }

    fn set_line(&mut self, line: Line, level: Level) -> Result<(), TransportError> {
        match line {
            Line::ChipSelect => self
                .nss
                .set_state(level.into())
                .map_err(|_| TransportError::ChipSelect),
            Line::Reset => self
                .nrst
                .set_state(level.into())
                .map_err(|_| TransportError::Reset),
        }
    }

    async fn delay_ms(&mut self, ms: u32) {
        Timer::after(Duration::from_millis(ms as u64)).await;
    }
}
