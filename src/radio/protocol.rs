//! Register access over a chip-select delimited SPI exchange

use super::register::{RegisterAddress, RegisterTransaction};
use super::traits::{Level, Line, Transport, TransportError, FRAME_LEN};
use log::debug;

/// Raw register reads and writes
///
/// Each call asserts chip-select, clocks exactly one two-byte frame and
/// releases chip-select again. Nothing is gated here: whether the device is
/// ready for access is decided one layer up.
pub struct RegisterAccess<T: Transport> {
    transport: T,
}

impl<T: Transport> RegisterAccess<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Run a single transaction
    ///
    /// Returns the register value for reads and `None` for writes.
    pub async fn execute(
        &mut self,
        transaction: RegisterTransaction,
    ) -> Result<Option<u8>, TransportError> {
        let rx = self.transfer(transaction.frame()).await?;
        Ok(transaction.decode(rx))
    }

    /// Write `value` to `address`
    pub async fn write(&mut self, address: RegisterAddress, value: u8) -> Result<(), TransportError> {
        debug!("SPI write 0x{:02X} <- 0x{:02X}", address.value(), value);
        self.execute(RegisterTransaction::Write(address, value))
            .await
            .map(|_| ())
    }

    /// Read the content of `address`
    pub async fn read(&mut self, address: RegisterAddress) -> Result<u8, TransportError> {
        let transaction = RegisterTransaction::Read(address);
        let rx = self.transfer(transaction.frame()).await?;
        // Read transactions always decode to a value
        let value = transaction.decode(rx).unwrap_or_default();
        debug!("SPI read 0x{:02X} -> 0x{:02X}", address.value(), value);
        Ok(value)
    }

    /// Clock one frame with chip-select asserted around it
    ///
    /// Chip-select is released even if the exchange fails.
    async fn transfer(&mut self, tx: [u8; FRAME_LEN]) -> Result<[u8; FRAME_LEN], TransportError> {
        self.transport.set_line(Line::ChipSelect, Level::Low)?;
        let exchanged = self.transport.exchange(tx).await;
        let released = self.transport.set_line(Line::ChipSelect, Level::High);

        let rx = exchanged?;
        released?;
        Ok(rx)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::register::reg;
    use crate::radio::traits::mock::{Event, MockTransport};

    #[test]
    fn test_read_returns_second_byte() {
        for first in [0x00, 0x12, 0x7F, 0xFF] {
            let transport = MockTransport::with_version(0x34);
            transport.set_first_byte(first);
            let mut access = RegisterAccess::new(transport);

            futures::executor::block_on(async {
                let value = access.read(reg::VERSION).await.unwrap();
                assert_eq!(value, 0x34);
            });
        }
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let mut access = RegisterAccess::new(MockTransport::new());

        futures::executor::block_on(async {
            access.write(reg::OP_MODE, 0x80).await.unwrap();
            let value = access.read(reg::OP_MODE).await.unwrap();
            assert_eq!(value, 0x80);
        });

        assert_eq!(access.transport().exchanges().as_slice(), &[[0x81, 0x80], [0x01, 0x00]]);
    }

    #[test]
    fn test_execute_decodes_by_intent() {
        let mut access = RegisterAccess::new(MockTransport::with_version(0x12));

        futures::executor::block_on(async {
            let written = access
                .execute(RegisterTransaction::Write(reg::OP_MODE, 0x81))
                .await
                .unwrap();
            assert_eq!(written, None);

            let read = access
                .execute(RegisterTransaction::Read(reg::VERSION))
                .await
                .unwrap();
            assert_eq!(read, Some(0x12));
        });
    }

    #[test]
    fn test_chip_select_frames_each_exchange() {
        let mut access = RegisterAccess::new(MockTransport::with_version(0x12));

        futures::executor::block_on(async {
            access.write(reg::OP_MODE, 0x80).await.unwrap();
            access.read(reg::VERSION).await.unwrap();
            access.read(reg::OP_MODE).await.unwrap();
        });

        let events = access.transport().events();
        assert_eq!(events.len(), 9);

        // Every transaction is exactly: CS low, exchange, CS high
        for window in events.chunks(3) {
            assert!(matches!(
                window[0],
                Event::Line { line: Line::ChipSelect, level: Level::Low, .. }
            ));
            assert!(matches!(
                window[1],
                Event::Exchange { chip_select: Level::Low, .. }
            ));
            assert!(matches!(
                window[2],
                Event::Line { line: Line::ChipSelect, level: Level::High, .. }
            ));
        }
        assert_eq!(access.transport().chip_select(), Level::High);
    }

    #[test]
    fn test_exchange_error_releases_chip_select() {
        let transport = MockTransport::new();
        transport.set_next_exchange_error(TransportError::Spi);
        let mut access = RegisterAccess::new(transport);

        futures::executor::block_on(async {
            let result = access.read(reg::VERSION).await;
            assert_eq!(result, Err(TransportError::Spi));
        });

        assert_eq!(access.transport().chip_select(), Level::High);
    }

    #[test]
    fn test_chip_select_error_skips_exchange() {
        let transport = MockTransport::new();
        transport.set_next_line_error(Line::ChipSelect, TransportError::ChipSelect);
        let mut access = RegisterAccess::new(transport);

        futures::executor::block_on(async {
            let result = access.write(reg::OP_MODE, 0x80).await;
            assert_eq!(result, Err(TransportError::ChipSelect));
        });

        assert!(access.release().exchanges().is_empty());
    }
}
