//! Transport trait for abstraction and testability
//!
//! This trait defines the bus and control-line operations the register
//! protocol needs, allowing the SPI/GPIO hardware to be swapped with a mock
//! for testing.

use core::future::Future;

/// Number of bytes in every register transaction
pub const FRAME_LEN: usize = 2;

/// Errors raised by the transport itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// SPI exchange did not complete
    Spi,
    /// Chip-select line could not be driven
    ChipSelect,
    /// Reset line could not be driven
    Reset,
}

/// Errors that can occur while driving the RFM95
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// RegVersion did not hold the expected silicon version
    IdentityMismatch { expected: u8, found: u8 },
    /// Bus or control-line failure
    Transport(TransportError),
    /// Register access before a successful bring-up
    NotReady,
    /// Raw address with bit 7 set
    InvalidAddress(u8),
    /// Reset holds are zero or the pulse outlasts the settle
    InvalidTiming,
}

impl From<TransportError> for RadioError {
    fn from(error: TransportError) -> Self {
        RadioError::Transport(error)
    }
}

/// Digital control lines owned by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// NSS, active low
    ChipSelect,
    /// NRESET, active low
    Reset,
}

/// Logic level of a control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Abstract bus interface for testability
///
/// The bus must already be configured for 8-bit, MSB-first, mode 0 transfers
/// before any of these are called.
pub trait Transport {
    /// Clock out `tx` while capturing the same number of bytes
    ///
    /// Does not touch chip-select.
    fn exchange(
        &mut self,
        tx: [u8; FRAME_LEN],
    ) -> impl Future<Output = Result<[u8; FRAME_LEN], TransportError>>;

    /// Drive a control line to the given level
    fn set_line(&mut self, line: Line, level: Level) -> Result<(), TransportError>;

    /// Wait at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) -> impl Future<Output = ()>;
}
