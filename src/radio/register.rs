//! Register addressing and transaction framing
//!
//! Every register access is a two-byte exchange. The first byte carries the
//! 7-bit register address with bit 7 as the direction flag (set for write,
//! clear for read). The second byte is the value to write, or a dummy byte
//! during which the peripheral clocks out the register content on a read.

use super::traits::{RadioError, FRAME_LEN};

/// Direction flag in the first byte of a frame
const WRITE_FLAG: u8 = 0x80;

/// Mask of the address bits in the first byte of a frame
const ADDRESS_MASK: u8 = 0x7F;

/// Sent in the value slot of a read frame
const DUMMY_BYTE: u8 = 0x00;

/// Index of the received byte that carries read data
const READ_DATA_INDEX: usize = 1;

/// Registers used by this firmware
pub mod reg {
    use super::RegisterAddress;

    /// RegOpMode
    pub const OP_MODE: RegisterAddress = RegisterAddress::masked(0x01);
    /// RegVersion, read-only silicon revision
    pub const VERSION: RegisterAddress = RegisterAddress::masked(0x42);
}

/// A 7-bit peripheral register address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegisterAddress(u8);

impl RegisterAddress {
    /// Highest valid address
    pub const MAX: u8 = ADDRESS_MASK;

    /// Create an address, rejecting values with bit 7 set
    pub const fn new(raw: u8) -> Option<Self> {
        if raw & WRITE_FLAG == 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Create an address from the low 7 bits of `raw`
    pub const fn masked(raw: u8) -> Self {
        Self(raw & ADDRESS_MASK)
    }

    /// The address as a plain byte (bit 7 always clear)
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RegisterAddress {
    type Error = RadioError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(RadioError::InvalidAddress(raw))
    }
}

impl From<RegisterAddress> for u8 {
    fn from(address: RegisterAddress) -> Self {
        address.0
    }
}

/// Direction of a register transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionIntent {
    Read,
    Write,
}

impl TransactionIntent {
    /// First byte of the frame for `address`
    pub const fn frame_address(self, address: RegisterAddress) -> u8 {
        match self {
            TransactionIntent::Read => address.0 & ADDRESS_MASK,
            TransactionIntent::Write => address.0 | WRITE_FLAG,
        }
    }
}

/// One register exchange, executed once by the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterTransaction {
    Read(RegisterAddress),
    Write(RegisterAddress, u8),
}

impl RegisterTransaction {
    pub fn intent(&self) -> TransactionIntent {
        match self {
            RegisterTransaction::Read(_) => TransactionIntent::Read,
            RegisterTransaction::Write(..) => TransactionIntent::Write,
        }
    }

    pub fn address(&self) -> RegisterAddress {
        match *self {
            RegisterTransaction::Read(address) | RegisterTransaction::Write(address, _) => address,
        }
    }

    /// Bytes to clock out, in order
    pub fn frame(&self) -> [u8; FRAME_LEN] {
        let first = self.intent().frame_address(self.address());
        match *self {
            RegisterTransaction::Read(_) => [first, DUMMY_BYTE],
            RegisterTransaction::Write(_, value) => [first, value],
        }
    }

    /// Extract the result from the bytes clocked in
    ///
    /// The first received byte is shifted out while the address is still
    /// being clocked in and never carries data.
    pub fn decode(&self, rx: [u8; FRAME_LEN]) -> Option<u8> {
        match self {
            RegisterTransaction::Read(_) => Some(rx[READ_DATA_INDEX]),
            RegisterTransaction::Write(..) => None,
        }
    }
}
