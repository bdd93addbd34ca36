//! RegOpMode decoding

use core::fmt;

/// LongRangeMode: LoRa when set, FSK/OOK when clear
const LONG_RANGE_BIT: u8 = 0x80;
/// AccessSharedReg: FSK register page visible in LoRa mode
const ACCESS_SHARED_REG_BIT: u8 = 0x40;
/// LowFrequencyModeOn: low frequency register bank selected
const LOW_FREQUENCY_BIT: u8 = 0x08;
const MODE_MASK: u8 = 0x07;

/// Transceiver mode, RegOpMode bits 2..0
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMode {
    Sleep = 0,
    Standby = 1,
    FsTx = 2,
    Tx = 3,
    FsRx = 4,
    RxContinuous = 5,
    RxSingle = 6,
    Cad = 7,
}

impl DeviceMode {
    fn from_bits(bits: u8) -> Self {
        match bits & MODE_MASK {
            0 => Self::Sleep,
            1 => Self::Standby,
            2 => Self::FsTx,
            3 => Self::Tx,
            4 => Self::FsRx,
            5 => Self::RxContinuous,
            6 => Self::RxSingle,
            _ => Self::Cad,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Sleep => "Sleep",
            Self::Standby => "Standby",
            Self::FsTx => "FSTx",
            Self::Tx => "Tx",
            Self::FsRx => "FSRx",
            Self::RxContinuous => "RxContinuous",
            Self::RxSingle => "RxSingle",
            Self::Cad => "CAD",
        }
    }
}

/// Decoded RegOpMode
///
/// Bits 5..4 are reserved in LoRa mode and are not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpMode {
    pub long_range: bool,
    pub access_shared_reg: bool,
    pub low_frequency: bool,
    pub mode: DeviceMode,
}

impl OpMode {
    /// LoRa mode, sleeping. The mode bit can only be changed from Sleep.
    pub const LORA_SLEEP: Self = Self {
        long_range: true,
        access_shared_reg: false,
        low_frequency: false,
        mode: DeviceMode::Sleep,
    };

    pub fn from_byte(byte: u8) -> Self {
        Self {
            long_range: byte & LONG_RANGE_BIT != 0,
            access_shared_reg: byte & ACCESS_SHARED_REG_BIT != 0,
            low_frequency: byte & LOW_FREQUENCY_BIT != 0,
            mode: DeviceMode::from_bits(byte),
        }
    }

    pub fn bits(&self) -> u8 {
        let mut byte = self.mode as u8;
        if self.long_range {
            byte |= LONG_RANGE_BIT;
        }
        if self.access_shared_reg {
            byte |= ACCESS_SHARED_REG_BIT;
        }
        if self.low_frequency {
            byte |= LOW_FREQUENCY_BIT;
        }
        byte
    }
}

impl From<u8> for OpMode {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl From<OpMode> for u8 {
    fn from(mode: OpMode) -> Self {
        mode.bits()
    }
}

impl fmt::Display for OpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modem = if self.long_range { "LoRa" } else { "FSK/OOK" };
        write!(f, "{} {}", modem, self.mode.name())?;
        if self.low_frequency {
            write!(f, " (LF)")?;
        }
        Ok(())
    }
}
