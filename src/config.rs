//! Hardware configuration constants for the ESP32-S3 with an RFM95 breakout

/// LED pin
pub mod led {
    pub const PIN: u8 = 48;
}

/// SPI pins for the RFM95 module
pub mod spi {
    pub const SCLK: u8 = 7;
    pub const MISO: u8 = 8;
    pub const MOSI: u8 = 9;

    /// Bus clock. 500 kHz is comfortably inside what the RFM95 tolerates
    /// during bring-up.
    pub const FREQUENCY_KHZ: u32 = 500;
}

/// RFM95 control pins
pub mod rfm95_pins {
    pub const NSS: u8 = 41;
    pub const NRST: u8 = 42;
}

/// Reset pulse holds, in milliseconds
///
/// Found empirically on RFM95 modules. Other revisions of the SX127x may
/// need a longer settle.
pub mod reset_timing {
    /// Reset line held high before the pulse
    pub const RELEASE_HOLD_MS: u32 = 1;
    /// Reset line held low (the pulse itself)
    pub const PULSE_MS: u32 = 1;
    /// Reset line held high after the pulse, before the first register access
    pub const SETTLE_MS: u32 = 5;
}

/// Peripheral identity
pub mod identity {
    /// Silicon version reported by RegVersion on an SX1276/RFM95
    pub const EXPECTED_VERSION: u8 = 0x12;
}

/// Startup delays
pub mod startup {
    /// Time for a serial console to attach before the first log line
    pub const CONSOLE_SETTLE_MS: u64 = 2_000;
    /// Wait after power-up before the reset sequence is driven
    pub const PRE_RESET_DELAY_MS: u64 = 10_000;
}

/// Op-mode polling
pub mod monitor {
    pub const POLL_INTERVAL_MS: u64 = 1_000;
}
