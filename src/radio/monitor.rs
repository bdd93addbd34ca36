//! RegOpMode polling
//!
//! One poll is one register read. Pacing between polls belongs to the caller.

use super::mode::OpMode;
use super::register::reg;
use super::rfm95::Rfm95;
use super::traits::{RadioError, Transport};
use log::{info, warn};

/// Result of a single poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpModeSample {
    /// Raw RegOpMode content
    pub raw: u8,
    pub mode: OpMode,
    /// Differs from the previous sample (always true for the first one)
    pub changed: bool,
}

/// Tracks successive RegOpMode reads
#[derive(Debug, Default)]
pub struct OpModeMonitor {
    last: Option<u8>,
    samples: u32,
}

impl OpModeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read RegOpMode once and report it
    pub async fn poll<T: Transport>(&mut self, radio: &mut Rfm95<T>) -> Result<OpModeSample, RadioError> {
        let raw = radio.read_register(reg::OP_MODE).await?;
        let mode = OpMode::from_byte(raw);
        let changed = self.last != Some(raw);

        info!("RegOpMode: 0x{:02X} ({})", raw, mode);
        if changed && self.last.is_some() {
            warn!("RegOpMode changed without a write");
        }

        self.last = Some(raw);
        self.samples = self.samples.wrapping_add(1);

        Ok(OpModeSample { raw, mode, changed })
    }

    /// Last value read, if any
    pub fn last(&self) -> Option<u8> {
        self.last
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::traits::mock::MockTransport;

    #[test]
    fn test_poll_reports_mode() {
        let mut radio = Rfm95::new(MockTransport::with_version(0x12));
        let mut monitor = OpModeMonitor::new();

        futures::executor::block_on(async {
            radio.init().await.unwrap();
            radio.set_op_mode(OpMode::LORA_SLEEP).await.unwrap();

            let first = monitor.poll(&mut radio).await.unwrap();
            assert_eq!(first.raw, 0x80);
            assert_eq!(first.mode, OpMode::LORA_SLEEP);
            assert!(first.changed);

            let second = monitor.poll(&mut radio).await.unwrap();
            assert!(!second.changed);
        });

        assert_eq!(monitor.samples(), 2);
        assert_eq!(monitor.last(), Some(0x80));
    }

    #[test]
    fn test_poll_detects_change() {
        let mut radio = Rfm95::new(MockTransport::with_version(0x12));
        let mut monitor = OpModeMonitor::new();

        futures::executor::block_on(async {
            radio.init().await.unwrap();
            radio.set_op_mode(OpMode::LORA_SLEEP).await.unwrap();
            monitor.poll(&mut radio).await.unwrap();

            // Device dropped back to FSK standby on its own
            radio.transport().set_register(0x01, 0x09);
            let sample = monitor.poll(&mut radio).await.unwrap();
            assert!(sample.changed);
            assert!(!sample.mode.long_range);
        });
    }

    #[test]
    fn test_poll_refused_when_not_ready() {
        let mut radio = Rfm95::new(MockTransport::with_version(0x13));
        let mut monitor = OpModeMonitor::new();

        futures::executor::block_on(async {
            let _ = radio.init().await;
            assert_eq!(monitor.poll(&mut radio).await, Err(RadioError::NotReady));
        });

        assert_eq!(monitor.samples(), 0);
        assert_eq!(monitor.last(), None);
    }
}
