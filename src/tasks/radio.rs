//! Radio task: bring-up, then RegOpMode polling
//!
//! Resets the RFM95, checks its identity, puts it in LoRa sleep and polls
//! RegOpMode forever. A failed bring-up ends the task without any further
//! register traffic.

use embassy_time::{Duration, Timer};
use log::{error, info};

use crate::config::{monitor, startup};
use crate::radio::{OpMode, OpModeMonitor, RadioError, Rfm95, Transport};

use super::led::LedSignal;
use super::LedSender;

/// Task that owns the radio
pub async fn radio_task<T: Transport>(mut radio: Rfm95<T>, led_sender: LedSender) {
    // Leave time for the module supply to come up before touching reset
    Timer::after(Duration::from_millis(startup::PRE_RESET_DELAY_MS)).await;

    if let Err(e) = bring_up(&mut radio).await {
        error!("RFM95 halted: {:?}", e);
        let _ = led_sender.try_send(LedSignal::Off);
        return;
    }
    let _ = led_sender.try_send(LedSignal::On);

    let mut op_mode_monitor = OpModeMonitor::new();
    loop {
        match op_mode_monitor.poll(&mut radio).await {
            Ok(_) => {
                let _ = led_sender.try_send(LedSignal::Blink);
            }
            Err(e) => error!("RegOpMode read failed: {:?}", e),
        }
        Timer::after(Duration::from_millis(monitor::POLL_INTERVAL_MS)).await;
    }
}

/// Reset, verify and switch to LoRa sleep
async fn bring_up<T: Transport>(radio: &mut Rfm95<T>) -> Result<(), RadioError> {
    info!("Starting RFM95 bring-up");
    radio.init().await?;

    // LoRa mode can only be selected from sleep
    radio.set_op_mode(OpMode::LORA_SLEEP).await?;
    info!("RFM95 in {}", OpMode::LORA_SLEEP);
    Ok(())
}
