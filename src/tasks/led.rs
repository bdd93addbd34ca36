//! LED task for non-blocking status indication
//!
//! Solid on once the radio is verified, a short blink on every poll, off
//! when bring-up fails.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use esp_hal::gpio::Output;

/// Duration of the poll blink in milliseconds
const LED_BLINK_MS: u64 = 50;

/// Requested LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedSignal {
    On,
    Off,
    /// Briefly turn off, then back on
    Blink,
}

/// Type alias for the LED channel sender
pub type LedSender = Sender<'static, CriticalSectionRawMutex, LedSignal, 4>;

/// Type alias for the LED channel receiver
pub type LedReceiver = Receiver<'static, CriticalSectionRawMutex, LedSignal, 4>;

/// Channel for LED signals
pub static LED_CHANNEL: embassy_sync::channel::Channel<CriticalSectionRawMutex, LedSignal, 4> =
    embassy_sync::channel::Channel::new();

/// Task that drives the status LED (active low)
pub async fn led_task(mut led: Output<'static>, receiver: LedReceiver) {
    loop {
        match receiver.receive().await {
            LedSignal::On => led.set_low(),
            LedSignal::Off => led.set_high(),
            LedSignal::Blink => {
                led.set_high();
                embassy_time::Timer::after(embassy_time::Duration::from_millis(LED_BLINK_MS)).await;
                led.set_low();
            }
        }
    }
}
