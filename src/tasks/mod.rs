//! Embassy tasks module
//!
//! Contains the async tasks for the firmware, organised by functionality.

pub mod led;
pub mod radio;

pub use led::{led_task, LedReceiver, LedSender, LedSignal, LED_CHANNEL};
pub use radio::radio_task;
