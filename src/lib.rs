#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod radio;

// Tasks depend on embassy/esp-hal, only available with the embedded feature
#[cfg(feature = "embedded")]
pub mod tasks;
