pub mod mode;
pub mod monitor;
pub mod protocol;
pub mod register;
pub mod rfm95;
pub mod sequencer;
pub mod traits;

#[cfg(feature = "embedded")]
pub mod driver;

pub use mode::{DeviceMode, OpMode};
pub use monitor::{OpModeMonitor, OpModeSample};
pub use protocol::RegisterAccess;
pub use register::{reg, RegisterAddress, RegisterTransaction, TransactionIntent};
pub use rfm95::Rfm95;
pub use sequencer::{BringUpConfig, DeviceState, ResetTiming, Sequencer};
pub use traits::{Level, Line, RadioError, Transport, TransportError};
