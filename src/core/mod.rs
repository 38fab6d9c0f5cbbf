pub mod morse;
pub mod relay;

pub use crate::domain::model::{AccessPointCredential, Message, RelayPhase, RelayReport, RelayRun};
pub use crate::domain::ports::{
    CapabilityGate, MessageDispatcher, Notifier, RelaySettings, WirelessAssociator,
};
pub use crate::utils::error::Result;
