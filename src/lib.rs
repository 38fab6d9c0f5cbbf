pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::RelayConfig;

pub use crate::core::morse;
pub use crate::core::relay::{RelayOrchestrator, RelayPlan};
pub use crate::domain::model::{AccessPointCredential, Message, RelayPhase, RelayReport};
pub use crate::utils::error::{RelayError, Result};
