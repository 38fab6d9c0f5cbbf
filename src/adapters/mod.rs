// Adapters layer: concrete implementations of the domain ports against real
// external systems (HTTP transport, host wireless stack, host capabilities).

pub mod host;
pub mod http;
pub mod wifi;

pub use host::{ConsoleNotifier, HostCapabilityGate};
pub use http::HttpDispatchClient;
pub use wifi::NmcliAssociator;
