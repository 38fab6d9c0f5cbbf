use crate::domain::ports::{CapabilityGate, Notifier};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Grants the wireless capability unconditionally. Desktop hosts put no
/// location-permission gate in front of Wi-Fi control; the mobile quirk lives
/// behind the same port with a platform-specific implementation.
pub struct HostCapabilityGate;

#[async_trait]
impl CapabilityGate for HostCapabilityGate {
    async fn request_wireless_capability(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Prints operator notices to stdout, standing in for the modal single-button
/// alerts of the original handheld surface.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, text: &str) {
        tracing::info!("{}", text);
        println!("🔔 {}", text);
    }
}
