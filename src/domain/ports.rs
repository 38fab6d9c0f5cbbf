use crate::domain::model::AccessPointCredential;
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// Host wireless stack. `associate` blocks the calling task until the join
/// succeeds, fails, or the platform-level wait elapses; a later call with a
/// different credential supersedes the previous association. No retries here,
/// retry policy belongs to the orchestrator.
#[async_trait]
pub trait WirelessAssociator: Send + Sync {
    async fn associate(&mut self, credential: &AccessPointCredential) -> Result<()>;

    /// SSID of the last successful association, if any. This is the only
    /// place the "current network" state lives.
    fn current_ssid(&self) -> Option<&str>;
}

/// Transport for handing the message to the relay hardware. One request, no
/// retries; any transport-level problem surfaces as an error.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    async fn send(&self, endpoint: &Url, message: &str) -> Result<()>;
}

/// Platform capability prompt gating wireless control. Mobile hosts tie
/// network scanning to the location permission; desktop hosts grant trivially.
#[async_trait]
pub trait CapabilityGate: Send + Sync {
    async fn request_wireless_capability(&self) -> Result<bool>;
}

/// Operator-facing notices, one per major phase transition and on every
/// failure. Text is for humans, never parsed.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str);
}

/// Deployment settings consumed when building a relay plan.
pub trait RelaySettings: Send + Sync {
    fn transmitter(&self) -> AccessPointCredential;
    fn receiver(&self) -> AccessPointCredential;
    fn endpoint(&self) -> &str;
    fn unit_ms(&self) -> u64;
}
