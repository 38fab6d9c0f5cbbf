use crate::utils::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator-supplied message text. Never blank: a run is refused before it
/// leaves `Idle` if the raw input trims to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message(String);

impl Message {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(RelayError::InvalidInput {
                reason: "message is empty".to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the wireless stack needs to join one access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPointCredential {
    pub ssid: String,
    pub passphrase: String,
    pub is_hidden: bool,
    pub is_wep: bool,
}

impl AccessPointCredential {
    /// WPA2-personal credential, the common case for both relay endpoints.
    pub fn wpa2(ssid: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            passphrase: passphrase.into(),
            is_hidden: false,
            is_wep: false,
        }
    }
}

/// Phases of one relay run, in execution order. `Failed` is reachable from
/// any non-idle phase; `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayPhase {
    Idle,
    PermissionCheck,
    ConnectTransmitter,
    SendToTransmitter,
    ConnectReceiver,
    WaitDelay,
    SendToReceiver,
    Done,
    Failed,
}

impl RelayPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RelayPhase::Done | RelayPhase::Failed)
    }
}

impl fmt::Display for RelayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelayPhase::Idle => "idle",
            RelayPhase::PermissionCheck => "permission check",
            RelayPhase::ConnectTransmitter => "transmitter association",
            RelayPhase::SendToTransmitter => "transmitter dispatch",
            RelayPhase::ConnectReceiver => "receiver association",
            RelayPhase::WaitDelay => "morse wait",
            RelayPhase::SendToReceiver => "receiver dispatch",
            RelayPhase::Done => "done",
            RelayPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Ephemeral state for a single send operation. Owned exclusively by the
/// orchestrator and discarded once a terminal phase is reached.
#[derive(Debug)]
pub struct RelayRun {
    pub message: Message,
    pub phase: RelayPhase,
    pub last_error: Option<String>,
}

impl RelayRun {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            phase: RelayPhase::Idle,
            last_error: None,
        }
    }

    pub fn advance(&mut self, phase: RelayPhase) {
        tracing::debug!(from = %self.phase, to = %phase, "Phase transition");
        self.phase = phase;
    }

    pub fn fail(&mut self, error: &RelayError) {
        self.last_error = Some(error.to_string());
        self.phase = RelayPhase::Failed;
    }
}

/// Outcome summary of a completed relay run.
#[derive(Debug, Clone, Serialize)]
pub struct RelayReport {
    pub message: String,
    pub delay_ms: u64,
    pub total_duration_ms: u64,
    pub phases: Vec<PhaseTiming>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseTiming {
    pub phase: RelayPhase,
    pub duration_ms: u64,
}
