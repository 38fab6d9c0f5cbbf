use crate::domain::model::AccessPointCredential;
use crate::domain::ports::WirelessAssociator;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Drives the host wireless stack through NetworkManager's `nmcli`.
///
/// Joining a network supersedes whatever association was active before; no
/// explicit disconnect is issued, matching how a single-radio handheld
/// behaves. The last successfully joined SSID is the only record of the
/// current network, and only `associate` mutates it.
pub struct NmcliAssociator {
    wait: Duration,
    current: Option<String>,
}

impl NmcliAssociator {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            current: None,
        }
    }

    fn command_for(credential: &AccessPointCredential) -> Command {
        let mut cmd = Command::new("nmcli");
        cmd.arg("device")
            .arg("wifi")
            .arg("connect")
            .arg(&credential.ssid);
        if !credential.passphrase.is_empty() {
            cmd.arg("password").arg(&credential.passphrase);
            if credential.is_wep {
                cmd.arg("wep-key-type").arg("phrase");
            }
        }
        if credential.is_hidden {
            cmd.arg("hidden").arg("yes");
        }
        cmd
    }
}

#[async_trait]
impl WirelessAssociator for NmcliAssociator {
    async fn associate(&mut self, credential: &AccessPointCredential) -> Result<()> {
        if self.current.as_deref() == Some(credential.ssid.as_str()) {
            tracing::debug!(ssid = %credential.ssid, "Already associated, nothing to do");
            return Ok(());
        }

        tracing::info!(ssid = %credential.ssid, "Associating");
        let mut cmd = Self::command_for(credential);
        let output = timeout(self.wait, cmd.output())
            .await
            .map_err(|_| RelayError::AssociationFailure {
                ssid: credential.ssid.clone(),
                reason: format!("timed out after {:?}", self.wait),
            })?
            .map_err(|e| RelayError::AssociationFailure {
                ssid: credential.ssid.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RelayError::AssociationFailure {
                ssid: credential.ssid.clone(),
                reason: stderr.trim().to_string(),
            });
        }

        self.current = Some(credential.ssid.clone());
        Ok(())
    }

    fn current_ssid(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
