use crate::domain::model::AccessPointCredential;
use crate::domain::ports::RelaySettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// CLI deployment settings. Defaults match the fielded pair of access points
/// and the gateway address both of them answer on.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "morse-relay")]
#[command(about = "Relay a text message across two Wi-Fi endpoints on a Morse timing budget")]
pub struct RelayConfig {
    /// Message to relay
    #[arg(long)]
    pub message: String,

    #[arg(long, default_value = "morse transmitter")]
    pub transmitter_ssid: String,

    #[arg(long, default_value = "12345678")]
    pub transmitter_passphrase: String,

    #[arg(long, default_value = "iphone 17")]
    pub receiver_ssid: String,

    #[arg(long, default_value = "ballu1234")]
    pub receiver_passphrase: String,

    #[arg(long, default_value = "http://192.168.4.1/send")]
    pub endpoint: String,

    /// Milliseconds per Morse unit
    #[arg(long, default_value = "200")]
    pub unit_ms: u64,

    #[arg(long, help = "Treat both networks as hidden SSIDs")]
    pub hidden: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl RelaySettings for RelayConfig {
    fn transmitter(&self) -> AccessPointCredential {
        AccessPointCredential {
            ssid: self.transmitter_ssid.clone(),
            passphrase: self.transmitter_passphrase.clone(),
            is_hidden: self.hidden,
            is_wep: false,
        }
    }

    fn receiver(&self) -> AccessPointCredential {
        AccessPointCredential {
            ssid: self.receiver_ssid.clone(),
            passphrase: self.receiver_passphrase.clone(),
            is_hidden: self.hidden,
            is_wep: false,
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn unit_ms(&self) -> u64 {
        self.unit_ms
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_non_empty_string("transmitter_ssid", &self.transmitter_ssid)?;
        validate_non_empty_string("receiver_ssid", &self.receiver_ssid)?;
        validate_positive_number("unit_ms", self.unit_ms, 1)?;
        Ok(())
    }
}
