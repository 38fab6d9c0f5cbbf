use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Wireless permissions were not granted")]
    PermissionDenied,

    #[error("Failed to associate with \"{ssid}\": {reason}")]
    AssociationFailure { ssid: String, reason: String },

    #[error("Dispatch request failed: {0}")]
    DispatchFailure(#[from] reqwest::Error),

    #[error("Dispatch endpoint answered with status {status}")]
    DispatchRejected { status: u16 },

    #[error("A relay run is already in flight")]
    Busy,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {field} = \"{value}\": {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, RelayError>;
