use thiserror::Error;

use crate::config::ConfigError;

/// Error type for the host-facing parts of the crate: session persistence and
/// configuration. Failed step validation is not an error; it is reported
/// through the wizard's error state.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
