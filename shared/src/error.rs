//! Error types shared by the api client and the state machine

use thiserror::Error;

/// why a request to the to-do api did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// build-time configuration that could not be understood
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown tab switch policy: {0} (expected \"cached\" or \"refresh\")")]
    UnknownTabSwitch(String),
}
