//! Error types for the API client and the favorites store

use thiserror::Error;

/// Failure of a single OMDb call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure or a body that could not be decoded
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// Upstream answered `Response: "False"`; carries its `Error` text
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// Message shown in the UI. Upstream text is kept verbatim, transport
    /// failures get the operation's generic message.
    pub fn user_message(&self, network_fallback: &str) -> String {
        match self {
            ApiError::NetworkFailure(_) => network_fallback.to_string(),
            ApiError::Upstream(message) => message.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
