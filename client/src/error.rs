//! Error types for the ExplainCheck client.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while verifying an explanation.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any request was issued
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network-level failure talking to the backend
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// Response body did not have the expected shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Backend did not answer in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Message shown to the user when this error ends a verification.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Transport(_) => {
                "Could not reach the verification service. Please try again.".to_string()
            }
            Error::Status(code) => format!("Verification failed (HTTP {code})."),
            Error::MalformedPayload(_) => {
                "The verification service returned an unexpected response.".to_string()
            }
            Error::Timeout(after) => format!(
                "The verification service did not respond within {} seconds.",
                after.as_secs()
            ),
            Error::Config(msg) => format!("Client misconfigured: {msg}"),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|field| field.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        Error::Validation(message)
    }
}
