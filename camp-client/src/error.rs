//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the collaborator
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Collaborator not configured (missing URL or key)
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::NotConfigured(_) => ErrorCode::ConfigError,
            ClientError::Status { .. }
            | ClientError::InvalidResponse(_)
            | ClientError::Serialization(_) => ErrorCode::CollaboratorError,
        };
        AppError::with_message(code, err.to_string())
    }
}
