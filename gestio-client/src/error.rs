//! Client error types

use thiserror::Error;

/// Transport-level error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured deadline
    #[error("request timed out")]
    Timeout,

    /// Non-2xx response; `message` carries the server's wording when the
    /// body had one, else a generic description
    #[error("server rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Timeout => true,
            ClientError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Message suitable for surfacing to the user: the server's own words
    /// for API rejections, a generic network description otherwise.
    pub fn surface_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Timeout => "request timed out".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
