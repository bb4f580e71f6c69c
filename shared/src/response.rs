//! Backend error-body parsing
//!
//! On non-2xx responses the backend returns either `{"error": "..."}` or
//! `{"message": "..."}` depending on the route. Both are folded into one
//! message so callers can surface the server's wording verbatim.

use serde::Deserialize;

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Server message, `error` taking precedence over `message`
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }

    /// Parse a raw body, tolerating non-JSON responses
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}
