//! Transport-specific error types
//!
//! Errors raised while talking HTTP to the roadmap server (connection,
//! status, body reading).

use thiserror::Error;

/// Errors that can occur while issuing a request or reading its response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be sent (DNS, refused connection, TLS, ...)
    #[error("Failed to reach server: {0}")]
    Connection(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status code
    #[error("Server returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The response body broke off while it was being read
    #[error("Response stream aborted: {0}")]
    Stream(String),

    /// The response body was not the expected JSON document
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout(error.to_string())
        } else if error.is_decode() {
            TransportError::Decode(error.to_string())
        } else if error.is_body() {
            TransportError::Stream(error.to_string())
        } else {
            TransportError::Connection(error.to_string())
        }
    }
}
