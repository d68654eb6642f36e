//! Error types for the dashboard data core

use thiserror::Error;

/// Errors that can occur on the fetch path (network, HTTP, decoding)
///
/// Timeouts are a distinct variant so callers can show a tailored
/// message instead of a generic network failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Upstream returned a non-success HTTP status
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Request exceeded the timeout
    #[error("Request timeout. Please try again.")]
    Timeout,

    /// Response body was not the expected JSON
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Classifies a reqwest error, keeping timeouts distinguishable
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }

    /// Creates a Parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// True when the failure was a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
