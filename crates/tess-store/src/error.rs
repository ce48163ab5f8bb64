//! Store error types for tess-store.

use thiserror::Error;

/// Errors from data service operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// A row could not be decoded into its entity struct.
    #[error("decode error: {0}")]
    Decode(String),

    /// A fixture file is malformed or unreadable.
    #[error("fixture error: {0}")]
    Fixture(String),

    /// The store is missing required configuration.
    #[error("store not configured: {0}")]
    NotConfigured(String),
}

impl StoreError {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport failures, rate limiting and 5xx responses are transient;
    /// everything else (4xx, decode errors, config errors) is not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => !error.is_builder() && !error.is_decode(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Decode(_) | Self::Fixture(_) | Self::NotConfigured(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = StoreError::Api {
            status: 503,
            message: String::new(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = StoreError::Api {
            status: 400,
            message: "bad filter".into(),
        };
        assert!(!err.is_transient());
        assert!(!StoreError::Decode("x".into()).is_transient());
    }

    #[test]
    fn rate_limit_is_transient() {
        assert!(StoreError::RateLimited { retry_after_secs: 1 }.is_transient());
    }
}
