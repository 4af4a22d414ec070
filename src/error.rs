//! Error types for the request caching layer
//!
//! Transport and decode failures are treated uniformly by the controller:
//! they are caught locally, forwarded to the configured error callback (or
//! logged), and never propagated to the caller as a fault. A failed run
//! always returns the controller to idle with its previous data intact.

use thiserror::Error;

/// Errors that can occur while fetching or decoding a response
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-HTTP transport rejected the request
    #[error("transport failed: {0}")]
    Transport(String),

    /// Response body could not be decoded into the target type
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_message() {
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport failed: connection refused");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = FetchError::from(serde_err);
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(err.to_string().starts_with("failed to decode response body"));
    }
}
