//! Error types for the Visage client library.
//!
//! Errors are organized by concern so callers can tell a local problem
//! (nothing selected yet) from a remote one (the backend said no). Every
//! client failure is recoverable: the next user-triggered attempt starts
//! from scratch.

use crate::types::Source;
use thiserror::Error;

/// Top-level error type for Visage operations.
#[derive(Error, Debug)]
pub enum VisageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend client errors
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Client errors for the analyze/render/coloring calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No image data is available for the requested source — nothing was
    /// captured, uploaded, or selected yet.
    #[error("No input available for source '{0}'")]
    MissingInput(Source),

    /// The remote call failed: transport error or non-success status.
    /// The response is never partially trusted.
    #[error("{endpoint} call failed: {message}")]
    RemoteCallFailed {
        endpoint: String,
        message: String,
        status_code: Option<u16>,
    },

    /// The remote call exceeded the configured deadline.
    #[error("Timeout calling {endpoint} after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// The operation does not apply to the given source, e.g. raw bytes
    /// offered for the test-image source (which is referenced by name).
    #[error("Invalid payload for source '{src}': {message}")]
    InvalidPayload { src: Source, message: String },

    /// The source's input changed while the call was in flight; the stale
    /// result was discarded instead of overwriting the fresher state.
    #[error("Request for source '{0}' was superseded by newer input")]
    Superseded(Source),
}

impl ClientError {
    /// Build a `RemoteCallFailed` from a transport-level reqwest error.
    pub fn transport(endpoint: &str, err: &reqwest::Error) -> Self {
        Self::RemoteCallFailed {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
        }
    }

    /// Build a `RemoteCallFailed` from a non-success HTTP status.
    pub fn status(endpoint: &str, status: u16, body: String) -> Self {
        Self::RemoteCallFailed {
            endpoint: endpoint.to_string(),
            message: format!("HTTP {status}: {body}"),
            status_code: Some(status),
        }
    }
}

/// Convenience type alias for Visage results.
pub type Result<T> = std::result::Result<T, VisageError>;

/// Convenience type alias for client-specific results.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_source() {
        let err = ClientError::MissingInput(Source::Camera);
        assert!(err.to_string().contains("camera"));
    }

    #[test]
    fn test_status_error_carries_code() {
        let err = ClientError::status("/analyze-image", 503, "unavailable".into());
        match err {
            ClientError::RemoteCallFailed {
                status_code,
                message,
                ..
            } => {
                assert_eq!(status_code, Some(503));
                assert!(message.contains("503"));
            }
            other => panic!("Expected RemoteCallFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_client_error_converts_to_visage_error() {
        let err: VisageError = ClientError::MissingInput(Source::TestImage).into();
        assert!(matches!(err, VisageError::Client(_)));
    }
}
