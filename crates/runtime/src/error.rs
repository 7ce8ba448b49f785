//! Error types for the console runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the console runtime.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to establish the WebSocket connection.
    #[error("Failed to connect to console server: {0}")]
    ConnectionFailed(String),

    /// Transport-level error (WebSocket read/write).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Protocol-level error (malformed or unexpected frame).
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Outbound channel closed unexpectedly.
    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
