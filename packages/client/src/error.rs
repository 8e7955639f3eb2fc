//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the WebSocket handshake (e.g. origin not allowed)
    #[error("Server rejected the connection with HTTP {0}")]
    Rejected(u16),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Gave up after repeated connection failures
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
