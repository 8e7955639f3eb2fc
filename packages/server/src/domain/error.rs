//! Domain error types.

use thiserror::Error;

/// Errors raised when constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Connection identifier must not be empty
    #[error("Connection ID must not be empty")]
    EmptyConnectionId,
}

/// Inbound payload could not be interpreted as a chat message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Payload is not well-formed JSON, or a required field is missing or not a string
    #[error("Malformed chat payload: {0}")]
    Malformed(String),
}

/// A send to one recipient failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The underlying stream is closed or broken
    #[error("Connection '{0}' is closed")]
    Closed(String),

    /// The recipient's outbound queue is full, so the message was dropped for it
    #[error("Outbound queue of connection '{0}' is full")]
    Full(String),
}
