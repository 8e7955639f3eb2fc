//! Chat message types.
//!
//! Inbound frames are JSON objects `{"message": string, "time": string}`.
//! Outbound frames are plain text lines, see [`OutboundChatMessage`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConnectionId, ParseError};

/// A chat message as received from a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message body
    pub message: String,
    /// Client-supplied wall-clock time, relayed verbatim
    pub time: String,
}

impl ChatMessage {
    pub fn new(message: String, time: String) -> Self {
        Self { message, time }
    }

    /// Parse an inbound text frame.
    ///
    /// Both fields must be present and be strings; other fields are ignored.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        serde_json::from_str(text).map_err(|e| ParseError::Malformed(e.to_string()))
    }
}

/// The line relayed to other connections: `[<time>] <sender-prefix>: <message>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundChatMessage {
    pub time: String,
    pub sender_prefix: String,
    pub message: String,
}

impl OutboundChatMessage {
    /// Attribute an inbound message to its sender
    pub fn from_sender(sender: &ConnectionId, inbound: ChatMessage) -> Self {
        Self {
            time: inbound.time,
            sender_prefix: sender.prefix().to_string(),
            message: inbound.message,
        }
    }
}

impl fmt::Display for OutboundChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.time, self.sender_prefix, self.message)
    }
}
