//! Value objects.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Number of characters of the connection ID shown as the sender label
pub const CONNECTION_ID_PREFIX_LEN: usize = 8;

/// Transport-assigned identifier of one connection.
///
/// Unique and stable for the connection's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a ConnectionId from an existing identifier
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    /// Generate a fresh identifier (UUID v4, hyphenated)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sender label used in relayed messages.
    ///
    /// The first [`CONNECTION_ID_PREFIX_LEN`] characters, or the whole
    /// identifier when it is shorter. Counts characters, not bytes.
    pub fn prefix(&self) -> &str {
        match self.0.char_indices().nth(CONNECTION_ID_PREFIX_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
