//! Connection registry trait
//!
//! The set of live connections available as broadcast targets. The use case
//! layer depends on this trait, never on a concrete implementation.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Connection, ConnectionId, TransportError};

/// Outcome of one fan-out
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Number of recipients that accepted the message
    pub delivered: usize,
    /// Recipients whose send failed, with the reason
    pub failed: Vec<(ConnectionId, TransportError)>,
}

impl BroadcastReport {
    /// Total number of recipients attempted
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed.len()
    }
}

/// Registry of live connections
///
/// Implementations must tolerate concurrent `add`, `remove` and
/// `broadcast_except` calls from independent connection tasks.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Register a connection
    async fn add(&self, connection: Arc<dyn Connection>);

    /// Deregister by identifier. Returns `false` if it was not registered.
    async fn remove(&self, id: &ConnectionId) -> bool;

    /// Send `text` to every registered connection except `sender_id`.
    ///
    /// A failing recipient never prevents delivery to the others.
    async fn broadcast_except(&self, sender_id: &ConnectionId, text: &str) -> BroadcastReport;

    /// Number of registered connections
    async fn count(&self) -> usize;

    /// Whether the identifier is registered
    async fn contains(&self, id: &ConnectionId) -> bool;
}
