//! Transport-to-relay boundary
//!
//! Any transport (the axum WebSocket endpoint, a raw socket server, a test
//! harness) drives the relay through this trait, one call per lifecycle event.

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use super::{Connection, ConnectionId};

/// Why a connection ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer sent a close frame
    ClientClosed { code: Option<u16>, reason: String },
    /// The stream ended without a close frame
    StreamEnded,
    /// A transport error terminated the stream
    TransportFailure(String),
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientClosed { code: Some(code), reason } if !reason.is_empty() => {
                write!(f, "closed by client ({}: {})", code, reason)
            }
            Self::ClientClosed { code: Some(code), .. } => write!(f, "closed by client ({})", code),
            Self::ClientClosed { code: None, .. } => write!(f, "closed by client"),
            Self::StreamEnded => write!(f, "stream ended"),
            Self::TransportFailure(e) => write!(f, "transport failure: {}", e),
        }
    }
}

/// Lifecycle callbacks delivered by a transport for each connection
#[async_trait]
pub trait ConnectionLifecycle: Send + Sync {
    /// Connection established
    async fn on_open(&self, connection: Arc<dyn Connection>);

    /// A text payload arrived from `sender`
    async fn on_message(&self, sender: &ConnectionId, payload: &str);

    /// Connection ended, gracefully or not. May be delivered more than once.
    async fn on_close(&self, id: &ConnectionId, reason: CloseReason);

    /// A transport error that does not by itself end the connection
    fn on_transport_error(&self, id: &ConnectionId, error: &str);
}
