//! Connection handle trait
//!
//! A `Connection` is a non-owning handle to one open text stream. The socket
//! itself stays with the transport task; the relay only needs the identifier
//! and a way to push text.

use async_trait::async_trait;

use super::{ConnectionId, TransportError};

/// Handle to one open bidirectional text stream
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connection: Send + Sync {
    /// Transport-assigned identifier
    fn id(&self) -> &ConnectionId;

    /// Send one text frame to the peer.
    ///
    /// Fails with [`TransportError`] when the stream is closed or broken, or
    /// when the peer does not accept the frame in time.
    async fn send(&self, text: &str) -> Result<(), TransportError>;
}
