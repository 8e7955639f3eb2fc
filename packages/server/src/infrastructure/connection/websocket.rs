//! WebSocket を使った Connection 実装
//!
//! ## 責務
//!
//! - 接続ごとの有界チャネル（bounded channel）の送信側を保持
//! - メッセージを待たずにキューへ積む（満杯なら即座に `Full` を返す）
//!
//! ## 設計ノート
//!
//! WebSocket の sink は UI 層（`ui/handler/websocket.rs`）の pusher loop が所有します。
//! この実装はチャネルの送信側だけを持ち、`send` はキューの空きを待ちません。
//! 遅い受信者のキューが満杯になっても、送信者の受信ループは止まりません。

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{Connection, ConnectionId, TransportError};

/// Receiving half drained by the connection's pusher loop
pub type OutboundReceiver = mpsc::Receiver<String>;

/// Connection backed by a bounded outbound queue
pub struct WebSocketConnection {
    id: ConnectionId,
    sender: mpsc::Sender<String>,
}

impl WebSocketConnection {
    /// Create a connection handle and the receiver its pusher loop drains
    ///
    /// # Arguments
    ///
    /// * `id` - Transport-assigned connection identifier
    /// * `buffer` - Outbound queue capacity (at least 1)
    pub fn channel(id: ConnectionId, buffer: usize) -> (Self, OutboundReceiver) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (Self { id, sender }, receiver)
    }
}

#[async_trait]
impl Connection for WebSocketConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    async fn send(&self, text: &str) -> Result<(), TransportError> {
        self.sender
            .try_send(text.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => TransportError::Full(self.id.to_string()),
                TrySendError::Closed(_) => TransportError::Closed(self.id.to_string()),
            })
    }
}
