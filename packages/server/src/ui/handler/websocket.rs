//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};

use crate::{
    domain::{CloseReason, ConnectionId},
    infrastructure::connection::{OutboundReceiver, WebSocketConnection},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    // A present but non-UTF-8 Origin never matches an allow-list entry
    let origin = headers
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or_default());

    if !state.config.origin_policy.allows(origin) {
        tracing::warn!(
            "Rejecting connection from disallowed origin '{}'",
            origin.unwrap_or_default()
        );
        return Err(StatusCode::FORBIDDEN);
    }

    let id = ConnectionId::generate();
    tracing::debug!("Upgrading connection '{}'", id);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, id)))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket sink.
///
/// Ends when the queue is closed or the peer stops accepting frames.
fn pusher_loop(
    mut rx: OutboundReceiver,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(text.into())).await {
                tracing::debug!("WebSocket sink closed: {}", e);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    let (connection, rx) = WebSocketConnection::channel(id.clone(), state.config.outbound_buffer);
    state.lifecycle.on_open(Arc::new(connection)).await;

    let lifecycle = state.lifecycle.clone();
    let recv_id = id.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    lifecycle.on_transport_error(&recv_id, &e.to_string());
                    return CloseReason::TransportFailure(e.to_string());
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", recv_id, text.as_str());
                    lifecycle.on_message(&recv_id, text.as_str()).await;
                }
                Message::Binary(data) => {
                    tracing::warn!(
                        "Ignoring binary frame ({} bytes) from '{}'",
                        data.len(),
                        recv_id
                    );
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(frame) => {
                    return match frame {
                        Some(frame) => CloseReason::ClientClosed {
                            code: Some(frame.code),
                            reason: frame.reason.as_str().to_string(),
                        },
                        None => CloseReason::ClientClosed {
                            code: None,
                            reason: String::new(),
                        },
                    };
                }
            }
        }
        CloseReason::StreamEnded
    });

    // Spawn a task to push messages from other clients to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    let reason = tokio::select! {
        result = &mut recv_task => {
            send_task.abort();
            result.unwrap_or_else(|e| CloseReason::TransportFailure(e.to_string()))
        }
        _ = &mut send_task => {
            recv_task.abort();
            CloseReason::TransportFailure("outbound stream closed".to_string())
        }
    };

    state.lifecycle.on_close(&id, reason).await;
}
