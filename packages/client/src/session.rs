//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use hiroba_shared::time::Clock;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use super::{
    error::ClientError,
    formatter::MessageFormatter,
    ui::{InputReceiver, redisplay_prompt},
};

/// How a session ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user closed the input (Ctrl+C / Ctrl+D)
    UserExit,
}

/// Run one WebSocket client session
///
/// Lines are taken from `input` until it closes or the connection is lost.
/// The receiver is borrowed so that the next session after a reconnect
/// continues reading the same input.
pub async fn run_client_session(
    url: &str,
    clock: Arc<dyn Clock>,
    input: &mut InputReceiver,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _response) = match connect_async(url).await {
        Ok(result) => result,
        Err(WsError::Http(response)) => {
            return Err(ClientError::Rejected(response.status().as_u16()));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to chat relay!");
    println!("\nType messages and press Enter to send. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print!("{}", MessageFormatter::format_received(text.as_str()));
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError(
                        "Server closed the connection".to_string(),
                    ));
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                _ => {}
            }
        }

        Err::<SessionEnd, _>(ClientError::ConnectionError("Connection lost".to_string()))
    });

    // Forward typed lines to the WebSocket
    let write_loop = async move {
        while let Some(line) = input.recv().await {
            let json = match MessageFormatter::build_payload(&line, clock.as_ref()) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::text(json)).await {
                tracing::warn!("Failed to send message: {}", e);
                return Err(ClientError::ConnectionError(e.to_string()));
            }
        }

        // Input closed by the user: say goodbye politely
        write.send(Message::Close(None)).await.ok();
        Ok(SessionEnd::UserExit)
    };

    // Whichever side finishes first ends the session
    tokio::select! {
        read_result = &mut read_task => {
            read_result.unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())))
        }
        write_result = write_loop => {
            read_task.abort();
            write_result
        }
    }
}
