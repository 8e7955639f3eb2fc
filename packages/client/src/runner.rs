//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use hiroba_shared::time::Clock;

use super::{
    error::ClientError,
    session::{SessionEnd, run_client_session},
    ui::{InputReceiver, spawn_input_reader},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// How often, and how far apart, a lost connection is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RECONNECT_ATTEMPTS,
            interval: Duration::from_secs(RECONNECT_INTERVAL_SECS),
        }
    }
}

/// Run the interactive WebSocket client with reconnection logic
///
/// Reads lines from the terminal for as long as the client runs.
pub async fn run_client(url: String, clock: Arc<dyn Clock>) -> Result<(), ClientError> {
    let mut input = spawn_input_reader();
    run_client_with_input(&url, clock, &mut input, ReconnectPolicy::default()).await
}

/// Run the client on an existing input stream
///
/// Connection losses are retried according to `policy`; a rejected
/// handshake is returned at once.
pub async fn run_client_with_input(
    url: &str,
    clock: Arc<dyn Clock>,
    input: &mut InputReceiver,
    policy: ReconnectPolicy,
) -> Result<(), ClientError> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            url,
            reconnect_count + 1,
            policy.max_attempts
        );

        match run_client_session(url, clock.clone(), input).await {
            Ok(SessionEnd::UserExit) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e @ ClientError::Rejected(_)) => {
                tracing::error!("{}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if reconnect_count >= policy.max_attempts {
                    return Err(ClientError::ReconnectExhausted(policy.max_attempts));
                }

                tracing::info!(
                    "Reconnecting in {:?}... (attempt {}/{})",
                    policy.interval,
                    reconnect_count + 1,
                    policy.max_attempts
                );

                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
