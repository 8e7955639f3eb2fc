//! Shared application state.

use std::sync::Arc;

use crate::domain::{ConnectionLifecycle, ConnectionRegistry};

use super::config::ServerConfig;

/// Shared application state
pub struct AppState {
    /// Relay protocol handler driven by the WebSocket endpoint
    pub lifecycle: Arc<dyn ConnectionLifecycle>,
    /// Registry（接続集合の抽象化）
    pub registry: Arc<dyn ConnectionRegistry>,
    pub config: ServerConfig,
}
