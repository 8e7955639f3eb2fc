//! UI layer: axum router, WebSocket and HTTP handlers.

pub mod config;
mod handler;
mod server;
mod signal;
pub mod state;

pub use config::{ConfigError, OriginPolicy, ServerConfig};
pub use server::Server;
