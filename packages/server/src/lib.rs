//! WebSocket chat relay library.
//!
//! Clients connect over a WebSocket and every chat message one client sends is
//! relayed to all other connected clients as `[<time>] <sender-prefix>: <message>`.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
