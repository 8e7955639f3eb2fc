//! Connection implementations
//!
//! - `websocket`: bounded channel drained into a WebSocket sink

pub mod websocket;

pub use websocket::{OutboundReceiver, WebSocketConnection};
