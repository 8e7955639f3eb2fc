//! Domain layer
//!
//! Value objects, message types and the interfaces (traits) the relay depends on.
//! Concrete implementations live in the infrastructure layer.

pub mod connection;
pub mod error;
pub mod lifecycle;
pub mod message;
pub mod registry;
pub mod value_object;

pub use connection::Connection;
pub use error::{ParseError, TransportError, ValueObjectError};
pub use lifecycle::{CloseReason, ConnectionLifecycle};
pub use message::{ChatMessage, OutboundChatMessage};
pub use registry::{BroadcastReport, ConnectionRegistry};
pub use value_object::{CONNECTION_ID_PREFIX_LEN, ConnectionId};

#[cfg(test)]
pub use connection::MockConnection;
