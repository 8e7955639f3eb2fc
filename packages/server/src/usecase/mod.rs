//! UseCase layer
//!
//! One use case per lifecycle transition, plus `RelayHandler`, which exposes
//! them to transports through the `ConnectionLifecycle` trait.

mod connect_connection;
mod disconnect_connection;
mod error;
mod relay_handler;
mod relay_message;

pub use connect_connection::ConnectUseCase;
pub use disconnect_connection::DisconnectUseCase;
pub use error::RelayError;
pub use relay_handler::RelayHandler;
pub use relay_message::RelayMessageUseCase;
