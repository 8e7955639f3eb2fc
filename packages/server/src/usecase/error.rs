//! UseCase error types.

use thiserror::Error;

use crate::domain::ParseError;

/// Relaying an inbound message failed before fan-out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Payload was not a valid chat message; it is dropped
    #[error(transparent)]
    Parse(#[from] ParseError),
}
