//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Response body of the health check endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Number of currently registered relay connections
    pub connections: usize,
}
