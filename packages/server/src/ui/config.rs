//! Server configuration.

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PATH: &str = "/chat";
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

/// Path of the health check endpoint; the relay path must not collide with it
pub const HEALTH_PATH: &str = "/api/health";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint path '{0}': expected a literal path starting with '/' other than '/api/health'")]
    InvalidPath(String),

    #[error("Outbound buffer must be at least 1")]
    ZeroOutboundBuffer,
}

/// Which `Origin` headers may open a relay connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPolicy {
    /// No origin checking
    Any,
    /// Only the listed origins (e.g. `https://chat.example.com`)
    AllowList(Vec<String>),
}

impl OriginPolicy {
    /// Build a policy from `--allowed-origin` values; none means any origin
    pub fn from_allowed(origins: Vec<String>) -> Self {
        let origins: Vec<String> = origins
            .into_iter()
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        if origins.is_empty() {
            Self::Any
        } else {
            Self::AllowList(origins)
        }
    }

    /// Whether a request carrying `origin` may connect.
    ///
    /// Requests without an `Origin` header come from non-browser clients and
    /// are always accepted.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match (self, origin) {
            (Self::Any, _) | (Self::AllowList(_), None) => true,
            (Self::AllowList(allowed), Some(origin)) => allowed
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(origin)),
        }
    }
}

/// Runtime configuration of the relay server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Path the relay endpoint is mounted at
    pub path: String,
    pub origin_policy: OriginPolicy,
    /// Outbound queue capacity per connection
    pub outbound_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            origin_policy: OriginPolicy::Any,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
        }
    }
}

impl ServerConfig {
    /// `host:port` string to bind to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the values a router can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_literal_route(&self.path) || self.path == HEALTH_PATH {
            return Err(ConfigError::InvalidPath(self.path.clone()));
        }
        if self.outbound_buffer == 0 {
            return Err(ConfigError::ZeroOutboundBuffer);
        }
        Ok(())
    }
}

/// A path axum can route verbatim: absolute, with no `{param}` captures and
/// no segment starting with the legacy `:` / `*` markers (axum panics on those).
fn is_literal_route(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['{', '}'])
        && path
            .split('/')
            .all(|segment| !segment.starts_with([':', '*']))
}
