//! WebSocket chat relay server.
//!
//! Relays every chat message a client sends to all other connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --path /chat
//! cargo run --bin hiroba-server -- --allowed-origin https://chat.example.com
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    infrastructure::registry::InMemoryConnectionRegistry,
    ui::{
        OriginPolicy, Server, ServerConfig,
        config::{DEFAULT_HOST, DEFAULT_OUTBOUND_BUFFER, DEFAULT_PATH, DEFAULT_PORT},
    },
    usecase::RelayHandler,
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket chat relay: broadcasts each message to every other client", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Path the relay endpoint is mounted at
    #[arg(long, default_value = DEFAULT_PATH)]
    path: String,

    /// Origin allowed to connect (repeatable). Any origin is accepted when omitted
    #[arg(long = "allowed-origin", value_name = "ORIGIN")]
    allowed_origins: Vec<String>,

    /// Outbound queue capacity per connection; messages to a peer whose queue is full are dropped
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_BUFFER)]
    outbound_buffer: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            path: args.path,
            origin_policy: OriginPolicy::from_allowed(args.allowed_origins),
            outbound_buffer: args.outbound_buffer,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. Relay handler
    // 3. Server
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let handler = Arc::new(RelayHandler::new(registry.clone()));

    let server = match Server::new(args.into(), handler, registry) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
