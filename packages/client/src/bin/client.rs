//! Interactive WebSocket chat relay client with reconnection support.
//!
//! Reads lines from stdin, sends each as `{"message": ..., "time": "HH:MM:SS"}`
//! and prints every line relayed by the server.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client
//! cargo run --bin hiroba-client -- --url ws://127.0.0.1:3000/chat
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "WebSocket chat relay client", long_about = None)]
struct Args {
    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/chat")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = hiroba_client::run_client(args.url, Arc::new(SystemClock)).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
