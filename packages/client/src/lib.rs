//! Interactive command-line client for the Hiroba chat relay.

pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use formatter::MessageFormatter;
pub use runner::{ReconnectPolicy, run_client, run_client_with_input};
pub use session::{SessionEnd, run_client_session};
pub use ui::InputReceiver;
