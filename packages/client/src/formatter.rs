//! Message formatting for the wire and for terminal display.

use hiroba_server::domain::ChatMessage;
use hiroba_shared::time::Clock;

/// Message formatter for the chat client
pub struct MessageFormatter;

impl MessageFormatter {
    /// Build the JSON text frame for a typed line, stamped with the clock's time
    ///
    /// # Returns
    ///
    /// `{"message": <line>, "time": "HH:MM:SS"}`
    pub fn build_payload(message: &str, clock: &dyn Clock) -> Result<String, serde_json::Error> {
        let payload = ChatMessage::new(message.to_string(), clock.now_hms());
        serde_json::to_string(&payload)
    }

    /// Format a relayed line for display
    ///
    /// The server already formats lines as `[time] sender: message`, so they
    /// are shown verbatim.
    pub fn format_received(line: &str) -> String {
        format!("\n{}\n", line)
    }

    /// Format a binary frame notice
    pub fn format_binary_message(len: usize) -> String {
        format!("\n(binary message: {} bytes)\n", len)
    }
}
