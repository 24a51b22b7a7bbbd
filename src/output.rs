//! Output handler for configurable program output.
//!
//! The `log` primitive allows output to be directed to different
//! destinations:
//! - Stdout: process standard output (default)
//! - Buffer: capture for assertions in tests and embedders
//! - Silent: discard
//!
//! Uses enum dispatch instead of trait objects for O(1) static dispatch
//! on this frequently-used path.

use parking_lot::Mutex;

use crate::value::Value;

/// Output handler implementation using enum dispatch.
pub enum OutputHandler {
    /// Writes to stdout (default).
    Stdout,
    /// Captures to a buffer (tests/embedders).
    Buffer(Mutex<String>),
    /// Discards all output silently.
    Silent,
}

impl OutputHandler {
    /// Create a capturing buffer handler.
    pub fn buffer() -> Self {
        OutputHandler::Buffer(Mutex::new(String::new()))
    }

    /// Print without newline.
    pub fn print(&self, msg: &str) {
        match self {
            OutputHandler::Stdout => print!("{msg}"),
            OutputHandler::Buffer(buf) => buf.lock().push_str(msg),
            OutputHandler::Silent => {}
        }
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            OutputHandler::Stdout => println!("{msg}"),
            OutputHandler::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
            OutputHandler::Silent => {}
        }
    }

    /// Render values space-joined, each via its default textual
    /// representation, followed by a newline. This is the `log` contract.
    pub fn log_values(&self, values: &[Value]) {
        let line = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.println(&line);
    }

    /// Get all captured output.
    ///
    /// Returns the empty string for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            OutputHandler::Buffer(buf) => buf.lock().clone(),
            OutputHandler::Stdout | OutputHandler::Silent => String::new(),
        }
    }

    /// Clear captured output. No-op for non-capturing handlers.
    pub fn clear(&self) {
        if let OutputHandler::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

/// Shared output handler that can be passed around.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedOutputHandler shared with embedders"
)]
pub type SharedOutputHandler = std::sync::Arc<OutputHandler>;

/// Create a default stdout handler.
#[expect(clippy::disallowed_types, reason = "Arc required for SharedOutputHandler")]
pub fn stdout_handler() -> SharedOutputHandler {
    std::sync::Arc::new(OutputHandler::Stdout)
}

/// Create a buffer handler for capturing output.
#[expect(clippy::disallowed_types, reason = "Arc required for SharedOutputHandler")]
pub fn buffer_handler() -> SharedOutputHandler {
    std::sync::Arc::new(OutputHandler::buffer())
}

/// Create a silent handler that discards all output.
#[expect(clippy::disallowed_types, reason = "Arc required for SharedOutputHandler")]
pub fn silent_handler() -> SharedOutputHandler {
    std::sync::Arc::new(OutputHandler::Silent)
}
