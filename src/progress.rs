use std::io::Write;

/// Receives one message per destination, right before that destination is written.
/// Writes run concurrently, so implementations must tolerate calls from several tasks.
pub trait ProgressSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Discards every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _message: &str) {}
}

/// Prints each message as a line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn report(&self, message: &str) {
        // The stdout lock keeps lines from concurrent writers intact
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", message) {
            tracing::debug!(error = %e, "failed to print progress");
        }
    }
}

/// Keeps every message, for assertions in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CaptureProgress {
    messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl CaptureProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ProgressSink for CaptureProgress {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
