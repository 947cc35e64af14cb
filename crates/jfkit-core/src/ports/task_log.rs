//! Operator-facing task log port.
//!
//! This is the job log shown to whoever triggered the run, as opposed to the
//! `tracing` diagnostics stream.

/// Sink for operator-visible output.
pub trait TaskLogPort: Send + Sync {
    /// Log an informational line.
    fn info(&self, message: &str);

    /// Log a warning line.
    fn warn(&self, message: &str);

    /// Forward raw process output bytes.
    fn write_bytes(&self, bytes: &[u8]);
}
