use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// Receives progress messages from a running pipeline.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str, severity: Severity);
}

/// Discards everything.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _message: &str, _severity: Severity) {}
}
