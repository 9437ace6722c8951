use std::collections::VecDeque;
use std::sync::Once;
use tracing::Level;
use bg_core::{ProgressReporter, Severity};

static INIT: Once = Once::new();

/// Installs the global fmt subscriber once. Later calls are no-ops.
pub fn init_logging(level: Level) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .init();
        });
    }
}

/// Forwards progress messages to `tracing`, each prefixed with the reporter's tags.
#[derive(Debug, Default, Clone)]
pub struct TracingReporter {
    prefixes: VecDeque<String>,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefixes.push_back(prefix);
        self
    }

    fn format(&self, message: &str) -> String {
        let prefix = self.prefixes.iter().map(|p| format!("{} ", p)).collect::<String>();
        format!("{}{}", prefix, message)
    }
}

impl ProgressReporter for TracingReporter {
    fn report(&self, message: &str, severity: Severity) {
        let line = self.format(message);
        match severity {
            Severity::Info | Severity::Success => tracing::info!("{}", line),
            Severity::Warning => tracing::warn!("{}", line),
            Severity::Error => tracing::error!("{}", line),
        }
    }
}

/// Prints progress for a person watching the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn render(message: &str, severity: Severity) -> String {
        let marker = match severity {
            Severity::Info => "ℹ️ ",
            Severity::Warning => "⏳",
            Severity::Success => "✅",
            Severity::Error => "❌",
        };
        format!("{} {}", marker, message.replace("**", "").replace('*', ""))
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, message: &str, severity: Severity) {
        let line = Self::render(message, severity);
        if severity == Severity::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
