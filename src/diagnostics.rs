//! Diagnostics are pushed into a sink handed to each pipeline stage
//! instead of going straight to a process-wide logger.

use log::Level;

pub const LOG_TARGET: &str = "sales_report";

/// Receives the diagnostics produced while processing a file
pub trait DiagnosticSink {
    fn record(&mut self, level: Level, message: String);

    fn debug(&mut self, message: String) {
        self.record(Level::Debug, message)
    }

    fn info(&mut self, message: String) {
        self.record(Level::Info, message)
    }

    fn warn(&mut self, message: String) {
        self.record(Level::Warn, message)
    }

    fn error(&mut self, message: String) {
        self.record(Level::Error, message)
    }
}

/// Forwards everything to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&mut self, level: Level, message: String) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Keeps diagnostics in memory, in emission order
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    entries: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Diagnostics at exactly `level`
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.level == level)
    }

    /// True if any diagnostic message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }
}

impl DiagnosticSink for CollectedDiagnostics {
    fn record(&mut self, level: Level, message: String) {
        log::log!(target: LOG_TARGET, level, "{}", message);
        self.entries.push(Diagnostic { level, message });
    }
}
