use std::fmt;

use chrono::{DateTime, Utc};

/// What kind of recovered failure a diagnostic describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A share token could not be decoded; loading fell back
    InvalidToken,
    /// The persisted snapshot could not be read or parsed; loading fell back
    InvalidSnapshot,
    /// Saving failed; the in-memory state is still current
    SaveFailed,
    /// A command was rejected and had no effect
    CommandRejected,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::InvalidToken => write!(f, "invalid-token"),
            DiagnosticKind::InvalidSnapshot => write!(f, "invalid-snapshot"),
            DiagnosticKind::SaveFailed => write!(f, "save-failed"),
            DiagnosticKind::CommandRejected => write!(f, "command-rejected"),
        }
    }
}

/// A non-fatal report of something the engine recovered from
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub timestamp: DateTime<Utc>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            timestamp: Utc::now(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
