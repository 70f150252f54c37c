use chrono::{DateTime, Utc};
use serde::Serialize;

use super::OperationState;

/// One discrete unit of observable progress emitted by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub payload: Payload,
    pub severity: Severity,
}

impl ProgressEvent {
    pub(crate) fn new(sequence: u64, timestamp: DateTime<Utc>, payload: Payload) -> Self {
        let severity = payload.severity();
        Self {
            sequence,
            timestamp,
            payload,
            severity,
        }
    }

    /// True for the single event that closes an operation's stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self.payload, Payload::Finished { .. })
    }

    pub fn log_line(&self) -> Option<&str> {
        match &self.payload {
            Payload::Log { line } => Some(line),
            _ => None,
        }
    }

    pub fn percent(&self) -> Option<u8> {
        match self.payload {
            Payload::Progress { percent, .. } => Some(percent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// A rendered line from a log-style schedule.
    Log { line: String },
    /// A percentage step: `delta` added this tick, `percent` is the new total.
    Progress { delta: u8, percent: u8 },
    /// Terminal transition. `reason` is only set for failures.
    Finished {
        state: OperationState,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl Payload {
    fn severity(&self) -> Severity {
        match self {
            Payload::Log { line } => Severity::from_line(line),
            Payload::Progress { .. } => Severity::Info,
            Payload::Finished { state, .. } => match state {
                OperationState::Failed => Severity::Error,
                OperationState::Cancelled => Severity::Warning,
                _ => Severity::Info,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Classify a console line by its tag. Errors win over warnings.
    pub fn from_line(line: &str) -> Self {
        if line.contains("[ERROR]") {
            Severity::Error
        } else if line.contains("[WARN]") {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}
