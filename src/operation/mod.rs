//! Progressive operation tracking
//!
//! A simulated long-running task (a version download, a launch sequence,
//! a bundle export) is modelled as an [`Operation`] that emits an ordered stream of
//! [`ProgressEvent`]s on a fixed cadence until it reaches a terminal state.
//! The [`Tracker`] owns every live operation and is advanced by calling
//! [`Tracker::poll`] against an injectable [`Clock`].

mod clock;
mod error;
mod progress;
pub mod schedule;
mod tracker;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TrackerError};
pub use progress::{Payload, ProgressEvent, Severity};
pub use schedule::{Schedule, ScheduleError, ScheduleSet};
pub use tracker::{SubscriptionId, Tracker};

/// Opaque key/value data interpolated into an operation's log lines.
pub type Parameters = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// Log-style: plays back console lines.
    LaunchSequence,
    /// Percentage-style: counts up to 100%.
    Download,
    /// Log-style: packages the portable launcher bundle.
    ExportBundle,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::LaunchSequence => "launch-sequence",
            OperationKind::Download => "download",
            OperationKind::ExportBundle => "export-bundle",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "launch-sequence" => Ok(OperationKind::LaunchSequence),
            "download" => Ok(OperationKind::Download),
            "export-bundle" => Ok(OperationKind::ExportBundle),
            other => Err(TrackerError::InvalidKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationState {
    Pending,
    Running,
    Complete,
    Cancelled,
    Failed,
}

impl OperationState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationState::Complete | OperationState::Cancelled | OperationState::Failed
        )
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationState::Pending => "pending",
            OperationState::Running => "running",
            OperationState::Complete => "complete",
            OperationState::Cancelled => "cancelled",
            OperationState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Reference to an operation registered with a [`Tracker`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationHandle(String);

impl OperationHandle {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a tracked operation.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub id: String,
    pub kind: OperationKind,
    pub state: OperationState,
    pub parameters: Parameters,
    pub events: Vec<ProgressEvent>,
    pub progress_percent: u8,
    pub started_at: DateTime<Utc>,
}

impl Operation {
    pub fn handle(&self) -> OperationHandle {
        OperationHandle::new(self.id.clone())
    }

    pub fn last_event(&self) -> Option<&ProgressEvent> {
        self.events.last()
    }

    /// Log lines emitted so far, without the terminal event.
    pub fn log_lines(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(ProgressEvent::log_line)
    }
}
