use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Unknown operation kind: {0}")]
    InvalidKind(String),

    #[error("Operation '{kind}' needs parameter '{name}'")]
    MissingParameter { kind: String, name: String },

    #[error("Invalid state for operation {id}: {reason}")]
    InvalidState { id: String, reason: String },
}

impl TrackerError {
    pub(crate) fn unknown_handle(id: &str) -> Self {
        TrackerError::InvalidState {
            id: id.to_string(),
            reason: "no such operation (never started or already disposed)".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
