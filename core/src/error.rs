use thiserror::Error;

/// Errors surfaced by tracker operations.
///
/// `Validation`, `NotFound` and `Format` are user-facing notices; `Storage`
/// and `Serialize` indicate the local store or an encoder failed.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid file: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Failed to encode data: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialize(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        TrackerError::Serialize(err.to_string())
    }
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
