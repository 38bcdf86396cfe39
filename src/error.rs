use thiserror::Error;

/// Failures raised by a [`Store`](crate::Store) and its persistence backend.
///
/// Edit sessions never see these: a failed write is reported to whoever
/// requested the save and the in-memory value stays as it is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Serialization or deserialization of the stored value failed.
    #[error("store serialization error: {0}")]
    Serde(String),
    /// The durable write or read failed.
    #[error("store persistence error: {0}")]
    Persistence(String),
    /// Re-entrant access, e.g. an observer saving from inside a fan-out.
    #[error("store busy during {0}")]
    Busy(&'static str),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Read { path: String, message: String },
    #[error("invalid config: {0}")]
    Parse(String),
}
