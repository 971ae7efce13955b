//! Error types for the activity log

use thiserror::Error;

/// Result type for activity log operations
pub type ActivityLogResult<T> = std::result::Result<T, ActivityLogError>;

/// Errors that can occur while recording or querying audit records
#[derive(Error, Debug)]
pub enum ActivityLogError {
    #[error("Audit storage unavailable: {0}")]
    Storage(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] shopadmin_common::JsonStoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
