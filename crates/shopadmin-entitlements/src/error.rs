//! Error types for the entitlements engine

use crate::principal::PrincipalId;
use thiserror::Error;

/// Result type for entitlements operations
pub type Result<T> = std::result::Result<T, EntitlementsError>;

/// Errors that can occur in the entitlements engine
///
/// Unrecognized feature codes are deliberately absent: normalization drops
/// them silently, since partial or stale input is expected from the
/// heterogeneous storage formats this engine reads.
#[derive(Error, Debug)]
pub enum EntitlementsError {
    #[error("Grantor not found: {0}")]
    UnknownGrantor(PrincipalId),

    #[error("Grantee not found: {0}")]
    UnknownGrantee(PrincipalId),

    #[error("Requested permissions have no overlap with what the grantor may delegate")]
    NoAssignableOverlap,

    #[error("Audit trail error: {0}")]
    Audit(#[from] shopadmin_activity_log::ActivityLogError),

    #[error("Store unavailable: {0}")]
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
