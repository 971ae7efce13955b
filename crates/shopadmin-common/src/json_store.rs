//! JSON persistence helpers
//!
//! Common load/save patterns for the file-backed stores (principals,
//! entitlements, audit trail, navigation config), so each store does not
//! reimplement path handling and error conversion.

use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use thiserror::Error;

/// JSON store errors
#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("File not found: {path}")]
    NotFound { path: String },
}

/// Result type for JSON store operations
pub type JsonStoreResult<T> = Result<T, JsonStoreError>;

/// Load JSON from a file path.
pub fn load_json<T, P>(path: P) -> JsonStoreResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(JsonStoreError::NotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Load JSON from a file path, returning the default value if the file does
/// not exist yet.
pub fn load_json_or_default<T, P>(path: P) -> JsonStoreResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    match load_json(path) {
        Ok(value) => Ok(value),
        Err(JsonStoreError::NotFound { .. }) => Ok(T::default()),
        Err(e) => Err(e),
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T, P>(path: P, value: &T) -> JsonStoreResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Save a value as JSON atomically (write to a temp file, then rename).
///
/// Readers never observe a half-written snapshot.
pub fn save_json_atomic<T, P>(path: P, value: &T) -> JsonStoreResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, &content)?;
    std::fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
    struct SampleSnapshot {
        label: String,
        revision: u32,
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let snapshot = SampleSnapshot {
            label: "staff".to_string(),
            revision: 3,
        };
        save_json(&path, &snapshot).unwrap();

        let loaded: SampleSnapshot = load_json(&path).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let result: JsonStoreResult<SampleSnapshot> = load_json(dir.path().join("missing.json"));
        assert!(matches!(result, Err(JsonStoreError::NotFound { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let loaded: SampleSnapshot =
            load_json_or_default(dir.path().join("missing.json")).unwrap();
        assert_eq!(loaded, SampleSnapshot::default());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("snapshot.json");

        save_json(&path, &SampleSnapshot::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        save_json_atomic(&path, &SampleSnapshot::default()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
