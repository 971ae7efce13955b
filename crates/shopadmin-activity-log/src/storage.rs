//! Storage backends for the audit trail
//!
//! Backends only ever load and append. There is deliberately no update or
//! delete surface: the trail is immutable once written.

use crate::error::ActivityLogResult;
use crate::models::AuditRecord;
use shopadmin_common::json_store;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Backend trait for persisting audit records
pub trait AuditStore: Send + Sync {
    /// Load every stored record.
    fn load(&self) -> ActivityLogResult<Vec<AuditRecord>>;

    /// Append a single record.
    fn append(&self, record: &AuditRecord) -> ActivityLogResult<()>;
}

/// In-memory audit store
#[derive(Default)]
pub struct InMemoryAuditStore {
    records: Arc<RwLock<Vec<AuditRecord>>>,
}

impl InMemoryAuditStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditStore for InMemoryAuditStore {
    fn load(&self) -> ActivityLogResult<Vec<AuditRecord>> {
        let records = self.records.read().map_err(|e| {
            crate::error::ActivityLogError::Internal(format!("failed to read records: {}", e))
        })?;
        Ok(records.clone())
    }

    fn append(&self, record: &AuditRecord) -> ActivityLogResult<()> {
        let mut records = self.records.write().map_err(|e| {
            crate::error::ActivityLogError::Internal(format!("failed to write records: {}", e))
        })?;
        records.push(record.clone());
        Ok(())
    }
}

/// File-backed audit store persisting a JSON snapshot
pub struct FileAuditStore {
    path: PathBuf,
}

impl FileAuditStore {
    /// Create a store persisting to the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at the default file name under a base directory.
    pub fn with_defaults<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            path: base_path.as_ref().join("audit_trail.json"),
        }
    }
}

impl AuditStore for FileAuditStore {
    fn load(&self) -> ActivityLogResult<Vec<AuditRecord>> {
        let records: Vec<AuditRecord> = json_store::load_json_or_default(&self.path)?;
        Ok(records)
    }

    fn append(&self, record: &AuditRecord) -> ActivityLogResult<()> {
        let mut records = self.load()?;
        records.push(record.clone());
        json_store::save_json_atomic(&self.path, &records)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditAction, AuditEntity};
    use tempfile::tempdir;
    use uuid::Uuid;

    fn sample_record() -> AuditRecord {
        AuditRecord::new(AuditAction::Update, AuditEntity::Product, Uuid::new_v4())
            .with_description("price changed")
    }

    #[test]
    fn test_in_memory_append_and_load() {
        let store = InMemoryAuditStore::new();

        store.append(&sample_record()).unwrap();
        store.append(&sample_record()).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_file_store_empty_when_missing() {
        let dir = tempdir().unwrap();
        let store = FileAuditStore::with_defaults(dir.path());

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_append_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit_trail.json");

        let record = sample_record();
        {
            let store = FileAuditStore::new(&path);
            store.append(&record).unwrap();
        }

        // A fresh store over the same file sees the record
        let store = FileAuditStore::new(&path);
        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, record.id);
        assert_eq!(records[0].description, "price changed");
    }

    #[test]
    fn test_file_store_appends_accumulate() {
        let dir = tempdir().unwrap();
        let store = FileAuditStore::with_defaults(dir.path());

        for _ in 0..3 {
            store.append(&sample_record()).unwrap();
        }

        assert_eq!(store.load().unwrap().len(), 3);
    }
}
