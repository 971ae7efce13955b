//! Activity log front-end
//!
//! [`ActivityLog`] is what the rest of the back office talks to: it appends
//! records through an [`AuditStore`] backend and serves filtered, paginated
//! reads. Appends never rewrite existing records.

use crate::error::ActivityLogResult;
use crate::models::AuditRecord;
use crate::query::{Page, Pagination, RecordFilter, RecordQuery};
use crate::storage::{AuditStore, InMemoryAuditStore};
use std::sync::Arc;
use tracing::debug;

/// Append/query interface over an audit store
#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn AuditStore>,
}

impl ActivityLog {
    /// Create a log over an in-memory store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryAuditStore::new()),
        }
    }

    /// Create a log over a specific store backend.
    pub fn with_store(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Append a record to the trail.
    ///
    /// Fails only when the backend is unavailable; a well-formed record is
    /// never rejected.
    pub fn append(&self, record: AuditRecord) -> ActivityLogResult<()> {
        debug!(
            action = %record.action,
            entity = %record.entity,
            performed_by = %record.performed_by,
            "appending audit record"
        );
        self.store.append(&record)
    }

    /// Run a filtered, paginated query, newest records first.
    pub fn query(&self, filter: &RecordFilter, pagination: &Pagination) -> ActivityLogResult<Page> {
        let records = self.store.load()?;
        Ok(RecordQuery::execute(&records, filter, pagination))
    }

    /// Every record in the trail, in insertion order.
    pub fn records(&self) -> ActivityLogResult<Vec<AuditRecord>> {
        self.store.load()
    }

    /// Number of records in the trail.
    pub fn len(&self) -> ActivityLogResult<usize> {
        Ok(self.store.load()?.len())
    }

    /// Whether the trail is empty.
    pub fn is_empty(&self) -> ActivityLogResult<bool> {
        Ok(self.store.load()?.is_empty())
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditAction, AuditEntity};
    use uuid::Uuid;

    #[test]
    fn test_new_log_is_empty() {
        let log = ActivityLog::new();
        assert!(log.is_empty().unwrap());
        assert_eq!(log.len().unwrap(), 0);
    }

    #[test]
    fn test_append_and_read_back() {
        let log = ActivityLog::new();
        let actor = Uuid::new_v4();

        log.append(AuditRecord::new(
            AuditAction::Create,
            AuditEntity::Category,
            actor,
        ))
        .unwrap();

        let records = log.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].performed_by, actor);
    }

    #[test]
    fn test_query_filters_through_store() {
        let log = ActivityLog::new();
        let actor = Uuid::new_v4();

        log.append(AuditRecord::new(
            AuditAction::Create,
            AuditEntity::Product,
            actor,
        ))
        .unwrap();
        log.append(AuditRecord::new(
            AuditAction::Delete,
            AuditEntity::Product,
            actor,
        ))
        .unwrap();

        let page = log
            .query(
                &RecordFilter::new().with_action(AuditAction::Delete),
                &Pagination::first_page(10),
            )
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].action, AuditAction::Delete);
    }

    #[test]
    fn test_clones_share_the_store() {
        let log = ActivityLog::new();
        let copy = log.clone();

        copy.append(AuditRecord::new(
            AuditAction::StatusChange,
            AuditEntity::Order,
            Uuid::new_v4(),
        ))
        .unwrap();

        assert_eq!(log.len().unwrap(), 1);
    }
}
