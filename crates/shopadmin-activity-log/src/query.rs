//! Audit trail querying and pagination

use super::models::{AuditAction, AuditEntity, AuditRecord};
use uuid::Uuid;

/// Filter criteria for audit queries
///
/// Every field is optional; set fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Filter by action kind
    pub action: Option<AuditAction>,
    /// Filter by entity kind
    pub entity: Option<AuditEntity>,
    /// Filter by the acting account
    pub performed_by: Option<Uuid>,
    /// Filter by the targeted account
    pub target_user: Option<Uuid>,
}

impl RecordFilter {
    /// Create an empty filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by action kind.
    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Filter by entity kind.
    pub fn with_entity(mut self, entity: AuditEntity) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Filter by the acting account.
    pub fn with_performed_by(mut self, actor: Uuid) -> Self {
        self.performed_by = Some(actor);
        self
    }

    /// Filter by the targeted account.
    pub fn with_target_user(mut self, target: Uuid) -> Self {
        self.target_user = Some(target);
        self
    }

    /// Check whether a record matches every set criterion.
    pub(crate) fn matches(&self, record: &AuditRecord) -> bool {
        if let Some(action) = self.action {
            if record.action != action {
                return false;
            }
        }

        if let Some(entity) = self.entity {
            if record.entity != entity {
                return false;
            }
        }

        if let Some(actor) = self.performed_by {
            if record.performed_by != actor {
                return false;
            }
        }

        if let Some(target) = self.target_user {
            if record.target_user != Some(target) {
                return false;
            }
        }

        true
    }
}

/// Pagination parameters
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Number of results per page
    pub limit: usize,
    /// Number of results to skip
    pub offset: usize,
}

impl Pagination {
    /// Create a pagination with limit and offset.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Pagination for the first page.
    pub fn first_page(limit: usize) -> Self {
        Self { limit, offset: 0 }
    }

    /// Pagination for the page after this one.
    pub fn next_page(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + self.limit,
        }
    }

    /// Pagination for the page before this one, if any.
    pub fn prev_page(&self) -> Option<Self> {
        if self.offset >= self.limit {
            Some(Self {
                limit: self.limit,
                offset: self.offset - self.limit,
            })
        } else {
            None
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10, 0)
    }
}

/// One page of query results with pagination metadata
#[derive(Debug, Clone)]
pub struct Page {
    /// Filtered, ordered, paginated records
    pub records: Vec<AuditRecord>,
    /// Total number of records matching the filter
    pub total: usize,
    /// Pagination this page was produced with
    pub pagination: Pagination,
}

impl Page {
    /// Total number of pages for the current limit.
    pub fn total_pages(&self) -> usize {
        if self.pagination.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.pagination.limit)
    }

    /// Current page number (1-indexed).
    pub fn current_page(&self) -> usize {
        if self.pagination.limit == 0 {
            return 0;
        }
        (self.pagination.offset / self.pagination.limit) + 1
    }

    /// Whether a page exists after this one.
    pub fn has_next_page(&self) -> bool {
        self.pagination.offset + self.pagination.limit < self.total
    }

    /// Whether a page exists before this one.
    pub fn has_prev_page(&self) -> bool {
        self.pagination.offset > 0
    }
}

/// Query executor over a record snapshot
pub struct RecordQuery;

impl RecordQuery {
    /// Execute a filtered, paginated query.
    ///
    /// Records are ordered by `occurred_at` descending (newest first); the
    /// sort is stable, so records sharing a timestamp keep insertion order.
    pub fn execute(records: &[AuditRecord], filter: &RecordFilter, pagination: &Pagination) -> Page {
        let mut filtered: Vec<_> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

        let total = filtered.len();

        let start = pagination.offset;
        let end = std::cmp::min(start + pagination.limit, total);

        let paginated: Vec<_> = if start < total {
            filtered[start..end].to_vec()
        } else {
            Vec::new()
        };

        Page {
            records: paginated,
            total,
            pagination: pagination.clone(),
        }
    }
}
