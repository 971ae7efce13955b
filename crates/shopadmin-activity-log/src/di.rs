//! Dependency injection support for shopadmin-activity-log

use crate::ActivityLog;
use shopadmin_common::di::{ServiceEntry, ServiceFactory};
use std::sync::Arc;

inventory::submit! {
    ServiceFactory::new("activity-log", create_activity_log_services)
}

fn create_activity_log_services() -> Vec<ServiceEntry> {
    vec![ServiceEntry::new::<ActivityLog>(Arc::new(
        ActivityLog::new(),
    ))]
}
