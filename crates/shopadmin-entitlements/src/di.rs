//! Dependency injection support for shopadmin-entitlements

use crate::navigation::{default_menu, NavMenu};
use shopadmin_common::di::{ServiceEntry, ServiceFactory};
use std::sync::Arc;

inventory::submit! {
    ServiceFactory::new("entitlements", create_entitlement_services)
}

fn create_entitlement_services() -> Vec<ServiceEntry> {
    vec![ServiceEntry::new::<NavMenu>(Arc::new(default_menu()))]
}
