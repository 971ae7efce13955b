//! Cross-crate service discovery through the inventory registry

use shopadmin_activity_log::ActivityLog;
use shopadmin_common::di::{collect_all_services, list_discovered_factories};
use shopadmin_entitlements::NavMenu;
use std::any::TypeId;

#[test]
fn test_feature_crates_register_their_factories() {
    let factories = list_discovered_factories();

    assert!(factories.contains(&"activity-log"));
    assert!(factories.contains(&"entitlements"));
}

#[test]
fn test_collected_services_include_defaults() {
    let services = collect_all_services();

    assert!(services
        .iter()
        .any(|s| s.type_id == TypeId::of::<ActivityLog>()));
    assert!(services.iter().any(|s| s.type_id == TypeId::of::<NavMenu>()));
}

#[test]
fn test_registered_menu_is_usable() {
    let services = collect_all_services();
    let menu = services
        .iter()
        .find(|s| s.type_id == TypeId::of::<NavMenu>())
        .and_then(|s| s.instance.clone().downcast::<NavMenu>().ok())
        .expect("default menu should be registered");

    assert!(!menu.sections.is_empty());
}
