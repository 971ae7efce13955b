//! Shared utilities for shopadmin crates
//!
//! This crate has no dependencies on other shopadmin crates, making it safe
//! for every feature crate to depend on. It provides:
//!
//! - **Service registration** (`di`): the factory-return pattern used by
//!   feature crates to publish their default services for container assembly.
//! - **JSON persistence** (`json_store`): load/save helpers backing the
//!   file-based stores.

pub mod di;
pub mod json_store;

pub use di::{collect_all_services, list_discovered_factories, ServiceEntry, ServiceFactory};
pub use json_store::{
    load_json, load_json_or_default, save_json, save_json_atomic, JsonStoreError, JsonStoreResult,
};
