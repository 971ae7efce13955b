//! Feature permissions and delegated entitlements for shopadmin
//!
//! This crate decides, for every back-office screen and every API-invoking
//! action, whether a staff account may use a feature, and lets a tenant
//! owner delegate a bounded subset of their own entitlements to subordinate
//! staff without ever exceeding what they themselves hold.
//!
//! The pieces, leaves first:
//!
//! - [`vocabulary`]: the closed set of feature codes and the normalization
//!   rule that maps heterogeneous stored shapes onto canonical codes.
//! - [`principal`]: staff accounts, entitlement packages, and the derived
//!   effective permission set.
//! - [`delegation`]: the bounded, non-elevating assignment of permissions
//!   from a grantor to a grantee, paired with an audit record.
//! - [`navigation`]: the pure projection of the static menu tree onto what a
//!   principal may actually see.
//! - [`storage`]: principal and entitlement repositories.

pub mod delegation;
pub mod di;
pub mod error;
pub mod navigation;
pub mod principal;
pub mod storage;
pub mod vocabulary;

pub use delegation::{AssignmentOutcome, AssignmentRequest, DelegationEngine};
pub use error::{EntitlementsError, Result};
pub use navigation::{filter_menu, NavItem, NavMenu, NavSection};
pub use principal::{Entitlement, Principal, PrincipalId};
pub use storage::{
    EntitlementStore, FilePrincipalStore, InMemoryEntitlementStore, InMemoryPrincipalStore,
    PrincipalStore,
};
pub use vocabulary::{feature_groups, normalize, normalize_all, FeatureCode, FeatureGroup, RawFeatureRef};
