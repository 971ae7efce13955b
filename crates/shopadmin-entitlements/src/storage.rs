//! Principal and entitlement repositories
//!
//! The engine reads principals through [`PrincipalStore`] and entitlement
//! packages through [`EntitlementStore`]. Packages are read-only from this
//! crate's perspective; account provisioning owns their lifecycle.
//!
//! The file-backed principal store persists the heterogeneous raw
//! permission shape ([`RawFeatureRef`]) and normalizes at the load
//! boundary, dropping whatever no longer parses. Load-time content is
//! non-authoritative; only the delegation engine's commit-time
//! recomputation decides what may actually be granted.

use crate::error::{EntitlementsError, Result};
use crate::principal::{Entitlement, Principal, PrincipalId};
use crate::vocabulary::{normalize_all, FeatureCode, RawFeatureRef};
use serde::{Deserialize, Serialize};
use shopadmin_common::json_store;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Repository of staff accounts
pub trait PrincipalStore: Send + Sync {
    /// Fetch a principal by id.
    fn get(&self, id: &PrincipalId) -> Result<Option<Principal>>;

    /// Insert or replace a principal.
    fn upsert(&self, principal: Principal) -> Result<()>;

    /// Replace a principal's direct permission set wholesale.
    ///
    /// This is the delegation engine's commit primitive; nothing else
    /// mutates `direct`.
    fn replace_direct(&self, id: &PrincipalId, direct: BTreeSet<FeatureCode>) -> Result<()>;
}

/// Read-only repository of entitlement packages
pub trait EntitlementStore: Send + Sync {
    /// Fetch a package by id.
    fn get(&self, id: &str) -> Result<Option<Arc<Entitlement>>>;
}

/// In-memory principal store
#[derive(Default)]
pub struct InMemoryPrincipalStore {
    principals: Arc<RwLock<HashMap<PrincipalId, Principal>>>,
}

impl InMemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrincipalStore for InMemoryPrincipalStore {
    fn get(&self, id: &PrincipalId) -> Result<Option<Principal>> {
        let principals = self
            .principals
            .read()
            .map_err(|e| EntitlementsError::Internal(format!("failed to read principals: {}", e)))?;
        Ok(principals.get(id).cloned())
    }

    fn upsert(&self, principal: Principal) -> Result<()> {
        let mut principals = self.principals.write().map_err(|e| {
            EntitlementsError::Internal(format!("failed to write principals: {}", e))
        })?;
        principals.insert(principal.id, principal);
        Ok(())
    }

    fn replace_direct(&self, id: &PrincipalId, direct: BTreeSet<FeatureCode>) -> Result<()> {
        let mut principals = self.principals.write().map_err(|e| {
            EntitlementsError::Internal(format!("failed to write principals: {}", e))
        })?;
        match principals.get_mut(id) {
            Some(principal) => {
                principal.direct = direct;
                Ok(())
            }
            None => Err(EntitlementsError::Storage(format!(
                "principal not found: {}",
                id
            ))),
        }
    }
}

/// In-memory entitlement store
#[derive(Default)]
pub struct InMemoryEntitlementStore {
    packages: Arc<RwLock<HashMap<String, Arc<Entitlement>>>>,
}

impl InMemoryEntitlementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package (provisioning-side helper).
    pub fn insert(&self, entitlement: Entitlement) -> Result<()> {
        let mut packages = self
            .packages
            .write()
            .map_err(|e| EntitlementsError::Internal(format!("failed to write packages: {}", e)))?;
        packages.insert(entitlement.id.clone(), Arc::new(entitlement));
        Ok(())
    }
}

impl EntitlementStore for InMemoryEntitlementStore {
    fn get(&self, id: &str) -> Result<Option<Arc<Entitlement>>> {
        let packages = self
            .packages
            .read()
            .map_err(|e| EntitlementsError::Internal(format!("failed to read packages: {}", e)))?;
        Ok(packages.get(id).cloned())
    }
}

/// On-disk row shape for a principal
///
/// Permissions persist in the heterogeneous raw form so older snapshots
/// keep loading; the package is referenced by id and resolved at load.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPrincipal {
    id: PrincipalId,
    permissions: Vec<RawFeatureRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package: Option<String>,
}

/// File-backed principal store persisting a JSON snapshot
pub struct FilePrincipalStore {
    path: PathBuf,
    entitlements: Arc<dyn EntitlementStore>,
}

impl FilePrincipalStore {
    /// Create a store persisting to the given file, resolving packages
    /// through the given entitlement store.
    pub fn new<P: AsRef<Path>>(path: P, entitlements: Arc<dyn EntitlementStore>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entitlements,
        }
    }

    fn load_rows(&self) -> Result<Vec<StoredPrincipal>> {
        let rows: Vec<StoredPrincipal> = json_store::load_json_or_default(&self.path)?;
        Ok(rows)
    }

    fn save_rows(&self, rows: &[StoredPrincipal]) -> Result<()> {
        json_store::save_json_atomic(&self.path, &rows)?;
        Ok(())
    }

    fn resolve(&self, row: &StoredPrincipal) -> Result<Principal> {
        let mut principal =
            Principal::new(row.id).with_direct(normalize_all(&row.permissions));
        if let Some(package_id) = &row.package {
            if let Some(entitlement) = self.entitlements.get(package_id)? {
                principal = principal.with_entitlement(entitlement);
            }
        }
        Ok(principal)
    }

    fn store_row(principal: &Principal) -> StoredPrincipal {
        StoredPrincipal {
            id: principal.id,
            permissions: principal
                .direct
                .iter()
                .map(|code| RawFeatureRef::from(*code))
                .collect(),
            package: principal.entitlement.as_ref().map(|e| e.id.clone()),
        }
    }
}

impl PrincipalStore for FilePrincipalStore {
    fn get(&self, id: &PrincipalId) -> Result<Option<Principal>> {
        for row in self.load_rows()? {
            if row.id == *id {
                return self.resolve(&row).map(Some);
            }
        }
        Ok(None)
    }

    fn upsert(&self, principal: Principal) -> Result<()> {
        let mut rows = self.load_rows()?;
        let row = Self::store_row(&principal);
        match rows.iter_mut().find(|r| r.id == principal.id) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
        self.save_rows(&rows)
    }

    fn replace_direct(&self, id: &PrincipalId, direct: BTreeSet<FeatureCode>) -> Result<()> {
        let mut rows = self.load_rows()?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| EntitlementsError::Storage(format!("principal not found: {}", id)))?;
        row.permissions = direct
            .iter()
            .map(|code| RawFeatureRef::from(*code))
            .collect();
        self.save_rows(&rows)
    }
}
