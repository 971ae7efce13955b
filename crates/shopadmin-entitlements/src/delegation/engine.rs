//! The delegation engine
//!
//! Lets a grantor extend a bounded, non-elevating subset of its own
//! effective permissions to a grantee. The bound is recomputed at commit
//! time, so a stale offer captured at page load can never widen what is
//! actually granted. Every commit pairs the permission write with exactly
//! one audit record; if the record cannot be appended, the write is rolled
//! back.

use crate::delegation::models::{AssignmentOutcome, AssignmentRequest};
use crate::error::{EntitlementsError, Result};
use crate::principal::{Principal, PrincipalId};
use crate::storage::PrincipalStore;
use crate::vocabulary::{normalize_all, FeatureCode};
use shopadmin_activity_log::{ActivityLog, AuditAction, AuditEntity, AuditRecord};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Validates and commits permission delegations
pub struct DelegationEngine {
    principals: Arc<dyn PrincipalStore>,
    activity: ActivityLog,
    assignable: BTreeSet<FeatureCode>,
    // Serializes the replace+append pair; concurrent assigns to the same
    // grantee must not interleave partial writes.
    commit_lock: Mutex<()>,
}

impl DelegationEngine {
    /// Create an engine over the given stores with the default assignable
    /// domain.
    pub fn new(principals: Arc<dyn PrincipalStore>, activity: ActivityLog) -> Self {
        Self {
            principals,
            activity,
            assignable: FeatureCode::DEFAULT_ASSIGNABLE.iter().copied().collect(),
            commit_lock: Mutex::new(()),
        }
    }

    /// Override the assignable domain (the subset of the vocabulary the
    /// delegation API exposes).
    pub fn with_assignable_domain<I>(mut self, domain: I) -> Self
    where
        I: IntoIterator<Item = FeatureCode>,
    {
        self.assignable = domain.into_iter().collect();
        self
    }

    /// The domain this engine will assign within.
    pub fn assignable_domain(&self) -> &BTreeSet<FeatureCode> {
        &self.assignable
    }

    /// What a grantor may offer: its effective set restricted to the
    /// assignable domain. This is the only set ever shown to a caller as
    /// "permissions you may assign".
    pub fn grantable_set(&self, grantor: &Principal) -> BTreeSet<FeatureCode> {
        grantor
            .effective()
            .intersection(&self.assignable)
            .copied()
            .collect()
    }

    /// [`grantable_set`](Self::grantable_set) for a stored principal.
    pub fn grantable_for(&self, grantor: &PrincipalId) -> Result<BTreeSet<FeatureCode>> {
        let principal = self
            .principals
            .get(grantor)?
            .ok_or(EntitlementsError::UnknownGrantor(*grantor))?;
        Ok(self.grantable_set(&principal))
    }

    /// Validate and commit an assignment.
    ///
    /// The grantee's permissions inside the assignable domain are replaced
    /// wholesale with `requested ∩ grantable_set(grantor)`; permissions the
    /// grantee holds outside the domain are untouched in either direction.
    /// An empty request is the revoke-all form: it clears the grantee's
    /// assignable-domain permissions and succeeds.
    ///
    /// # Errors
    ///
    /// - [`EntitlementsError::UnknownGrantor`] / [`UnknownGrantee`](EntitlementsError::UnknownGrantee)
    ///   when either principal does not resolve.
    /// - [`EntitlementsError::NoAssignableOverlap`] when a non-empty request
    ///   intersects to nothing — the grantee is left unchanged.
    /// - Storage errors from the underlying stores; an audit-append failure
    ///   rolls back the permission write.
    pub fn assign(&self, request: &AssignmentRequest) -> Result<AssignmentOutcome> {
        let requested = normalize_all(&request.requested);
        let revoke_all = request.requested.is_empty();

        let _guard = self
            .commit_lock
            .lock()
            .map_err(|e| EntitlementsError::Internal(format!("commit lock poisoned: {}", e)))?;

        // The grantor is re-read and the bound re-derived here, at commit
        // time: an offer captured at page load is never trusted.
        let grantor = self
            .principals
            .get(&request.grantor)?
            .ok_or(EntitlementsError::UnknownGrantor(request.grantor))?;
        let grantee = self
            .principals
            .get(&request.grantee)?
            .ok_or(EntitlementsError::UnknownGrantee(request.grantee))?;

        let grantable = self.grantable_set(&grantor);
        let final_set: BTreeSet<FeatureCode> =
            requested.intersection(&grantable).copied().collect();

        if final_set.is_empty() && !revoke_all {
            warn!(
                grantor = %request.grantor,
                grantee = %request.grantee,
                "assignment rejected: no overlap with grantable set"
            );
            return Err(EntitlementsError::NoAssignableOverlap);
        }

        let preserved: BTreeSet<FeatureCode> = grantee
            .direct
            .difference(&self.assignable)
            .copied()
            .collect();
        let new_direct: BTreeSet<FeatureCode> =
            preserved.union(&final_set).copied().collect();
        let previous = grantee.direct.clone();

        self.principals
            .replace_direct(&request.grantee, new_direct)?;

        let (action, description) = if revoke_all {
            (
                AuditAction::PermissionRevoke,
                "cleared all assignable permissions".to_string(),
            )
        } else {
            (
                AuditAction::PermissionAssign,
                final_set
                    .iter()
                    .map(|code| code.as_code())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };

        let record = AuditRecord::new(action, AuditEntity::SystemUser, request.grantor.into())
            .with_target(request.grantee.into())
            .with_description(description);

        if let Err(err) = self.activity.append(record) {
            // No permission change without its audit record: restore the
            // grantee and surface the failure.
            self.principals.replace_direct(&request.grantee, previous)?;
            return Err(err.into());
        }

        info!(
            grantor = %request.grantor,
            grantee = %request.grantee,
            granted = final_set.len(),
            revoke_all,
            "delegation committed"
        );

        Ok(AssignmentOutcome { granted: final_set })
    }
}
