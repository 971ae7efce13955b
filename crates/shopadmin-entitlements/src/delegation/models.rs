//! Delegation data models

use crate::principal::PrincipalId;
use crate::vocabulary::{FeatureCode, RawFeatureRef};
use std::collections::BTreeSet;

/// A request to hand a permission set to a grantee
///
/// Transient: validated and consumed by the engine, never persisted as-is.
/// The requested codes arrive in the heterogeneous wire shape and are
/// normalized during validation.
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
    /// Account doing the delegating
    pub grantor: PrincipalId,
    /// Account receiving the permissions
    pub grantee: PrincipalId,
    /// Codes the grantor asked to hand over
    pub requested: Vec<RawFeatureRef>,
}

impl AssignmentRequest {
    pub fn new(
        grantor: PrincipalId,
        grantee: PrincipalId,
        requested: Vec<RawFeatureRef>,
    ) -> Self {
        Self {
            grantor,
            grantee,
            requested,
        }
    }

    /// Build a request from typed codes (the UI submits raw refs; internal
    /// callers and tests usually hold canonical codes already).
    pub fn with_codes<I>(grantor: PrincipalId, grantee: PrincipalId, codes: I) -> Self
    where
        I: IntoIterator<Item = FeatureCode>,
    {
        Self {
            grantor,
            grantee,
            requested: codes.into_iter().map(RawFeatureRef::from).collect(),
        }
    }
}

/// The committed result of a successful assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentOutcome {
    /// The set actually granted: requested ∩ grantable, within the
    /// assignable domain
    pub granted: BTreeSet<FeatureCode>,
}

impl AssignmentOutcome {
    /// Whether this commit was the revoke-all form (empty request).
    pub fn is_revoke_all(&self) -> bool {
        self.granted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_codes_builds_raw_refs() {
        let request = AssignmentRequest::with_codes(
            PrincipalId::new(),
            PrincipalId::new(),
            [FeatureCode::Products, FeatureCode::Orders],
        );
        assert_eq!(request.requested.len(), 2);
    }

    #[test]
    fn test_outcome_revoke_all_flag() {
        let empty = AssignmentOutcome {
            granted: BTreeSet::new(),
        };
        assert!(empty.is_revoke_all());

        let granted = AssignmentOutcome {
            granted: [FeatureCode::Products].into_iter().collect(),
        };
        assert!(!granted.is_revoke_all());
    }
}
