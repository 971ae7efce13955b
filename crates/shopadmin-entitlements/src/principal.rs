//! Staff accounts, entitlement packages, and effective permissions
//!
//! The effective permission set is always derived, never stored: it is the
//! union of a principal's direct grants and the features of the entitlement
//! package its subscription is attached to. [`Principal::can_use`] is the
//! single decision point consulted on every navigation render and before
//! every privileged action, so it stays pure and allocation-free.

use crate::vocabulary::FeatureCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a staff account
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    /// Mint a fresh id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for PrincipalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<PrincipalId> for Uuid {
    fn from(value: PrincipalId) -> Self {
        value.0
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// An immutable bundle of features attached to a subscription package
///
/// Many principals may hold the same package; it is shared by reference,
/// not copied per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Package identifier (e.g. "starter", "growth")
    pub id: String,
    /// Features the package unlocks
    pub features: BTreeSet<FeatureCode>,
}

impl Entitlement {
    pub fn new(id: impl Into<String>, features: BTreeSet<FeatureCode>) -> Self {
        Self {
            id: id.into(),
            features,
        }
    }
}

/// A back-office staff account
///
/// `direct` is owned by the delegation engine: nothing else mutates it, and
/// the principal itself never grants its own permissions.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Account identity
    pub id: PrincipalId,
    /// Permissions granted directly to this account
    pub direct: BTreeSet<FeatureCode>,
    /// The subscription package this account is attached to, if any
    pub entitlement: Option<Arc<Entitlement>>,
}

impl Principal {
    /// Create a principal with no grants and no package.
    pub fn new(id: PrincipalId) -> Self {
        Self {
            id,
            direct: BTreeSet::new(),
            entitlement: None,
        }
    }

    /// Set the direct grants.
    pub fn with_direct(mut self, direct: BTreeSet<FeatureCode>) -> Self {
        self.direct = direct;
        self
    }

    /// Attach an entitlement package.
    pub fn with_entitlement(mut self, entitlement: Arc<Entitlement>) -> Self {
        self.entitlement = Some(entitlement);
        self
    }

    /// The derived effective permission set: direct grants united with the
    /// package features. Duplicates collapse; order is irrelevant.
    pub fn effective(&self) -> BTreeSet<FeatureCode> {
        let mut effective = self.direct.clone();
        if let Some(entitlement) = &self.entitlement {
            effective.extend(entitlement.features.iter().copied());
        }
        effective
    }

    /// Point-in-time decision: may this account use a feature?
    ///
    /// A feature with no declared requirement is always available (the
    /// dashboard, settings, and help screens gate on nothing), so `None`
    /// returns `true` unconditionally. Checks both sources directly rather
    /// than materializing the union.
    pub fn can_use(&self, required: Option<FeatureCode>) -> bool {
        match required {
            None => true,
            Some(code) => {
                self.direct.contains(&code)
                    || self
                        .entitlement
                        .as_ref()
                        .is_some_and(|e| e.features.contains(&code))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[FeatureCode]) -> BTreeSet<FeatureCode> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_principal_id_round_trips() {
        let id = PrincipalId::new();
        let text = id.to_string();
        let parsed = PrincipalId::from_str(&text).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_principal_id_serde_transparent() {
        let id = PrincipalId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn test_effective_union_collapses_duplicates() {
        let package = Arc::new(Entitlement::new(
            "growth",
            codes(&[FeatureCode::Orders, FeatureCode::Category]),
        ));
        let principal = Principal::new(PrincipalId::new())
            .with_direct(codes(&[FeatureCode::Products, FeatureCode::Orders]))
            .with_entitlement(package);

        let effective = principal.effective();
        assert_eq!(effective.len(), 3);
        assert_eq!(
            effective,
            codes(&[
                FeatureCode::Products,
                FeatureCode::Orders,
                FeatureCode::Category
            ])
        );
    }

    #[test]
    fn test_effective_without_entitlement() {
        let principal =
            Principal::new(PrincipalId::new()).with_direct(codes(&[FeatureCode::Staff]));
        assert_eq!(principal.effective(), codes(&[FeatureCode::Staff]));
    }

    #[test]
    fn test_can_use_none_is_always_true() {
        let bare = Principal::new(PrincipalId::new());
        assert!(bare.can_use(None));

        let loaded = Principal::new(PrincipalId::new())
            .with_direct(codes(&[FeatureCode::Products]));
        assert!(loaded.can_use(None));
    }

    #[test]
    fn test_can_use_checks_both_sources() {
        let package = Arc::new(Entitlement::new(
            "starter",
            codes(&[FeatureCode::Reports]),
        ));
        let principal = Principal::new(PrincipalId::new())
            .with_direct(codes(&[FeatureCode::Products]))
            .with_entitlement(package);

        assert!(principal.can_use(Some(FeatureCode::Products)));
        assert!(principal.can_use(Some(FeatureCode::Reports)));
        assert!(!principal.can_use(Some(FeatureCode::Staff)));
    }

    #[test]
    fn test_entitlement_shared_not_copied() {
        let package = Arc::new(Entitlement::new(
            "growth",
            codes(&[FeatureCode::Orders]),
        ));
        let a = Principal::new(PrincipalId::new()).with_entitlement(package.clone());
        let b = Principal::new(PrincipalId::new()).with_entitlement(package.clone());

        assert!(Arc::ptr_eq(
            a.entitlement.as_ref().unwrap(),
            b.entitlement.as_ref().unwrap()
        ));
        assert_eq!(Arc::strong_count(&package), 3);
    }
}
