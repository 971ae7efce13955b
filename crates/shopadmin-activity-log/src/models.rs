//! Audit record data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of privileged action recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A record was created
    Create,
    /// A record was updated
    Update,
    /// A record was deleted
    Delete,
    /// A staff account was granted a permission set
    PermissionAssign,
    /// A staff account had its assignable permissions cleared
    PermissionRevoke,
    /// A record's status was changed (e.g. order fulfilment)
    StatusChange,
    /// An account password was changed
    PasswordChange,
    /// A product barcode was scanned at the counter
    BarcodeScan,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Create => write!(f, "create"),
            AuditAction::Update => write!(f, "update"),
            AuditAction::Delete => write!(f, "delete"),
            AuditAction::PermissionAssign => write!(f, "permission_assign"),
            AuditAction::PermissionRevoke => write!(f, "permission_revoke"),
            AuditAction::StatusChange => write!(f, "status_change"),
            AuditAction::PasswordChange => write!(f, "password_change"),
            AuditAction::BarcodeScan => write!(f, "barcode_scan"),
        }
    }
}

/// Kind of entity a recorded action touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntity {
    /// A back-office staff account
    SystemUser,
    /// A catalog product
    Product,
    /// A customer order
    Order,
    /// A catalog category
    Category,
    /// A storefront customer
    Customer,
    /// A promotional banner
    Banner,
    /// A promo code
    Promocode,
    /// A staff roster entry
    Staff,
}

impl std::fmt::Display for AuditEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditEntity::SystemUser => write!(f, "system_user"),
            AuditEntity::Product => write!(f, "product"),
            AuditEntity::Order => write!(f, "order"),
            AuditEntity::Category => write!(f, "category"),
            AuditEntity::Customer => write!(f, "customer"),
            AuditEntity::Banner => write!(f, "banner"),
            AuditEntity::Promocode => write!(f, "promocode"),
            AuditEntity::Staff => write!(f, "staff"),
        }
    }
}

/// One immutable entry in the audit trail
///
/// Created once as part of the privileged mutation it records, then never
/// edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique identifier for this record
    pub id: Uuid,
    /// When the action occurred
    pub occurred_at: DateTime<Utc>,
    /// What kind of action was performed
    pub action: AuditAction,
    /// What kind of entity was touched
    pub entity: AuditEntity,
    /// Account that performed the action
    pub performed_by: Uuid,
    /// Account the action was aimed at, when the target is an account
    pub target_user: Option<Uuid>,
    /// Human-readable summary of the change
    pub description: String,
}

impl AuditRecord {
    /// Create a new audit record stamped with the current time.
    pub fn new(action: AuditAction, entity: AuditEntity, performed_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            action,
            entity,
            performed_by,
            target_user: None,
            description: String::new(),
        }
    }

    /// Set the account the action was aimed at.
    pub fn with_target(mut self, target: Uuid) -> Self {
        self.target_user = Some(target);
        self
    }

    /// Set the human-readable summary.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_action_display() {
        assert_eq!(AuditAction::Create.to_string(), "create");
        assert_eq!(AuditAction::PermissionAssign.to_string(), "permission_assign");
        assert_eq!(AuditAction::PermissionRevoke.to_string(), "permission_revoke");
        assert_eq!(AuditAction::BarcodeScan.to_string(), "barcode_scan");
    }

    #[test]
    fn test_audit_entity_display() {
        assert_eq!(AuditEntity::SystemUser.to_string(), "system_user");
        assert_eq!(AuditEntity::Promocode.to_string(), "promocode");
    }

    #[test]
    fn test_audit_action_serialization() {
        let json = serde_json::to_string(&AuditAction::PermissionAssign).unwrap();
        assert_eq!(json, "\"permission_assign\"");

        let deserialized: AuditAction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, AuditAction::PermissionAssign);
    }

    #[test]
    fn test_record_creation() {
        let actor = Uuid::new_v4();
        let record = AuditRecord::new(AuditAction::Update, AuditEntity::Product, actor);

        assert_eq!(record.action, AuditAction::Update);
        assert_eq!(record.entity, AuditEntity::Product);
        assert_eq!(record.performed_by, actor);
        assert_eq!(record.target_user, None);
        assert!(record.description.is_empty());
    }

    #[test]
    fn test_record_builders() {
        let actor = Uuid::new_v4();
        let target = Uuid::new_v4();
        let record = AuditRecord::new(AuditAction::PermissionAssign, AuditEntity::SystemUser, actor)
            .with_target(target)
            .with_description("products, orders");

        assert_eq!(record.target_user, Some(target));
        assert_eq!(record.description, "products, orders");
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = AuditRecord::new(
            AuditAction::PasswordChange,
            AuditEntity::SystemUser,
            Uuid::new_v4(),
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: AuditRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id, record.id);
        assert_eq!(deserialized.action, record.action);
        assert_eq!(deserialized.entity, record.entity);
        assert_eq!(deserialized.performed_by, record.performed_by);
    }

    #[test]
    fn test_record_timestamp_is_now() {
        let before = Utc::now();
        let record = AuditRecord::new(AuditAction::Create, AuditEntity::Order, Uuid::new_v4());
        let after = Utc::now();

        assert!(record.occurred_at >= before);
        assert!(record.occurred_at <= after);
    }
}
