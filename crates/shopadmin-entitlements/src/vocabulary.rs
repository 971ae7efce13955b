//! The closed feature vocabulary and its normalization rule
//!
//! Every gatable back-office feature is one [`FeatureCode`]. The set is
//! closed: nothing in the engine ever stores or evaluates a code outside
//! this enumeration, and unrecognized input is dropped during
//! normalization, never coerced to a near-match.
//!
//! Stored and wire permissions arrive in heterogeneous shapes (bare code
//! strings, or records carrying one of `code`/`name`/`value`); the
//! [`normalize`] function maps every shape onto a canonical code with a
//! fixed precedence, and [`normalize_all`] collapses a whole collection
//! into a clean set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical identifier of one gatable back-office feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCode {
    Dashboard,
    Products,
    Orders,
    Category,
    Customers,
    ManageUsers,
    Staff,
    Settings,
    LogActivity,
    Banners,
    Promocodes,
    Help,
    Reports,
    Pos,
    CourierCity,
    CourierExpress,
    CourierPostal,
    PaymentGateway,
    PaymentCod,
    StoreConfig,
    NotificationEmail,
    NotificationSms,
    NotificationPush,
    PrivacyPolicy,
    TermsOfService,
    RefundPolicy,
}

impl FeatureCode {
    /// Every member of the vocabulary, in presentation order.
    pub const ALL: &'static [FeatureCode] = &[
        FeatureCode::Dashboard,
        FeatureCode::Products,
        FeatureCode::Orders,
        FeatureCode::Category,
        FeatureCode::Customers,
        FeatureCode::ManageUsers,
        FeatureCode::Staff,
        FeatureCode::Settings,
        FeatureCode::LogActivity,
        FeatureCode::Banners,
        FeatureCode::Promocodes,
        FeatureCode::Help,
        FeatureCode::Reports,
        FeatureCode::Pos,
        FeatureCode::CourierCity,
        FeatureCode::CourierExpress,
        FeatureCode::CourierPostal,
        FeatureCode::PaymentGateway,
        FeatureCode::PaymentCod,
        FeatureCode::StoreConfig,
        FeatureCode::NotificationEmail,
        FeatureCode::NotificationSms,
        FeatureCode::NotificationPush,
        FeatureCode::PrivacyPolicy,
        FeatureCode::TermsOfService,
        FeatureCode::RefundPolicy,
    ];

    /// The subset of the vocabulary exposed through the delegation API.
    ///
    /// Codes outside this table can exist on a principal (legacy manual
    /// grants) but can never be assigned or revoked through delegation.
    /// Always-available features (dashboard, settings, help) are excluded:
    /// they are never gated, so there is nothing to delegate.
    pub const DEFAULT_ASSIGNABLE: &'static [FeatureCode] = &[
        FeatureCode::Products,
        FeatureCode::Orders,
        FeatureCode::Category,
        FeatureCode::Customers,
        FeatureCode::ManageUsers,
        FeatureCode::Staff,
        FeatureCode::LogActivity,
        FeatureCode::Banners,
        FeatureCode::Promocodes,
        FeatureCode::Reports,
        FeatureCode::Pos,
        FeatureCode::CourierCity,
        FeatureCode::CourierExpress,
        FeatureCode::CourierPostal,
        FeatureCode::PaymentGateway,
        FeatureCode::PaymentCod,
        FeatureCode::StoreConfig,
        FeatureCode::NotificationEmail,
        FeatureCode::NotificationSms,
        FeatureCode::NotificationPush,
        FeatureCode::PrivacyPolicy,
        FeatureCode::TermsOfService,
        FeatureCode::RefundPolicy,
    ];

    /// The canonical code string for this feature.
    pub fn as_code(&self) -> &'static str {
        match self {
            FeatureCode::Dashboard => "dashboard",
            FeatureCode::Products => "products",
            FeatureCode::Orders => "orders",
            FeatureCode::Category => "category",
            FeatureCode::Customers => "customers",
            FeatureCode::ManageUsers => "manage_users",
            FeatureCode::Staff => "staff",
            FeatureCode::Settings => "settings",
            FeatureCode::LogActivity => "log_activity",
            FeatureCode::Banners => "banners",
            FeatureCode::Promocodes => "promocodes",
            FeatureCode::Help => "help",
            FeatureCode::Reports => "reports",
            FeatureCode::Pos => "pos",
            FeatureCode::CourierCity => "courier_city",
            FeatureCode::CourierExpress => "courier_express",
            FeatureCode::CourierPostal => "courier_postal",
            FeatureCode::PaymentGateway => "payment_gateway",
            FeatureCode::PaymentCod => "payment_cod",
            FeatureCode::StoreConfig => "store_config",
            FeatureCode::NotificationEmail => "notification_email",
            FeatureCode::NotificationSms => "notification_sms",
            FeatureCode::NotificationPush => "notification_push",
            FeatureCode::PrivacyPolicy => "privacy_policy",
            FeatureCode::TermsOfService => "terms_of_service",
            FeatureCode::RefundPolicy => "refund_policy",
        }
    }

    /// Parse a code string into the vocabulary.
    ///
    /// Input is trimmed and lower-cased first; anything that still does not
    /// name a member returns `None`.
    pub fn parse(input: &str) -> Option<FeatureCode> {
        let canonical = input.trim().to_lowercase();
        match canonical.as_str() {
            "dashboard" => Some(FeatureCode::Dashboard),
            "products" => Some(FeatureCode::Products),
            "orders" => Some(FeatureCode::Orders),
            "category" => Some(FeatureCode::Category),
            "customers" => Some(FeatureCode::Customers),
            "manage_users" => Some(FeatureCode::ManageUsers),
            "staff" => Some(FeatureCode::Staff),
            "settings" => Some(FeatureCode::Settings),
            "log_activity" => Some(FeatureCode::LogActivity),
            "banners" => Some(FeatureCode::Banners),
            "promocodes" => Some(FeatureCode::Promocodes),
            "help" => Some(FeatureCode::Help),
            "reports" => Some(FeatureCode::Reports),
            "pos" => Some(FeatureCode::Pos),
            "courier_city" => Some(FeatureCode::CourierCity),
            "courier_express" => Some(FeatureCode::CourierExpress),
            "courier_postal" => Some(FeatureCode::CourierPostal),
            "payment_gateway" => Some(FeatureCode::PaymentGateway),
            "payment_cod" => Some(FeatureCode::PaymentCod),
            "store_config" => Some(FeatureCode::StoreConfig),
            "notification_email" => Some(FeatureCode::NotificationEmail),
            "notification_sms" => Some(FeatureCode::NotificationSms),
            "notification_push" => Some(FeatureCode::NotificationPush),
            "privacy_policy" => Some(FeatureCode::PrivacyPolicy),
            "terms_of_service" => Some(FeatureCode::TermsOfService),
            "refund_policy" => Some(FeatureCode::RefundPolicy),
            _ => None,
        }
    }

    /// Whether a string names a member of the vocabulary.
    pub fn is_known(input: &str) -> bool {
        FeatureCode::parse(input).is_some()
    }
}

impl std::fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// The heterogeneous shape a stored or wire permission may arrive in
///
/// Older storage rows hold bare code strings; newer ones hold records
/// carrying one of `code`, `name`, or `value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFeatureRef {
    /// A bare code string, e.g. `"products"`
    Code(String),
    /// A record shape; precedence is `code` over `name` over `value`
    Record {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

impl RawFeatureRef {
    /// Build a bare-code ref.
    pub fn code(code: impl Into<String>) -> Self {
        RawFeatureRef::Code(code.into())
    }
}

impl From<FeatureCode> for RawFeatureRef {
    fn from(code: FeatureCode) -> Self {
        RawFeatureRef::Code(code.as_code().to_string())
    }
}

/// Map one heterogeneous ref onto its canonical code.
///
/// Pure and total: the first non-empty field in `code > name > value`
/// precedence is trimmed, lower-cased, and parsed; anything unresolvable
/// yields `None`. Dropping is silent, not an error.
pub fn normalize(raw: &RawFeatureRef) -> Option<FeatureCode> {
    let candidate = match raw {
        RawFeatureRef::Code(code) => Some(code.as_str()),
        RawFeatureRef::Record { code, name, value } => [code, name, value]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .find(|s| !s.trim().is_empty()),
    };
    candidate.and_then(FeatureCode::parse)
}

/// Normalize a whole collection, dropping unknowns and collapsing
/// duplicates.
pub fn normalize_all<'a, I>(refs: I) -> BTreeSet<FeatureCode>
where
    I: IntoIterator<Item = &'a RawFeatureRef>,
{
    refs.into_iter().filter_map(normalize).collect()
}

/// A named presentation grouping of feature codes
///
/// Used purely to lay out the permission checkboxes on the staff screens.
/// Carries no authorization weight: the delegation bound is
/// [`FeatureCode::DEFAULT_ASSIGNABLE`], never this table.
#[derive(Debug, Clone, Copy)]
pub struct FeatureGroup {
    pub title: &'static str,
    pub features: &'static [FeatureCode],
}

/// The presentation grouping table, in screen order.
pub fn feature_groups() -> &'static [FeatureGroup] {
    const GROUPS: &[FeatureGroup] = &[
        FeatureGroup {
            title: "Core Features",
            features: &[
                FeatureCode::Dashboard,
                FeatureCode::Products,
                FeatureCode::Orders,
                FeatureCode::Category,
                FeatureCode::Customers,
                FeatureCode::Banners,
                FeatureCode::Promocodes,
                FeatureCode::Reports,
                FeatureCode::Pos,
            ],
        },
        FeatureGroup {
            title: "Staff & Access",
            features: &[
                FeatureCode::ManageUsers,
                FeatureCode::Staff,
                FeatureCode::LogActivity,
            ],
        },
        FeatureGroup {
            title: "Shipping",
            features: &[
                FeatureCode::CourierCity,
                FeatureCode::CourierExpress,
                FeatureCode::CourierPostal,
            ],
        },
        FeatureGroup {
            title: "Payments",
            features: &[
                FeatureCode::PaymentGateway,
                FeatureCode::PaymentCod,
                FeatureCode::StoreConfig,
            ],
        },
        FeatureGroup {
            title: "Notifications",
            features: &[
                FeatureCode::NotificationEmail,
                FeatureCode::NotificationSms,
                FeatureCode::NotificationPush,
            ],
        },
        FeatureGroup {
            title: "Policies",
            features: &[
                FeatureCode::PrivacyPolicy,
                FeatureCode::TermsOfService,
                FeatureCode::RefundPolicy,
            ],
        },
        FeatureGroup {
            title: "General",
            features: &[FeatureCode::Settings, FeatureCode::Help],
        },
    ];
    GROUPS
}
