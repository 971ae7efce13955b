//! Navigation filtering
//!
//! The back-office menu is a static, ordered forest defined in config, with
//! items tagged by the feature they require. [`filter_menu`] projects that
//! forest onto what one principal may actually see: items the principal
//! cannot use disappear, and sections left with no items disappear with
//! them. Pure and deterministic; the same menu and effective set always
//! produce the same view.

use crate::error::Result;
use crate::principal::Principal;
use crate::vocabulary::FeatureCode;
use serde::{Deserialize, Serialize};
use shopadmin_common::json_store;
use std::path::Path;

/// One menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Label shown in the sidebar
    pub title: String,
    /// Route the entry links to
    pub route: String,
    /// Feature required to see this entry; `None` means always visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<FeatureCode>,
}

impl NavItem {
    pub fn new(title: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            route: route.into(),
            required: None,
        }
    }

    /// Gate this entry on a feature.
    pub fn requires(mut self, code: FeatureCode) -> Self {
        self.required = Some(code);
        self
    }
}

/// An ordered group of menu entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavItem>,
}

impl NavSection {
    pub fn new(title: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

/// The whole sidebar: an ordered forest of sections
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavMenu {
    pub sections: Vec<NavSection>,
}

impl NavMenu {
    pub fn new(sections: Vec<NavSection>) -> Self {
        Self { sections }
    }

    /// Load a menu definition from a JSON config file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let menu = json_store::load_json(path)?;
        Ok(menu)
    }
}

/// Project the menu onto what a principal may see.
///
/// An item survives iff the principal can use its required feature (items
/// with no requirement always survive). A section survives iff at least one
/// of its items does; empty sections are omitted entirely, never rendered
/// hollow. Input order is preserved throughout.
pub fn filter_menu(menu: &NavMenu, principal: &Principal) -> NavMenu {
    let sections = menu
        .sections
        .iter()
        .filter_map(|section| {
            let items: Vec<NavItem> = section
                .items
                .iter()
                .filter(|item| principal.can_use(item.required))
                .cloned()
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(NavSection {
                    title: section.title.clone(),
                    items,
                })
            }
        })
        .collect();

    NavMenu { sections }
}

/// The stock back-office sidebar.
pub fn default_menu() -> NavMenu {
    NavMenu::new(vec![
        NavSection::new(
            "Overview",
            vec![
                NavItem::new("Dashboard", "/dashboard"),
                NavItem::new("Reports", "/reports").requires(FeatureCode::Reports),
            ],
        ),
        NavSection::new(
            "Catalog",
            vec![
                NavItem::new("Products", "/products").requires(FeatureCode::Products),
                NavItem::new("Categories", "/categories").requires(FeatureCode::Category),
                NavItem::new("Banners", "/banners").requires(FeatureCode::Banners),
            ],
        ),
        NavSection::new(
            "Sales",
            vec![
                NavItem::new("Orders", "/orders").requires(FeatureCode::Orders),
                NavItem::new("Promo Codes", "/promocodes").requires(FeatureCode::Promocodes),
                NavItem::new("Point of Sale", "/pos").requires(FeatureCode::Pos),
            ],
        ),
        NavSection::new(
            "Customers",
            vec![NavItem::new("Customers", "/customers").requires(FeatureCode::Customers)],
        ),
        NavSection::new(
            "Team",
            vec![
                NavItem::new("System Users", "/users").requires(FeatureCode::ManageUsers),
                NavItem::new("Staff", "/staff").requires(FeatureCode::Staff),
                NavItem::new("Activity Log", "/activity").requires(FeatureCode::LogActivity),
            ],
        ),
        NavSection::new(
            "Shipping",
            vec![
                NavItem::new("City Courier", "/couriers/city").requires(FeatureCode::CourierCity),
                NavItem::new("Express Courier", "/couriers/express")
                    .requires(FeatureCode::CourierExpress),
                NavItem::new("Postal Courier", "/couriers/postal")
                    .requires(FeatureCode::CourierPostal),
            ],
        ),
        NavSection::new(
            "Payments",
            vec![
                NavItem::new("Payment Gateway", "/payments/gateway")
                    .requires(FeatureCode::PaymentGateway),
                NavItem::new("Cash on Delivery", "/payments/cod")
                    .requires(FeatureCode::PaymentCod),
                NavItem::new("Store Configuration", "/store/config")
                    .requires(FeatureCode::StoreConfig),
            ],
        ),
        NavSection::new(
            "Policies",
            vec![
                NavItem::new("Privacy Policy", "/policies/privacy")
                    .requires(FeatureCode::PrivacyPolicy),
                NavItem::new("Terms of Service", "/policies/terms")
                    .requires(FeatureCode::TermsOfService),
                NavItem::new("Refund Policy", "/policies/refund")
                    .requires(FeatureCode::RefundPolicy),
            ],
        ),
        NavSection::new(
            "General",
            vec![
                NavItem::new("Settings", "/settings"),
                NavItem::new("Help", "/help"),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::PrincipalId;
    use std::collections::BTreeSet;

    fn principal_with(list: &[FeatureCode]) -> Principal {
        Principal::new(PrincipalId::new()).with_direct(list.iter().copied().collect::<BTreeSet<_>>())
    }

    fn section_titles(menu: &NavMenu) -> Vec<&str> {
        menu.sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_items_without_requirement_always_survive() {
        let bare = principal_with(&[]);
        let view = filter_menu(&default_menu(), &bare);

        let overview = view.sections.iter().find(|s| s.title == "Overview").unwrap();
        assert_eq!(overview.items.len(), 1);
        assert_eq!(overview.items[0].title, "Dashboard");

        let general = view.sections.iter().find(|s| s.title == "General").unwrap();
        assert_eq!(general.items.len(), 2);
    }

    #[test]
    fn test_gated_items_dropped_without_feature() {
        let clerk = principal_with(&[FeatureCode::Orders]);
        let view = filter_menu(&default_menu(), &clerk);

        let sales = view.sections.iter().find(|s| s.title == "Sales").unwrap();
        assert_eq!(sales.items.len(), 1);
        assert_eq!(sales.items[0].title, "Orders");
    }

    #[test]
    fn test_empty_sections_omitted_entirely() {
        let menu = NavMenu::new(vec![
            NavSection::new(
                "Catalog",
                vec![NavItem::new("Products", "/products").requires(FeatureCode::Products)],
            ),
            NavSection::new(
                "Team",
                vec![NavItem::new("Staff", "/staff").requires(FeatureCode::Staff)],
            ),
        ]);

        let view = filter_menu(&menu, &principal_with(&[FeatureCode::Products]));

        assert_eq!(section_titles(&view), vec!["Catalog"]);
    }

    #[test]
    fn test_order_preserved() {
        let everything = principal_with(
            &FeatureCode::ALL.iter().copied().collect::<Vec<_>>(),
        );
        let view = filter_menu(&default_menu(), &everything);

        assert_eq!(
            section_titles(&view),
            section_titles(&default_menu())
        );
        for (filtered, original) in view.sections.iter().zip(default_menu().sections.iter()) {
            let filtered_titles: Vec<_> = filtered.items.iter().map(|i| &i.title).collect();
            let original_titles: Vec<_> = original.items.iter().map(|i| &i.title).collect();
            assert_eq!(filtered_titles, original_titles);
        }
    }

    #[test]
    fn test_filtering_is_deterministic() {
        let clerk = principal_with(&[FeatureCode::Orders, FeatureCode::Customers]);
        let first = filter_menu(&default_menu(), &clerk);
        let second = filter_menu(&default_menu(), &clerk);
        assert_eq!(first, second);
    }

    #[test]
    fn test_menu_json_round_trip() {
        let menu = default_menu();
        let json = serde_json::to_string(&menu).unwrap();
        let back: NavMenu = serde_json::from_str(&json).unwrap();
        assert_eq!(back, menu);
    }

    #[test]
    fn test_load_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        shopadmin_common::save_json(&path, &default_menu()).unwrap();

        let loaded = NavMenu::load_from(&path).unwrap();
        assert_eq!(loaded, default_menu());
    }
}
