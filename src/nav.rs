use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::auth::Role;

/// NavLink
///
/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// sidebar_for
///
/// The sidebar a role sees, in display order. Each link stays inside the
/// part of the dashboard the access guard lets that role into.
pub fn sidebar_for(role: Role) -> Vec<NavLink> {
    match role {
        Role::Admin => vec![
            NavLink::new("Dashboard", "/dashboard/admin/dashboard"),
            NavLink::new("Users", "/dashboard/admin/users"),
            NavLink::new("Sellers", "/dashboard/admin/sellers"),
            NavLink::new("Reports", "/dashboard/admin/reports"),
            NavLink::new("Settings", "/dashboard/settings"),
        ],
        Role::Seller => vec![
            NavLink::new("Dashboard", "/dashboard"),
            NavLink::new("Products", "/dashboard/products"),
            NavLink::new("Orders", "/dashboard/orders"),
            NavLink::new("Invoices", "/dashboard/invoices"),
            NavLink::new("Settings", "/dashboard/settings"),
        ],
        Role::Customer => vec![
            NavLink::new("Profile", "/dashboard/customer/profile"),
            NavLink::new("Orders", "/dashboard/customer/orders"),
            NavLink::new("Settings", "/dashboard/customer/settings"),
        ],
    }
}
