use crate::auth::Role;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PREFIX: &str = "/dashboard";
pub const DASHBOARD_ROOT: &str = "/dashboard";
pub const DASHBOARD_ROOT_SLASH: &str = "/dashboard/";
pub const CUSTOMER_PREFIX: &str = "/dashboard/customer/";
pub const ADMIN_PREFIX: &str = "/dashboard/admin/";
pub const ADMIN_DASHBOARD: &str = "/dashboard/admin/dashboard";
pub const CUSTOMER_PROFILE: &str = "/dashboard/customer/profile";

/// RouteScope
///
/// Which part of the dashboard a path belongs to. Derived from literal prefixes
/// on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScope {
    Public,
    DashboardRoot,
    Customer,
    Admin,
}

pub fn classify(path: &str) -> RouteScope {
    if path.starts_with(CUSTOMER_PREFIX) {
        RouteScope::Customer
    } else if path.starts_with(ADMIN_PREFIX) {
        RouteScope::Admin
    } else if path == DASHBOARD_ROOT || path == DASHBOARD_ROOT_SLASH {
        RouteScope::DashboardRoot
    } else {
        RouteScope::Public
    }
}

/// True for anything under `/dashboard`, matched verbatim as a string prefix.
pub fn is_dashboard_path(path: &str) -> bool {
    path.starts_with(DASHBOARD_PREFIX)
}

/// Paths the access guard runs on: the dashboard tree and the login page.
pub fn is_guarded(path: &str) -> bool {
    is_dashboard_path(path) || path == LOGIN_PATH
}

/// RedirectTarget
///
/// The only places the access guard ever sends a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    DashboardRoot,
    AdminDashboard,
    CustomerProfile,
}

impl RedirectTarget {
    pub fn path(self) -> &'static str {
        match self {
            RedirectTarget::Login => LOGIN_PATH,
            RedirectTarget::DashboardRoot => DASHBOARD_ROOT,
            RedirectTarget::AdminDashboard => ADMIN_DASHBOARD,
            RedirectTarget::CustomerProfile => CUSTOMER_PROFILE,
        }
    }

    /// Landing page for a freshly signed-in user of the given role.
    pub fn home(role: Role) -> Self {
        match role {
            Role::Admin => RedirectTarget::AdminDashboard,
            Role::Seller => RedirectTarget::DashboardRoot,
            Role::Customer => RedirectTarget::CustomerProfile,
        }
    }
}
