use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{auth::SessionUser, nav::NavLink};

// --- Page Models (Output) ---

/// ShellView
///
/// Everything the dashboard chrome needs to render around a page: the path
/// being shown, the topbar identity and the role-filtered sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ShellView {
    pub path: String,
    pub user: Option<SessionUser>,
    pub sidebar: Vec<NavLink>,
}

/// LoginView
///
/// Model for the login page. Credentials are posted by the browser straight
/// to the backend, so the page only needs to know where that is.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginView {
    pub api_base_url: String,
    pub logout_path: String,
}
