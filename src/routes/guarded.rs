use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Guarded Router Module
///
/// Every path here is matched by `scope::is_guarded`, so the access guard
/// has already decided pass-through before a handler runs.
pub fn guarded_routes() -> Router<AppState> {
    Router::new()
        // GET /login
        // Signed-in visitors never get here; they are sent to their role's home.
        .route("/login", get(handlers::login_page))
        // GET /dashboard, /dashboard/
        // Sellers land here. Admins are redirected to the admin dashboard.
        .route("/dashboard", get(handlers::dashboard_shell))
        .route("/dashboard/", get(handlers::dashboard_shell))
        // GET /dashboard/{*path}
        // Any page of the dashboard tree, scoped by role in the guard.
        .route("/dashboard/{*path}", get(handlers::dashboard_shell))
}
