use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints the access guard never intercepts.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /api/session
        // Identity behind the session cookie, 401 when there is none.
        .route("/api/session", get(handlers::get_session))
        // POST /logout
        // Ends the session on the backend and clears both token cookies.
        .route(handlers::LOGOUT_PATH, post(handlers::logout))
}
