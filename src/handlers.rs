use crate::{
    AppState,
    auth::SessionUser,
    config::AppConfig,
    models::{LoginView, ShellView},
    nav::sidebar_for,
    scope::LOGIN_PATH,
    store::{CookieTokenStore, clear_tokens, read_token},
};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Uri},
    response::{IntoResponse, Redirect, Response},
};

pub const LOGOUT_PATH: &str = "/logout";

// --- Handlers ---

/// login_page
///
/// [Guarded Route] Only reached by visitors without a usable session; signed-in
/// users are redirected to their home page before this runs.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login page model", body = LoginView),
        (status = 307, description = "Already signed in")
    )
)]
pub async fn login_page(State(config): State<AppConfig>) -> Json<LoginView> {
    Json(LoginView {
        api_base_url: config.api_base_url,
        logout_path: LOGOUT_PATH.to_string(),
    })
}

/// dashboard_shell
///
/// [Guarded Route] Returns the shell model for any dashboard page the guard let
/// through. The sidebar is filtered by the session's role.
#[utoipa::path(
    get,
    path = "/dashboard/{path}",
    params(("path" = String, Path, description = "Dashboard page path")),
    responses(
        (status = 200, description = "Shell model", body = ShellView),
        (status = 307, description = "Redirected by the access guard")
    )
)]
pub async fn dashboard_shell(uri: Uri, headers: HeaderMap) -> Json<ShellView> {
    let user = SessionUser::from_headers(&headers);
    let sidebar = user
        .as_ref()
        .map(|u| sidebar_for(u.role))
        .unwrap_or_default();

    Json(ShellView {
        path: uri.path().to_string(),
        user,
        sidebar,
    })
}

/// get_session
///
/// [Public Route] The identity behind the current session cookie, or 401.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current session", body = SessionUser),
        (status = 401, description = "No usable session")
    )
)]
pub async fn get_session(user: SessionUser) -> Json<SessionUser> {
    Json(user)
}

/// logout
///
/// [Public Route] Tells the backend the session is over, then clears both
/// token cookies and sends the browser to the login page. A backend failure
/// does not keep the local session alive.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Signed out, redirected to /login"))
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut store = CookieTokenStore::from_headers(&headers, state.config.cookie_secure);

    if let Some(token) = read_token(&store) {
        if let Err(e) = state.backend.logout(&token).await {
            tracing::warn!(error = %e, "backend logout failed; clearing local session anyway");
        }
    }

    clear_tokens(&mut store);

    let mut response = Redirect::to(LOGIN_PATH).into_response();
    store.apply_to(response.headers_mut());
    response
}
