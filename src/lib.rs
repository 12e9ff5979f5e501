use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Token decoding, path scoping and the access decision itself.
pub mod auth;
pub mod guard;
pub mod scope;
pub mod store;

// HTTP surface and its collaborators.
pub mod backend;
pub mod config;
pub mod handlers;
pub mod models;
pub mod nav;

// Module for routing segregation (Public, Guarded).
pub mod routes;
use routes::{guarded, public};

// --- Public Re-exports ---

pub use backend::{BackendState, HttpBackend, MockBackend};
pub use config::AppConfig;
pub use guard::{Decision, Verdict, evaluate, guard};
pub use store::{CookieTokenStore, MemoryTokenStore, TokenStore};

/// ApiDoc
///
/// OpenAPI document for the gate's own endpoints, served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login_page, handlers::dashboard_shell, handlers::get_session,
        handlers::logout
    ),
    components(
        schemas(
            models::ShellView, models::LoginView, nav::NavLink, auth::SessionUser,
            auth::Role,
        )
    ),
    tags(
        (name = "dashboard-gate", description = "Role-aware dashboard access gate")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable container for the backend collaborator and configuration.
#[derive(Clone)]
pub struct AppState {
    /// Remote REST API the tokens come from.
    pub backend: BackendState,
    /// Configuration: The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for BackendState {
    fn from_ref(app_state: &AppState) -> BackendState {
        app_state.backend.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// access_guard
///
/// Runs the access guard in front of every guarded path.
///
/// The token is read from the request cookies through a request-scoped
/// [`CookieTokenStore`]. A redirect decision short-circuits with
/// `307 Temporary Redirect`; otherwise the request reaches its handler. Either
/// way, any token deletions the guard made are written back as `Set-Cookie`
/// headers.
async fn access_guard(
    State(config): State<AppConfig>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !scope::is_guarded(&path) {
        return next.run(request).await;
    }

    let mut cookies = CookieTokenStore::from_headers(request.headers(), config.cookie_secure);

    let mut response = match guard(&path, &mut cookies) {
        Decision::Continue => next.run(request).await,
        Decision::Redirect(target) => {
            tracing::debug!(
                path = %path,
                target = target.path(),
                cleared = cookies.has_pending(),
                "access guard redirect"
            );
            Redirect::temporary(target.path()).into_response()
        }
    };

    cookies.apply_to(response.headers_mut());
    response
}

/// create_router
///
/// Assembles the routes, the access guard and the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(guarded::guarded_routes())
        // The guard itself filters on `is_guarded`, so unknown paths under
        // /dashboard are still redirected before the 404 fallback.
        .layer(middleware::from_fn_with_state(state.clone(), access_guard))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span with method, URI and `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
