use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// ApiError
///
/// Failures talking to the REST backend. A 401 or 403 means the session is
/// dead and the caller should drop its token.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend rejected the session token")]
    Unauthorized,

    #[error("backend responded with status {0}")]
    Status(u16),

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Simulated(String),
}

// 1. BackendService Contract
/// BackendService
///
/// The slice of the remote REST API this service calls itself. Everything else
/// the dashboard needs is fetched by the browser directly.
#[async_trait]
pub trait BackendService: Send + Sync {
    /// Invalidates the session on the backend side.
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
}

// 2. The Real Implementation
/// HttpBackend
///
/// reqwest client pointed at `API_BASE_URL`. One attempt per call, no retries.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BackendService for HttpBackend {
    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let url = format!("{}/auth/logout", self.base_url);

        let response = self.client.post(url).bearer_auth(token).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            status => Err(ApiError::Status(status.as_u16())),
        }
    }
}

// 3. The Mock Implementation (For Tests)
/// MockBackend
///
/// Records every logout it receives so router tests can assert on them
/// without a network.
#[derive(Clone, Default)]
pub struct MockBackend {
    /// When true, every call returns a simulated failure.
    pub should_fail: bool,
    logouts: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Tokens passed to `logout`, oldest first.
    pub fn logouts(&self) -> Vec<String> {
        self.logouts
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BackendService for MockBackend {
    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.logouts.lock() {
            calls.push(token.to_string());
        }

        if self.should_fail {
            return Err(ApiError::Simulated(
                "Mock Backend Error: Simulation requested".to_string(),
            ));
        }
        Ok(())
    }
}

/// BackendState
///
/// Shared handle to the backend collaborator held in the application state.
pub type BackendState = Arc<dyn BackendService>;
