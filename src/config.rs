use std::env;

/// AppConfig
///
/// Immutable configuration loaded once at startup and shared through the
/// application state via FromRef.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and secure-cookie default.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Base URL of the REST backend that issues session tokens.
    pub api_base_url: String,
    // Whether cookies written by this service carry the Secure attribute.
    pub cookie_secure: bool,
}

/// Env
///
/// Local development or production deployment.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOCAL_API_BASE_URL: &str = "http://localhost:8000/api";

impl Default for AppConfig {
    /// Local settings that need no environment variables. Used by tests.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_base_url: DEFAULT_LOCAL_API_BASE_URL.to_string(),
            cookie_secure: false,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from the environment.
    ///
    /// # Panics
    /// Panics in production when `API_BASE_URL` is not set, so the gate never
    /// starts up pointing at a development backend.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let api_base_url = match env {
            Env::Production => {
                env::var("API_BASE_URL").expect("FATAL: API_BASE_URL must be set in production.")
            }
            Env::Local => env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LOCAL_API_BASE_URL.to_string()),
        };

        let cookie_secure = env::var("COOKIE_SECURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(env == Env::Production);

        Self {
            env,
            bind_addr,
            api_base_url,
            cookie_secure,
        }
    }
}
