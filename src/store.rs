use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderValue, header};
use cookie::{Cookie, SameSite, time::Duration};

/// Key the session token is stored under.
pub const TOKEN_KEY: &str = "alpa_token";
/// Older key still written by some clients; read and cleared alongside [`TOKEN_KEY`].
pub const LEGACY_TOKEN_KEY: &str = "auth_token";
/// Lookup order for the session token.
pub const TOKEN_KEYS: [&str; 2] = [TOKEN_KEY, LEGACY_TOKEN_KEY];

/// TokenStore
///
/// The key-value store the session token lives in. The access guard reads and
/// clears tokens through this contract so it never touches ambient storage.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
}

/// Returns the first non-empty token, current key before legacy key.
pub fn read_token<S>(store: &S) -> Option<String>
where
    S: TokenStore + ?Sized,
{
    TOKEN_KEYS
        .iter()
        .filter_map(|key| store.get(key))
        .find(|token| !token.is_empty())
}

/// Deletes the token under both keys.
pub fn clear_tokens<S>(store: &mut S)
where
    S: TokenStore + ?Sized,
{
    for key in TOKEN_KEYS {
        store.delete(key);
    }
}

/// MemoryTokenStore
///
/// Plain in-process store. Used by tests and by callers that have no cookie
/// transport.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: HashMap<String, String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// CookieTokenStore
///
/// Request-scoped view over the browser's cookies. Reads come from the
/// incoming `Cookie` headers; writes and deletes are queued and rendered as
/// `Set-Cookie` headers on whatever response goes back out.
#[derive(Debug, Clone, Default)]
pub struct CookieTokenStore {
    cookies: HashMap<String, String>,
    pending: Vec<Cookie<'static>>,
    secure: bool,
}

impl CookieTokenStore {
    /// Parses every `Cookie` header. When a name repeats, the first value wins.
    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        let mut cookies = HashMap::new();

        for header_value in headers.get_all(header::COOKIE) {
            let Ok(cookie_str) = header_value.to_str() else {
                continue;
            };
            for c in Cookie::split_parse_encoded(cookie_str).flatten() {
                cookies
                    .entry(c.name().to_string())
                    .or_insert_with(|| c.value().to_string());
            }
        }

        Self {
            cookies,
            pending: Vec::new(),
            secure,
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Queued changes rendered as `Set-Cookie` values, in the order they were made.
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        self.pending
            .iter()
            .filter_map(|c| HeaderValue::from_str(&c.encoded().to_string()).ok())
            .collect()
    }

    /// Appends the queued changes to an outgoing response's headers.
    pub fn apply_to(&self, headers: &mut HeaderMap) {
        for value in self.set_cookie_headers() {
            headers.append(header::SET_COOKIE, value);
        }
    }

    fn queue(&mut self, key: &str, value: &str, expire: bool) {
        self.pending.retain(|c| c.name() != key);

        let mut builder = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure);
        if expire {
            builder = builder.max_age(Duration::ZERO);
        }
        self.pending.push(builder.build());
    }
}

impl TokenStore for CookieTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.cookies.insert(key.to_string(), value.to_string());
        self.queue(key, value, false);
    }

    fn delete(&mut self, key: &str) {
        self.cookies.remove(key);
        self.queue(key, "", true);
    }
}
