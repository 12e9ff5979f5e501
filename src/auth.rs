use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::store::{CookieTokenStore, read_token};

/// Standard alphabet, padding optional. Token payload segments arrive unpadded
/// and are translated from the URL-safe alphabet before decoding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// TokenError
///
/// Reasons a session token could not be turned into claims. Callers of the
/// access guard never see these; they are only logged.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,

    #[error("payload segment is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("payload is not a JSON claims object: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Role
///
/// The three account kinds the backend issues tokens for. Drives every
/// redirect decision made by the access guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    Seller,
    Customer,
}

impl FromStr for Role {
    type Err = TokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Role::Admin),
            "seller" => Ok(Role::Seller),
            "customer" => Ok(Role::Customer),
            other => Err(TokenError::UnknownRole(other.to_string())),
        }
    }
}

/// Claims
///
/// The unverified payload of a session token. Signature checking is the
/// issuer's job; this layer only reads the hints it needs for routing and
/// display.
///
/// Every field is lenient: a value of the wrong JSON type reads as absent
/// instead of failing the whole parse, so a token with `"role": 7` behaves
/// exactly like one without a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
}

impl Claims {
    /// Display identity for the dashboard shell. `None` when the role is
    /// missing, which the guard treats as an invalid session.
    pub fn session_user(&self) -> Option<SessionUser> {
        self.role.map(|role| SessionUser {
            role,
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|role| role.parse().ok()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }))
}

/// try_decode_claims
///
/// Splits the token on `.`, takes the payload segment, maps the URL-safe
/// alphabet onto the standard one, base64-decodes it and parses the JSON.
///
/// The payload must be a JSON object; arrays and scalars are rejected. A key
/// that appears twice keeps its last value. Bytes that are not UTF-8 are
/// replaced rather than failing the parse, so only `role` decides routing.
pub fn try_decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = token.split('.').nth(1).ok_or(TokenError::MissingPayload)?;

    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE.decode(standard)?;
    let text = String::from_utf8_lossy(&bytes);

    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)?;
    Ok(Claims::deserialize(serde_json::Value::Object(object))?)
}

/// decode_claims
///
/// Infallible form of [`try_decode_claims`]: any malformed input yields `None`.
pub fn decode_claims(token: &str) -> Option<Claims> {
    try_decode_claims(token).ok()
}

/// SessionUser
///
/// The identity of the signed-in user as shown in the topbar and returned by
/// `GET /api/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SessionUser {
    pub role: Role,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl SessionUser {
    /// Resolves the session from the request cookies, current key first.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let store = CookieTokenStore::from_headers(headers, false);
        let token = read_token(&store)?;
        decode_claims(&token)?.session_user()
    }
}

/// Rejects with 401 when there is no token or its claims carry no role.
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        SessionUser::from_headers(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)
    }
}
