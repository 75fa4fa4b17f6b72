//! Signed session tokens (HS256 JWT).

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Identity carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub account_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
    pub expires_at: u64,
}

/// Errors returned when issuing or validating tokens.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims of a session token.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | account id (UUID string) |
/// | `name` | custom | username at sign-in time |
/// | `roles` | custom | role names at sign-in time |
/// | `exp` | `exp` | seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: u64,
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign arbitrary claims with the session secret.
///
/// Claims must carry an `exp` field; [`verify_claims`] requires it.
pub fn sign_claims<T: Serialize>(claims: &T, secret: &str) -> Result<String, SessionError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(SessionError::Signing)
}

/// Verify signature and expiry of a token produced by [`sign_claims`].
pub fn verify_claims<T: DeserializeOwned>(token: &str, secret: &str) -> Result<T, SessionError> {
    decode_with(token, secret, &["exp"])
}

fn decode_with<T: DeserializeOwned>(
    token: &str,
    secret: &str,
    required: &[&str],
) -> Result<T, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(required);

    let data = decode::<T>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;

    Ok(data.claims)
}

/// Issue a session token for an account. Returns the token and its expiry.
pub fn issue_session_token(
    account_id: Uuid,
    username: &str,
    roles: &[String],
    lifetime_secs: u64,
    secret: &str,
) -> Result<(String, u64), SessionError> {
    let exp = now_secs() + lifetime_secs;
    let claims = SessionClaims {
        sub: account_id.to_string(),
        name: username.to_owned(),
        roles: roles.to_vec(),
        exp,
    };
    Ok((sign_claims(&claims, secret)?, exp))
}

/// Validate a session cookie value, returning the identity it carries.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, SessionError> {
    let claims: SessionClaims = decode_with(token, secret, &["exp", "sub"])?;
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| SessionError::Malformed)?;
    Ok(SessionInfo {
        account_id,
        username: claims.name,
        roles: claims.roles,
        expires_at: claims.exp,
    })
}
