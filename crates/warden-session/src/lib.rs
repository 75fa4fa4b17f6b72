//! Session handling for Warden: signed session tokens, the cookies that carry
//! them, and the `SessionIdentity` extractor.

pub mod cookie;
pub mod identity;
pub mod token;

use cookie::CookieSettings;

/// Settings needed to issue and read sessions. Services expose it to the
/// extractor through `axum::extract::FromRef`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC secret signing session and handshake tokens.
    pub secret: String,
    /// Session token lifetime in seconds. Also the cookie `Max-Age` of
    /// persistent sessions.
    pub lifetime_secs: u64,
    pub cookie: CookieSettings,
}
