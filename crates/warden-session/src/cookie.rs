//! Cookie builders for the session and the pending external-login handshake.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "warden_session";

/// Cookie name for the signed external-login handshake.
pub const EXTERNAL_LOGIN_COOKIE: &str = "warden_external_login";

/// Path scope of the handshake cookie; covers the callback route.
pub const EXTERNAL_LOGIN_COOKIE_PATH: &str = "/account/external-login";

/// Handshake lifetime in seconds (10 minutes).
pub const EXTERNAL_LOGIN_TTL: u64 = 600;

/// Attributes shared by every cookie the service sets.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// `Domain` attribute; host-only cookie when `None`.
    pub domain: Option<String>,
    /// `Secure` attribute. Disable only for plain-http local development.
    pub secure: bool,
}

fn base(
    name: &'static str,
    value: String,
    path: &'static str,
    max_age: Option<Duration>,
    settings: &CookieSettings,
) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, value))
        .path(path)
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .build();
    if let Some(domain) = &settings.domain {
        cookie.set_domain(domain.clone());
    }
    cookie.set_max_age(max_age);
    cookie
}

/// Set the session cookie.
///
/// `max_age` is `None` for an ephemeral session (cookie dropped when the
/// browser closes) and `Some(secs)` for a persistent one.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use warden_session::cookie::{set_session_cookie, CookieSettings, SESSION_COOKIE};
///
/// let settings = CookieSettings { domain: Some("example.com".into()), secure: true };
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), None, &settings);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), None);
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    token: String,
    max_age: Option<u64>,
    settings: &CookieSettings,
) -> CookieJar {
    let max_age = max_age.map(|secs| Duration::seconds(secs as i64));
    jar.add(base(SESSION_COOKIE, token, "/", max_age, settings))
}

/// Expire the session cookie.
pub fn clear_session_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    jar.add(base(
        SESSION_COOKIE,
        String::new(),
        "/",
        Some(Duration::ZERO),
        settings,
    ))
}

/// Set the handshake cookie carrying the signed pending external login.
pub fn set_external_login_cookie(
    jar: CookieJar,
    value: String,
    settings: &CookieSettings,
) -> CookieJar {
    jar.add(base(
        EXTERNAL_LOGIN_COOKIE,
        value,
        EXTERNAL_LOGIN_COOKIE_PATH,
        Some(Duration::seconds(EXTERNAL_LOGIN_TTL as i64)),
        settings,
    ))
}

/// Expire the handshake cookie.
pub fn clear_external_login_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    jar.add(base(
        EXTERNAL_LOGIN_COOKIE,
        String::new(),
        EXTERNAL_LOGIN_COOKIE_PATH,
        Some(Duration::ZERO),
        settings,
    ))
}
