//! Mock session helpers for handler and extractor tests.
//!
//! Handlers behind `SessionIdentity` expect a signed session cookie. In tests,
//! `MockSession` signs one directly with [`TEST_SESSION_SECRET`].

use uuid::Uuid;

use warden_session::SessionConfig;
use warden_session::cookie::{CookieSettings, SESSION_COOKIE};
use warden_session::token::issue_session_token;

pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-unit-tests-only";

/// Session settings matching the cookies produced by [`MockSession`].
pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SESSION_SECRET.to_owned(),
        lifetime_secs: 3600,
        cookie: CookieSettings {
            domain: None,
            secure: false,
        },
    }
}

/// Configurable identity injected into test requests.
pub struct MockSession {
    pub account_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
}

impl MockSession {
    pub fn new(account_id: Uuid, username: &str, roles: &[&str]) -> Self {
        Self {
            account_id,
            username: username.to_owned(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn admin() -> Self {
        Self::new(Uuid::now_v7(), "admin", &["Admin"])
    }

    pub fn user() -> Self {
        Self::new(Uuid::now_v7(), "user", &["User"])
    }

    /// `Cookie` header value, e.g. `warden_session=<jwt>`.
    pub fn cookie(&self) -> String {
        let (token, _) = issue_session_token(
            self.account_id,
            &self.username,
            &self.roles,
            3600,
            TEST_SESSION_SECRET,
        )
        .expect("sign test session");
        format!("{SESSION_COOKIE}={token}")
    }
}
