//! Session identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::CookieJar;
use http::request::Parts;
use uuid::Uuid;

use warden_core::error::AppError;

use crate::SessionConfig;
use crate::cookie::SESSION_COOKIE;
use crate::token::{SessionInfo, validate_session_token};

/// Signed-in account read from the session cookie.
///
/// Rejects with 401 if the cookie is absent, tampered with or expired. Role
/// checks (403) are done after extraction with [`SessionIdentity::require_any_role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub account_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
}

impl SessionIdentity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn require_any_role(&self, allowed: &[&str]) -> Result<(), AppError> {
        if allowed.iter().any(|role| self.has_role(role)) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl From<SessionInfo> for SessionIdentity {
    fn from(info: SessionInfo) -> Self {
        Self {
            account_id: info.account_id,
            username: info.username,
            roles: info.roles,
        }
    }
}

impl<S> FromRequestParts<S> for SessionIdentity
where
    SessionConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Resolve synchronously and hand back a 'static future so the borrow of
    // `parts` and `state` does not leak into the returned future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let config = SessionConfig::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let result = jar
            .get(SESSION_COOKIE)
            .ok_or(AppError::Unauthorized)
            .and_then(|cookie| {
                validate_session_token(cookie.value(), &config.secret)
                    .map_err(|_| AppError::Unauthorized)
            })
            .map(SessionIdentity::from);

        async move { result }
    }
}
