//! Role-gated session extractors.
//!
//! The session token only names the account. Its roles are re-read from the
//! store on every request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use warden_domain::role::{ADMIN_ROLE, USER_ROLE};
use warden_session::identity::SessionIdentity;

use crate::error::AccountsError;
use crate::state::AppState;
use crate::usecase::session::AuthorizeSessionUseCase;

/// Session of an account holding `Admin`. 401 without a session or once the
/// account is deleted, 403 for any other role.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionIdentity);

/// Session of an account holding `User` or `Admin`.
#[derive(Debug, Clone)]
pub struct MemberSession(pub SessionIdentity);

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[&str],
) -> Result<SessionIdentity, AccountsError> {
    let identity = SessionIdentity::from_request_parts(parts, state).await?;
    AuthorizeSessionUseCase {
        accounts: state.account_store(),
    }
    .execute(identity, allowed)
    .await
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AccountsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[ADMIN_ROLE]).await.map(Self)
    }
}

impl FromRequestParts<AppState> for MemberSession {
    type Rejection = AccountsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, &[USER_ROLE, ADMIN_ROLE]).await.map(Self)
    }
}
