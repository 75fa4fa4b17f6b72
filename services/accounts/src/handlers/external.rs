use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use warden_session::cookie::{
    EXTERNAL_LOGIN_COOKIE, EXTERNAL_LOGIN_TTL, clear_external_login_cookie,
    set_external_login_cookie,
};
use warden_session::token::{now_secs, sign_claims, verify_claims};

use crate::domain::types::{CallbackParams, PendingHandshake};
use crate::error::AccountsError;
use crate::handlers::form::ValidatedForm;
use crate::handlers::signed_in_response;
use crate::state::AppState;
use crate::usecase::external::{
    ExternalCallbackInput, ExternalLoginCallbackUseCase, ExternalLoginStartUseCase,
};

/// Pending handshake as stored in the signed handshake cookie.
#[derive(Debug, Serialize, Deserialize)]
struct HandshakeClaims {
    #[serde(flatten)]
    pending: PendingHandshake,
    exp: u64,
}

// ── POST /account/external-login ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct ExternalLoginForm {
    #[validate(length(min = 1, message = "The Provider field is required."))]
    pub provider: String,
}

pub async fn external_login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<ExternalLoginForm>,
) -> Result<impl IntoResponse, AccountsError> {
    let usecase = ExternalLoginStartUseCase {
        provider: state.identity_provider(),
    };
    let (url, pending) = usecase.execute(&form.provider)?;

    let claims = HandshakeClaims {
        pending,
        exp: now_secs() + EXTERNAL_LOGIN_TTL,
    };
    let value = sign_claims(&claims, &state.session.secret)
        .map_err(|e| AccountsError::Internal(anyhow::Error::new(e).context("sign handshake")))?;
    let jar = set_external_login_cookie(jar, value, &state.session.cookie);
    Ok((jar, Redirect::to(&url)))
}

// ── GET /account/external-login/callback ──────────────────────────────────────

pub async fn external_login_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    // Expired, tampered or missing handshakes all count as "no pending login".
    let pending = jar
        .get(EXTERNAL_LOGIN_COOKIE)
        .and_then(|c| verify_claims::<HandshakeClaims>(c.value(), &state.session.secret).ok())
        .map(|claims| claims.pending);
    let jar = clear_external_login_cookie(jar, &state.session.cookie);

    let usecase = ExternalLoginCallbackUseCase {
        accounts: state.account_store(),
        roles: state.role_registry(),
        provider: state.identity_provider(),
        session: state.session.clone(),
    };
    match usecase
        .execute(ExternalCallbackInput { params, pending })
        .await
    {
        Ok(out) => signed_in_response(jar, &state.session, out).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}
