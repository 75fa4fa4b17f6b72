use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use validator::Validate;

use warden_session::SessionConfig;
use warden_session::cookie::clear_session_cookie;

use crate::domain::types::AccountFields;
use crate::error::{AccountsError, LOGIN_PATH};
use crate::handlers::form::{ValidatedForm, checked, optional, validate_phone};
use crate::handlers::signed_in_response;
use crate::state::AppState;
use crate::usecase::account::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

// ── POST /account/register ────────────────────────────────────────────────────

/// Registration fields. Admin account creation accepts the same form.
#[derive(Debug, Deserialize, Validate)]
pub struct AccountForm {
    #[validate(length(min = 1, message = "The Username field is required."))]
    pub username: String,
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    pub email: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, message = "The Role field is required."))]
    pub role: String,
}

impl AccountForm {
    pub fn into_fields(self) -> (AccountFields, String, String) {
        let fields = AccountFields {
            username: self.username.trim().to_owned(),
            email: self.email.trim().to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone_number: optional(self.phone_number),
        };
        (fields, self.password, self.role.trim().to_owned())
    }
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<AccountForm>,
) -> Result<impl IntoResponse, AccountsError> {
    let (fields, password, role) = form.into_fields();
    let usecase = RegisterUseCase {
        accounts: state.account_store(),
        roles: state.role_registry(),
        session: state.session.clone(),
    };
    let out = usecase
        .execute(RegisterInput {
            fields,
            password,
            role,
        })
        .await?;
    Ok(signed_in_response(jar, &state.session, out))
}

// ── POST /account/login ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "The Username field is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
    pub remember_me: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<impl IntoResponse, AccountsError> {
    let usecase = LoginUseCase {
        accounts: state.account_store(),
        session: state.session.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            remember_me: checked(form.remember_me.as_deref()),
            username: form.username,
            password: form.password,
        })
        .await?;
    Ok(signed_in_response(jar, &state.session, out))
}

// ── POST /account/logout ──────────────────────────────────────────────────────

pub async fn logout(State(session): State<SessionConfig>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, &session.cookie);
    (jar, Redirect::to(LOGIN_PATH))
}
