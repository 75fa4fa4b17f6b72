use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use warden_core::error::AppError;
use warden_domain::validation::FieldError;

/// Where failed external sign-ins send the browser back to.
pub const LOGIN_PATH: &str = "/account/login";

/// Accounts service error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    #[error("Email is already registered.")]
    DuplicateEmail,
    #[error("Username already taken.")]
    DuplicateUsername,
    #[error("One or more fields are invalid.")]
    Validation(Vec<FieldError>),
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("External sign-in failed.")]
    ExternalAuthFailed,
    #[error("Could not create an account for the external sign-in.")]
    AccountCreationFailed,
    #[error("account not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("unauthorized")]
    Unauthorized,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ExternalAuthFailed => "EXTERNAL_AUTH_FAILED",
            Self::AccountCreationFailed => "ACCOUNT_CREATION_FAILED",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<AppError> for AccountsError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Unauthorized => Self::Unauthorized,
            AppError::Forbidden => Self::Forbidden,
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DuplicateEmail | Self::DuplicateUsername => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            // The browser is mid-redirect from the provider; send it back to
            // the login page instead of answering with a JSON body.
            Self::ExternalAuthFailed | Self::AccountCreationFailed => {
                tracing::info!(kind = self.kind(), "external sign-in rejected");
                return (StatusCode::SEE_OTHER, [(header::LOCATION, LOGIN_PATH)]).into_response();
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(errors) = &self {
            body["errors"] = serde_json::json!(errors);
        }
        (status, axum::Json(body)).into_response()
    }
}
