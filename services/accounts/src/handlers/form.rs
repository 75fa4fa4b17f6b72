//! Form extractor that runs `validator` rules after deserializing.

use axum::Form;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use warden_domain::validation::FieldError;

use crate::error::AccountsError;

/// Works like `axum::Form<T>` and additionally runs `Validate::validate()`.
/// Failures are reported as `AccountsError::Validation`.
pub struct ValidatedForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AccountsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AccountsError::validation("", &rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| AccountsError::Validation(field_errors(&errors)))?;
        Ok(ValidatedForm(value))
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {field} field is invalid."));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    // field_errors() is a hash map
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Digits, spaces and `+-()` only. Empty values pass; the field is optional.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || "+-()".contains(c))
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("The Phone Number field is not a valid phone number.".into());
        Err(err)
    }
}

/// HTML checkboxes submit `on` (or `true`) when ticked and nothing otherwise.
pub fn checked(value: Option<&str>) -> bool {
    matches!(value, Some("on" | "true"))
}

/// Empty optional inputs arrive as empty strings.
pub fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
