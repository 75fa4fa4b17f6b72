use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use warden_core::serde::to_rfc3339_ms;

use crate::domain::types::{Account, AccountFields, AccountWithRoles};
use crate::error::AccountsError;
use crate::handlers::account::AccountForm;
use crate::handlers::form::{ValidatedForm, optional, validate_phone};
use crate::handlers::guard::AdminSession;
use crate::state::AppState;
use crate::usecase::admin::{
    CreateAccountInput, CreateAccountUseCase, DeleteAccountUseCase, GetAccountForEditUseCase,
    ListAccountsUseCase, UpdateAccountInput, UpdateAccountUseCase,
};

const ADMIN_USERS_PATH: &str = "/admin/users";

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email_confirmed: bool,
    pub roles: Vec<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<AccountWithRoles> for AccountResponse {
    fn from(AccountWithRoles { account, roles }: AccountWithRoles) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            phone_number: account.phone_number,
            email_confirmed: account.email_confirmed,
            roles,
            created_at: account.created_at,
        }
    }
}

// ── GET /admin/users ──────────────────────────────────────────────────────────

pub async fn list_accounts(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AccountsError> {
    let usecase = ListAccountsUseCase {
        accounts: state.account_store(),
    };
    let accounts = usecase.execute().await?;
    let body: Vec<AccountResponse> = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(body))
}

// ── POST /admin/users ─────────────────────────────────────────────────────────

pub async fn create_account(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<AccountForm>,
) -> Result<impl IntoResponse, AccountsError> {
    let (fields, password, role) = form.into_fields();
    let usecase = CreateAccountUseCase {
        accounts: state.account_store(),
        roles: state.role_registry(),
    };
    let account = usecase
        .execute(CreateAccountInput {
            fields,
            password,
            role,
        })
        .await?;
    tracing::info!(admin_id = %admin.account_id, account_id = %account.id, "admin created account");
    Ok(Redirect::to(ADMIN_USERS_PATH))
}

// ── GET /admin/users/{id} ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EditAccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: String,
}

fn edit_response(account: Account, role: String) -> EditAccountResponse {
    EditAccountResponse {
        id: account.id,
        username: account.username,
        email: account.email,
        first_name: account.first_name,
        last_name: account.last_name,
        phone_number: account.phone_number,
        role,
    }
}

pub async fn get_account(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AccountsError> {
    let usecase = GetAccountForEditUseCase {
        accounts: state.account_store(),
    };
    let out = usecase.execute(id).await?;
    Ok(Json(edit_response(out.account, out.role)))
}

// ── POST /admin/users/{id} ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct EditAccountForm {
    #[validate(length(min = 1, message = "The First Name field is required."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "The Last Name field is required."))]
    pub last_name: String,
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, message = "The Username field is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "The Role field is required."))]
    pub role: String,
}

pub async fn update_account(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedForm(form): ValidatedForm<EditAccountForm>,
) -> Result<impl IntoResponse, AccountsError> {
    let usecase = UpdateAccountUseCase {
        accounts: state.account_store(),
        roles: state.role_registry(),
    };
    usecase
        .execute(UpdateAccountInput {
            id,
            fields: AccountFields {
                username: form.username.trim().to_owned(),
                email: form.email.trim().to_owned(),
                first_name: form.first_name.trim().to_owned(),
                last_name: form.last_name.trim().to_owned(),
                phone_number: optional(form.phone_number),
            },
            role: form.role.trim().to_owned(),
        })
        .await?;
    Ok(Redirect::to(ADMIN_USERS_PATH))
}

// ── POST /admin/users/{id}/delete ─────────────────────────────────────────────

pub async fn delete_account(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AccountsError> {
    let usecase = DeleteAccountUseCase {
        accounts: state.account_store(),
    };
    usecase.execute(id).await?;
    Ok(Redirect::to(ADMIN_USERS_PATH))
}
