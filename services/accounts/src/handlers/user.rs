use axum::{Json, extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use warden_core::serde::to_rfc3339_ms;
use warden_domain::account::greeting_name;

use crate::domain::repository::AccountStore;
use crate::error::AccountsError;
use crate::handlers::guard::MemberSession;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    /// First name, or the username when no first name is set.
    pub display_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub roles: Vec<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

// ── GET /user ─────────────────────────────────────────────────────────────────

pub async fn get_profile(
    MemberSession(identity): MemberSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AccountsError> {
    let store = state.account_store();
    // The session may outlive an account an admin deleted.
    let account = store
        .find_by_id(identity.account_id)
        .await?
        .ok_or(AccountsError::Unauthorized)?;
    let roles = store.roles_of(account.id).await?;

    Ok(Json(ProfileResponse {
        id: account.id,
        display_name: greeting_name(&account.first_name, &account.username).to_owned(),
        username: account.username,
        email: account.email,
        first_name: account.first_name,
        last_name: account.last_name,
        phone_number: account.phone_number,
        roles,
        created_at: account.created_at,
    }))
}
