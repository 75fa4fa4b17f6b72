use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local account as seen by the workflow. The password credential stays
/// inside the store and never appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New, unsaved account with a fresh v7 id.
    pub fn new(fields: AccountFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username: fields.username,
            email: fields.email,
            first_name: fields.first_name,
            last_name: fields.last_name,
            phone_number: fields.phone_number,
            email_confirmed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable profile fields.
    pub fn apply(&mut self, fields: AccountFields) {
        self.username = fields.username;
        self.email = fields.email;
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.phone_number = fields.phone_number;
        self.updated_at = Utc::now();
    }
}

/// Profile fields submitted on registration and by admin forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFields {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
}

/// An account together with its current role names.
#[derive(Debug, Clone)]
pub struct AccountWithRoles {
    pub account: Account,
    pub roles: Vec<String>,
}

/// Binding between a provider identity and a local account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLogin {
    pub provider: String,
    pub provider_key: String,
    pub account_id: Uuid,
    pub provider_display_name: Option<String>,
}

/// Verified identity returned by a completed provider handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub provider: String,
    /// Subject identifier issued by the provider.
    pub provider_key: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Secrets generated when the provider redirect starts; checked when the
/// browser comes back on the callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingHandshake {
    pub provider: String,
    pub csrf_token: String,
    pub pkce_verifier: String,
    pub nonce: String,
}

/// Query parameters of the provider callback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user denied consent.
    pub error: Option<String>,
}
