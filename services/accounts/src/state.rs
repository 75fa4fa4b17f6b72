use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use warden_domain::password::PasswordPolicy;
use warden_session::SessionConfig;

use crate::infra::db::{DbAccountStore, DbRoleRegistry};
use crate::infra::oidc::GoogleOidcProvider;
use crate::infra::password::BcryptHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session: SessionConfig,
    /// `None` when Google sign-in is not configured.
    pub google: Option<Arc<GoogleOidcProvider>>,
    pub hasher: BcryptHasher,
    pub password_policy: PasswordPolicy,
}

impl AppState {
    pub fn account_store(&self) -> DbAccountStore {
        DbAccountStore {
            db: self.db.clone(),
            hasher: self.hasher.clone(),
            policy: self.password_policy,
        }
    }

    pub fn role_registry(&self) -> DbRoleRegistry {
        DbRoleRegistry {
            db: self.db.clone(),
        }
    }

    pub fn identity_provider(&self) -> Option<Arc<GoogleOidcProvider>> {
        self.google.clone()
    }
}

impl FromRef<AppState> for SessionConfig {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}
